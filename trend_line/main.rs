use anyhow::Result;
use clap::Parser;
use pricefit::{init_logging, read_price_bars, render_chart, ChartConfig};
use tracing::info;
use trend_line::*;

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config.log_level)?;
    config.validate()?;

    let chart_config = ChartConfig::load_or_default(config.chart_config.as_deref())?;

    info!(file = %config.data_file, "loading market data");
    let bars = read_price_bars(&config.data_file)?;
    let analysis = analyze_trend(&bars, config.projected_days)?;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        println!("{} trend lines over {} bars\n", analysis.symbol, bars.len());
        for (name, line) in [
            ("Trend", analysis.lines.trend),
            ("Support", analysis.lines.support),
            ("Resistance", analysis.lines.resistance),
        ] {
            println!(
                "{:<12} slope {:>10.4} per day, intercept {:>10.4}",
                name, line.slope, line.intercept
            );
        }

        if !analysis.projection.is_empty() {
            println!();
            println!("{:<12} {:>12} {:>12} {:>12}", "Date", "Support", "Trend", "Resistance");
            println!("{}", "-".repeat(51));
            for p in &analysis.projection {
                println!(
                    "{:<12} {:>12.2} {:>12.2} {:>12.2}",
                    p.date.format("%Y-%m-%d"),
                    p.support,
                    p.trend,
                    p.resistance
                );
            }
        }
    }

    if let Some(chart) = build_chart(&bars, &analysis) {
        render_chart(&config.output, &chart_config, &chart)?;
        info!(path = %config.output, "chart written");
    }

    Ok(())
}
