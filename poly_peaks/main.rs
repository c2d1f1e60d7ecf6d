use anyhow::Result;
use clap::Parser;
use indicators::ExtremumKind;
use poly_peaks::*;
use pricefit::{format_day, init_logging, read_price_bars, render_chart, ChartConfig};
use tracing::{info, warn};

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config.log_level)?;
    config.validate()?;

    let chart_config = ChartConfig::load_or_default(config.chart_config.as_deref())?;

    info!(first = %config.first_file, second = %config.second_file, "loading market data");
    let first = read_price_bars(&config.first_file)?;
    let second = read_price_bars(&config.second_file)?;

    let analysis = analyze_spread(&first, &second, config.degree)?;
    if analysis.rank < analysis.coefficients.len() {
        warn!(rank = analysis.rank, "polynomial fit is rank deficient");
    }

    if config.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        println!("{} degree {} fit over {} days\n", analysis.label, config.degree, analysis.x.len());
        println!("{:<12} {:>10} {:>12}  {}", "Date", "Day", "Value", "Kind");
        println!("{}", "-".repeat(48));
        for peak in &analysis.peaks {
            let date = peak.date.map(format_day).unwrap_or_default();
            let kind = match peak.kind {
                ExtremumKind::Boundary => "boundary",
                ExtremumKind::Maximum => "peak",
                ExtremumKind::Minimum => "valley",
                ExtremumKind::Stationary => "flat",
            };
            println!("{:<12} {:>10.2} {:>12.4}  {}", date, peak.x, peak.value, kind);
        }
    }

    let chart = build_chart(&analysis, config.degree, config.samples);
    render_chart(&config.output, &chart_config, &chart)?;
    info!(path = %config.output, "chart written");

    Ok(())
}
