use anyhow::Result;
use clap::Parser;
use moving_average::*;
use pricefit::{init_logging, read_price_bars, render_chart, ChartConfig};
use tracing::{info, warn};

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config.log_level)?;
    config.validate()?;

    let chart_config = ChartConfig::load_or_default(config.chart_config.as_deref())?;

    info!(file = %config.data_file, "loading market data");
    let bars = read_price_bars(&config.data_file)?;

    let chart = if config.bollinger {
        let Some(overlay) = band_overlay(&bars, config.bollinger_window, config.multiplier) else {
            warn!(
                window = config.bollinger_window,
                bars = bars.len(),
                "not enough bars for Bollinger bands"
            );
            return Ok(());
        };

        if config.json {
            println!("{}", serde_json::to_string_pretty(&overlay)?);
        } else {
            println!("{:<12} {:>10} {:>10} {:>10}", "Date", "Lower", "SMA", "Upper");
            println!("{}", "-".repeat(45));
            let b = &overlay.bands;
            for (i, date) in overlay.dates.iter().enumerate() {
                println!(
                    "{:<12} {:>10.2} {:>10.2} {:>10.2}",
                    date.format("%Y-%m-%d"),
                    b.lower_band[i],
                    b.middle_band[i],
                    b.upper_band[i]
                );
            }
        }
        bands_chart(&bars, &overlay)
    } else {
        let lines = moving_averages(&bars, &config.windows);
        if lines.is_empty() {
            warn!(bars = bars.len(), "no moving average window fits the history");
            return Ok(());
        }

        if config.json {
            println!("{}", serde_json::to_string_pretty(&lines)?);
        } else {
            for line in &lines {
                match (line.dates.last(), line.values.last()) {
                    (Some(date), Some(value)) => println!(
                        "SMA {:>3}: {} points, last {:.2} on {}",
                        line.window,
                        line.values.len(),
                        value,
                        date.format("%Y-%m-%d")
                    ),
                    _ => continue,
                }
            }
        }
        averages_chart(&bars, &lines)
    };

    if let Some(chart) = chart {
        render_chart(&config.output, &chart_config, &chart)?;
        info!(path = %config.output, "chart written");
    }

    Ok(())
}
