use anyhow::Result;
use clap::Parser;
use price_summary::*;
use pricefit::{init_logging, read_price_bars, write_weekly_summaries, CalendarConfig};
use tracing::{info, warn};

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config.log_level)?;
    config.validate()?;

    info!(file = %config.data_file, "loading market data");
    let bars = read_price_bars(&config.data_file)?;

    match &config.command {
        Command::Atr { window } => {
            let rows = atr_report(&bars, *window)?;
            if config.json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("{} average true range, last {} bars\n", bars.symbol, window);
                for row in &rows {
                    println!("{}  {:.4}", row.date.format("%Y-%m-%d"), row.atr);
                }
            }
        }
        Command::Weekdays { calendar_config } => {
            let calendar = CalendarConfig::load_or_default(calendar_config.as_deref())?;
            let rows = weekday_report(&bars, &calendar)?;
            if config.json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("{} average close by weekday\n", bars.symbol);
                for row in &rows {
                    let average = row
                        .average
                        .map_or_else(|| "-".to_string(), |a| format!("{:.2}", a));
                    let tag = match row.extreme {
                        Some(Extreme::Max) => " (max)",
                        Some(Extreme::Min) => " (min)",
                        None => "",
                    };
                    println!("{:<6} {:>10}{}", row.name, average, tag);
                }
            }
        }
        Command::Weekly { output, bars: limit } => {
            let weeks = weekly_report(&bars, *limit)?;
            if weeks.is_empty() {
                warn!("no complete Monday to Friday span in the data");
            }
            write_weekly_summaries(output, &bars.symbol, &weeks)?;
            info!(path = %output, weeks = weeks.len(), "weekly summaries written");
            if config.json {
                println!("{}", serde_json::to_string_pretty(&weeks)?);
            }
        }
    }

    Ok(())
}
