use anyhow::Result;
use clap::Parser;
use indicators::ModelError;
use linear_model::*;
use pricefit::{init_logging, read_price_bars, render_chart, ChartConfig};
use tracing::{info, warn};

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config.log_level)?;
    config.validate()?;

    let chart_config = ChartConfig::load_or_default(config.chart_config.as_deref())?;

    info!(file = %config.data_file, "loading market data");
    let bars = read_price_bars(&config.data_file)?;

    let forecast = match forecast_closes(&bars, config.window) {
        Ok(forecast) => forecast,
        Err(e @ ModelError::InsufficientData { .. }) => {
            warn!("{}; nothing to forecast", e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if config.json {
        println!("{}", serde_json::to_string_pretty(&forecast)?);
    } else {
        println!("{} linear model, N = {}\n", forecast.symbol, forecast.window);
        println!("{:<12} {:>12} {:>12} {:>6} {:>12}", "Date", "Predicted", "Actual", "Rank", "Cond");
        println!("{}", "-".repeat(58));
        for row in &forecast.rows {
            let actual = row
                .actual
                .map_or_else(|| "-".to_string(), |a| format!("{:.2}", a));
            println!(
                "{:<12} {:>12.2} {:>12} {:>6} {:>12.3e}",
                row.date.format("%Y-%m-%d"),
                row.predicted,
                actual,
                row.rank,
                row.condition_number
            );
        }
    }

    if let Some(chart) = build_chart(&bars, &forecast) {
        render_chart(&config.output, &chart_config, &chart)?;
        info!(path = %config.output, "chart written");
    }

    Ok(())
}
