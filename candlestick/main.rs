use anyhow::Result;
use candlestick::*;
use clap::Parser;
use pricefit::{init_logging, read_price_bars, render_chart, ChartConfig};
use tracing::info;

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config.log_level)?;
    config.validate()?;

    let chart_config = ChartConfig::load_or_default(config.chart_config.as_deref())?;

    info!(file = %config.data_file, "loading market data");
    let bars = tail(&read_price_bars(&config.data_file)?, config.bars);

    let counts = CandleCounts::of(&bars);
    println!(
        "{}: {} bars, {} rising, {} falling",
        bars.symbol,
        bars.len(),
        counts.rising,
        counts.falling
    );

    if let Some(chart) = candle_chart(&bars) {
        render_chart(&config.output, &chart_config, &chart)?;
        info!(path = %config.output, "chart written");
    }

    Ok(())
}
