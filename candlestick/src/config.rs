use anyhow::Result;
use clap::Parser;
use serde::Deserialize;

/// Configuration for the candlestick chart
#[derive(Debug, Clone, Deserialize, Parser)]
#[command(name = "candlestick")]
#[command(about = "Daily OHLC candlestick chart")]
pub struct Config {
    /// Market history file (symbol,date,_,open,high,low,close[,volume])
    #[arg(value_name = "DATA_FILE")]
    pub data_file: String,

    /// Only chart the most recent bars
    #[arg(long)]
    pub bars: Option<usize>,

    /// Chart output path
    #[arg(long, default_value = "candlestick.png")]
    pub output: String,

    /// Optional TOML file with chart settings
    #[arg(long)]
    pub chart_config: Option<String>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.bars == Some(0) {
            anyhow::bail!("bars must be greater than 0");
        }
        Ok(())
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}
