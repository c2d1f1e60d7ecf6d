use anyhow::Result;
use clap::Parser;
use serde::Deserialize;

/// Configuration for moving average and Bollinger band overlays
#[derive(Debug, Clone, Deserialize, Parser)]
#[command(name = "moving_average")]
#[command(about = "Simple moving averages and Bollinger bands of closing prices")]
pub struct Config {
    /// Market history file (symbol,date,_,open,high,low,close[,volume])
    #[arg(value_name = "DATA_FILE")]
    pub data_file: String,

    /// Comma separated moving average windows
    #[arg(long, value_delimiter = ',', default_value = "5,10,15")]
    pub windows: Vec<usize>,

    /// Draw Bollinger bands instead of the moving averages
    #[arg(long, default_value_t = false)]
    pub bollinger: bool,

    /// Bollinger band window
    #[arg(long, default_value_t = 5)]
    pub bollinger_window: usize,

    /// Band width in standard deviations
    #[arg(long, default_value_t = 2.0)]
    pub multiplier: f64,

    /// Chart output path
    #[arg(long, default_value = "moving_average.png")]
    pub output: String,

    /// Optional TOML file with chart settings
    #[arg(long)]
    pub chart_config: Option<String>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Print the computed series as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.bollinger {
            if self.bollinger_window < 2 {
                anyhow::bail!("bollinger_window must be at least 2");
            }
            if self.multiplier.is_nan() || self.multiplier <= 0.0 {
                anyhow::bail!("multiplier must be positive, got {}", self.multiplier);
            }
        } else {
            if self.windows.is_empty() {
                anyhow::bail!("at least one moving average window is required");
            }
            if self.windows.contains(&0) {
                anyhow::bail!("moving average windows must be greater than 0");
            }
        }
        Ok(())
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}
