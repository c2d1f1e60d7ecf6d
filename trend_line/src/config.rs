use anyhow::Result;
use clap::Parser;
use serde::Deserialize;

/// Configuration for pivot trend, support and resistance lines
#[derive(Debug, Clone, Deserialize, Parser)]
#[command(name = "trend_line")]
#[command(about = "Fit pivot point trend, support and resistance lines and project them forward")]
pub struct Config {
    /// Market history file (symbol,date,_,open,high,low,close[,volume])
    #[arg(value_name = "DATA_FILE")]
    pub data_file: String,

    /// Business days to project the lines past the last bar
    #[arg(long, default_value_t = 5)]
    pub projected_days: usize,

    /// Chart output path
    #[arg(long, default_value = "trend_line.png")]
    pub output: String,

    /// Optional TOML file with chart settings
    #[arg(long)]
    pub chart_config: Option<String>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Print the lines and projections as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.projected_days > 260 {
            anyhow::bail!(
                "projected_days must be at most 260 (one year), got {}",
                self.projected_days
            );
        }
        if self.output.is_empty() {
            anyhow::bail!("output path must not be empty");
        }
        Ok(())
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}
