use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Deserialize;

/// Configuration for the tabular price summaries
#[derive(Debug, Clone, Deserialize, Parser)]
#[command(name = "price_summary")]
#[command(about = "Average true range, weekday averages and weekly OHLC summaries")]
pub struct Config {
    /// Market history file (symbol,date,_,open,high,low,close[,volume])
    #[arg(value_name = "DATA_FILE")]
    pub data_file: String,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Print results as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Subcommand)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Average true range of the most recent bars
    Atr {
        /// Number of recent bars
        #[arg(long, default_value_t = 20)]
        window: usize,
    },
    /// Average close per weekday
    Weekdays {
        /// Optional TOML file with weekday names
        #[arg(long)]
        calendar_config: Option<String>,
    },
    /// Weekly open/high/low/close written as CSV
    Weekly {
        /// CSV output path
        #[arg(long, default_value = "summary.csv")]
        output: String,

        /// Only summarise the first bars of the file
        #[arg(long)]
        bars: Option<usize>,
    },
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        match &self.command {
            Command::Atr { window } if *window == 0 => {
                anyhow::bail!("window must be greater than 0")
            }
            Command::Weekly { output, .. } if output.is_empty() => {
                anyhow::bail!("output path must not be empty")
            }
            Command::Weekly { bars: Some(0), .. } => {
                anyhow::bail!("bars must be greater than 0")
            }
            _ => Ok(()),
        }
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}
