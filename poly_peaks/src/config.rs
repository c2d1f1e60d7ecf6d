use anyhow::Result;
use clap::Parser;
use serde::Deserialize;

/// Configuration for polynomial peak detection on a price difference
#[derive(Debug, Clone, Deserialize, Parser)]
#[command(name = "poly_peaks")]
#[command(about = "Fit a polynomial to the close difference of two symbols and locate its peaks")]
pub struct Config {
    /// First market history file (minuend)
    #[arg(value_name = "FIRST_FILE")]
    pub first_file: String,

    /// Second market history file (subtrahend)
    #[arg(value_name = "SECOND_FILE")]
    pub second_file: String,

    /// Degree of the fitted polynomial
    #[arg(long, default_value_t = 5)]
    pub degree: usize,

    /// Points used to draw the fitted polynomial
    #[arg(long, default_value_t = 200)]
    pub samples: usize,

    /// Chart output path
    #[arg(long, default_value = "poly_peaks.png")]
    pub output: String,

    /// Optional TOML file with chart settings
    #[arg(long)]
    pub chart_config: Option<String>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Print the fit and peaks as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.degree == 0 || self.degree > 15 {
            anyhow::bail!("degree must be in range [1, 15], got {}", self.degree);
        }
        if self.samples < 2 {
            anyhow::bail!("samples must be at least 2");
        }
        if self.first_file == self.second_file {
            anyhow::bail!("the two data files must differ");
        }
        Ok(())
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}
