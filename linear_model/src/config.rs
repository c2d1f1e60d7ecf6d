use anyhow::Result;
use clap::Parser;
use serde::Deserialize;

/// Configuration for the sliding-window close price forecast
#[derive(Debug, Clone, Deserialize, Parser)]
#[command(name = "linear_model")]
#[command(about = "Sliding-window least squares forecast of closing prices")]
pub struct Config {
    /// Market history file (symbol,date,_,open,high,low,close[,volume])
    #[arg(value_name = "DATA_FILE")]
    pub data_file: String,

    /// Window length N; every prediction uses 2N closes
    #[arg(long, default_value_t = 5)]
    pub window: usize,

    /// Chart output path
    #[arg(long, default_value = "linear_model.png")]
    pub output: String,

    /// Optional TOML file with chart settings
    #[arg(long)]
    pub chart_config: Option<String>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Print predictions as JSON instead of a table
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            anyhow::bail!("window must be greater than 0");
        }
        if self.output.is_empty() {
            anyhow::bail!("output path must not be empty");
        }
        Ok(())
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config() -> Config {
        Config {
            data_file: "AAPL.csv".to_string(),
            window: 5,
            output: "out.png".to_string(),
            chart_config: None,
            log_level: "info".to_string(),
            json: false,
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = config();
        assert!(config.validate().is_ok());

        config.window = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_command_line_defaults() {
        let config = Config::parse_from(["linear_model", "AAPL.csv"]);
        assert_eq!(config.window, 5);
        assert_eq!(config.output, "linear_model.png");
        assert!(config.chart_config.is_none());
        assert!(!config.json);

        let config = Config::parse_from(["linear_model", "AAPL.csv", "--window", "3", "--json"]);
        assert_eq!(config.window, 3);
        assert!(config.json);
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "data_file = \"AAPL.csv\"").unwrap();
        writeln!(file, "window = 8").unwrap();
        writeln!(file, "output = \"charts/aapl.png\"").unwrap();
        writeln!(file, "chart_config = \"chart.toml\"").unwrap();
        writeln!(file, "log_level = \"debug\"").unwrap();
        writeln!(file, "json = true").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.window, 8);
        assert_eq!(config.chart_config.as_deref(), Some("chart.toml"));
        assert!(config.json);
        assert!(config.validate().is_ok());
    }
}
