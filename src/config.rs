use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Presentation settings shared by every chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Output image width in pixels
    pub width: u32,
    /// Output image height in pixels
    pub height: u32,
    pub title_font_size: u32,
    pub label_font_size: u32,
    /// Approximate number of date labels on the x axis
    pub x_labels: usize,
    /// Background RGB
    pub background: [u8; 3],
    /// Overrides the y axis description chosen by the tool
    pub y_label: Option<String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title_font_size: 30,
            label_font_size: 16,
            x_labels: 12,
            background: [240, 240, 240],
            y_label: None,
        }
    }
}

impl ChartConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config: Self = load_toml(path)?;
        config.validate()?;
        Ok(config)
    }

    /// The file at `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&str>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 200 || self.height < 150 {
            return Err(ConfigError::Invalid(format!(
                "chart size {}x{} is too small",
                self.width, self.height
            )));
        }
        if self.x_labels == 0 {
            return Err(ConfigError::Invalid("x_labels must be greater than 0".to_string()));
        }
        Ok(())
    }
}

/// Weekday names used when printing per-weekday results, Monday first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub weekday_names: [String; 7],
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            weekday_names: ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"]
                .map(String::from),
        }
    }
}

impl CalendarConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        load_toml(path)
    }

    pub fn load_or_default(path: Option<&str>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::from_file)
    }

    /// Name of weekday `index` (Monday = 0); out of range indices wrap.
    pub fn weekday_name(&self, index: u32) -> &str {
        &self.weekday_names[index as usize % 7]
    }
}

fn load_toml<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_chart_config_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "width = 1600").unwrap();
        writeln!(file, "y_label = \"Close (USD)\"").unwrap();

        let config = ChartConfig::from_file(file.path()).unwrap();
        assert_eq!(config.width, 1600);
        assert_eq!(config.height, 720);
        assert_eq!(config.y_label.as_deref(), Some("Close (USD)"));
    }

    #[test]
    fn test_chart_config_validation() {
        let mut config = ChartConfig::default();
        assert!(config.validate().is_ok());
        config.width = 10;
        assert!(config.validate().is_err());

        assert_eq!(ChartConfig::load_or_default(None).unwrap(), ChartConfig::default());
    }

    #[test]
    fn test_chart_config_bad_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "width = \"wide\"").unwrap();
        assert!(matches!(
            ChartConfig::from_file(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_calendar_names() {
        let calendar = CalendarConfig::default();
        assert_eq!(calendar.weekday_name(0), "MON");
        assert_eq!(calendar.weekday_name(4), "FRI");

        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "weekday_names = [\"Mo\", \"Di\", \"Mi\", \"Do\", \"Fr\", \"Sa\", \"So\"]"
        )
        .unwrap();
        let german = CalendarConfig::from_file(file.path()).unwrap();
        assert_eq!(german.weekday_name(2), "Mi");
    }
}
