pub mod config;
pub mod core;
pub mod logging;

pub use crate::config::{CalendarConfig, ChartConfig, ConfigError};
pub use crate::core::data::*;
pub use crate::core::io::*;
pub use crate::logging::{init_logging, LoggingError};
