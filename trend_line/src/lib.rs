pub mod analysis;
pub mod config;

pub use analysis::{analyze_trend, build_chart, ProjectedLevels, TrendAnalysis};
pub use config::Config;
