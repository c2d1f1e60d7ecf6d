pub mod config;
pub mod spread;

pub use config::Config;
pub use spread::{align_closes, analyze_spread, build_chart, AlignedCloses, Peak, SpreadAnalysis};
