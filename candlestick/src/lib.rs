pub mod config;
pub mod candles;

pub use candles::{candle_chart, tail, CandleCounts};
pub use config::Config;
