pub mod config;
pub mod forecast;

pub use config::Config;
pub use forecast::{build_chart, forecast_closes, Forecast, ForecastRow};
