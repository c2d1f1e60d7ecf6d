pub mod config;
pub mod overlay;

pub use config::Config;
pub use overlay::*;
