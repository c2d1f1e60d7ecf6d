pub mod config;
pub mod report;

pub use config::{Command, Config};
pub use report::*;
