pub mod predictor;
pub mod windows;

pub use predictor::*;
pub use windows::*;
