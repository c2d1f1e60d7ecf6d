pub mod atr;
pub mod bollinger_bands;

pub use atr::*;
pub use bollinger_bands::*;
