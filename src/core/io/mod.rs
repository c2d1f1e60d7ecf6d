mod calendar;
mod market;

pub use calendar::*;
pub use market::*;

pub mod write;
pub use write::*;
