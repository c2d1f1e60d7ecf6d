mod chart;
pub mod palette;
pub use chart::*;
