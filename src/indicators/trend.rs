pub mod extrema;
pub mod lines;
pub mod ma;

pub use extrema::*;
pub use lines::*;
pub use ma::*;
