
mod error;
mod matrix;
mod svd;
mod lstsq;
mod poly;
mod roots;

pub use error::*;
pub use matrix::*;
pub use svd::*;
pub use lstsq::*;
pub use poly::*;
pub use roots::*;

pub use num_complex::Complex64;
