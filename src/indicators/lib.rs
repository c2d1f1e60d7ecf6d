mod error;

pub mod model;
pub mod summary;
pub mod trend;
pub mod volatility;

pub use error::*;
pub use model::*;
pub use summary::*;
pub use trend::*;
pub use volatility::*;
