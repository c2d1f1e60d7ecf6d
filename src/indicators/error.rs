use matlib::LinalgError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("window size must be at least 1")]
    InvalidWindow,

    #[error("insufficient data: need at least {needed} values, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("length mismatch in {context}: expected {expected}, got {got}")]
    LengthMismatch {
        context: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("invalid domain [{min}, {max}]")]
    InvalidDomain { min: f64, max: f64 },

    /// A single window system failed to solve.
    #[error("window {index}: {source}")]
    Window {
        index: usize,
        #[source]
        source: LinalgError,
    },

    #[error(transparent)]
    Fit(#[from] LinalgError),
}

pub(crate) type Result<T> = std::result::Result<T, ModelError>;

pub(crate) fn check_len(context: &'static str, expected: usize, got: usize) -> Result<()> {
    if expected != got {
        return Err(ModelError::LengthMismatch {
            context,
            expected,
            got,
        });
    }
    Ok(())
}
