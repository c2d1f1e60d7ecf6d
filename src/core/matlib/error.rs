use thiserror::Error;

/// Failures raised by the dense linear-algebra routines.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LinalgError {
    #[error("shape mismatch in {context}: expected {expected}, got {got}")]
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("insufficient data: need at least {needed} values, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("non-finite value encountered in {0}")]
    NonFinite(&'static str),

    #[error("{routine} did not converge after {iterations} iterations")]
    NoConvergence {
        routine: &'static str,
        iterations: usize,
    },
}

pub(crate) type Result<T> = std::result::Result<T, LinalgError>;
