use tracing::trace;

use crate::error::{LinalgError, Result};
use crate::matrix::Matrix;
use crate::svd::SingularValueDecomp;

/// Outcome of a least-squares solve together with its conditioning.
#[derive(Debug, Clone, PartialEq)]
pub struct LeastSquares {
    /// Minimum-norm minimiser of `|A x - b|`.
    pub solution: Vec<f64>,
    /// Numerical rank of `A` under the relative cutoff.
    pub rank: usize,
    /// Singular values of `A`, largest first.
    pub singular_values: Vec<f64>,
}

impl LeastSquares {
    /// `sigma_max / sigma_min`; infinite when `A` is singular.
    pub fn condition_number(&self) -> f64 {
        match (self.singular_values.first(), self.singular_values.last()) {
            (Some(&max), Some(&min)) if min > 0.0 => max / min,
            _ => f64::INFINITY,
        }
    }

    /// True when fewer independent directions were found than unknowns.
    pub fn is_rank_deficient(&self) -> bool {
        self.rank < self.solution.len()
    }
}

/// Relative singular value cutoff: `eps * max(rows, cols)`.
pub fn default_rcond(rows: usize, cols: usize) -> f64 {
    f64::EPSILON * rows.max(cols).max(1) as f64
}

/// Solve `min |A x - b|_2` through an SVD of `A`.
///
/// Works for square, tall and wide `A`. Singular values at or below
/// [`default_rcond`] times the largest one are treated as zero, so a
/// rank-deficient or underdetermined system yields the minimum-norm
/// solution; the rank is reported for callers that need to flag it.
pub fn solve_lstsq(a: &Matrix, b: &[f64]) -> Result<LeastSquares> {
    solve_lstsq_with_rcond(a, b, default_rcond(a.rows(), a.cols()))
}

pub fn solve_lstsq_with_rcond(a: &Matrix, b: &[f64], rcond: f64) -> Result<LeastSquares> {
    if b.len() != a.rows() {
        return Err(LinalgError::ShapeMismatch {
            context: "least-squares right-hand side",
            expected: a.rows(),
            got: b.len(),
        });
    }
    if b.iter().any(|v| !v.is_finite()) {
        return Err(LinalgError::NonFinite("least-squares right-hand side"));
    }

    let svd = SingularValueDecomp::decompose(a)?;
    let solution = svd.backsub(rcond, b)?;
    if solution.iter().any(|v| !v.is_finite()) {
        return Err(LinalgError::NonFinite("least-squares solution"));
    }

    let rank = svd.rank(rcond);
    trace!(rows = a.rows(), cols = a.cols(), rank, "least-squares solve");

    Ok(LeastSquares {
        solution,
        rank,
        singular_values: svd.singular_values().to_vec(),
    })
}

/// Residual norm `|A x - b|_2`.
pub fn residual_norm(a: &Matrix, x: &[f64], b: &[f64]) -> Result<f64> {
    let ax = a.mul_vec(x)?;
    if ax.len() != b.len() {
        return Err(LinalgError::ShapeMismatch {
            context: "residual",
            expected: ax.len(),
            got: b.len(),
        });
    }
    Ok(ax
        .iter()
        .zip(b)
        .map(|(p, q)| (p - q) * (p - q))
        .sum::<f64>()
        .sqrt())
}
