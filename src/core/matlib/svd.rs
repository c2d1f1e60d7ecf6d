use crate::error::{LinalgError, Result};
use crate::matrix::Matrix;

const EPSILON: f64 = 1e-60;
const MAX_SWEEPS: usize = 80;

/// Thin singular value decomposition `A = U diag(w) V'`.
///
/// For an `rows x cols` matrix with `k = min(rows, cols)`, `U` is `rows x k`,
/// `V` is `cols x k` and the singular values `w` are sorted in decreasing
/// order. Computed with one-sided Jacobi rotations on a copy of `A` (or of
/// `A'` when the matrix is wide), which keeps small singular values
/// accurate enough to make a rank decision.
#[derive(Debug, Clone)]
pub struct SingularValueDecomp {
    pub rows: usize,
    pub cols: usize,
    u: Matrix,
    w: Vec<f64>,
    v: Matrix,
}

impl SingularValueDecomp {
    pub fn decompose(a: &Matrix) -> Result<Self> {
        if !a.is_finite() {
            return Err(LinalgError::NonFinite("singular value decomposition input"));
        }

        let (rows, cols) = a.shape();
        let (u, w, v) = if rows >= cols {
            jacobi(a)?
        } else {
            // A' = U S V'  =>  A = V S U'
            let (u, w, v) = jacobi(&a.transpose())?;
            (v, w, u)
        };

        Ok(Self { rows, cols, u, w, v })
    }

    /// Singular values, largest first.
    pub fn singular_values(&self) -> &[f64] {
        &self.w
    }

    pub fn u(&self) -> &Matrix {
        &self.u
    }

    pub fn v(&self) -> &Matrix {
        &self.v
    }

    fn threshold(&self, limit: f64) -> f64 {
        let wmax = self.w.first().copied().unwrap_or(0.0);
        limit * wmax + EPSILON
    }

    /// Number of singular values above `limit` relative to the largest one.
    pub fn rank(&self, limit: f64) -> usize {
        let thresh = self.threshold(limit);
        self.w.iter().filter(|&&s| s > thresh).count()
    }

    /// Ratio of the largest to the smallest singular value.
    pub fn condition_number(&self) -> f64 {
        match (self.w.first(), self.w.last()) {
            (Some(&max), Some(&min)) if min > 0.0 => max / min,
            _ => f64::INFINITY,
        }
    }

    /// Back-substitution: `x = V diag(1/w) U' b`, discarding singular values
    /// at or below `limit` times the largest. Discarded directions contribute
    /// nothing, which yields the minimum-norm least-squares solution.
    pub fn backsub(&self, limit: f64, b: &[f64]) -> Result<Vec<f64>> {
        if b.len() != self.rows {
            return Err(LinalgError::ShapeMismatch {
                context: "svd back-substitution",
                expected: self.rows,
                got: b.len(),
            });
        }

        let thresh = self.threshold(limit);
        let k = self.w.len();

        // U'b, scaled by the retained inverse singular values
        let mut utb = vec![0.0; k];
        for (j, coef) in utb.iter_mut().enumerate() {
            if self.w[j] > thresh {
                let mut sum = 0.0;
                for (i, bi) in b.iter().enumerate() {
                    sum += self.u[(i, j)] * bi;
                }
                *coef = sum / self.w[j];
            }
        }

        let mut soln = vec![0.0; self.cols];
        for (i, x) in soln.iter_mut().enumerate() {
            *x = (0..k).map(|j| self.v[(i, j)] * utb[j]).sum();
        }
        Ok(soln)
    }

    /// Rebuild `U diag(w) V'`.
    pub fn reconstruct(&self) -> Matrix {
        let k = self.w.len();
        Matrix::from_fn(self.rows, self.cols, |r, c| {
            (0..k)
                .map(|j| self.u[(r, j)] * self.w[j] * self.v[(c, j)])
                .sum()
        })
    }
}

/// One-sided Jacobi on a tall (or square) matrix.
fn jacobi(a: &Matrix) -> Result<(Matrix, Vec<f64>, Matrix)> {
    let (m, n) = a.shape();
    let mut u = a.clone();
    let mut v = Matrix::identity(n);
    let tol = f64::EPSILON * m.max(1) as f64;

    let mut converged = n < 2;
    for _ in 0..MAX_SWEEPS {
        if converged {
            break;
        }
        let mut rotated = false;

        for p in 0..n - 1 {
            for q in (p + 1)..n {
                let mut alpha = 0.0;
                let mut beta = 0.0;
                let mut gamma = 0.0;
                for i in 0..m {
                    let up = u[(i, p)];
                    let uq = u[(i, q)];
                    alpha += up * up;
                    beta += uq * uq;
                    gamma += up * uq;
                }

                if gamma == 0.0 || gamma.abs() <= tol * (alpha * beta).sqrt() {
                    continue;
                }
                rotated = true;

                let zeta = (beta - alpha) / (2.0 * gamma);
                let t = if zeta.abs() > 1e150 {
                    0.5 / zeta
                } else {
                    zeta.signum() / (zeta.abs() + (1.0 + zeta * zeta).sqrt())
                };
                let c = 1.0 / (1.0 + t * t).sqrt();
                let s = c * t;

                rotate_columns(&mut u, p, q, c, s);
                rotate_columns(&mut v, p, q, c, s);
            }
        }

        if !rotated {
            converged = true;
        }
    }

    if !converged {
        return Err(LinalgError::NoConvergence {
            routine: "jacobi svd",
            iterations: MAX_SWEEPS,
        });
    }

    // Column norms are the singular values; normalise what remains into U
    let mut w = vec![0.0; n];
    for (j, wj) in w.iter_mut().enumerate() {
        let norm = (0..m).map(|i| u[(i, j)] * u[(i, j)]).sum::<f64>().sqrt();
        *wj = norm;
        if norm > 0.0 {
            for i in 0..m {
                u[(i, j)] /= norm;
            }
        }
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&x, &y| w[y].total_cmp(&w[x]));

    let u_sorted = Matrix::from_fn(m, n, |r, c| u[(r, order[c])]);
    let v_sorted = Matrix::from_fn(n, n, |r, c| v[(r, order[c])]);
    let w_sorted = order.iter().map(|&j| w[j]).collect();

    Ok((u_sorted, w_sorted, v_sorted))
}

fn rotate_columns(m: &mut Matrix, p: usize, q: usize, c: f64, s: f64) {
    for i in 0..m.rows() {
        let x = m[(i, p)];
        let y = m[(i, q)];
        m[(i, p)] = c * x - s * y;
        m[(i, q)] = s * x + c * y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &Matrix, b: &Matrix, tol: f64) {
        assert_eq!(a.shape(), b.shape());
        for (x, y) in a.as_slice().iter().zip(b.as_slice()) {
            assert!((x - y).abs() < tol, "{} vs {}", x, y);
        }
    }

    #[test]
    fn test_reconstructs_tall_matrix() {
        let a = Matrix::from_fn(5, 3, |r, c| (r * 3 + c + 1) as f64 + 0.1 * (r * c) as f64);
        let svd = SingularValueDecomp::decompose(&a).unwrap();
        assert_eq!(svd.singular_values().len(), 3);
        assert_close(&svd.reconstruct(), &a, 1e-10);
    }

    #[test]
    fn test_reconstructs_wide_matrix() {
        let a = Matrix::from_rows(&[vec![1.0, 2.0, 3.0, 4.0], vec![2.0, 0.0, 1.0, -1.0]]).unwrap();
        let svd = SingularValueDecomp::decompose(&a).unwrap();
        assert_eq!(svd.u().shape(), (2, 2));
        assert_eq!(svd.v().shape(), (4, 2));
        assert_close(&svd.reconstruct(), &a, 1e-12);
    }

    #[test]
    fn test_singular_values_sorted_and_known() {
        // diag(1, 3) has singular values 3 and 1
        let a = Matrix::from_rows(&[vec![1.0, 0.0], vec![0.0, 3.0]]).unwrap();
        let svd = SingularValueDecomp::decompose(&a).unwrap();
        let w = svd.singular_values();
        assert!((w[0] - 3.0).abs() < 1e-14);
        assert!((w[1] - 1.0).abs() < 1e-14);
        assert!((svd.condition_number() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_rank_of_singular_matrix() {
        let a = Matrix::from_rows(&[vec![1.0, 2.0], vec![2.0, 4.0]]).unwrap();
        let svd = SingularValueDecomp::decompose(&a).unwrap();
        assert_eq!(svd.rank(1e-12), 1);
        assert!((svd.singular_values()[0] - 5.0).abs() < 1e-12);
        assert!(svd.condition_number().is_infinite() || svd.condition_number() > 1e12);
    }

    #[test]
    fn test_backsub_solves_square_system() {
        // 2x + 3y = 8, 4x + y = 10  =>  x = 1, y = 2
        let a = Matrix::from_rows(&[vec![2.0, 3.0], vec![4.0, 1.0]]).unwrap();
        let svd = SingularValueDecomp::decompose(&a).unwrap();
        let x = svd.backsub(1e-12, &[8.0, 10.0]).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_backsub_checks_rhs_length() {
        let a = Matrix::identity(3);
        let svd = SingularValueDecomp::decompose(&a).unwrap();
        assert!(svd.backsub(1e-12, &[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_zero_matrix() {
        let a = Matrix::zeros(3, 2);
        let svd = SingularValueDecomp::decompose(&a).unwrap();
        assert_eq!(svd.rank(1e-12), 0);
        let x = svd.backsub(1e-12, &[1.0, 1.0, 1.0]).unwrap();
        assert_eq!(x, vec![0.0, 0.0]);
    }

    #[test]
    fn test_rejects_non_finite() {
        let a = Matrix::from_rows(&[vec![1.0, f64::NAN], vec![0.0, 1.0]]).unwrap();
        assert!(matches!(
            SingularValueDecomp::decompose(&a),
            Err(LinalgError::NonFinite(_))
        ));
    }
}
