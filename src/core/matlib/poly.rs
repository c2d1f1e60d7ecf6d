use num_complex::Complex64;
use tracing::warn;

use crate::error::{LinalgError, Result};
use crate::lstsq::solve_lstsq;
use crate::matrix::Matrix;
use crate::roots::{dedup_sorted, polynomial_roots, real_parts};

/// Dense real polynomial, coefficients stored highest degree first.
///
/// `[1.0, 0.0, 0.0]` is `x^2`; `[2.0, -1.0]` is `2x - 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    pub fn new(coefficients: Vec<f64>) -> Self {
        if coefficients.is_empty() {
            return Self {
                coefficients: vec![0.0],
            };
        }
        Self { coefficients }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Nominal degree, i.e. number of stored coefficients minus one.
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Horner evaluation at a single point.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefficients.iter().fold(0.0, |acc, &c| acc * x + c)
    }

    pub fn evaluate_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }

    pub fn derivative(&self) -> Polynomial {
        let n = self.degree();
        if n == 0 {
            return Polynomial::new(vec![0.0]);
        }
        let coefficients = self.coefficients[..n]
            .iter()
            .enumerate()
            .map(|(i, c)| c * (n - i) as f64)
            .collect();
        Polynomial::new(coefficients)
    }

    /// All complex roots, with multiplicity.
    pub fn roots(&self) -> Result<Vec<Complex64>> {
        polynomial_roots(&self.coefficients)
    }

    /// Distinct real roots in ascending order, each refined by a few Newton
    /// steps against this polynomial.
    pub fn real_roots(&self) -> Result<Vec<f64>> {
        let slope = self.derivative();
        let mut roots: Vec<f64> = real_parts(&self.roots()?)
            .into_iter()
            .map(|x| self.polish(&slope, x))
            .collect();
        roots.sort_by(f64::total_cmp);
        Ok(dedup_sorted(&roots))
    }

    fn polish(&self, slope: &Polynomial, mut x: f64) -> f64 {
        for _ in 0..4 {
            let fx = self.evaluate(x);
            let dfx = slope.evaluate(x);
            if fx == 0.0 || dfx == 0.0 {
                break;
            }
            let next = x - fx / dfx;
            if !next.is_finite() || self.evaluate(next).abs() >= fx.abs() {
                break;
            }
            x = next;
        }
        x
    }
}

/// Evaluate `poly` at every query point.
pub fn evaluate(poly: &Polynomial, xs: &[f64]) -> Vec<f64> {
    poly.evaluate_many(xs)
}

/// A fitted polynomial and the conditioning of the fit.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialFit {
    pub polynomial: Polynomial,
    /// Rank of the (column scaled) Vandermonde matrix.
    pub rank: usize,
    pub condition_number: f64,
}

impl PolynomialFit {
    pub fn is_rank_deficient(&self) -> bool {
        self.rank < self.polynomial.coefficients.len()
    }
}

/// Least-squares polynomial of the given degree through `(x, y)`.
pub fn fit_polynomial(x: &[f64], y: &[f64], degree: usize) -> Result<Polynomial> {
    Ok(fit_polynomial_detailed(x, y, degree)?.polynomial)
}

/// Like [`fit_polynomial`] but also reports rank and condition number.
///
/// Each Vandermonde column is scaled to unit norm before the solve and the
/// coefficients are unscaled afterwards; for large abscissae such as day
/// ordinals the raw powers differ by many orders of magnitude. With fewer
/// points than coefficients the minimum-norm polynomial is returned and a
/// warning is logged.
pub fn fit_polynomial_detailed(x: &[f64], y: &[f64], degree: usize) -> Result<PolynomialFit> {
    check_samples(x, y)?;

    let m = x.len();
    let n = degree + 1;
    let mut design = Matrix::zeros(m, n);
    for (r, &xr) in x.iter().enumerate() {
        let mut power = 1.0;
        for c in (0..n).rev() {
            design[(r, c)] = power;
            power *= xr;
        }
    }
    if !design.is_finite() {
        return Err(LinalgError::NonFinite("vandermonde matrix"));
    }

    let scales: Vec<f64> = (0..n)
        .map(|c| {
            let norm = design.column(c).iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                norm
            } else {
                1.0
            }
        })
        .collect();
    for r in 0..m {
        for (c, s) in scales.iter().enumerate() {
            design[(r, c)] /= s;
        }
    }

    let fit = solve_lstsq(&design, y)?;
    let coefficients: Vec<f64> = fit
        .solution
        .iter()
        .zip(&scales)
        .map(|(c, s)| c / s)
        .collect();

    if m < n {
        warn!(points = m, degree, "polynomial fit is underdetermined, using minimum-norm solution");
    } else if fit.is_rank_deficient() {
        warn!(rank = fit.rank, degree, "polynomial fit is rank deficient");
    }

    Ok(PolynomialFit {
        polynomial: Polynomial::new(coefficients),
        rank: fit.rank,
        condition_number: fit.condition_number(),
    })
}

/// Least-squares straight line; returns `(slope, intercept)`.
pub fn fit_line(x: &[f64], y: &[f64]) -> Result<(f64, f64)> {
    check_samples(x, y)?;

    let design = Matrix::from_fn(x.len(), 2, |r, c| if c == 0 { x[r] } else { 1.0 });
    let fit = solve_lstsq(&design, y)?;
    if fit.is_rank_deficient() {
        warn!(points = x.len(), "line fit is rank deficient");
    }
    Ok((fit.solution[0], fit.solution[1]))
}

fn check_samples(x: &[f64], y: &[f64]) -> Result<()> {
    if x.len() != y.len() {
        return Err(LinalgError::ShapeMismatch {
            context: "fit samples",
            expected: x.len(),
            got: y.len(),
        });
    }
    if x.is_empty() {
        return Err(LinalgError::InsufficientData { needed: 1, got: 0 });
    }
    if x.iter().chain(y).any(|v| !v.is_finite()) {
        return Err(LinalgError::NonFinite("fit samples"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_and_derivative() {
        // 3x^3 - 2x + 7
        let p = Polynomial::new(vec![3.0, 0.0, -2.0, 7.0]);
        assert_eq!(p.degree(), 3);
        assert_eq!(p.evaluate(2.0), 27.0);
        assert_eq!(evaluate(&p, &[0.0, 1.0]), vec![7.0, 8.0]);

        let d = p.derivative();
        assert_eq!(d.coefficients(), &[9.0, 0.0, -2.0]);
        assert_eq!(d.derivative().derivative().derivative().coefficients(), &[0.0]);
    }

    #[test]
    fn test_fit_recovers_parabola() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let y = [0.0, 1.0, 4.0, 9.0, 16.0];
        let p = fit_polynomial(&x, &y, 2).unwrap();
        for (got, want) in p.coefficients().iter().zip([1.0, 0.0, 0.0]) {
            assert!((got - want).abs() < 1e-9, "{:?}", p.coefficients());
        }
    }

    #[test]
    fn test_fit_with_large_abscissae() {
        // Day ordinals around 738000 with a gentle quadratic
        let x: Vec<f64> = (0..40).map(|i| 738_000.0 + i as f64).collect();
        let y: Vec<f64> = x
            .iter()
            .map(|v| {
                let t = v - 738_020.0;
                100.0 + 0.5 * t - 0.01 * t * t
            })
            .collect();
        let p = fit_polynomial(&x, &y, 2).unwrap();
        let fitted = p.evaluate_many(&x);
        for (f, target) in fitted.iter().zip(&y) {
            assert!((f - target).abs() < 1e-2, "{} vs {}", f, target);
        }
    }

    #[test]
    fn test_underdetermined_fit_interpolates() {
        let p = fit_polynomial_detailed(&[1.0, 2.0], &[3.0, 5.0], 3).unwrap();
        assert!(p.is_rank_deficient());
        assert!((p.polynomial.evaluate(1.0) - 3.0).abs() < 1e-9);
        assert!((p.polynomial.evaluate(2.0) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_degree_one_matches_fit_line() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [1.1, 2.9, 5.1, 6.9];
        let (slope, intercept) = fit_line(&x, &y).unwrap();
        let p = fit_polynomial(&x, &y, 1).unwrap();
        assert!((p.coefficients()[0] - slope).abs() < 1e-10);
        assert!((p.coefficients()[1] - intercept).abs() < 1e-10);
        assert!((slope - 1.96).abs() < 1e-10);
    }

    #[test]
    fn test_fit_input_validation() {
        assert!(matches!(
            fit_polynomial(&[], &[], 2),
            Err(LinalgError::InsufficientData { .. })
        ));
        assert!(matches!(
            fit_line(&[1.0, 2.0], &[1.0]),
            Err(LinalgError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            fit_line(&[1.0, f64::NAN], &[1.0, 2.0]),
            Err(LinalgError::NonFinite(_))
        ));
    }

    #[test]
    fn test_real_roots_of_derivative() {
        // -(x - 2)^2 + 5 peaks at x = 2
        let p = Polynomial::new(vec![-1.0, 4.0, 1.0]);
        let stationary = p.derivative().real_roots().unwrap();
        assert_eq!(stationary.len(), 1);
        assert!((stationary[0] - 2.0).abs() < 1e-12);
        assert!((p.evaluate(stationary[0]) - 5.0).abs() < 1e-12);
    }
}
