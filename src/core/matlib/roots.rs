use num_complex::Complex64;
use std::f64::consts::PI;

use crate::error::{LinalgError, Result};

const MAX_ITERATIONS: usize = 2000;

/// Largest accepted relative step at which an iteration that ran out of
/// budget still counts as converged. Clustered roots only converge linearly
/// and stall near sqrt(eps).
const STALL_TOLERANCE: f64 = 1e-6;

/// A root whose imaginary part is at most this, relative to `max(1, |re|)`,
/// is treated as real.
pub const REAL_ROOT_TOLERANCE: f64 = 1e-7;

/// Real roots closer than this, relative to `max(1, |x|)`, are merged into one.
pub const DUPLICATE_ROOT_TOLERANCE: f64 = 1e-6;

/// All complex roots of the polynomial with `coefficients` (highest degree
/// first), with multiplicity, sorted by real then imaginary part.
///
/// Leading zero coefficients are dropped; the zero polynomial and nonzero
/// constants have no roots. Linear and quadratic factors are solved in
/// closed form, higher degrees by simultaneous Weierstrass (Durand-Kerner)
/// iteration on the monic polynomial.
pub fn polynomial_roots(coefficients: &[f64]) -> Result<Vec<Complex64>> {
    if coefficients.iter().any(|c| !c.is_finite()) {
        return Err(LinalgError::NonFinite("polynomial coefficients"));
    }

    let first = match coefficients.iter().position(|&c| c != 0.0) {
        Some(i) => i,
        None => return Ok(Vec::new()),
    };
    let mut coeffs = &coefficients[first..];

    // x^k factors contribute exact zero roots
    let trailing = coeffs.iter().rev().take_while(|&&c| c == 0.0).count();
    let mut roots = vec![Complex64::new(0.0, 0.0); trailing];
    coeffs = &coeffs[..coeffs.len() - trailing];

    match coeffs.len() - 1 {
        0 => {}
        1 => roots.push(Complex64::new(-coeffs[1] / coeffs[0], 0.0)),
        2 => roots.extend(quadratic_roots(coeffs[0], coeffs[1], coeffs[2])),
        _ => roots.extend(durand_kerner(coeffs)?),
    }

    roots.sort_by(|a, b| a.re.total_cmp(&b.re).then(a.im.total_cmp(&b.im)));
    Ok(roots)
}

fn quadratic_roots(a: f64, b: f64, c: f64) -> [Complex64; 2] {
    let disc = b * b - 4.0 * a * c;
    if disc >= 0.0 {
        // Avoid cancellation between -b and the square root
        let sign = if b >= 0.0 { 1.0 } else { -1.0 };
        let q = -0.5 * (b + sign * disc.sqrt());
        [Complex64::new(q / a, 0.0), Complex64::new(c / q, 0.0)]
    } else {
        let re = -b / (2.0 * a);
        let im = (-disc).sqrt() / (2.0 * a).abs();
        [Complex64::new(re, -im), Complex64::new(re, im)]
    }
}

fn durand_kerner(coeffs: &[f64]) -> Result<Vec<Complex64>> {
    let n = coeffs.len() - 1;
    let monic: Vec<f64> = coeffs.iter().map(|c| c / coeffs[0]).collect();

    // Fujiwara-style bound on root magnitude for the starting circle
    let radius = monic
        .iter()
        .enumerate()
        .skip(1)
        .map(|(k, c)| c.abs().powf(1.0 / k as f64))
        .fold(0.0_f64, f64::max)
        * 2.0;
    let radius = if radius > 0.0 { radius } else { 1.0 };

    let mut z: Vec<Complex64> = (0..n)
        .map(|k| Complex64::from_polar(radius, 2.0 * PI * k as f64 / n as f64 + 0.4))
        .collect();

    let mut max_step = f64::INFINITY;
    for _ in 0..MAX_ITERATIONS {
        max_step = 0.0;
        for k in 0..n {
            let zk = z[k];
            let num = horner(&monic, zk);
            let mut den = Complex64::new(1.0, 0.0);
            for (j, zj) in z.iter().enumerate() {
                if j != k {
                    den *= zk - zj;
                }
            }
            if den.norm() == 0.0 {
                den = Complex64::new(f64::EPSILON, 0.0);
            }
            let step = num / den;
            z[k] = zk - step;
            max_step = max_step.max(step.norm() / zk.norm().max(1.0));
        }
        if !max_step.is_finite() {
            return Err(LinalgError::NonFinite("polynomial root iteration"));
        }
        if max_step <= 4.0 * f64::EPSILON {
            return Ok(z);
        }
    }

    if max_step <= STALL_TOLERANCE {
        Ok(z)
    } else {
        Err(LinalgError::NoConvergence {
            routine: "durand-kerner",
            iterations: MAX_ITERATIONS,
        })
    }
}

fn horner(coeffs: &[f64], x: Complex64) -> Complex64 {
    coeffs
        .iter()
        .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * x + c)
}

/// Real parts of the roots that are real within [`REAL_ROOT_TOLERANCE`],
/// sorted ascending, with near-duplicates merged into their mean.
pub fn real_parts(roots: &[Complex64]) -> Vec<f64> {
    let mut reals: Vec<f64> = roots
        .iter()
        .filter(|r| r.im.abs() <= REAL_ROOT_TOLERANCE * r.re.abs().max(1.0))
        .map(|r| r.re)
        .collect();
    reals.sort_by(f64::total_cmp);
    dedup_sorted(&reals)
}

/// Merge runs of sorted values that lie within [`DUPLICATE_ROOT_TOLERANCE`].
pub fn dedup_sorted(values: &[f64]) -> Vec<f64> {
    let mut out: Vec<f64> = Vec::with_capacity(values.len());
    let mut cluster: Vec<f64> = Vec::new();

    for &v in values {
        if let Some(&last) = cluster.last() {
            if (v - last).abs() > DUPLICATE_ROOT_TOLERANCE * last.abs().max(1.0) {
                out.push(cluster.iter().sum::<f64>() / cluster.len() as f64);
                cluster.clear();
            }
        }
        cluster.push(v);
    }
    if !cluster.is_empty() {
        out.push(cluster.iter().sum::<f64>() / cluster.len() as f64);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_reals(coeffs: &[f64]) -> Vec<f64> {
        real_parts(&polynomial_roots(coeffs).unwrap())
    }

    #[test]
    fn test_linear_and_constant() {
        assert!(polynomial_roots(&[5.0]).unwrap().is_empty());
        assert!(polynomial_roots(&[0.0, 0.0]).unwrap().is_empty());
        let r = polynomial_roots(&[2.0, -4.0]).unwrap();
        assert_eq!(r.len(), 1);
        assert!((r[0].re - 2.0).abs() < 1e-15);
    }

    #[test]
    fn test_leading_zeros_are_dropped() {
        let r = sorted_reals(&[0.0, 0.0, 1.0, -3.0]);
        assert_eq!(r.len(), 1);
        assert!((r[0] - 3.0).abs() < 1e-15);
    }

    #[test]
    fn test_quadratic_real_and_complex() {
        // (x - 1)(x - 3)
        let r = sorted_reals(&[1.0, -4.0, 3.0]);
        assert!((r[0] - 1.0).abs() < 1e-14);
        assert!((r[1] - 3.0).abs() < 1e-14);

        // x^2 + 1
        let roots = polynomial_roots(&[1.0, 0.0, 1.0]).unwrap();
        assert_eq!(roots.len(), 2);
        assert!(roots.iter().all(|r| (r.im.abs() - 1.0).abs() < 1e-14));
        assert!(real_parts(&roots).is_empty());
    }

    #[test]
    fn test_trailing_zeros_give_zero_roots() {
        // x^3 - x^2 = x^2 (x - 1)
        let roots = polynomial_roots(&[1.0, -1.0, 0.0, 0.0]).unwrap();
        assert_eq!(roots.len(), 3);
        assert_eq!(sorted_reals(&[1.0, -1.0, 0.0, 0.0]), vec![0.0, 1.0]);
    }

    #[test]
    fn test_cubic_with_distinct_roots() {
        // (x + 2)(x - 1)(x - 5) = x^3 - 4x^2 - 7x + 10
        let r = sorted_reals(&[1.0, -4.0, -7.0, 10.0]);
        assert_eq!(r.len(), 3);
        for (got, want) in r.iter().zip([-2.0, 1.0, 5.0]) {
            assert!((got - want).abs() < 1e-9, "{} vs {}", got, want);
        }
    }

    #[test]
    fn test_quartic_mixed_roots() {
        // (x^2 + 4)(x - 2)(x + 1) = x^4 - x^3 + 2x^2 - 4x - 8
        let roots = polynomial_roots(&[1.0, -1.0, 2.0, -4.0, -8.0]).unwrap();
        assert_eq!(roots.len(), 4);
        let r = real_parts(&roots);
        assert_eq!(r.len(), 2);
        assert!((r[0] + 1.0).abs() < 1e-9);
        assert!((r[1] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_double_root_is_merged() {
        // (x - 1)^2 (x - 4) = x^3 - 6x^2 + 9x - 4
        let r = sorted_reals(&[1.0, -6.0, 9.0, -4.0]);
        assert_eq!(r.len(), 2);
        assert!((r[0] - 1.0).abs() < 1e-6);
        assert!((r[1] - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_large_roots_are_found() {
        // (x - 1000)(x - 2000)(x - 3500)
        let coeffs = [1.0, -6500.0, 12_500_000.0, -7_000_000_000.0];
        let r = sorted_reals(&coeffs);
        assert_eq!(r.len(), 3);
        for (got, want) in r.iter().zip([1000.0, 2000.0, 3500.0]) {
            assert!((got - want).abs() / want < 1e-9);
        }
    }

    #[test]
    fn test_dedup_sorted_policy() {
        let merged = dedup_sorted(&[1.0, 1.0 + 1e-8, 2.0, 1000.0, 1000.0005]);
        assert_eq!(merged.len(), 3);
        assert!((merged[0] - 1.0).abs() < 1e-7);
        assert!((merged[2] - 1000.00025).abs() < 1e-9);

        // farther apart than the tolerance stays separate
        assert_eq!(dedup_sorted(&[1.0, 1.0 + 1e-4]).len(), 2);
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(polynomial_roots(&[1.0, f64::NAN]).is_err());
    }
}
