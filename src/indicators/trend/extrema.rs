use matlib::{fit_polynomial, Polynomial, DUPLICATE_ROOT_TOLERANCE};
use serde::Serialize;
use tracing::debug;

use crate::error::{ModelError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExtremumKind {
    /// One of the two domain endpoints.
    Boundary,
    Maximum,
    Minimum,
    /// Stationary point with vanishing curvature (e.g. an inflection).
    Stationary,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExtremumCandidate {
    pub x: f64,
    pub y: f64,
    pub kind: ExtremumKind,
}

/// Fit a polynomial of `degree` to `(x, y)` and list its peak and valley
/// candidates on `[domain_min, domain_max]`.
///
/// The result always starts at `domain_min` and ends at `domain_max`, with
/// the real stationary points strictly inside the domain in between, in
/// increasing order of `x`.
pub fn find_extrema(
    x: &[f64],
    y: &[f64],
    degree: usize,
    domain_min: f64,
    domain_max: f64,
) -> Result<Vec<ExtremumCandidate>> {
    check_domain(domain_min, domain_max)?;
    let poly = fit_polynomial(x, y, degree)?;
    polynomial_extrema(&poly, domain_min, domain_max)
}

/// Relative spread of values under which a fitted polynomial counts as flat.
const FLAT_TOLERANCE: f64 = 1e-9;

/// Extremum candidates of an already fitted polynomial.
///
/// Real roots of the derivative closer to an endpoint than the duplicate
/// root tolerance are absorbed into that endpoint. A fit to flat data has
/// noise-level higher coefficients whose stationary points still land
/// inside the domain; when the values over the domain differ by less than
/// `FLAT_TOLERANCE` relative to their magnitude, those interior candidates
/// are reported as [`ExtremumKind::Stationary`].
pub fn polynomial_extrema(
    poly: &Polynomial,
    domain_min: f64,
    domain_max: f64,
) -> Result<Vec<ExtremumCandidate>> {
    check_domain(domain_min, domain_max)?;

    let slope = poly.derivative();
    let curvature = slope.derivative();

    let mut candidates = vec![ExtremumCandidate {
        x: domain_min,
        y: poly.evaluate(domain_min),
        kind: ExtremumKind::Boundary,
    }];

    for root in slope.real_roots()? {
        let tol = DUPLICATE_ROOT_TOLERANCE * root.abs().max(1.0);
        if root - domain_min <= tol || domain_max - root <= tol {
            continue;
        }
        let bend = curvature.evaluate(root);
        let kind = if bend < 0.0 {
            ExtremumKind::Maximum
        } else if bend > 0.0 {
            ExtremumKind::Minimum
        } else {
            ExtremumKind::Stationary
        };
        candidates.push(ExtremumCandidate {
            x: root,
            y: poly.evaluate(root),
            kind,
        });
    }

    candidates.push(ExtremumCandidate {
        x: domain_max,
        y: poly.evaluate(domain_max),
        kind: ExtremumKind::Boundary,
    });

    mark_flat(&mut candidates);

    debug!(
        degree = poly.degree(),
        interior = candidates.len() - 2,
        "located extremum candidates"
    );
    Ok(candidates)
}

fn mark_flat(candidates: &mut [ExtremumCandidate]) {
    let (lo, hi, size) = candidates.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, 0.0_f64),
        |(lo, hi, size), c| (lo.min(c.y), hi.max(c.y), size.max(c.y.abs())),
    );
    if hi - lo > FLAT_TOLERANCE * size.max(1.0) {
        return;
    }
    for c in candidates.iter_mut() {
        if c.kind != ExtremumKind::Boundary {
            c.kind = ExtremumKind::Stationary;
        }
    }
}

fn check_domain(min: f64, max: f64) -> Result<()> {
    if !(min.is_finite() && max.is_finite() && min < max) {
        return Err(ModelError::InvalidDomain { min, max });
    }
    Ok(())
}
