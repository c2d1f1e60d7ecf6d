//! Peaks and valleys of the close difference between two symbols.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use indicators::{polynomial_extrema, price_difference, ExtremumKind, ModelError};
use matlib::{fit_polynomial_detailed, Polynomial};
use pricefit::palette::{DODGER_BLUE, LIME_GREEN, ORANGE_RED};
use pricefit::{date_from_ordinal, day_ordinal, ChartSeries, ChartSpec, PriceBars, SeriesStyle};
use serde::Serialize;
use tracing::{debug, warn};

/// Closes of two symbols on the dates both traded.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedCloses {
    pub date: Vec<NaiveDate>,
    pub first: Vec<f64>,
    pub second: Vec<f64>,
}

/// Keep the dates present in both histories, in the first history's order.
pub fn align_closes(first: &PriceBars, second: &PriceBars) -> AlignedCloses {
    let by_date: BTreeMap<NaiveDate, f64> = second
        .date
        .iter()
        .copied()
        .zip(second.close.iter().copied())
        .collect();

    let mut aligned = AlignedCloses {
        date: Vec::with_capacity(first.len()),
        first: Vec::with_capacity(first.len()),
        second: Vec::with_capacity(first.len()),
    };
    for (&date, &close) in first.date.iter().zip(&first.close) {
        if let Some(&other) = by_date.get(&date) {
            aligned.date.push(date);
            aligned.first.push(close);
            aligned.second.push(other);
        }
    }

    let dropped = first.len().max(second.len()) - aligned.date.len();
    if dropped > 0 {
        warn!(dropped, "dates missing from one of the histories were skipped");
    }
    aligned
}

/// One extremum candidate placed back on the calendar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Peak {
    pub date: Option<NaiveDate>,
    pub x: f64,
    pub value: f64,
    pub kind: ExtremumKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpreadAnalysis {
    pub label: String,
    pub origin: NaiveDate,
    #[serde(skip)]
    pub x: Vec<f64>,
    #[serde(skip)]
    pub difference: Vec<f64>,
    /// Highest degree first.
    pub coefficients: Vec<f64>,
    pub rank: usize,
    pub condition_number: f64,
    pub peaks: Vec<Peak>,
}

impl SpreadAnalysis {
    pub fn polynomial(&self) -> Polynomial {
        Polynomial::new(self.coefficients.clone())
    }
}

/// Fit a polynomial of `degree` to `first - second` over day offsets and
/// list its extremum candidates between the first and last common date.
pub fn analyze_spread(
    first: &PriceBars,
    second: &PriceBars,
    degree: usize,
) -> Result<SpreadAnalysis, ModelError> {
    let aligned = align_closes(first, second);
    let origin = match aligned.date.first() {
        Some(&d) => d,
        None => return Err(ModelError::InsufficientData { needed: 2, got: 0 }),
    };

    let x: Vec<f64> = aligned.date.iter().map(|&d| day_ordinal(origin, d)).collect();
    let difference = price_difference(&aligned.first, &aligned.second)?;

    let fit = fit_polynomial_detailed(&x, &difference, degree)?;
    debug!(degree, rank = fit.rank, cond = fit.condition_number, "fitted spread polynomial");

    let (lo, hi) = (x[0], x[x.len() - 1]);
    let peaks = polynomial_extrema(&fit.polynomial, lo, hi)?
        .into_iter()
        .map(|c| Peak {
            date: date_from_ordinal(origin, c.x),
            x: c.x,
            value: c.y,
            kind: c.kind,
        })
        .collect();

    Ok(SpreadAnalysis {
        label: format!("{} - {}", first.symbol, second.symbol),
        origin,
        x,
        difference,
        coefficients: fit.polynomial.coefficients().to_vec(),
        rank: fit.rank,
        condition_number: fit.condition_number,
        peaks,
    })
}

/// Difference markers, the polynomial sampled at `samples` points, and the
/// peaks joined in order.
pub fn build_chart(analysis: &SpreadAnalysis, degree: usize, samples: usize) -> ChartSpec {
    let poly = analysis.polynomial();
    let (lo, hi) = match (analysis.x.first(), analysis.x.last()) {
        (Some(&lo), Some(&hi)) => (lo, hi),
        _ => (0.0, 0.0),
    };
    let steps = samples.max(2) - 1;
    let grid: Vec<f64> = (0..=steps)
        .map(|i| lo + (hi - lo) * i as f64 / steps as f64)
        .collect();

    let peaks: Vec<(f64, f64)> = analysis.peaks.iter().map(|p| (p.x, p.value)).collect();

    ChartSpec::new(
        format!("Close Difference {}", analysis.label),
        "Price Difference",
        analysis.origin,
    )
    .with_series(
        ChartSeries::from_xy(&analysis.x, &analysis.difference, LIME_GREEN, SeriesStyle::Markers)
            .labelled(analysis.label.clone()),
    )
    .with_series(
        ChartSeries::from_xy(&grid, &poly.evaluate_many(&grid), DODGER_BLUE, SeriesStyle::Line)
            .labelled(format!("Polynomial ({})", degree)),
    )
    .with_series(ChartSeries::new(peaks.clone(), ORANGE_RED, SeriesStyle::Projection))
    .with_series(ChartSeries::new(peaks, ORANGE_RED, SeriesStyle::Triangles).labelled("Peaks"))
}
