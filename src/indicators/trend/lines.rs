use matlib::fit_line;
use serde::Serialize;

use crate::error::{check_len, Result};

/// Daily pivot point with support and resistance one range away.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotLevels {
    /// (high + low + close) / 3
    pub pivots: Vec<f64>,
    /// pivot - (high - low)
    pub supports: Vec<f64>,
    /// pivot + (high - low)
    pub resistances: Vec<f64>,
}

impl PivotLevels {
    pub fn len(&self) -> usize {
        self.pivots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pivots.is_empty()
    }
}

pub fn pivot_levels(high: &[f64], low: &[f64], close: &[f64]) -> Result<PivotLevels> {
    check_len("pivot lows", high.len(), low.len())?;
    check_len("pivot closes", high.len(), close.len())?;

    let n = high.len();
    let mut pivots = Vec::with_capacity(n);
    let mut supports = Vec::with_capacity(n);
    let mut resistances = Vec::with_capacity(n);

    for i in 0..n {
        let pivot = (high[i] + low[i] + close[i]) / 3.0;
        let spread = high[i] - low[i];
        pivots.push(pivot);
        supports.push(pivot - spread);
        resistances.push(pivot + spread);
    }

    Ok(PivotLevels {
        pivots,
        supports,
        resistances,
    })
}

/// Straight line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendLine {
    /// Least-squares line through `(x, y)`.
    pub fn fit(x: &[f64], y: &[f64]) -> Result<Self> {
        let (slope, intercept) = fit_line(x, y)?;
        Ok(Self { slope, intercept })
    }

    pub fn value_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Evaluate the line at every abscissa, including ones past the fit range.
    pub fn project(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.value_at(x)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendLines {
    pub trend: TrendLine,
    pub support: TrendLine,
    pub resistance: TrendLine,
}

/// Fit trend, support and resistance lines to the pivot levels observed at `x`.
pub fn fit_trend_lines(x: &[f64], levels: &PivotLevels) -> Result<TrendLines> {
    check_len("trend line abscissae", levels.len(), x.len())?;

    Ok(TrendLines {
        trend: TrendLine::fit(x, &levels.pivots)?,
        support: TrendLine::fit(x, &levels.supports)?,
        resistance: TrendLine::fit(x, &levels.resistances)?,
    })
}
