use matlib::{dot, solve_lstsq, LinalgError};
use serde::Serialize;
use tracing::{debug, warn};

use super::windows::{build_windows, WindowSystem};
use crate::error::{ModelError, Result};

/// Prediction of one window together with how well posed its system was.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowPrediction {
    /// Start index of the window in the source series.
    pub index: usize,
    pub value: f64,
    pub rank: usize,
    pub condition_number: f64,
}

impl WindowPrediction {
    pub fn is_rank_deficient(&self, n: usize) -> bool {
        self.rank < n
    }
}

/// Sliding-window linear prediction.
///
/// For every window system `(A_i, b_i)` the coefficients `x_i` minimise
/// `|A_i x - b_i|` and the predicted value is `b_i . x_i`. The output has
/// `L - 2n + 1` entries; see [`prediction_date_index`] for how they line up
/// with the input dates.
pub fn predict(series: &[f64], n: usize) -> Result<Vec<f64>> {
    Ok(predict_detailed(series, n)?
        .into_iter()
        .map(|p| p.value)
        .collect())
}

/// Like [`predict`] but keeps the per-window rank and condition number.
pub fn predict_detailed(series: &[f64], n: usize) -> Result<Vec<WindowPrediction>> {
    if n == 0 {
        return Err(ModelError::InvalidWindow);
    }
    let needed = n.saturating_mul(2);
    if series.len() < needed {
        return Err(ModelError::InsufficientData {
            needed,
            got: series.len(),
        });
    }

    let windows = build_windows(series, n);
    debug!(len = series.len(), window = n, systems = windows.len(), "built window systems");

    let predictions = solve_all(&windows)?;

    let deficient: Vec<usize> = predictions
        .iter()
        .filter(|p| p.is_rank_deficient(n))
        .map(|p| p.index)
        .collect();
    if let Some(&first) = deficient.first() {
        warn!(
            count = deficient.len(),
            first_window = first,
            window = n,
            "rank-deficient window systems solved with minimum-norm coefficients"
        );
    }

    Ok(predictions)
}

/// Index into the date sequence of the value predicted by window `window`.
///
/// Window `i` predicts the price at `i + 2n`. For the last window this is
/// one past the end of the series, i.e. the next business day.
pub fn prediction_date_index(window: usize, n: usize) -> usize {
    window + 2 * n
}

fn solve_window(system: &WindowSystem) -> Result<WindowPrediction> {
    let index = system.start;
    let wrap = |source: LinalgError| ModelError::Window { index, source };

    let fit = solve_lstsq(&system.a, &system.b).map_err(wrap)?;
    let value = dot(&system.b, &fit.solution).map_err(wrap)?;
    if !value.is_finite() {
        return Err(wrap(LinalgError::NonFinite("predicted value")));
    }

    Ok(WindowPrediction {
        index,
        value,
        rank: fit.rank,
        condition_number: fit.condition_number(),
    })
}

#[cfg(not(feature = "parallel"))]
fn solve_all(windows: &[WindowSystem]) -> Result<Vec<WindowPrediction>> {
    windows.iter().map(solve_window).collect()
}

#[cfg(feature = "parallel")]
fn solve_all(windows: &[WindowSystem]) -> Result<Vec<WindowPrediction>> {
    use rayon::prelude::*;

    windows.par_iter().map(solve_window).collect()
}
