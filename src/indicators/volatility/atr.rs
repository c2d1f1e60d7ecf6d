use crate::error::{check_len, ModelError, Result};

/// Elementwise true range: the largest of `high - prev_close`,
/// `prev_close - low` and `high - low`.
pub fn true_range(high: &[f64], low: &[f64], prev_close: &[f64]) -> Result<Vec<f64>> {
    check_len("true range lows", high.len(), low.len())?;
    check_len("true range closes", high.len(), prev_close.len())?;

    Ok(high
        .iter()
        .zip(low)
        .zip(prev_close)
        .map(|((&h, &l), &c)| (h - c).max(c - l).max(h - l))
        .collect())
}

/// Wilder-style smoothing of a true range series.
///
/// The first value is the mean of the whole series; each later value is
/// `(prev * (n - 1) + tr[i]) / n` with `n = tr.len()`.
pub fn average_true_range(tr: &[f64]) -> Vec<f64> {
    if tr.is_empty() {
        return Vec::new();
    }

    let n = tr.len() as f64;
    let mut atr = Vec::with_capacity(tr.len());
    atr.push(tr.iter().sum::<f64>() / n);
    for &value in &tr[1..] {
        let prev = atr[atr.len() - 1];
        atr.push((prev * (n - 1.0) + value) / n);
    }
    atr
}

/// Average true range of the last `lookback` bars.
///
/// Bar `i` is compared against the close of bar `i - 1`, so `lookback + 1`
/// bars are needed. Element `k` of the result belongs to bar
/// `len - lookback + k`.
pub fn recent_average_true_range(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    lookback: usize,
) -> Result<Vec<f64>> {
    check_len("atr lows", high.len(), low.len())?;
    check_len("atr closes", high.len(), close.len())?;
    if lookback == 0 {
        return Err(ModelError::InvalidWindow);
    }
    let len = high.len();
    if len < lookback + 1 {
        return Err(ModelError::InsufficientData {
            needed: lookback + 1,
            got: len,
        });
    }

    let start = len - lookback;
    let tr = true_range(&high[start..], &low[start..], &close[start - 1..len - 1])?;
    Ok(average_true_range(&tr))
}
