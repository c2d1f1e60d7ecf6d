use matlib::Matrix;

/// One square system of the sliding-window predictor.
///
/// Row `j` of `a` is `series[start + j .. start + j + n]` and `b` is the
/// `n` values that follow the first row, `series[start + n .. start + 2n]`.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSystem {
    pub start: usize,
    pub a: Matrix,
    pub b: Vec<f64>,
}

/// Number of window systems a series of length `len` yields for window `n`:
/// `len - 2n + 1`, or zero when `n == 0` or the series is shorter than `2n`.
pub fn window_count(len: usize, n: usize) -> usize {
    if n == 0 || n > len / 2 {
        return 0;
    }
    len - 2 * n + 1
}

/// Build every `(A_i, b_i)` pair for window size `n`.
///
/// A series too short to hold two windows produces an empty vector; callers
/// decide whether that is an error.
pub fn build_windows(series: &[f64], n: usize) -> Vec<WindowSystem> {
    (0..window_count(series.len(), n))
        .map(|start| window_system(series, n, start))
        .collect()
}

fn window_system(series: &[f64], n: usize, start: usize) -> WindowSystem {
    WindowSystem {
        start,
        a: Matrix::from_fn(n, n, |r, c| series[start + r + c]),
        b: series[start + n..start + 2 * n].to_vec(),
    }
}
