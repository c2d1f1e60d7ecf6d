/// Calculates the Simple Moving Average (SMA) over every full window.
///
/// # Arguments
///
/// * `data` - A slice of f64 values.
/// * `lags` - The window size for the moving average.
///
/// # Returns
///
/// A Vec<f64> of length `data.len() - lags + 1`; element `i` is the mean of
/// `data[i..i + lags]` and lines up with `data[i + lags - 1]`. Empty when
/// `lags` is zero or longer than the data.
pub fn simple_moving_average(data: &[f64], lags: usize) -> Vec<f64> {
    if lags == 0 || lags > data.len() {
        return Vec::new();
    }

    let mut sma = Vec::with_capacity(data.len() - lags + 1);
    let mut sum: f64 = data.iter().take(lags).sum();
    sma.push(sum / lags as f64);

    for i in lags..data.len() {
        sum = sum - data[i - lags] + data[i];
        sma.push(sum / lags as f64);
    }

    sma
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_moving_average() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let sma = simple_moving_average(&data, 3);

        assert_eq!(sma.len(), 3);
        assert!((sma[0] - 2.0).abs() < 1e-10); // (1+2+3)/3
        assert!((sma[1] - 3.0).abs() < 1e-10); // (2+3+4)/3
        assert!((sma[2] - 4.0).abs() < 1e-10); // (3+4+5)/3
    }

    #[test]
    fn test_simple_moving_average_edge_cases() {
        let data = vec![1.0, 2.0];
        assert!(simple_moving_average(&data, 3).is_empty());
        assert!(simple_moving_average(&data, 0).is_empty());
        assert_eq!(simple_moving_average(&data, 1), data);
        assert_eq!(simple_moving_average(&data, 2), vec![1.5]);
    }
}
