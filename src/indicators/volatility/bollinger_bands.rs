use serde::Serialize;

use crate::trend::ma::simple_moving_average;

/// Bollinger Bands Output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BollingerBandsOutput {
    /// Upper Band = Middle Band + (Multiplier * SD)
    pub upper_band: Vec<f64>,
    /// Middle Band = SMA
    pub middle_band: Vec<f64>,
    /// Lower Band = Middle Band - (Multiplier * SD)
    pub lower_band: Vec<f64>,
}

impl BollingerBandsOutput {
    pub fn len(&self) -> usize {
        self.middle_band.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middle_band.is_empty()
    }
}

/// Computes Bollinger Bands over every full window.
///
/// # Arguments
///
/// * `data` - A slice of f64 values (typically closing prices).
/// * `period` - The window size for the moving average and standard deviation.
/// * `multiplier` - The number of standard deviations for the bands (typically 2.0).
///
/// # Returns
///
/// Bands of length `data.len() - period + 1`, aligned like
/// [`simple_moving_average`]. The deviation is the population standard
/// deviation of each window.
pub fn bollinger_bands(data: &[f64], period: usize, multiplier: f64) -> BollingerBandsOutput {
    let middle_band = simple_moving_average(data, period);
    let mut upper_band = Vec::with_capacity(middle_band.len());
    let mut lower_band = Vec::with_capacity(middle_band.len());

    for (i, &mean) in middle_band.iter().enumerate() {
        let slice = &data[i..i + period];
        let variance: f64 = slice
            .iter()
            .map(|&x| (x - mean).powi(2))
            .sum::<f64>()
            / period as f64;
        let std_dev = variance.sqrt();

        upper_band.push(mean + multiplier * std_dev);
        lower_band.push(mean - multiplier * std_dev);
    }

    BollingerBandsOutput {
        upper_band,
        middle_band,
        lower_band,
    }
}
