use chrono::NaiveDate;
use indicators::{bollinger_bands, simple_moving_average, BollingerBandsOutput};
use pricefit::palette::{cycle_color, DARK_GRAY, DODGER_BLUE, LIGHT_GRAY, ORANGE_RED};
use pricefit::{ChartSeries, ChartSpec, PriceBars, SeriesStyle};
use serde::Serialize;
use tracing::warn;

/// A rolling statistic lined up with the bar closing its first full window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AverageLine {
    pub window: usize,
    pub dates: Vec<NaiveDate>,
    pub values: Vec<f64>,
}

/// Moving averages of the closes for each window. Windows longer than the
/// history are skipped with a warning.
pub fn moving_averages(bars: &PriceBars, windows: &[usize]) -> Vec<AverageLine> {
    windows
        .iter()
        .filter_map(|&window| {
            let values = simple_moving_average(&bars.close, window);
            if values.is_empty() {
                warn!(window, bars = bars.len(), "window longer than the history, skipped");
                return None;
            }
            Some(AverageLine {
                window,
                dates: bars.date[window - 1..].to_vec(),
                values,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandOverlay {
    pub window: usize,
    pub multiplier: f64,
    pub dates: Vec<NaiveDate>,
    pub bands: BollingerBandsOutput,
}

/// Bollinger bands of the closes, `None` when the history is shorter than
/// `window`.
pub fn band_overlay(bars: &PriceBars, window: usize, multiplier: f64) -> Option<BandOverlay> {
    let bands = bollinger_bands(&bars.close, window, multiplier);
    if bands.is_empty() {
        return None;
    }
    Some(BandOverlay {
        window,
        multiplier,
        dates: bars.date[window - 1..].to_vec(),
        bands,
    })
}

fn close_series(bars: &PriceBars) -> ChartSeries {
    ChartSeries::from_xy(&bars.ordinals(), &bars.close, LIGHT_GRAY, SeriesStyle::Line)
        .labelled("Close")
}

/// Window offset of an overlay into the bars' ordinals.
fn offset_x(bars: &PriceBars, window: usize) -> Vec<f64> {
    bars.ordinals().split_off(window - 1)
}

pub fn averages_chart(bars: &PriceBars, lines: &[AverageLine]) -> Option<ChartSpec> {
    let mut spec = ChartSpec::new(
        format!("{} Simple Moving Averages", bars.symbol),
        "Close Price",
        bars.first_date()?,
    )
    .with_series(close_series(bars));

    for (i, line) in lines.iter().enumerate() {
        spec = spec.with_series(
            ChartSeries::from_xy(
                &offset_x(bars, line.window),
                &line.values,
                cycle_color(i),
                SeriesStyle::Line,
            )
            .labelled(format!("SMA {}", line.window)),
        );
    }
    Some(spec)
}

pub fn bands_chart(bars: &PriceBars, overlay: &BandOverlay) -> Option<ChartSpec> {
    let x = offset_x(bars, overlay.window);
    let bands = &overlay.bands;
    Some(
        ChartSpec::new(
            format!(
                "{} Bollinger Bands ({}, {})",
                bars.symbol, overlay.window, overlay.multiplier
            ),
            "Close Price",
            bars.first_date()?,
        )
        .with_series(close_series(bars))
        .with_series(
            ChartSeries::from_xy(&x, &bands.upper_band, ORANGE_RED, SeriesStyle::Line).labelled("Upper"),
        )
        .with_series(
            ChartSeries::from_xy(&x, &bands.middle_band, DARK_GRAY, SeriesStyle::Line)
                .labelled(format!("SMA {}", overlay.window)),
        )
        .with_series(
            ChartSeries::from_xy(&x, &bands.lower_band, DODGER_BLUE, SeriesStyle::Line).labelled("Lower"),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricefit::read_price_bars_from;

    fn bars(closes: &[f64]) -> PriceBars {
        let csv: String = closes
            .iter()
            .enumerate()
            .map(|(i, c)| format!("AAPL,{:02}-03-2011,,{c},{c},{c},{c},1\n", i + 1))
            .collect();
        read_price_bars_from(csv.as_bytes(), "test").unwrap()
    }

    #[test]
    fn test_averages_line_up_with_window_end() {
        let bars = bars(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let lines = moving_averages(&bars, &[3, 10, 2]);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].window, 3);
        assert_eq!(lines[0].dates[0], bars.date[2]);
        assert_eq!(lines[0].values, vec![2.0, 3.0, 4.0, 5.0]);
        assert_eq!(lines[1].window, 2);
        assert_eq!(lines[1].values.len(), 5);

        let chart = averages_chart(&bars, &lines).unwrap();
        assert_eq!(chart.series.len(), 3);
        assert_eq!(chart.series[1].points[0], (2.0, 2.0));
    }

    #[test]
    fn test_band_overlay() {
        let bars = bars(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        let overlay = band_overlay(&bars, 8, 2.0).unwrap();
        // mean 5, population sd 2
        assert_eq!(overlay.bands.middle_band, vec![5.0]);
        assert!((overlay.bands.upper_band[0] - 9.0).abs() < 1e-12);
        assert!((overlay.bands.lower_band[0] - 1.0).abs() < 1e-12);
        assert_eq!(overlay.dates, vec![bars.date[7]]);

        assert!(band_overlay(&bars, 9, 2.0).is_none());
        assert_eq!(bands_chart(&bars, &overlay).unwrap().series.len(), 4);
    }
}
