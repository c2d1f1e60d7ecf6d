use pricefit::palette::{CRIMSON, FOREST_GREEN};
use pricefit::{Candles, ChartSpec, PriceBars};

/// The last `count` bars, or all of them when `count` is `None`.
pub fn tail(bars: &PriceBars, count: Option<usize>) -> PriceBars {
    let start = count.map_or(0, |n| bars.len().saturating_sub(n));
    PriceBars {
        symbol: bars.symbol.clone(),
        date: bars.date[start..].to_vec(),
        open: bars.open[start..].to_vec(),
        high: bars.high[start..].to_vec(),
        low: bars.low[start..].to_vec(),
        close: bars.close[start..].to_vec(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CandleCounts {
    /// close >= open
    pub rising: usize,
    pub falling: usize,
}

impl CandleCounts {
    pub fn of(bars: &PriceBars) -> Self {
        let rising = bars
            .open
            .iter()
            .zip(&bars.close)
            .filter(|(o, c)| c >= o)
            .count();
        Self {
            rising,
            falling: bars.len() - rising,
        }
    }
}

/// Hollow red candles for rising days, filled green ones for falling days.
pub fn candle_chart(bars: &PriceBars) -> Option<ChartSpec> {
    let origin = bars.first_date()?;
    Some(
        ChartSpec::new(format!("{} Candlestick", bars.symbol), "Price", origin).with_candles(
            Candles {
                x: bars.ordinals(),
                open: bars.open.clone(),
                high: bars.high.clone(),
                low: bars.low.clone(),
                close: bars.close.clone(),
                rising: CRIMSON,
                falling: FOREST_GREEN,
                hollow_rising: true,
            },
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricefit::read_price_bars_from;

    const BARS: &str = "\
AAPL,28-01-2011,,344.17,344.4,333.53,336.1,21144800
AAPL,31-01-2011,,335.8,340.04,334.3,339.32,13473000
AAPL,01-02-2011,,341.3,345.65,340.98,345.03,15236800
";

    #[test]
    fn test_tail_and_counts() {
        let bars = read_price_bars_from(BARS.as_bytes(), "test").unwrap();
        assert_eq!(CandleCounts::of(&bars), CandleCounts { rising: 2, falling: 1 });

        let last = tail(&bars, Some(2));
        assert_eq!(last.len(), 2);
        assert_eq!(last.open[0], 335.8);
        assert_eq!(tail(&bars, Some(10)).len(), 3);
        assert_eq!(tail(&bars, None), bars);
    }

    #[test]
    fn test_chart_uses_day_offsets() {
        let bars = read_price_bars_from(BARS.as_bytes(), "test").unwrap();
        let chart = candle_chart(&tail(&bars, Some(2))).unwrap();
        let candles = chart.candles.unwrap();
        assert_eq!(candles.x, vec![0.0, 1.0]);
        assert!(candles.hollow_rising);
        assert!(chart.series.is_empty());
    }
}
