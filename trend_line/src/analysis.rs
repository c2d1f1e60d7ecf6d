use chrono::NaiveDate;
use indicators::{fit_trend_lines, pivot_levels, ModelError, PivotLevels, TrendLine, TrendLines};
use pricefit::palette::{RGBColor, DODGER_BLUE, LIME_GREEN, ORANGE_RED, PALE_GREEN, PALE_RED};
use pricefit::{business_days_after, day_ordinal, Candles, ChartSeries, ChartSpec, PriceBars, SeriesStyle};
use serde::Serialize;

/// Line values on one business day past the data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedLevels {
    pub date: NaiveDate,
    pub trend: f64,
    pub support: f64,
    pub resistance: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendAnalysis {
    pub symbol: String,
    #[serde(skip)]
    pub levels: PivotLevels,
    pub lines: TrendLines,
    pub projection: Vec<ProjectedLevels>,
}

/// Fit the pivot lines on day offsets from the first bar and extend them
/// `projected_days` business days past the last bar.
pub fn analyze_trend(bars: &PriceBars, projected_days: usize) -> Result<TrendAnalysis, ModelError> {
    let (origin, last) = match (bars.first_date(), bars.last_date()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(ModelError::InsufficientData { needed: 1, got: 0 }),
    };

    let levels = pivot_levels(&bars.high, &bars.low, &bars.close)?;
    let lines = fit_trend_lines(&bars.ordinals(), &levels)?;

    let projection = business_days_after(last, projected_days)
        .into_iter()
        .map(|date| {
            let x = day_ordinal(origin, date);
            ProjectedLevels {
                date,
                trend: lines.trend.value_at(x),
                support: lines.support.value_at(x),
                resistance: lines.resistance.value_at(x),
            }
        })
        .collect();

    Ok(TrendAnalysis {
        symbol: bars.symbol.clone(),
        levels,
        lines,
        projection,
    })
}

/// Pale candles overlaid with the daily levels, the fitted lines, and the
/// lines' projections.
pub fn build_chart(bars: &PriceBars, analysis: &TrendAnalysis) -> Option<ChartSpec> {
    let origin = bars.first_date()?;
    let x = bars.ordinals();
    let last_x = *x.last()?;

    let future_x: Vec<f64> = analysis
        .projection
        .iter()
        .map(|p| day_ordinal(origin, p.date))
        .collect();

    let mut spec = ChartSpec::new(
        format!("{} Trend Lines", analysis.symbol),
        "Price",
        origin,
    )
    .with_candles(Candles {
        x: x.clone(),
        open: bars.open.clone(),
        high: bars.high.clone(),
        low: bars.low.clone(),
        close: bars.close.clone(),
        rising: PALE_GREEN,
        falling: PALE_RED,
        hollow_rising: false,
    });

    let layers: [(&str, &[f64], TrendLine, RGBColor); 3] = [
        ("Pivot", analysis.levels.pivots.as_slice(), analysis.lines.trend, DODGER_BLUE),
        ("Support", analysis.levels.supports.as_slice(), analysis.lines.support, LIME_GREEN),
        ("Resistance", analysis.levels.resistances.as_slice(), analysis.lines.resistance, ORANGE_RED),
    ];

    for (name, values, line, color) in layers {
        spec = spec
            .with_series(ChartSeries::from_xy(&x, values, color, SeriesStyle::Markers).labelled(name))
            .with_series(ChartSeries::from_xy(&x, &line.project(&x), color, SeriesStyle::Line));

        if !future_x.is_empty() {
            let mut ahead = vec![last_x];
            ahead.extend_from_slice(&future_x);
            spec = spec.with_series(ChartSeries::from_xy(
                &ahead,
                &line.project(&ahead),
                color,
                SeriesStyle::Projection,
            ));
        }
    }

    Some(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricefit::read_price_bars_from;

    // Thu 2011-03-03 .. Wed 2011-03-09, rising one dollar per trading day
    const BARS: &str = "\
AAPL,03-03-2011,,100,103,99,102,1000
AAPL,04-03-2011,,101,104,100,103,1000
AAPL,07-03-2011,,102,105,101,104,1000
AAPL,08-03-2011,,103,106,102,105,1000
AAPL,09-03-2011,,104,107,103,106,1000
";

    fn bars() -> PriceBars {
        read_price_bars_from(BARS.as_bytes(), "test").unwrap()
    }

    #[test]
    fn test_projection_dates_and_band_ordering() {
        let analysis = analyze_trend(&bars(), 3).unwrap();
        let dates: Vec<NaiveDate> = analysis.projection.iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2011, 3, 10).unwrap(),
                NaiveDate::from_ymd_opt(2011, 3, 11).unwrap(),
                NaiveDate::from_ymd_opt(2011, 3, 14).unwrap(),
            ]
        );
        for p in &analysis.projection {
            assert!(p.support < p.trend && p.trend < p.resistance);
        }
        // constant 4 dollar range: the bands sit 4 away from the trend
        let p = &analysis.projection[0];
        assert!((p.resistance - p.trend - 4.0).abs() < 1e-9);
        assert!((p.trend - p.support - 4.0).abs() < 1e-9);
        assert!(analysis.lines.trend.slope > 0.0);
    }

    #[test]
    fn test_chart_layers() {
        let bars = bars();
        let analysis = analyze_trend(&bars, 2).unwrap();
        let chart = build_chart(&bars, &analysis).unwrap();

        assert!(chart.candles.is_some());
        assert_eq!(chart.series.len(), 9);
        let projection = &chart.series[2];
        assert_eq!(projection.style, SeriesStyle::Projection);
        // starts at the last bar, then 2011-03-10 and 2011-03-11
        let xs: Vec<f64> = projection.points.iter().map(|p| p.0).collect();
        assert_eq!(xs, vec![6.0, 7.0, 8.0]);
    }

    #[test]
    fn test_no_projection_requested() {
        let bars = bars();
        let analysis = analyze_trend(&bars, 0).unwrap();
        assert!(analysis.projection.is_empty());
        assert_eq!(build_chart(&bars, &analysis).unwrap().series.len(), 6);
    }
}
