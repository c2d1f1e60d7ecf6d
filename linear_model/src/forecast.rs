use chrono::NaiveDate;
use indicators::{predict_detailed, prediction_date_index, ModelError};
use pricefit::palette::{LIGHT_GRAY, ORANGE_RED};
use pricefit::{day_ordinal, next_business_day, ChartSeries, ChartSpec, PriceBars, SeriesStyle};
use serde::Serialize;

/// One predicted close lined up with the date it predicts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRow {
    pub date: NaiveDate,
    pub predicted: f64,
    /// Observed close on `date`; `None` for the business day after the data.
    pub actual: Option<f64>,
    pub rank: usize,
    pub condition_number: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Forecast {
    pub symbol: String,
    pub window: usize,
    pub rows: Vec<ForecastRow>,
}

impl Forecast {
    /// The prediction for the first business day after the data.
    pub fn next_day(&self) -> Option<&ForecastRow> {
        self.rows.last().filter(|row| row.actual.is_none())
    }
}

/// Predict closes with windows of length `window` and attach dates.
///
/// Prediction `i` belongs to date index `i + 2 * window`; the final one lands
/// on the business day after the last bar.
pub fn forecast_closes(bars: &PriceBars, window: usize) -> Result<Forecast, ModelError> {
    let predictions = predict_detailed(&bars.close, window)?;

    let mut dates = bars.date.clone();
    if let Some(last) = bars.last_date() {
        dates.push(next_business_day(last));
    }

    let rows = predictions
        .iter()
        .filter_map(|p| {
            let at = prediction_date_index(p.index, window);
            dates.get(at).map(|&date| ForecastRow {
                date,
                predicted: p.value,
                actual: bars.close.get(at).copied(),
                rank: p.rank,
                condition_number: p.condition_number,
            })
        })
        .collect();

    Ok(Forecast {
        symbol: bars.symbol.clone(),
        window,
        rows,
    })
}

/// Closes in light gray, predictions in orange red with the last step drawn
/// as a projection.
pub fn build_chart(bars: &PriceBars, forecast: &Forecast) -> Option<ChartSpec> {
    let origin = bars.first_date()?;

    let closes = ChartSeries::from_xy(&bars.ordinals(), &bars.close, LIGHT_GRAY, SeriesStyle::Line)
        .labelled("Close");

    let points: Vec<(f64, f64)> = forecast
        .rows
        .iter()
        .map(|row| (day_ordinal(origin, row.date), row.predicted))
        .collect();
    // All but the last prediction are drawn solid, the last step as a projection.
    let (fitted, projected) = match points.len() {
        0 => (Vec::new(), Vec::new()),
        len => (points[..len - 1].to_vec(), points[len.saturating_sub(2)..].to_vec()),
    };
    let fitted = ChartSeries::new(fitted, ORANGE_RED, SeriesStyle::Line)
        .labelled(format!("Linear Model (N = {})", forecast.window));
    let projected = ChartSeries::new(projected, ORANGE_RED, SeriesStyle::Projection);

    Some(
        ChartSpec::new(
            format!("{} Linear Model", forecast.symbol),
            "Close Price",
            origin,
        )
        .with_series(closes)
        .with_series(fitted)
        .with_series(projected),
    )
}
