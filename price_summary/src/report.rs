use chrono::NaiveDate;
use indicators::{
    recent_average_true_range, weekday_average_closes, weekly_summaries, ModelError,
    WeeklySummary, TRADING_WEEKDAYS,
};
use pricefit::{CalendarConfig, PriceBars};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtrRow {
    pub date: NaiveDate,
    pub atr: f64,
}

/// Smoothed true range of the last `window` bars, one row per bar.
pub fn atr_report(bars: &PriceBars, window: usize) -> Result<Vec<AtrRow>, ModelError> {
    let atr = recent_average_true_range(&bars.high, &bars.low, &bars.close, window)?;
    let start = bars.len() - atr.len();
    Ok(bars.date[start..]
        .iter()
        .zip(atr)
        .map(|(&date, atr)| AtrRow { date, atr })
        .collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Extreme {
    Max,
    Min,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayRow {
    pub name: String,
    pub average: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extreme: Option<Extreme>,
}

/// Average close per trading weekday, tagging the highest and lowest average.
pub fn weekday_report(
    bars: &PriceBars,
    calendar: &CalendarConfig,
) -> Result<Vec<WeekdayRow>, ModelError> {
    let averages = weekday_average_closes(&bars.weekday_indices(), &bars.close)?;

    let present = averages.iter().enumerate().filter_map(|(i, a)| a.map(|a| (i, a)));
    let max = present.clone().max_by(|a, b| a.1.total_cmp(&b.1)).map(|(i, _)| i);
    let min = present.min_by(|a, b| a.1.total_cmp(&b.1)).map(|(i, _)| i);

    Ok((0..TRADING_WEEKDAYS)
        .map(|day| WeekdayRow {
            name: calendar.weekday_name(day as u32).to_string(),
            average: averages[day],
            extreme: if Some(day) == max {
                Some(Extreme::Max)
            } else if Some(day) == min {
                Some(Extreme::Min)
            } else {
                None
            },
        })
        .collect())
}

/// Weekly OHLC of the first `limit` bars (all bars when `None`).
pub fn weekly_report(
    bars: &PriceBars,
    limit: Option<usize>,
) -> Result<Vec<WeeklySummary>, ModelError> {
    let end = limit.map_or(bars.len(), |n| n.min(bars.len()));
    weekly_summaries(
        &bars.weekday_indices()[..end],
        &bars.open[..end],
        &bars.high[..end],
        &bars.low[..end],
        &bars.close[..end],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricefit::read_price_bars_from;

    // Mon 2011-01-03 .. Fri 2011-01-14
    const BARS: &str = "\
AAPL,03-01-2011,,325.64,330.26,324.84,329.57,111284600
AAPL,04-01-2011,,332.44,332.5,328.15,331.29,77270200
AAPL,05-01-2011,,329.55,334.34,329.5,334.0,63879900
AAPL,06-01-2011,,334.72,335.25,332.9,333.73,75107200
AAPL,07-01-2011,,333.99,336.35,331.9,336.12,77982800
AAPL,10-01-2011,,338.83,343.23,337.17,342.46,112140000
AAPL,11-01-2011,,344.88,344.96,339.47,341.64,111027000
AAPL,12-01-2011,,343.25,344.43,342.0,344.42,75647600
AAPL,13-01-2011,,345.16,346.64,343.85,345.68,74195100
AAPL,14-01-2011,,345.89,348.48,344.44,348.48,77210000
";

    fn bars() -> PriceBars {
        read_price_bars_from(BARS.as_bytes(), "test").unwrap()
    }

    #[test]
    fn test_atr_rows_are_dated() {
        let bars = bars();
        let rows = atr_report(&bars, 3).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].date, bars.date[7]);
        assert_eq!(rows[2].date, bars.date[9]);
        assert!(rows.iter().all(|r| r.atr > 0.0));

        assert!(matches!(
            atr_report(&bars, 10),
            Err(ModelError::InsufficientData { needed: 11, got: 10 })
        ));
    }

    #[test]
    fn test_weekday_tags() {
        let rows = weekday_report(&bars(), &CalendarConfig::default()).unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].name, "MON");
        // Monday averages (329.57 + 342.46) / 2
        assert!((rows[0].average.unwrap() - 336.015).abs() < 1e-9);
        // Friday has the highest average, Monday the lowest
        assert_eq!(rows[4].extreme, Some(Extreme::Max));
        assert_eq!(rows[0].extreme, Some(Extreme::Min));
        assert!(rows[1..4].iter().all(|r| r.extreme.is_none()));
    }

    #[test]
    fn test_weekly_report_limit() {
        let bars = bars();
        let weeks = weekly_report(&bars, None).unwrap();
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].open, 325.64);
        assert_eq!(weeks[0].high, 336.35);
        assert_eq!(weeks[0].low, 324.84);
        assert_eq!(weeks[0].close, 336.12);

        assert_eq!(weekly_report(&bars, Some(5)).unwrap().len(), 1);
        assert_eq!(weekly_report(&bars, Some(100)).unwrap().len(), 2);
    }
}
