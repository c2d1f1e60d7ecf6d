use serde::Serialize;

use crate::error::{check_len, Result};

/// Number of trading weekdays, Monday (0) through Friday (4).
pub const TRADING_WEEKDAYS: usize = 5;

/// Mean close for each weekday Monday..Friday; `None` where no bar fell on
/// that weekday. Weekday indices count from Monday = 0; weekend bars are
/// ignored.
pub fn weekday_average_closes(
    weekdays: &[u32],
    close: &[f64],
) -> Result<[Option<f64>; TRADING_WEEKDAYS]> {
    check_len("weekday closes", weekdays.len(), close.len())?;

    let mut sums = [0.0; TRADING_WEEKDAYS];
    let mut counts = [0usize; TRADING_WEEKDAYS];
    for (&day, &price) in weekdays.iter().zip(close) {
        let day = day as usize;
        if day < TRADING_WEEKDAYS {
            sums[day] += price;
            counts[day] += 1;
        }
    }

    let mut averages = [None; TRADING_WEEKDAYS];
    for (day, avg) in averages.iter_mut().enumerate() {
        if counts[day] > 0 {
            *avg = Some(sums[day] / counts[day] as f64);
        }
    }
    Ok(averages)
}

/// Open, high, low and close of one trading week.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeeklySummary {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Weekly OHLC summaries of the bars from the first Monday to the last Friday.
///
/// A new week starts whenever the weekday index does not increase, so weeks
/// shortened by holidays still group correctly. Returns an empty vector when
/// there is no Monday followed by a Friday.
pub fn weekly_summaries(
    weekdays: &[u32],
    open: &[f64],
    high: &[f64],
    low: &[f64],
    close: &[f64],
) -> Result<Vec<WeeklySummary>> {
    let n = weekdays.len();
    check_len("weekly opens", n, open.len())?;
    check_len("weekly highs", n, high.len())?;
    check_len("weekly lows", n, low.len())?;
    check_len("weekly closes", n, close.len())?;

    let first = weekdays.iter().position(|&d| d == 0);
    let last = weekdays.iter().rposition(|&d| d == 4);
    let (first, last) = match (first, last) {
        (Some(f), Some(l)) if f < l => (f, l),
        _ => return Ok(Vec::new()),
    };

    let mut summaries = Vec::new();
    let mut week_start = first;
    for i in first + 1..=last + 1 {
        let week_ends = i > last || weekdays[i] <= weekdays[i - 1];
        if !week_ends {
            continue;
        }
        let week = week_start..i;
        summaries.push(WeeklySummary {
            open: open[week.start],
            high: high[week.clone()].iter().copied().fold(f64::NEG_INFINITY, f64::max),
            low: low[week.clone()].iter().copied().fold(f64::INFINITY, f64::min),
            close: close[week.end - 1],
        });
        week_start = i;
    }

    Ok(summaries)
}

/// Elementwise `a - b` of two equally long series.
pub fn price_difference(a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    check_len("price difference", a.len(), b.len())?;
    Ok(a.iter().zip(b).map(|(x, y)| x - y).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_averages() {
        let weekdays = [0, 1, 2, 0, 1, 5];
        let close = [10.0, 20.0, 30.0, 20.0, 40.0, 99.0];
        let avg = weekday_average_closes(&weekdays, &close).unwrap();
        assert_eq!(avg[0], Some(15.0));
        assert_eq!(avg[1], Some(30.0));
        assert_eq!(avg[2], Some(30.0));
        assert_eq!(avg[3], None);
        assert_eq!(avg[4], None);
    }

    #[test]
    fn test_weekly_summaries_trim_partial_weeks() {
        // Thu Fri | Mon..Fri | Mon Tue Thu Fri (Wed holiday) | Mon
        let weekdays = [3, 4, 0, 1, 2, 3, 4, 0, 1, 3, 4, 0];
        let open: Vec<f64> = (0..12).map(|v| v as f64 + 100.0).collect();
        let high: Vec<f64> = open.iter().map(|v| v + 2.0).collect();
        let low: Vec<f64> = open.iter().map(|v| v - 1.0).collect();
        let close: Vec<f64> = open.iter().map(|v| v + 0.5).collect();

        let weeks = weekly_summaries(&weekdays, &open, &high, &low, &close).unwrap();
        assert_eq!(weeks.len(), 2);
        assert_eq!(
            weeks[0],
            WeeklySummary {
                open: 102.0,
                high: 108.0,
                low: 101.0,
                close: 106.5
            }
        );
        assert_eq!(weeks[1].open, 107.0);
        assert_eq!(weeks[1].close, 110.5);
        assert_eq!(weeks[1].high, 112.0);
        assert_eq!(weeks[1].low, 106.0);
    }

    #[test]
    fn test_weekly_summaries_without_full_week() {
        let weekdays = [2, 3, 4];
        let v = [1.0, 2.0, 3.0];
        assert!(weekly_summaries(&weekdays, &v, &v, &v, &v).unwrap().is_empty());
    }

    #[test]
    fn test_price_difference() {
        assert_eq!(
            price_difference(&[5.0, 7.0], &[1.0, 2.0]).unwrap(),
            vec![4.0, 5.0]
        );
        assert!(price_difference(&[1.0], &[]).is_err());
    }
}
