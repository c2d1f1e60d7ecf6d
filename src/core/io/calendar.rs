use chrono::{Datelike, Days, Duration, NaiveDate, Weekday};

/// Offsets beyond this many days are outside any plausible price history.
const MAX_ORDINAL_DAYS: f64 = 1e7;

pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The first Monday..Friday date strictly after `date`. Holidays are not
/// modelled.
pub fn next_business_day(date: NaiveDate) -> NaiveDate {
    let mut next = date + Days::new(1);
    while !is_business_day(next) {
        next = next + Days::new(1);
    }
    next
}

/// The `count` business days following `date`.
pub fn business_days_after(date: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(count);
    let mut current = date;
    for _ in 0..count {
        current = next_business_day(current);
        days.push(current);
    }
    days
}

/// Signed day offset of `date` from `origin`.
pub fn day_ordinal(origin: NaiveDate, date: NaiveDate) -> f64 {
    date.signed_duration_since(origin).num_days() as f64
}

/// Inverse of [`day_ordinal`], rounding to the nearest whole day.
pub fn date_from_ordinal(origin: NaiveDate, ordinal: f64) -> Option<NaiveDate> {
    if !ordinal.is_finite() || ordinal.abs() > MAX_ORDINAL_DAYS {
        return None;
    }
    origin.checked_add_signed(Duration::days(ordinal.round() as i64))
}

/// `dd Mon YYYY`, the label format used on chart axes.
pub fn format_day(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}
