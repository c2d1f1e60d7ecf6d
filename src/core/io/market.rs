use chrono::{Datelike, NaiveDate};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use super::calendar::day_ordinal;

/// Accepted date layouts, tried in order.
const DATE_FORMATS: [&str; 2] = ["%d-%m-%Y", "%Y-%m-%d"];

/// Column positions in a market history row:
/// `symbol,date,<ignored>,open,high,low,close[,volume]`.
const SYMBOL_COL: usize = 0;
const DATE_COL: usize = 1;
const OPEN_COL: usize = 3;
const MIN_FIELDS: usize = 7;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open market history file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("error reading line {line}: {source}")]
    Read {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("line {line} has {got} fields, expected at least 7")]
    TooFewFields { line: u64, got: usize },

    #[error("invalid date '{value}' on line {line}")]
    InvalidDate { line: u64, value: String },

    #[error("invalid {field} price '{value}' on line {line}")]
    InvalidPrice {
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("non-positive price on line {line}")]
    NonPositivePrice { line: u64 },

    #[error("invalid open/high/low/close relationship on line {line}")]
    InvalidOhlc { line: u64 },

    #[error("no valid data found in {0}")]
    Empty(String),
}

/// Daily OHLC bars of one symbol in file (chronological) order.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBars {
    pub symbol: String,
    pub date: Vec<NaiveDate>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
}

impl PriceBars {
    /// Get the number of bars
    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.date.first().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.date.last().copied()
    }

    /// Day offsets of every bar from the first bar's date.
    pub fn ordinals(&self) -> Vec<f64> {
        match self.first_date() {
            Some(origin) => self.date.iter().map(|&d| day_ordinal(origin, d)).collect(),
            None => Vec::new(),
        }
    }

    /// Weekday of every bar, Monday = 0.
    pub fn weekday_indices(&self) -> Vec<u32> {
        self.date
            .iter()
            .map(|d| d.weekday().num_days_from_monday())
            .collect()
    }

    fn push(&mut self, date: NaiveDate, open: f64, high: f64, low: f64, close: f64) {
        self.date.push(date);
        self.open.push(open);
        self.high.push(high);
        self.low.push(low);
        self.close.push(close);
    }
}

/// Read a comma separated market history file.
pub fn read_price_bars<P: AsRef<Path>>(path: P) -> Result<PriceBars, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let bars = read_price_bars_from(file, &path.display().to_string())?;
    debug!(path = %path.display(), bars = bars.len(), symbol = %bars.symbol, "loaded price bars");
    Ok(bars)
}

/// Parse market history rows from any reader; `source_name` is only used in
/// error messages.
pub fn read_price_bars_from<R: Read>(reader: R, source_name: &str) -> Result<PriceBars, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut bars = PriceBars {
        symbol: String::new(),
        date: Vec::new(),
        open: Vec::new(),
        high: Vec::new(),
        low: Vec::new(),
        close: Vec::new(),
    };

    for result in csv_reader.records() {
        let record = result.map_err(|source| LoadError::Read {
            line: source.position().map_or(0, |p| p.line()),
            source,
        })?;
        let line = record.position().map_or(0, |p| p.line());

        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        if record.len() < MIN_FIELDS {
            return Err(LoadError::TooFewFields {
                line,
                got: record.len(),
            });
        }

        let date_str = &record[DATE_COL];
        let date = parse_date(date_str).ok_or_else(|| LoadError::InvalidDate {
            line,
            value: date_str.to_string(),
        })?;

        let mut prices = [0.0; 4];
        for (k, field) in ["open", "high", "low", "close"].into_iter().enumerate() {
            let raw = &record[OPEN_COL + k];
            prices[k] = raw.parse::<f64>().map_err(|_| LoadError::InvalidPrice {
                line,
                field,
                value: raw.to_string(),
            })?;
        }
        let [o, h, l, c] = prices;

        if !(o > 0.0 && h > 0.0 && l > 0.0 && c > 0.0) {
            return Err(LoadError::NonPositivePrice { line });
        }
        if l > o || l > c || h < o || h < c {
            return Err(LoadError::InvalidOhlc { line });
        }

        if bars.symbol.is_empty() {
            bars.symbol = record[SYMBOL_COL].to_string();
        }
        bars.push(date, o, h, l, c);
    }

    if bars.is_empty() {
        return Err(LoadError::Empty(source_name.to_string()));
    }

    Ok(bars)
}

/// Parse `dd-mm-YYYY`, falling back to ISO `YYYY-mm-dd`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\
AAPL,28-01-2011,,344.17,344.4,333.53,336.1,21144800
AAPL,31-01-2011,,335.8,340.04,334.3,339.32,13473000

AAPL,01-02-2011,,341.3,345.65,340.98,345.03,15236800
";

    #[test]
    fn test_read_price_bars() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", SAMPLE).unwrap();

        let bars = read_price_bars(file.path()).unwrap();
        assert_eq!(bars.len(), 3);
        assert_eq!(bars.symbol(), "AAPL");
        assert_eq!(bars.first_date(), NaiveDate::from_ymd_opt(2011, 1, 28));
        assert!((bars.open[1] - 335.8).abs() < 1e-10);
        assert!((bars.close[2] - 345.03).abs() < 1e-10);
        // Fri, Mon, Tue
        assert_eq!(bars.weekday_indices(), vec![4, 0, 1]);
        assert_eq!(bars.ordinals(), vec![0.0, 3.0, 4.0]);
    }

    #[test]
    fn test_iso_dates_and_missing_volume() {
        let data = "XYZ,2020-01-02,x,10,11,9,10.5\n";
        let bars = read_price_bars_from(data.as_bytes(), "inline").unwrap();
        assert_eq!(bars.date[0], NaiveDate::from_ymd_opt(2020, 1, 2).unwrap());
    }

    #[test]
    fn test_invalid_date_reports_line() {
        let data = "XYZ,02-01-2020,,10,11,9,10.5\nXYZ,2020/01/03,,10,11,9,10.5\n";
        match read_price_bars_from(data.as_bytes(), "inline") {
            Err(LoadError::InvalidDate { line, value }) => {
                assert_eq!(line, 2);
                assert_eq!(value, "2020/01/03");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_ohlc_relationship() {
        // high below low
        let data = "XYZ,02-01-2020,,100.0,99.0,101.0,100.5\n";
        assert!(matches!(
            read_price_bars_from(data.as_bytes(), "inline"),
            Err(LoadError::InvalidOhlc { line: 1 })
        ));
    }

    #[test]
    fn test_negative_and_unparsable_prices() {
        let data = "XYZ,02-01-2020,,-1,11,9,10.5\n";
        assert!(matches!(
            read_price_bars_from(data.as_bytes(), "inline"),
            Err(LoadError::NonPositivePrice { .. })
        ));
        let data = "XYZ,02-01-2020,,abc,11,9,10.5\n";
        assert!(matches!(
            read_price_bars_from(data.as_bytes(), "inline"),
            Err(LoadError::InvalidPrice { field: "open", .. })
        ));
    }

    #[test]
    fn test_short_row() {
        let data = "XYZ,02-01-2020,,10,11\n";
        assert!(matches!(
            read_price_bars_from(data.as_bytes(), "inline"),
            Err(LoadError::TooFewFields { got: 5, .. })
        ));
    }

    #[test]
    fn test_empty_file() {
        let file = NamedTempFile::new().unwrap();
        assert!(matches!(read_price_bars(file.path()), Err(LoadError::Empty(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_price_bars("/definitely/not/here.csv"),
            Err(LoadError::Open { .. })
        ));
    }
}
