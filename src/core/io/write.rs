use std::fs;
use std::io;
use std::path::Path;

use indicators::WeeklySummary;

/// Write one `symbol,open,high,low,close` CSV row per week.
pub fn write_weekly_summaries<P: AsRef<Path>>(
    path: P,
    symbol: &str,
    summaries: &[WeeklySummary],
) -> csv::Result<()> {
    let path = path.as_ref();
    create_parent_dirs(path)?;

    let mut writer = csv::Writer::from_path(path)?;
    for s in summaries {
        writer.serialize((symbol, s.open, s.high, s.low, s.close))?;
    }
    writer.flush()?;
    Ok(())
}

fn create_parent_dirs(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_weekly_summaries() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("out/summary.csv");
        let weeks = [
            WeeklySummary {
                open: 335.8,
                high: 364.9,
                low: 333.5,
                close: 351.88,
            },
            WeeklySummary {
                open: 354.75,
                high: 360.0,
                low: 349.52,
                close: 356.85,
            },
        ];

        write_weekly_summaries(&file_path, "AAPL", &weeks).unwrap();

        let written = fs::read_to_string(file_path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "AAPL,335.8,364.9,333.5,351.88");
        assert_eq!(lines[1], "AAPL,354.75,360.0,349.52,356.85");
    }
}
