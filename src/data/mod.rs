pub mod cleaner;
pub mod loader;
pub mod synthetic;

pub use cleaner::{clean_history, CleaningStats};
pub use loader::load_price_series;
pub use synthetic::{PriceScenario, SyntheticSeriesGenerator};

use chrono::NaiveDate;

use crate::error::DcaError;
use crate::Result;

/// Parse a history date that may or may not carry a time component
pub(crate) fn parse_history_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(datetime) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Ok(datetime.date());
    }

    Err(DcaError::InvalidSeries(format!(
        "unparseable date: {:?}",
        raw
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_date() {
        let date = parse_history_date("2016-01-01").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2016, 1, 1).unwrap());
    }

    #[test]
    fn test_parse_datetime() {
        let date = parse_history_date("2021-03-01 00:00:00").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2021, 3, 1).unwrap());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_history_date("not-a-date").is_err());
    }
}
