use std::path::Path;

use serde::Deserialize;

use crate::error::DcaError;
use crate::models::{PriceRecord, PriceSeries};
use crate::Result;

/// Cleaned history row; a leading unnamed index column (pandas-style
/// exports) is ignored
#[derive(Debug, Deserialize)]
struct CleanedRow {
    #[serde(rename = "Id")]
    id: u32,
    date: String,
    close: f64,
}

/// Load a cleaned history file into a validated `PriceSeries`.
///
/// The upstream cleaner guarantees dense ids and ascending dates; this
/// re-checks those invariants so a corrupt or hand-edited file fails loudly
/// instead of producing silently wrong lookups.
pub fn load_price_series(path: &Path) -> Result<PriceSeries> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();

    for row in reader.deserialize::<CleanedRow>() {
        let row = row?;
        records.push(PriceRecord {
            id: row.id,
            date: super::parse_history_date(&row.date)?,
            close: row.close,
        });
    }

    validate_records(&records)?;

    tracing::info!(
        "Loaded {} days of price history from {}",
        records.len(),
        path.display()
    );

    Ok(PriceSeries::new(records))
}

/// Check the series invariants: dense ids from 1, strictly ascending dates,
/// positive closes
pub fn validate_records(records: &[PriceRecord]) -> Result<()> {
    for (index, record) in records.iter().enumerate() {
        let expected_id = index as u32 + 1;
        if record.id != expected_id {
            return Err(DcaError::InvalidSeries(format!(
                "ids must be dense from 1: expected {}, found {}",
                expected_id, record.id
            )));
        }
        if !(record.close > 0.0) {
            return Err(DcaError::InvalidSeries(format!(
                "non-positive close {} at id {}",
                record.close, record.id
            )));
        }
        if index > 0 && record.date <= records[index - 1].date {
            return Err(DcaError::InvalidSeries(format!(
                "dates must strictly ascend: {} then {}",
                records[index - 1].date,
                record.date
            )));
        }
    }
    Ok(())
}
