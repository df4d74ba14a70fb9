use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::DcaError;
use crate::models::PriceRecord;
use crate::Result;

/// Raw export row; extra columns (open/high/low/volume) are ignored
#[derive(Debug, Deserialize)]
struct RawRow {
    date: String,
    close: f64,
}

/// Statistics from a cleaning run
#[derive(Debug, Clone, PartialEq)]
pub struct CleaningStats {
    pub read_rows: usize,
    pub skipped_before_cutoff: usize,
    pub kept_rows: usize,
}

/// Clean a raw daily price export into the id-stamped history file.
///
/// Keeps `date` and `close`, drops rows before `cutoff`, sorts ascending by
/// date, and assigns dense ids starting at 1. The output is what
/// `loader::load_price_series` expects.
pub fn clean_history(input: &Path, output: &Path, cutoff: NaiveDate) -> Result<CleaningStats> {
    tracing::info!(
        "Cleaning {} (cutoff {}) -> {}",
        input.display(),
        cutoff,
        output.display()
    );

    let mut reader = csv::Reader::from_path(input)?;
    let mut read_rows = 0;
    let mut days: Vec<(NaiveDate, f64)> = Vec::new();

    for row in reader.deserialize::<RawRow>() {
        let row = row?;
        read_rows += 1;
        days.push((super::parse_history_date(&row.date)?, row.close));
    }

    let records = clean_days(days, cutoff)?;
    let stats = CleaningStats {
        read_rows,
        skipped_before_cutoff: read_rows - records.len(),
        kept_rows: records.len(),
    };

    write_cleaned(output, &records)?;
    tracing::info!(
        "Cleaned {} rows: kept {}, skipped {} before cutoff",
        stats.read_rows,
        stats.kept_rows,
        stats.skipped_before_cutoff
    );

    Ok(stats)
}

/// Filter, sort, and id-stamp raw (date, close) pairs
pub fn clean_days(days: Vec<(NaiveDate, f64)>, cutoff: NaiveDate) -> Result<Vec<PriceRecord>> {
    let mut kept: Vec<(NaiveDate, f64)> =
        days.into_iter().filter(|(date, _)| *date >= cutoff).collect();
    kept.sort_by_key(|(date, _)| *date);

    let mut records = Vec::with_capacity(kept.len());
    let mut previous: Option<NaiveDate> = None;

    for (date, close) in kept {
        if !(close > 0.0) {
            return Err(DcaError::InvalidSeries(format!(
                "non-positive close {} on {}",
                close, date
            )));
        }
        if let Some(prev) = previous {
            if date == prev {
                return Err(DcaError::InvalidSeries(format!(
                    "duplicate date in raw history: {}",
                    date
                )));
            }
            // The engine only needs dense ids; calendar holes just mean the
            // exchange skipped a day, so flag them and move on.
            if (date - prev).num_days() > 1 {
                tracing::warn!("Gap in raw history: {} -> {}", prev, date);
            }
        }
        previous = Some(date);

        records.push(PriceRecord {
            id: records.len() as u32 + 1,
            date,
            close,
        });
    }

    Ok(records)
}

/// Write cleaned records as `Id,date,close`
pub fn write_cleaned(path: &Path, records: &[PriceRecord]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(["Id", "date", "close"])?;

    for record in records {
        writer.write_record([
            record.id.to_string(),
            record.date.format("%Y-%m-%d").to_string(),
            record.close.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
