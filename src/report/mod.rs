use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::aggregate::ResultRow;
use crate::Result;

/// CSV row for the four-year table
#[derive(Debug, Serialize)]
struct FourYearCsvRow {
    start_date: NaiveDate,
    end_date: NaiveDate,
    #[serde(rename = "initial_daily_invest_USD")]
    initial_daily_invest_usd: f64,
    yearly_multiplication: f64,
    #[serde(rename = "final_USD")]
    final_usd: f64,
    #[serde(rename = "payment_USD")]
    payment_usd: f64,
    #[serde(rename = "profit_USD")]
    profit_usd: f64,
    #[serde(rename = "owned_BTC")]
    owned_btc: f64,
    roi_percent: f64,
}

/// CSV row for the one-year table (no growth column)
#[derive(Debug, Serialize)]
struct OneYearCsvRow {
    start_date: NaiveDate,
    end_date: NaiveDate,
    #[serde(rename = "initial_daily_invest_USD")]
    initial_daily_invest_usd: f64,
    #[serde(rename = "final_USD")]
    final_usd: f64,
    #[serde(rename = "payment_USD")]
    payment_usd: f64,
    #[serde(rename = "profit_USD")]
    profit_usd: f64,
    #[serde(rename = "owned_BTC")]
    owned_btc: f64,
    roi_percent: f64,
}

const FOUR_YEAR_HEADERS: [&str; 9] = [
    "start_date",
    "end_date",
    "initial_daily_invest_USD",
    "yearly_multiplication",
    "final_USD",
    "payment_USD",
    "profit_USD",
    "owned_BTC",
    "roi_percent",
];

const ONE_YEAR_HEADERS: [&str; 8] = [
    "start_date",
    "end_date",
    "initial_daily_invest_USD",
    "final_USD",
    "payment_USD",
    "profit_USD",
    "owned_BTC",
    "roi_percent",
];

/// Round to 2 decimals (USD figures)
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to 10 decimals (asset quantity)
fn round10(value: f64) -> f64 {
    (value * 1e10).round() / 1e10
}

/// Write the sorted four-year result table in one bulk pass.
///
/// USD figures are rounded to 2 decimals and the asset quantity to 10 only
/// here, at the reporting boundary; `roi_percent` stays unrounded.
pub fn write_four_year_table(path: &Path, rows: &[ResultRow]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(FOUR_YEAR_HEADERS)?;

    for row in rows {
        writer.serialize(FourYearCsvRow {
            start_date: row.start_date,
            end_date: row.end_date,
            initial_daily_invest_usd: row.initial_daily_invest_usd,
            // One-year results never reach this table
            yearly_multiplication: row.yearly_multiplication.unwrap_or(1.0),
            final_usd: round2(row.final_usd),
            payment_usd: round2(row.payment_usd),
            profit_usd: round2(row.profit_usd),
            owned_btc: round10(row.owned_btc),
            roi_percent: row.roi_percent,
        })?;
    }

    writer.flush()?;
    tracing::info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Write the sorted one-year result table in one bulk pass
pub fn write_one_year_table(path: &Path, rows: &[ResultRow]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(ONE_YEAR_HEADERS)?;

    for row in rows {
        writer.serialize(OneYearCsvRow {
            start_date: row.start_date,
            end_date: row.end_date,
            initial_daily_invest_usd: row.initial_daily_invest_usd,
            final_usd: round2(row.final_usd),
            payment_usd: round2(row.payment_usd),
            profit_usd: round2(row.profit_usd),
            owned_btc: round10(row.owned_btc),
            roi_percent: row.roi_percent,
        })?;
    }

    writer.flush()?;
    tracing::info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}
