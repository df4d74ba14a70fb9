use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::SimulationResult;

/// One row of a finalized result table.
///
/// `yearly_multiplication` is `None` for one-year rows. Values are the
/// engine's unrounded figures; rounding happens in the report writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub initial_daily_invest_usd: f64,
    pub yearly_multiplication: Option<f64>,
    pub final_usd: f64,
    pub payment_usd: f64,
    pub profit_usd: f64,
    pub owned_btc: f64,
    pub roi_percent: f64,
}

/// Turn raw simulation results into the canonical sorted table.
///
/// Computes `roi_percent` per row (NaN sentinel when nothing was invested,
/// which the schedule invariants make unreachable) and sorts stably,
/// ascending, by `(initial_daily_invest_usd, yearly_multiplication,
/// start_date)`. One-year rows carry no growth component, so the middle key
/// compares equal and the order degenerates to `(amount, start_date)`.
pub fn finalize(results: Vec<SimulationResult>) -> Vec<ResultRow> {
    let mut rows: Vec<ResultRow> = results
        .into_iter()
        .map(|result| {
            let roi_percent = match result.roi_percent() {
                Ok(roi) => roi,
                Err(e) => {
                    tracing::warn!(
                        "ROI undefined for run starting {}: {}",
                        result.start_date,
                        e
                    );
                    f64::NAN
                }
            };

            ResultRow {
                start_date: result.start_date,
                end_date: result.end_date,
                initial_daily_invest_usd: result.schedule.daily_base_usd,
                yearly_multiplication: result.schedule.yearly_growth,
                final_usd: result.final_usd,
                payment_usd: result.invested_usd,
                profit_usd: result.profit_usd,
                owned_btc: result.owned_asset,
                roi_percent,
            }
        })
        .collect();

    rows.sort_by(compare_rows);
    rows
}

fn compare_rows(a: &ResultRow, b: &ResultRow) -> Ordering {
    a.initial_daily_invest_usd
        .total_cmp(&b.initial_daily_invest_usd)
        .then_with(
            || match (a.yearly_multiplication, b.yearly_multiplication) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
            },
        )
        .then_with(|| a.start_date.cmp(&b.start_date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DcaSchedule;

    fn make_result(
        daily: f64,
        growth: Option<f64>,
        start: NaiveDate,
        invested: f64,
        final_usd: f64,
    ) -> SimulationResult {
        SimulationResult {
            start_date: start,
            end_date: start + chrono::Duration::days(364),
            schedule: DcaSchedule {
                daily_base_usd: daily,
                yearly_growth: growth,
            },
            total_days: 365,
            final_usd,
            invested_usd: invested,
            profit_usd: final_usd - invested,
            owned_asset: 1.0,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_roi_computation() {
        let rows = finalize(vec![make_result(
            10.0,
            None,
            date(2020, 1, 1),
            20.0,
            30.0,
        )]);

        assert_eq!(rows.len(), 1);
        assert!((rows[0].roi_percent - 50.0).abs() < 1e-9);
        assert_eq!(rows[0].payment_usd, 20.0);
        assert_eq!(rows[0].profit_usd, 10.0);
    }

    #[test]
    fn test_degenerate_investment_yields_nan() {
        let rows = finalize(vec![make_result(10.0, None, date(2020, 1, 1), 0.0, 0.0)]);

        assert!(rows[0].roi_percent.is_nan());
    }

    #[test]
    fn test_four_year_sort_order() {
        let results = vec![
            make_result(10.0, Some(1.1), date(2020, 1, 2), 100.0, 110.0),
            make_result(0.5, Some(1.2), date(2020, 1, 1), 100.0, 110.0),
            make_result(10.0, Some(0.9), date(2020, 1, 5), 100.0, 110.0),
            make_result(10.0, Some(1.1), date(2020, 1, 1), 100.0, 110.0),
            make_result(0.5, Some(0.9), date(2020, 1, 9), 100.0, 110.0),
        ];

        let rows = finalize(results);

        let keys: Vec<_> = rows
            .iter()
            .map(|r| {
                (
                    r.initial_daily_invest_usd,
                    r.yearly_multiplication.unwrap(),
                    r.start_date,
                )
            })
            .collect();

        assert_eq!(
            keys,
            vec![
                (0.5, 0.9, date(2020, 1, 9)),
                (0.5, 1.2, date(2020, 1, 1)),
                (10.0, 0.9, date(2020, 1, 5)),
                (10.0, 1.1, date(2020, 1, 1)),
                (10.0, 1.1, date(2020, 1, 2)),
            ]
        );
    }

    #[test]
    fn test_one_year_sort_order() {
        let results = vec![
            make_result(2.0, None, date(2021, 3, 1), 100.0, 110.0),
            make_result(0.5, None, date(2021, 5, 1), 100.0, 110.0),
            make_result(2.0, None, date(2021, 1, 1), 100.0, 110.0),
            make_result(0.5, None, date(2021, 2, 1), 100.0, 110.0),
        ];

        let rows = finalize(results);

        let keys: Vec<_> = rows
            .iter()
            .map(|r| (r.initial_daily_invest_usd, r.start_date))
            .collect();

        assert_eq!(
            keys,
            vec![
                (0.5, date(2021, 2, 1)),
                (0.5, date(2021, 5, 1)),
                (2.0, date(2021, 1, 1)),
                (2.0, date(2021, 3, 1)),
            ]
        );
    }

    #[test]
    fn test_finalize_preserves_unrounded_values() {
        let rows = finalize(vec![make_result(
            1.0,
            None,
            date(2020, 1, 1),
            365.0,
            401.123456789,
        )]);

        // No rounding before the reporting boundary
        assert_eq!(rows[0].final_usd, 401.123456789);
        assert_eq!(rows[0].profit_usd, 401.123456789 - 365.0);
    }
}
