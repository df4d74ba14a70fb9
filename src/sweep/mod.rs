use crate::models::{DcaSchedule, Horizon, PriceSeries, SimulationRequest, SimulationResult};
use crate::simulation::simulate;
use crate::Result;

/// Base daily amounts swept for both horizons
pub const DEFAULT_DAILY_AMOUNTS: &[f64] = &[0.5, 1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0];

/// Yearly growth factors swept for the four-year horizon
pub const DEFAULT_GROWTH_FACTORS: &[f64] = &[0.9, 1.0, 1.02, 1.05, 1.10, 1.20];

/// Parameter grid for one sweep.
///
/// The one-year sweep has no growth axis (`growth_factors: None`); the
/// four-year sweep enumerates every growth factor per daily amount.
#[derive(Debug, Clone)]
pub struct SweepPlan {
    pub horizon: Horizon,
    pub daily_amounts: Vec<f64>,
    pub growth_factors: Option<Vec<f64>>,
}

impl SweepPlan {
    /// One-year sweep over the default daily amounts
    pub fn one_year() -> Self {
        Self {
            horizon: Horizon::OneYear,
            daily_amounts: DEFAULT_DAILY_AMOUNTS.to_vec(),
            growth_factors: None,
        }
    }

    /// Four-year sweep over the default daily amounts and growth factors
    pub fn four_year() -> Self {
        Self {
            horizon: Horizon::FourYears,
            daily_amounts: DEFAULT_DAILY_AMOUNTS.to_vec(),
            growth_factors: Some(DEFAULT_GROWTH_FACTORS.to_vec()),
        }
    }

    /// Validate every parameter before any simulation work begins
    pub fn validate(&self) -> Result<()> {
        for &amount in &self.daily_amounts {
            DcaSchedule::constant(amount).validate()?;
        }
        if let Some(factors) = &self.growth_factors {
            for &growth in factors {
                DcaSchedule::with_growth(1.0, growth).validate()?;
            }
        }
        Ok(())
    }

    /// Schedules in canonical order: amounts outer, growth factors inner
    fn schedules(&self) -> Vec<DcaSchedule> {
        let mut schedules = Vec::new();
        for &amount in &self.daily_amounts {
            match &self.growth_factors {
                Some(factors) => {
                    for &growth in factors {
                        schedules.push(DcaSchedule::with_growth(amount, growth));
                    }
                }
                None => schedules.push(DcaSchedule::constant(amount)),
            }
        }
        schedules
    }

    /// Highest start id that leaves a full horizon of data, derived from
    /// the loaded series rather than hard-coded. Zero when the series is
    /// shorter than the horizon.
    pub fn max_start_id(&self, prices: &PriceSeries) -> u32 {
        let days = self.horizon.days();
        if prices.max_id() < days {
            0
        } else {
            prices.max_id() - days + 1
        }
    }

    /// Number of combinations this plan will run against `prices`
    pub fn combination_count(&self, prices: &PriceSeries) -> usize {
        self.schedules().len() * self.max_start_id(prices) as usize
    }
}

/// Run every (schedule, start id) combination of `plan` against `prices`.
///
/// Enumeration is deterministic: daily amounts outer, growth factors middle,
/// start ids inner, ascending on each axis. A combination that fails with
/// missing price data is logged and skipped; it does not abort the sweep.
pub fn run_sweep(plan: &SweepPlan, prices: &PriceSeries) -> Result<Vec<SimulationResult>> {
    plan.validate()?;

    let total_days = plan.horizon.days();
    let max_start_id = plan.max_start_id(prices);

    if max_start_id == 0 {
        tracing::warn!(
            "Series too short for {} sweep: {} days loaded, {} needed",
            plan.horizon.label(),
            prices.len(),
            total_days
        );
        return Ok(Vec::new());
    }

    let expected = plan.combination_count(prices);
    tracing::info!(
        "Running {} sweep: {} combinations ({} schedules x {} start dates)",
        plan.horizon.label(),
        expected,
        plan.schedules().len(),
        max_start_id
    );

    let mut results = Vec::with_capacity(expected);

    for schedule in plan.schedules() {
        for start_id in 1..=max_start_id {
            let request = SimulationRequest {
                start_id,
                schedule,
                total_days,
            };

            match simulate(&request, prices) {
                Ok(result) => results.push(result),
                Err(e) => {
                    // Should not happen with a correctly derived start
                    // range; skip the combination and keep the sweep alive.
                    tracing::error!(
                        "Simulation failed (start_id={}, daily={}, growth={:?}): {}",
                        start_id,
                        schedule.daily_base_usd,
                        schedule.yearly_growth,
                        e
                    );
                }
            }
        }
    }

    tracing::info!(
        "{} sweep complete: {}/{} combinations succeeded",
        plan.horizon.label(),
        results.len(),
        expected
    );

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DcaError;
    use crate::models::PriceRecord;
    use chrono::NaiveDate;

    fn make_series(days: usize) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2018, 6, 1).unwrap();
        let records = (0..days)
            .map(|i| PriceRecord {
                id: i as u32 + 1,
                date: start + chrono::Duration::days(i as i64),
                close: 100.0 + (i % 37) as f64,
            })
            .collect();
        PriceSeries::new(records)
    }

    fn small_plan(horizon: Horizon, with_growth: bool) -> SweepPlan {
        SweepPlan {
            horizon,
            daily_amounts: vec![1.0, 10.0],
            growth_factors: if with_growth {
                Some(vec![0.9, 1.1])
            } else {
                None
            },
        }
    }

    #[test]
    fn test_max_start_id_derived_from_series() {
        let plan = small_plan(Horizon::OneYear, false);

        assert_eq!(plan.max_start_id(&make_series(365)), 1);
        assert_eq!(plan.max_start_id(&make_series(400)), 36);
        assert_eq!(plan.max_start_id(&make_series(100)), 0);
    }

    #[test]
    fn test_sweep_respects_start_id_bound() {
        let series = make_series(400);
        let plan = small_plan(Horizon::OneYear, false);

        let results = run_sweep(&plan, &series).unwrap();

        // 2 amounts x 36 valid start ids, all succeeding
        assert_eq!(results.len(), 2 * 36);

        // Every run must end within the series
        let last_date = series.lookup(series.max_id()).unwrap().date;
        for result in &results {
            assert!(result.end_date <= last_date);
        }
    }

    #[test]
    fn test_sweep_enumeration_order() {
        let series = make_series(370);
        let plan = small_plan(Horizon::OneYear, false);

        let results = run_sweep(&plan, &series).unwrap();

        // Amounts outer, start ids inner ascending
        assert_eq!(results.len(), 2 * 6);
        assert_eq!(results[0].schedule.daily_base_usd, 1.0);
        assert_eq!(results[5].schedule.daily_base_usd, 1.0);
        assert_eq!(results[6].schedule.daily_base_usd, 10.0);
        assert!(results[0].start_date < results[1].start_date);
    }

    #[test]
    fn test_four_year_grid_includes_growth_axis() {
        let series = make_series(1461);
        let plan = small_plan(Horizon::FourYears, true);

        let results = run_sweep(&plan, &series).unwrap();

        // 2 amounts x 2 growth factors x 2 start ids
        assert_eq!(results.len(), 8);
        assert_eq!(results[0].schedule.yearly_growth, Some(0.9));
        assert_eq!(results[2].schedule.yearly_growth, Some(1.1));
    }

    #[test]
    fn test_sweep_on_short_series_is_empty() {
        let series = make_series(50);
        let plan = small_plan(Horizon::OneYear, false);

        let results = run_sweep(&plan, &series).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_sweep_rejects_bad_parameters_up_front() {
        let series = make_series(400);

        let bad_amount = SweepPlan {
            horizon: Horizon::OneYear,
            daily_amounts: vec![1.0, -1.0],
            growth_factors: None,
        };
        assert!(matches!(
            run_sweep(&bad_amount, &series).unwrap_err(),
            DcaError::InvalidSchedule(_)
        ));

        let bad_growth = SweepPlan {
            horizon: Horizon::FourYears,
            daily_amounts: vec![1.0],
            growth_factors: Some(vec![0.0]),
        };
        assert!(matches!(
            run_sweep(&bad_growth, &series).unwrap_err(),
            DcaError::InvalidSchedule(_)
        ));
    }

    #[test]
    fn test_sweep_is_deterministic() {
        let series = make_series(450);
        let plan = small_plan(Horizon::OneYear, false);

        let first = run_sweep(&plan, &series).unwrap();
        let second = run_sweep(&plan, &series).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_default_plans_match_configured_grids() {
        let one_year = SweepPlan::one_year();
        assert_eq!(one_year.horizon, Horizon::OneYear);
        assert_eq!(one_year.daily_amounts.len(), 8);
        assert!(one_year.growth_factors.is_none());

        let four_year = SweepPlan::four_year();
        assert_eq!(four_year.horizon, Horizon::FourYears);
        assert_eq!(four_year.growth_factors.as_ref().unwrap().len(), 6);
    }
}
