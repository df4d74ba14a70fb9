use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DcaError;
use crate::Result;

/// One day of cleaned price history.
///
/// Ids are dense integers starting at 1, strictly increasing with date.
/// The cleaning/loading layer guarantees this; the engine only bounds-checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub id: u32,
    pub date: NaiveDate,
    pub close: f64,
}

/// Immutable, time-ordered daily price history with O(1) lookup by id.
///
/// Owned by the sweep orchestrator and shared read-only with every
/// simulation, so concurrent dispatch needs no locking.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    records: Vec<PriceRecord>,
}

impl PriceSeries {
    /// Wrap cleaned records.
    ///
    /// Precondition: ids are dense from 1 and dates ascend. Use
    /// `data::loader` to build a series from disk with full validation.
    pub fn new(records: Vec<PriceRecord>) -> Self {
        Self { records }
    }

    /// Bounds-checked lookup by id
    pub fn lookup(&self, id: u32) -> Result<&PriceRecord> {
        if id == 0 || id > self.max_id() {
            return Err(DcaError::MissingPriceData {
                id,
                max_id: self.max_id(),
            });
        }
        Ok(&self.records[(id - 1) as usize])
    }

    /// Highest valid id (equals the series length)
    pub fn max_id(&self) -> u32 {
        self.records.len() as u32
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }
}

/// Daily investment rule for one DCA run.
///
/// With `yearly_growth` set, the amount for simulated day `d` (0-indexed)
/// is `daily_base_usd * yearly_growth ^ (d / 365)`; otherwise constant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DcaSchedule {
    pub daily_base_usd: f64,
    pub yearly_growth: Option<f64>,
}

impl DcaSchedule {
    pub fn constant(daily_base_usd: f64) -> Self {
        Self {
            daily_base_usd,
            yearly_growth: None,
        }
    }

    pub fn with_growth(daily_base_usd: f64, yearly_growth: f64) -> Self {
        Self {
            daily_base_usd,
            yearly_growth: Some(yearly_growth),
        }
    }

    /// Validate the schedule invariants
    pub fn validate(&self) -> Result<()> {
        if !(self.daily_base_usd > 0.0) {
            return Err(DcaError::InvalidSchedule(format!(
                "daily base amount must be positive, got {}",
                self.daily_base_usd
            )));
        }
        if let Some(growth) = self.yearly_growth {
            if !(growth > 0.0) {
                return Err(DcaError::InvalidSchedule(format!(
                    "yearly growth factor must be positive, got {}",
                    growth
                )));
            }
        }
        Ok(())
    }

    /// USD amount invested on simulated day `day` (0-indexed from run start)
    pub fn amount_for_day(&self, day: u32) -> f64 {
        match self.yearly_growth {
            Some(growth) => {
                let year = day / 365;
                self.daily_base_usd * growth.powi(year as i32)
            }
            None => self.daily_base_usd,
        }
    }
}

/// Holding horizon of a sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Horizon {
    OneYear,
    FourYears,
}

impl Horizon {
    pub fn days(self) -> u32 {
        match self {
            Horizon::OneYear => 365,
            Horizon::FourYears => 365 * 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Horizon::OneYear => "1y",
            Horizon::FourYears => "4y",
        }
    }
}

/// One simulation to run: where to start, what to invest, for how long
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRequest {
    pub start_id: u32,
    pub schedule: DcaSchedule,
    pub total_days: u32,
}

impl SimulationRequest {
    /// Fail-fast validation of the public entry point
    pub fn validate(&self) -> Result<()> {
        self.schedule.validate()?;
        if self.total_days == 0 {
            return Err(DcaError::InvalidHorizon);
        }
        Ok(())
    }
}

/// Outcome of a single DCA run, immutable once produced.
///
/// `profit_usd == final_usd - invested_usd` exactly. ROI is a derived
/// metric computed by the aggregator, not the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub schedule: DcaSchedule,
    pub total_days: u32,
    pub final_usd: f64,
    pub invested_usd: f64,
    pub profit_usd: f64,
    pub owned_asset: f64,
}

impl SimulationResult {
    /// Return on investment in percent.
    ///
    /// Errors with `DegenerateInvestment` when nothing was invested, so the
    /// caller decides between failing and a NaN sentinel.
    pub fn roi_percent(&self) -> Result<f64> {
        if self.invested_usd == 0.0 {
            return Err(DcaError::DegenerateInvestment);
        }
        Ok(self.profit_usd / self.invested_usd * 100.0)
    }
}
