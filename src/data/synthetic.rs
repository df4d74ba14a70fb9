use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{PriceRecord, PriceSeries};

/// Market scenario types for synthetic price history
#[derive(Debug, Clone, Copy)]
pub enum PriceScenario {
    /// Steady uptrend with noise (+0.2% daily average)
    Uptrend,
    /// Steady downtrend with noise (-0.2% daily average)
    Downtrend,
    /// Sideways/choppy market (mean-reverting)
    Sideways,
    /// High volatility (±5% daily swings)
    Volatile,
}

/// Generates well-formed daily price series for demos and tests
pub struct SyntheticSeriesGenerator {
    rng: StdRng,
    base_price: f64,
}

impl SyntheticSeriesGenerator {
    /// Create a new generator with a seed for reproducibility
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            base_price: 10_000.0,
        }
    }

    /// Generate a dense daily series starting at `start_date`.
    ///
    /// # Arguments
    /// * `scenario` - The market scenario to simulate
    /// * `num_days` - Number of daily records (1500+ covers a 4-year sweep)
    /// * `start_date` - Date of the first record
    pub fn generate(
        &mut self,
        scenario: PriceScenario,
        num_days: usize,
        start_date: NaiveDate,
    ) -> PriceSeries {
        let closes = match scenario {
            PriceScenario::Uptrend => self.generate_drift(num_days, 0.002),
            PriceScenario::Downtrend => self.generate_drift(num_days, -0.002),
            PriceScenario::Sideways => self.generate_sideways(num_days),
            PriceScenario::Volatile => self.generate_volatile(num_days),
        };

        let records = closes
            .into_iter()
            .enumerate()
            .map(|(i, close)| PriceRecord {
                id: i as u32 + 1,
                date: start_date + Duration::days(i as i64),
                close,
            })
            .collect();

        PriceSeries::new(records)
    }

    /// Random walk with a constant daily drift
    fn generate_drift(&mut self, num_days: usize, drift: f64) -> Vec<f64> {
        let mut closes = Vec::with_capacity(num_days);
        let mut price = self.base_price;

        for _ in 0..num_days {
            // Reduced noise so the trend stays dominant
            let noise = price * self.rng.gen_range(-0.001..0.001);
            price += price * drift + noise;
            price = price.max(self.base_price * 0.01);
            closes.push(price);
        }

        closes
    }

    /// Mean-reverting walk around the base price
    fn generate_sideways(&mut self, num_days: usize) -> Vec<f64> {
        let mut closes = Vec::with_capacity(num_days);
        let mut price = self.base_price;

        for _ in 0..num_days {
            let reversion = (self.base_price - price) * 0.1;
            let noise = price * self.rng.gen_range(-0.01..0.01);
            price += reversion + noise;
            closes.push(price);
        }

        closes
    }

    /// Large random daily swings, floored to stay positive
    fn generate_volatile(&mut self, num_days: usize) -> Vec<f64> {
        let mut closes = Vec::with_capacity(num_days);
        let mut price = self.base_price;

        for _ in 0..num_days {
            price += price * self.rng.gen_range(-0.05..0.05);
            price = price.max(self.base_price * 0.1);
            closes.push(price);
        }

        closes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::validate_records;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2017, 1, 1).unwrap()
    }

    #[test]
    fn test_generated_series_is_valid() {
        let mut gen = SyntheticSeriesGenerator::new(42);

        for scenario in [
            PriceScenario::Uptrend,
            PriceScenario::Downtrend,
            PriceScenario::Sideways,
            PriceScenario::Volatile,
        ] {
            let series = gen.generate(scenario, 500, start());
            assert_eq!(series.len(), 500);
            assert!(validate_records(series.records()).is_ok());
        }
    }

    #[test]
    fn test_uptrend_ends_higher() {
        let mut gen = SyntheticSeriesGenerator::new(42);
        let series = gen.generate(PriceScenario::Uptrend, 500, start());

        let first = series.lookup(1).unwrap().close;
        let last = series.lookup(500).unwrap().close;
        assert!(
            last > first,
            "Uptrend should end higher: {} -> {}",
            first,
            last
        );
    }

    #[test]
    fn test_downtrend_ends_lower() {
        let mut gen = SyntheticSeriesGenerator::new(42);
        let series = gen.generate(PriceScenario::Downtrend, 500, start());

        let first = series.lookup(1).unwrap().close;
        let last = series.lookup(500).unwrap().close;
        assert!(last < first);
    }

    #[test]
    fn test_same_seed_same_series() {
        let a = SyntheticSeriesGenerator::new(7).generate(PriceScenario::Volatile, 100, start());
        let b = SyntheticSeriesGenerator::new(7).generate(PriceScenario::Volatile, 100, start());

        assert_eq!(a.records(), b.records());
    }
}
