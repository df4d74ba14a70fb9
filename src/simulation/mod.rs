use crate::models::{PriceSeries, SimulationRequest, SimulationResult};
use crate::Result;

/// Run a single DCA simulation day by day.
///
/// Pure function over a read-only price series, so independent requests are
/// safe to dispatch concurrently.
///
/// # Arguments
/// * `request` - Start id, investment schedule, and number of days
/// * `prices` - Cleaned price history; `start_id + total_days - 1` must be
///   a valid id or the run fails with `MissingPriceData`
///
/// # Returns
/// A `SimulationResult` with the accumulated position valued at the price
/// of the final simulated day.
pub fn simulate(request: &SimulationRequest, prices: &PriceSeries) -> Result<SimulationResult> {
    request.validate()?;

    let mut invested_usd = 0.0;
    let mut owned_asset = 0.0;
    let mut last_price = 0.0;

    // No intermediate rounding: the loop runs up to 1460 iterations and
    // rounding belongs to the reporting boundary only.
    for day in 0..request.total_days {
        let amount = request.schedule.amount_for_day(day);
        let record = prices.lookup(request.start_id + day)?;

        last_price = record.close;
        owned_asset += amount / last_price;
        invested_usd += amount;
    }

    // Value the whole position at the last simulated day's price, reusing
    // the price from the final iteration rather than re-fetching it.
    let final_usd = owned_asset * last_price;
    let profit_usd = final_usd - invested_usd;

    let start_date = prices.lookup(request.start_id)?.date;
    let end_date = prices
        .lookup(request.start_id + request.total_days - 1)?
        .date;

    Ok(SimulationResult {
        start_date,
        end_date,
        schedule: request.schedule,
        total_days: request.total_days,
        final_usd,
        invested_usd,
        profit_usd,
        owned_asset,
    })
}
