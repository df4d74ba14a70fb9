use chrono::NaiveDate;

use dcabot::aggregate::finalize;
use dcabot::data::{PriceScenario, SyntheticSeriesGenerator};
use dcabot::sweep::{run_sweep, SweepPlan};
use dcabot::Result;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("dcabot=info")
        .init();

    println!("\n╔═══════════════════════════════════════════════════════╗");
    println!("║             DCA SWEEP DEMO (SYNTHETIC DATA)           ║");
    println!("╚═══════════════════════════════════════════════════════╝");

    let scenarios = vec![
        (PriceScenario::Uptrend, "📈 Uptrend (+0.2% daily)"),
        (PriceScenario::Downtrend, "📉 Downtrend (-0.2% daily)"),
        (PriceScenario::Sideways, "↔️  Sideways (mean-reverting)"),
        (PriceScenario::Volatile, "⚡ Volatile (±5% swings)"),
    ];

    let start_date = NaiveDate::from_ymd_opt(2017, 1, 1).expect("valid date");

    println!(
        "\n{:<32} {:>8} {:>12} {:>12}",
        "Scenario", "Runs", "Best ROI%", "Worst ROI%"
    );
    println!("{}", "─".repeat(70));

    for (scenario, name) in scenarios {
        // 2000 days covers the full 4-year grid
        let mut generator = SyntheticSeriesGenerator::new(42);
        let series = generator.generate(scenario, 2000, start_date);

        let plan = SweepPlan::four_year();
        let rows = finalize(run_sweep(&plan, &series)?);

        let best = rows
            .iter()
            .map(|r| r.roi_percent)
            .fold(f64::NEG_INFINITY, f64::max);
        let worst = rows
            .iter()
            .map(|r| r.roi_percent)
            .fold(f64::INFINITY, f64::min);

        println!(
            "{:<32} {:>8} {:>12.2} {:>12.2}",
            name,
            rows.len(),
            best,
            worst
        );
    }

    println!("\n═══════════════════════════════════════════════════════\n");

    Ok(())
}
