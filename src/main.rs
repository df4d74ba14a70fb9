use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use dcabot::aggregate::finalize;
use dcabot::data::{clean_history, load_price_series};
use dcabot::report::{write_four_year_table, write_one_year_table};
use dcabot::sweep::{run_sweep, SweepPlan};

#[derive(Parser)]
#[command(name = "dcabot", about = "DCA grid-sweep backtester")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Clean a raw daily price export into the id-stamped history file
    Clean {
        /// Raw export with at least `date` and `close` columns
        #[arg(long, default_value = "data/Bitstamp_BTCUSD_d.csv")]
        input: PathBuf,

        /// Where to write the cleaned history
        #[arg(long, default_value = "data/cleaned.csv")]
        output: PathBuf,

        /// Drop rows before this date
        #[arg(long, default_value = "2016-01-01")]
        from: NaiveDate,
    },

    /// Run the DCA grid sweeps and write the result tables
    Sweep {
        /// Cleaned history file (output of `clean`)
        #[arg(long, default_value = "data/cleaned.csv")]
        data: PathBuf,

        /// Directory for the result tables
        #[arg(long, default_value = "data")]
        out_dir: PathBuf,

        /// Which sweep(s) to run
        #[arg(long, value_enum, default_value_t = HorizonArg::Both)]
        horizon: HorizonArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum HorizonArg {
    #[value(name = "1y")]
    OneYear,
    #[value(name = "4y")]
    FourYear,
    Both,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    setup_logging();

    let cli = Cli::parse();

    match cli.command {
        Command::Clean {
            input,
            output,
            from,
        } => {
            let stats = clean_history(&input, &output, from)
                .with_context(|| format!("failed to clean {}", input.display()))?;
            println!(
                "Cleaned {} rows -> {} kept ({} before {} skipped)",
                stats.read_rows, stats.kept_rows, stats.skipped_before_cutoff, from
            );
        }

        Command::Sweep {
            data,
            out_dir,
            horizon,
        } => {
            let series = load_price_series(&data)
                .with_context(|| format!("failed to load {}", data.display()))?;
            std::fs::create_dir_all(&out_dir)?;

            if matches!(horizon, HorizonArg::FourYear | HorizonArg::Both) {
                let started = Instant::now();
                let plan = SweepPlan::four_year();
                let rows = finalize(run_sweep(&plan, &series)?);

                let path = out_dir.join("dca4y_result.csv");
                write_four_year_table(&path, &rows)?;
                println!(
                    "4Y sweep: {} rows -> {} ({:.1}s)",
                    rows.len(),
                    path.display(),
                    started.elapsed().as_secs_f64()
                );
            }

            if matches!(horizon, HorizonArg::OneYear | HorizonArg::Both) {
                let started = Instant::now();
                let plan = SweepPlan::one_year();
                let rows = finalize(run_sweep(&plan, &series)?);

                let path = out_dir.join("dca1y_result.csv");
                write_one_year_table(&path, &rows)?;
                println!(
                    "1Y sweep: {} rows -> {} ({:.1}s)",
                    rows.len(),
                    path.display(),
                    started.elapsed().as_secs_f64()
                );
            }
        }
    }

    Ok(())
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dcabot=info".into()),
        )
        .init();
}
