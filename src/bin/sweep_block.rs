//! Run a block of what-if scenarios from a CSV file
//!
//! Writes one summary row per scenario for side-by-side comparison.

use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use pension_projection::report::write_summaries_csv;
use pension_projection::scenario::load_scenarios;
use pension_projection::ScenarioRunner;

#[derive(Parser)]
#[command(name = "sweep-block")]
#[command(about = "Project every scenario in a CSV file and write their summaries")]
struct Args {
    /// Scenario CSV (one configuration per row)
    input: PathBuf,

    /// Summary output path
    #[arg(short, long, default_value = "scenario_summaries.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let scenarios = load_scenarios(&args.input)
        .with_context(|| format!("loading scenarios from {}", args.input.display()))?;
    info!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    let run_start = Instant::now();
    let outcomes = ScenarioRunner::new().run_scenarios(&scenarios);
    info!("Projections complete in {:?}", run_start.elapsed());

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    write_summaries_csv(file, &outcomes)?;

    println!("Wrote {} scenario summaries to {}", outcomes.len(), args.output.display());
    for outcome in &outcomes {
        let s = &outcome.summary;
        println!(
            "  {:<20} pension £{:>10.2}  final investments £{:>12.2}",
            outcome.scenario_id, s.annual_pension_at_retirement, s.final_investment_value
        );
    }
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
