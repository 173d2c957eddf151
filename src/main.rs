//! Pension Projection CLI
//!
//! Command-line front end for the pension, cash-flow and mortgage-vs-investment
//! calculators.

use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use pension_projection::assumptions::load_revaluation_history;
use pension_projection::report::{write_projection_csv, write_projection_csv_path, write_summaries_csv};
use pension_projection::scenario::ScenarioOutcome;
use pension_projection::projection::PensionBasis;
use pension_projection::{
    amortize, compound, ProjectionConfig, ProjectionEngine, ProjectionResult, RevaluationHistory,
    ScenarioRunner, SchemeRule,
};

/// NHS pension, cash-flow and mortgage-vs-investment projections
#[derive(Parser)]
#[command(name = "pension-projection")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the annual NHS pension at retirement
    Pension {
        #[arg(long, default_value_t = 40)]
        current_age: u32,

        #[arg(long, default_value_t = 65, value_parser = clap::value_parser!(u32).range(55..=70))]
        retirement_age: u32,

        /// Current annual salary (£)
        #[arg(long, default_value_t = 50_000.0)]
        salary: f64,

        /// Annual salary growth (%)
        #[arg(long, default_value_t = 2.0)]
        salary_growth: f64,

        /// Years in the 1995 section
        #[arg(long, default_value_t = 5.0)]
        years_1995: f64,

        /// Years in the 2008 section
        #[arg(long, default_value_t = 5.0)]
        years_2008: f64,

        /// Years in the 2015 CARE scheme
        #[arg(long, default_value_t = 5.0)]
        years_2015: f64,

        /// Use a single scheme instead of the per-section years ("2015 CARE", "1995", "2008")
        #[arg(long, requires = "nhs_years")]
        scheme: Option<String>,

        /// Years in the single scheme given by --scheme
        #[arg(long)]
        nhs_years: Option<f64>,

        /// CSV of CARE revaluation percentages (year,revaluation_pct)
        #[arg(long)]
        revaluation: Option<PathBuf>,
    },

    /// Compare paying down a mortgage with growing investments
    Mortgage {
        /// Investment amount (£)
        #[arg(long, default_value_t = 60_000.0)]
        investment: f64,

        /// Investment return rate (%)
        #[arg(long, default_value_t = 10.0, value_parser = investment_rate_pct)]
        investment_rate: f64,

        /// Annual additional investment (£)
        #[arg(long, default_value_t = 0.0)]
        additional_investment: f64,

        /// Mortgage amount (£)
        #[arg(long, default_value_t = 170_000.0)]
        mortgage: f64,

        /// Mortgage interest rate (%)
        #[arg(long, default_value_t = 3.98, value_parser = mortgage_rate_pct)]
        mortgage_rate: f64,

        /// Mortgage term (years)
        #[arg(long, default_value_t = 15, value_parser = clap::value_parser!(u32).range(5..=30))]
        term: u32,

        /// Disposable income for investment (£ per month)
        #[arg(long, default_value_t = 500.0)]
        monthly_income: f64,

        /// Remortgage every this many years
        #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=15))]
        remortgage_every: u32,

        /// Product fee per remortgage (£)
        #[arg(long, default_value_t = 999.0)]
        product_fees: f64,

        /// Investment duration (years, at least the mortgage term)
        #[arg(long, default_value_t = 40, value_parser = clap::value_parser!(u32).range(5..=40))]
        duration: u32,
    },

    /// Run a full year-by-year cash-flow projection
    Project {
        /// JSON projection configuration; defaults are used for anything left out
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the year table to this CSV file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also print the pensionable earnings history
        #[arg(long)]
        detailed: bool,
    },

    /// Summaries across a range of retirement ages
    Sweep {
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(long, default_value_t = 55)]
        from: u32,

        #[arg(long, default_value_t = 70)]
        to: u32,

        /// Write summaries to this CSV file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn bounded_pct(s: &str, max: f64) -> std::result::Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if !(0.0..=max).contains(&value) {
        return Err(format!("must be between 0 and {max}"));
    }
    Ok(value)
}

fn investment_rate_pct(s: &str) -> std::result::Result<f64, String> {
    bounded_pct(s, 15.0)
}

fn mortgage_rate_pct(s: &str) -> std::result::Result<f64, String> {
    bounded_pct(s, 10.0)
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Pension {
            current_age,
            retirement_age,
            salary,
            salary_growth,
            years_1995,
            years_2008,
            years_2015,
            scheme,
            nhs_years,
            revaluation,
        } => {
            let years_served = match (scheme, nhs_years) {
                (Some(scheme), Some(years)) => {
                    let scheme: SchemeRule = scheme.parse()?;
                    BTreeMap::from([(scheme, years)])
                }
                _ => BTreeMap::from([
                    (SchemeRule::FinalSalary1995, years_1995),
                    (SchemeRule::FinalSalary2008, years_2008),
                    (SchemeRule::Care2015, years_2015),
                ]),
            };
            let revaluation = match revaluation {
                Some(path) => load_revaluation_history(&path)
                    .with_context(|| format!("loading revaluation history from {}", path.display()))?,
                None => RevaluationHistory::default(),
            };
            run_pension(current_age, retirement_age, salary, salary_growth / 100.0, years_served, revaluation);
        }
        Commands::Mortgage {
            investment,
            investment_rate,
            additional_investment,
            mortgage,
            mortgage_rate,
            term,
            monthly_income,
            remortgage_every,
            product_fees,
            duration,
        } => {
            if duration < term {
                bail!("investment duration ({duration}) must be at least the mortgage term ({term})");
            }
            let schedule = amortize(mortgage, mortgage_rate / 100.0, term);
            let balances = compound(investment, investment_rate / 100.0, 0, duration, |_, _| {
                additional_investment + monthly_income * 12.0
            });

            println!("Monthly Mortgage Payment: £{:.2}", schedule.monthly_payment);
            println!(
                "Total Mortgage Cost: £{:.2}",
                schedule.total_cost(remortgage_every, product_fees)
            );
            println!();
            println!("{:>5} {:>18} {:>18}", "Year", "Mortgage Balance", "Investment Value");
            for (year, value) in balances.iter().enumerate() {
                let balance = schedule
                    .balance_at(year)
                    .map(|b| format!("{b:.2}"))
                    .unwrap_or_default();
                println!("{:>5} {:>18} {:>18.2}", year, balance, value);
            }
        }
        Commands::Project {
            config,
            output,
            detailed,
        } => {
            let config = load_config(config.as_deref())?;
            let result = ProjectionEngine::with_default_assumptions(config).project();
            print_summary(&result);

            match output {
                Some(path) => write_projection_csv_path(&path, &result)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => write_projection_csv(io::stdout().lock(), &result)?,
            }

            if detailed {
                eprintln!("\nEarnings history:");
                eprintln!("{:>5} {:>22}", "Age", "Pensionable Earnings");
                for entry in result.earnings_history() {
                    eprintln!("{:>5} {:>22.2}", entry.age, entry.pensionable_earnings);
                }
            }
        }
        Commands::Sweep {
            config,
            from,
            to,
            output,
        } => {
            if to < from {
                bail!("--to ({to}) must not be below --from ({from})");
            }
            let config = load_config(config.as_deref())?;
            let outcomes: Vec<ScenarioOutcome> = ScenarioRunner::new()
                .sweep_retirement_ages(&config, from..=to)
                .into_iter()
                .map(|(age, summary)| ScenarioOutcome {
                    scenario_id: format!("retire_at_{age}"),
                    summary,
                })
                .collect();

            match output {
                Some(path) => {
                    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
                    write_summaries_csv(file, &outcomes)?;
                }
                None => write_summaries_csv(io::stdout().lock(), &outcomes)?,
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ProjectionConfig> {
    match path {
        Some(path) => ProjectionConfig::from_json_path(path)
            .with_context(|| format!("loading projection config from {}", path.display())),
        None => Ok(ProjectionConfig::default()),
    }
}

fn run_pension(
    current_age: u32,
    retirement_age: u32,
    salary: f64,
    salary_growth_rate: f64,
    years_served: BTreeMap<SchemeRule, f64>,
    revaluation: RevaluationHistory,
) {
    let config = ProjectionConfig {
        current_age,
        retirement_age,
        end_age: retirement_age,
        current_salary: salary,
        salary_growth_rate,
        pension: PensionBasis::Accrued {
            years_served,
            revaluation,
        },
        ..Default::default()
    };
    let engine = ProjectionEngine::with_default_assumptions(config);
    let history = engine.salary_history();
    let pension = engine.pension_at_retirement(&history);

    println!("Based on a retirement age of {retirement_age}, your estimated annual NHS pension is:");
    println!("  £{:.2} per year", pension.total());
    println!();
    println!("Breakdown by scheme:");
    for scheme in SchemeRule::ALL {
        println!("  {:<18} £{:.2}", scheme.label(), pension.get(scheme));
    }
    println!();
    println!("This is a simplified estimate and does not account for lump sums or specific scheme rules.");
}

fn print_summary(result: &ProjectionResult) {
    let summary = result.summary();
    eprintln!("Projection: {} years", summary.total_years);
    eprintln!("  Salary at retirement:  £{:.2}", summary.salary_at_retirement);
    eprintln!("  NHS pension:           £{:.2} per year", summary.annual_pension_at_retirement);
    if let Some(payment) = summary.monthly_mortgage_payment {
        eprintln!("  Monthly mortgage:      £{:.2}", payment);
    }
    if let Some(cost) = summary.total_mortgage_cost {
        eprintln!("  Total mortgage cost:   £{:.2}", cost);
    }
    eprintln!("  Final investments:     £{:.2}", summary.final_investment_value);
    if let Some(surplus) = summary.final_surplus_or_deficit {
        eprintln!("  Final surplus/deficit: £{:.2}", surplus);
    }
}
