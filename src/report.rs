//! CSV output for projection tables and batch summaries

use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::info;
use serde::Serialize;

use crate::error::Result;
use crate::projection::{ProjectionResult, YearRecord};
use crate::scenario::ScenarioOutcome;

#[derive(Debug, Serialize)]
struct YearCsvRow {
    #[serde(rename = "Age")]
    age: u32,
    #[serde(rename = "Phase")]
    phase: &'static str,
    #[serde(rename = "Salary")]
    salary: f64,
    #[serde(rename = "NHS Pension 1995")]
    pension_1995: f64,
    #[serde(rename = "NHS Pension 2008")]
    pension_2008: f64,
    #[serde(rename = "NHS Pension 2015")]
    pension_2015: f64,
    #[serde(rename = "NHS Pension")]
    pension_income: f64,
    #[serde(rename = "State Pension")]
    state_pension: f64,
    #[serde(rename = "Investment Drawdown")]
    drawdown: f64,
    #[serde(rename = "Investment Contribution")]
    investment_contribution: f64,
    #[serde(rename = "Investment Value")]
    investment_value: f64,
    #[serde(rename = "Mortgage Balance")]
    mortgage_balance: Option<f64>,
    #[serde(rename = "Total Income")]
    total_income: f64,
    #[serde(rename = "Real Total Income")]
    real_total_income: f64,
    #[serde(rename = "Surplus/Deficit")]
    surplus_or_deficit: Option<f64>,
}

impl From<&YearRecord> for YearCsvRow {
    fn from(record: &YearRecord) -> Self {
        Self {
            age: record.age,
            phase: record.phase.label(),
            salary: record.salary,
            pension_1995: record.pension_by_scheme.final_salary_1995,
            pension_2008: record.pension_by_scheme.final_salary_2008,
            pension_2015: record.pension_by_scheme.care_2015,
            pension_income: record.pension_income,
            state_pension: record.state_pension,
            drawdown: record.drawdown,
            investment_contribution: record.investment_contribution,
            investment_value: record.investment_value,
            mortgage_balance: record.mortgage_balance,
            total_income: record.total_income,
            real_total_income: record.real_total_income,
            surplus_or_deficit: record.surplus_or_deficit,
        }
    }
}

#[derive(Debug, Serialize)]
struct EarningsCsvRow {
    #[serde(rename = "Age")]
    age: u32,
    #[serde(rename = "Pensionable Earnings")]
    pensionable_earnings: f64,
}

#[derive(Debug, Serialize)]
struct SummaryCsvRow<'a> {
    scenario_id: &'a str,
    total_years: u32,
    salary_at_retirement: f64,
    annual_pension_at_retirement: f64,
    monthly_mortgage_payment: Option<f64>,
    total_mortgage_cost: Option<f64>,
    remortgage_count: Option<u32>,
    final_investment_value: f64,
    final_surplus_or_deficit: Option<f64>,
    peak_total_income: f64,
    lifetime_income: f64,
    lifetime_real_income: f64,
}

/// Write one row per projection year
pub fn write_projection_csv<W: Write>(writer: W, result: &ProjectionResult) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in &result.records {
        csv_writer.serialize(YearCsvRow::from(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the projection table to a file
pub fn write_projection_csv_path<P: AsRef<Path>>(path: P, result: &ProjectionResult) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_projection_csv(file, result)?;
    info!(
        "Wrote {} projection years to {}",
        result.records.len(),
        path.as_ref().display()
    );
    Ok(())
}

/// Write the detailed pensionable earnings history
pub fn write_earnings_csv<W: Write>(writer: W, result: &ProjectionResult) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for entry in result.earnings_history() {
        csv_writer.serialize(EarningsCsvRow {
            age: entry.age,
            pensionable_earnings: entry.pensionable_earnings,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write one summary row per scenario
pub fn write_summaries_csv<W: Write>(writer: W, outcomes: &[ScenarioOutcome]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for outcome in outcomes {
        let s = &outcome.summary;
        csv_writer.serialize(SummaryCsvRow {
            scenario_id: &outcome.scenario_id,
            total_years: s.total_years,
            salary_at_retirement: s.salary_at_retirement,
            annual_pension_at_retirement: s.annual_pension_at_retirement,
            monthly_mortgage_payment: s.monthly_mortgage_payment,
            total_mortgage_cost: s.total_mortgage_cost,
            remortgage_count: s.remortgage_count,
            final_investment_value: s.final_investment_value,
            final_surplus_or_deficit: s.final_surplus_or_deficit,
            peak_total_income: s.peak_total_income,
            lifetime_income: s.lifetime_income,
            lifetime_real_income: s.lifetime_real_income,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mortgage::MortgageConfig;
    use crate::projection::{ProjectionConfig, ProjectionEngine};

    fn sample_result() -> ProjectionResult {
        let config = ProjectionConfig {
            current_age: 60,
            retirement_age: 65,
            end_age: 70,
            mortgage: Some(MortgageConfig {
                term_years: 5,
                ..Default::default()
            }),
            ..Default::default()
        };
        ProjectionEngine::with_default_assumptions(config).project()
    }

    #[test]
    fn test_projection_csv_has_row_per_year() {
        let mut buffer = Vec::new();
        write_projection_csv(&mut buffer, &sample_result()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 1 + 11);
        assert!(lines[0].starts_with("Age,Phase,Salary,NHS Pension 1995"));
        assert!(lines[1].starts_with("60,Full time,50000"));
        // Mortgage balance is blank once the term has ended
        assert!(lines[11].contains(",,"));
    }

    #[test]
    fn test_earnings_csv() {
        let mut buffer = Vec::new();
        write_earnings_csv(&mut buffer, &sample_result()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Age,Pensionable Earnings");
        assert_eq!(lines.len(), 1 + 6);
    }

    #[test]
    fn test_summaries_csv() {
        let outcomes = vec![ScenarioOutcome {
            scenario_id: "base".to_string(),
            summary: sample_result().summary(),
        }];
        let mut buffer = Vec::new();
        write_summaries_csv(&mut buffer, &outcomes).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("scenario_id,total_years"));
        assert!(text.lines().nth(1).unwrap().starts_with("base,11,"));
    }

    #[test]
    fn test_write_to_file() {
        let path = std::env::temp_dir().join("pension_projection_report_test.csv");
        write_projection_csv_path(&path, &sample_result()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 12);
        let _ = std::fs::remove_file(&path);
    }
}
