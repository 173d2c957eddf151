//! Load what-if scenarios from a CSV file, one scenario per row
//!
//! Rates are given as percentages. Mortgage columns may be left blank for
//! a scenario without a mortgage.

use std::io::Read;
use std::path::Path;

use csv::Reader;
use serde::Deserialize;

use crate::error::{ProjectionError, Result};
use crate::mortgage::MortgageConfig;
use crate::pension::SchemeRule;
use crate::projection::{InvestmentConfig, PensionBasis, PhaseAmounts, ProjectionConfig};

/// A configuration tagged with an identifier
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub id: String,
    pub config: ProjectionConfig,
}

/// Raw CSV row
#[derive(Debug, Deserialize)]
struct CsvRow {
    scenario_id: String,
    current_age: u32,
    retirement_age: u32,
    end_age: u32,
    salary: f64,
    salary_growth_pct: f64,
    scheme: String,
    #[serde(default)]
    pension_method: Option<String>,
    nhs_years: f64,
    investment: f64,
    investment_growth_pct: f64,
    annual_contribution: f64,
    monthly_income: f64,
    drawdown_before_sp: f64,
    drawdown_after_sp: f64,
    #[serde(default)]
    mortgage: Option<f64>,
    #[serde(default)]
    mortgage_rate_pct: Option<f64>,
    #[serde(default)]
    mortgage_term: Option<u32>,
    #[serde(default)]
    remortgage_years: Option<u32>,
    #[serde(default)]
    product_fee: Option<f64>,
}

impl CsvRow {
    fn into_scenario(self) -> Result<Scenario> {
        let scheme: SchemeRule = self.scheme.parse()?;

        let pension = match self.pension_method.as_deref().map(str::trim) {
            None | Some("") | Some("simplified") => PensionBasis::Simplified {
                scheme,
                years_in_scheme: self.nhs_years,
            },
            Some("accrued") => PensionBasis::single_scheme(scheme, self.nhs_years),
            Some(other) => {
                return Err(ProjectionError::Parse(format!(
                    "Unknown pension method '{}' in scenario {}",
                    other, self.scenario_id
                )))
            }
        };

        let mortgage = self.mortgage.map(|principal| {
            let defaults = MortgageConfig::default();
            MortgageConfig {
                principal,
                annual_rate: self
                    .mortgage_rate_pct
                    .map_or(defaults.annual_rate, |pct| pct / 100.0),
                term_years: self.mortgage_term.unwrap_or(defaults.term_years),
                remortgage_frequency_years: self
                    .remortgage_years
                    .unwrap_or(defaults.remortgage_frequency_years),
                product_fee: self.product_fee.unwrap_or(defaults.product_fee),
            }
        });

        let config = ProjectionConfig {
            current_age: self.current_age,
            retirement_age: self.retirement_age,
            end_age: self.end_age,
            current_salary: self.salary,
            salary_growth_rate: self.salary_growth_pct / 100.0,
            pension,
            investment: InvestmentConfig {
                principal: self.investment,
                growth_rate: self.investment_growth_pct / 100.0,
                annual_contribution: PhaseAmounts::uniform(self.annual_contribution),
                monthly_disposable_income: PhaseAmounts::uniform(self.monthly_income),
                post_mortgage_monthly_uplift: 0.0,
            },
            drawdown: PhaseAmounts::before_and_after_state_pension(
                self.drawdown_before_sp,
                self.drawdown_after_sp,
            ),
            mortgage,
            ..Default::default()
        };

        Ok(Scenario {
            id: self.scenario_id,
            config,
        })
    }
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<Scenario>> {
    let file = std::fs::File::open(path)?;
    load_scenarios_from_reader(file)
}

/// Load scenarios from any reader (e.g., string buffer)
pub fn load_scenarios_from_reader<R: Read>(reader: R) -> Result<Vec<Scenario>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut scenarios = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.into_scenario()?);
    }

    Ok(scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const HEADER: &str = "scenario_id,current_age,retirement_age,end_age,salary,salary_growth_pct,scheme,pension_method,nhs_years,investment,investment_growth_pct,annual_contribution,monthly_income,drawdown_before_sp,drawdown_after_sp,mortgage,mortgage_rate_pct,mortgage_term,remortgage_years,product_fee";

    #[test]
    fn test_load_scenarios() {
        let data = format!(
            "{}\nbase,40,65,85,50000,2,2015 CARE,,15,60000,5,5000,0,0,0,,,,,\n\
             house,35,67,90,45000,2.5,1995,accrued,20,10000,6,0,500,10000,5000,170000,3.98,15,5,999\n",
            HEADER
        );
        let scenarios = load_scenarios_from_reader(data.as_bytes()).unwrap();
        assert_eq!(scenarios.len(), 2);

        let base = &scenarios[0];
        assert_eq!(base.id, "base");
        assert_eq!(base.config.salary_growth_rate, 0.02);
        assert!(base.config.mortgage.is_none());
        assert!(matches!(base.config.pension, PensionBasis::Simplified { .. }));

        let house = &scenarios[1];
        let mortgage = house.config.mortgage.as_ref().unwrap();
        assert_eq!(mortgage.principal, 170_000.0);
        assert_relative_eq!(mortgage.annual_rate, 0.0398, epsilon = 1e-12);
        assert_eq!(house.config.drawdown.retired_on_state_pension, 5_000.0);
        assert!(matches!(house.config.pension, PensionBasis::Accrued { .. }));
    }

    #[test]
    fn test_unknown_scheme_rejected() {
        let data = format!(
            "{}\nbad,40,65,85,50000,2,1987,,15,60000,5,5000,0,0,0,,,,,\n",
            HEADER
        );
        let result = load_scenarios_from_reader(data.as_bytes());
        assert!(matches!(result, Err(ProjectionError::UnknownScheme(_))));
    }

    #[test]
    fn test_unknown_pension_method_rejected() {
        let data = format!(
            "{}\nbad,40,65,85,50000,2,care,guess,15,60000,5,5000,0,0,0,,,,,\n",
            HEADER
        );
        let result = load_scenarios_from_reader(data.as_bytes());
        assert!(matches!(result, Err(ProjectionError::Parse(_))));
    }
}
