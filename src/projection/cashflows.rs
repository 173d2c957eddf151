//! Output structures for projections

use serde::{Deserialize, Serialize};

use super::config::LifePhase;
use crate::mortgage::MortgageSchedule;
use crate::pension::SchemeBreakdown;

/// A single row of projection output for one year of age
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    // Timing
    pub year_index: u32,
    pub age: u32,
    pub phase: LifePhase,

    // Income flows
    pub salary: f64,
    pub pension_by_scheme: SchemeBreakdown,
    pub pension_income: f64,
    pub state_pension: f64,
    pub drawdown: f64,

    // Investment
    /// Amount paid into investments during the year, before drawdown
    pub investment_contribution: f64,
    /// Investment value at the start of the year
    pub investment_value: f64,

    // Mortgage; `None` when there is no mortgage or the term has ended
    pub mortgage_balance: Option<f64>,

    // Summary
    pub total_income: f64,
    /// Total income in today's money
    pub real_total_income: f64,
    /// Investment value less outstanding mortgage, when a mortgage is modelled
    pub surplus_or_deficit: Option<f64>,
}

/// Pensionable earnings for one year, for the detailed earnings table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EarningsEntry {
    pub age: u32,
    pub pensionable_earnings: f64,
}

/// Mortgage schedule together with its lifetime cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageOutcome {
    pub schedule: MortgageSchedule,
    pub remortgage_count: u32,
    pub total_cost: f64,
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// One record per age, ascending
    pub records: Vec<YearRecord>,

    /// Age of the first salary in `salary_history`
    pub current_age: u32,

    /// Full-time salary from current age to retirement age
    pub salary_history: Vec<f64>,

    /// NHS pension at retirement, before indexation
    pub pension_at_retirement: SchemeBreakdown,

    pub mortgage: Option<MortgageOutcome>,
}

impl ProjectionResult {
    /// Raw earnings history for the detailed display mode
    pub fn earnings_history(&self) -> Vec<EarningsEntry> {
        self.salary_history
            .iter()
            .enumerate()
            .map(|(k, &salary)| EarningsEntry {
                age: self.current_age + k as u32,
                pensionable_earnings: salary,
            })
            .collect()
    }

    pub fn record_at_age(&self, age: u32) -> Option<&YearRecord> {
        self.records.iter().find(|r| r.age == age)
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let lifetime_income: f64 = self.records.iter().map(|r| r.total_income).sum();
        let lifetime_real_income: f64 = self.records.iter().map(|r| r.real_total_income).sum();
        let peak_total_income = self
            .records
            .iter()
            .map(|r| r.total_income)
            .fold(0.0, f64::max);

        let last = self.records.last();

        ProjectionSummary {
            total_years: self.records.len() as u32,
            salary_at_retirement: self.salary_history.last().copied().unwrap_or(0.0),
            annual_pension_at_retirement: self.pension_at_retirement.total(),
            pension_by_scheme: self.pension_at_retirement,
            monthly_mortgage_payment: self.mortgage.as_ref().map(|m| m.schedule.monthly_payment),
            total_mortgage_cost: self.mortgage.as_ref().map(|m| m.total_cost),
            remortgage_count: self.mortgage.as_ref().map(|m| m.remortgage_count),
            final_investment_value: last.map(|r| r.investment_value).unwrap_or(0.0),
            final_surplus_or_deficit: last.and_then(|r| r.surplus_or_deficit),
            peak_total_income,
            lifetime_income,
            lifetime_real_income,
        }
    }
}

/// Summary scalars for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_years: u32,
    pub salary_at_retirement: f64,
    pub annual_pension_at_retirement: f64,
    pub pension_by_scheme: SchemeBreakdown,
    pub monthly_mortgage_payment: Option<f64>,
    pub total_mortgage_cost: Option<f64>,
    pub remortgage_count: Option<u32>,
    pub final_investment_value: f64,
    pub final_surplus_or_deficit: Option<f64>,
    pub peak_total_income: f64,
    pub lifetime_income: f64,
    pub lifetime_real_income: f64,
}
