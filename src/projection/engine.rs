//! Core projection engine for yearly salary, pension, investment and mortgage projections

use log::{debug, warn};

use super::aggregate::{aggregate, IncomeRow};
use super::cashflows::{MortgageOutcome, ProjectionResult, YearRecord};
use super::config::{LifePhase, PensionBasis, ProjectionConfig};
use super::state::ProjectionState;
use crate::assumptions::Assumptions;
use crate::investment::compound;
use crate::pension::{accrue_schemes, SchemeBreakdown};

/// Main projection engine
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    assumptions: Assumptions,
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with given assumptions and config
    pub fn new(assumptions: Assumptions, config: ProjectionConfig) -> Self {
        Self { assumptions, config }
    }

    /// Engine using the standard NHS assumptions
    pub fn with_default_assumptions(config: ProjectionConfig) -> Self {
        Self::new(Assumptions::default_nhs(), config)
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    pub fn phase_at(&self, age: u32) -> LifePhase {
        self.config.phase_at(age, self.assumptions.state_pension.age)
    }

    /// Full-time salary at each age from current age up to retirement age.
    ///
    /// Always holds at least the current salary, so a retirement age at or
    /// below the current age uses today's salary.
    pub fn salary_history(&self) -> Vec<f64> {
        let years = self.config.retirement_age.saturating_sub(self.config.current_age);
        let growth = self.config.salary_growth_rate;

        std::iter::successors(
            Some(ProjectionState::initial(self.config.current_age, self.config.current_salary)),
            |state| Some(state.advance(growth)),
        )
        .take(years as usize + 1)
        .map(|state| state.base_salary)
        .collect()
    }

    /// Annual NHS pension at the point of retirement
    pub fn pension_at_retirement(&self, salary_history: &[f64]) -> SchemeBreakdown {
        match &self.config.pension {
            PensionBasis::Simplified {
                scheme,
                years_in_scheme,
            } => {
                let salary = salary_history.last().copied().unwrap_or(0.0);
                let divisor = self.assumptions.simplified_service_divisor;
                let amount = if divisor == 0.0 {
                    0.0
                } else {
                    years_in_scheme / divisor * salary
                };
                SchemeBreakdown::single(*scheme, amount)
            }
            PensionBasis::Accrued {
                years_served,
                revaluation,
            } => accrue_schemes(years_served, salary_history, revaluation),
        }
    }

    /// NHS pension paid in the year of `age`, indexed from retirement
    fn pension_in_payment(&self, at_retirement: &SchemeBreakdown, age: u32) -> SchemeBreakdown {
        if age < self.config.retirement_age {
            return SchemeBreakdown::default();
        }
        let years_in_payment = age - self.config.retirement_age;
        at_retirement.scaled((1.0 + self.config.pension_indexation_rate).powi(years_in_payment as i32))
    }

    /// Mortgage schedule and lifetime cost, when a mortgage is configured
    pub fn mortgage_outcome(&self) -> Option<MortgageOutcome> {
        let mortgage = self.config.mortgage.as_ref()?;
        let schedule = mortgage.schedule();
        let remortgage_count = schedule.remortgage_count(mortgage.remortgage_frequency_years);
        let total_cost = schedule.total_cost(mortgage.remortgage_frequency_years, mortgage.product_fee);

        Some(MortgageOutcome {
            schedule,
            remortgage_count,
            total_cost,
        })
    }

    /// Amount paid into investments in a year, before drawdown
    pub fn investment_contribution(&self, year_index: u32, age: u32, mortgage_term: Option<u32>) -> f64 {
        let phase = self.phase_at(age);
        let investment = &self.config.investment;

        let mut monthly = investment.monthly_disposable_income.for_phase(phase);
        if mortgage_term.is_some_and(|term| year_index >= term) {
            monthly += investment.post_mortgage_monthly_uplift;
        }

        investment.annual_contribution.for_phase(phase) + monthly * 12.0
    }

    /// Investment value at the start of each projection year
    pub fn investment_balances(&self, mortgage_term: Option<u32>) -> Vec<f64> {
        let investment = &self.config.investment;
        let num_years = self.config.year_count().saturating_sub(1);

        compound(
            investment.principal,
            investment.growth_rate,
            self.config.current_age,
            num_years,
            |year_index, age| {
                self.investment_contribution(year_index, age, mortgage_term)
                    - self.config.drawdown.for_phase(self.phase_at(age))
            },
        )
    }

    fn warn_on_degenerate_config(&self) {
        let c = &self.config;
        if c.retirement_age < c.current_age {
            warn!(
                "Retirement age {} is below current age {}; pension is paid from the first year",
                c.retirement_age, c.current_age
            );
        }
        if c.end_age < c.current_age {
            warn!(
                "End age {} is below current age {}; projection is empty",
                c.end_age, c.current_age
            );
        }
    }

    /// Run the projection
    pub fn project(&self) -> ProjectionResult {
        self.warn_on_degenerate_config();

        let c = &self.config;
        let salary_history = self.salary_history();
        let pension_at_retirement = self.pension_at_retirement(&salary_history);
        let mortgage = self.mortgage_outcome();
        let investment_balances = self.investment_balances(mortgage.as_ref().map(|m| m.schedule.term_years));

        debug!(
            "Projecting ages {}..={} (retire at {}), pension at retirement {:.2}",
            c.current_age,
            c.end_age,
            c.retirement_age,
            pension_at_retirement.total()
        );

        let income = aggregate(
            c.current_age,
            c.end_age,
            c.current_salary,
            c.salary_growth_rate,
            |state| c.salary_paid(state.base_salary, self.phase_at(state.age)),
            |state| self.pension_in_payment(&pension_at_retirement, state.age),
            |age| self.assumptions.state_pension.amount_at(age),
            |age| c.drawdown.for_phase(self.phase_at(age)),
        );

        let records: Vec<YearRecord> = income
            .iter()
            .map(|row| self.build_record(row, &investment_balances, mortgage.as_ref()))
            .collect();

        let result = ProjectionResult {
            records,
            current_age: c.current_age,
            salary_history,
            pension_at_retirement,
            mortgage,
        };

        if let Some(last) = result.records.last() {
            debug!(
                "Projection complete: {} years, final investment value {:.2}",
                result.records.len(),
                last.investment_value
            );
        }

        result
    }

    /// Attach balances and derived totals to a year's income
    fn build_record(
        &self,
        row: &IncomeRow,
        investment_balances: &[f64],
        mortgage: Option<&MortgageOutcome>,
    ) -> YearRecord {
        let index = row.year_index as usize;
        let term = mortgage.map(|m| m.schedule.term_years);

        let investment_value = investment_balances.get(index).copied().unwrap_or(0.0);
        let mortgage_balance = mortgage.and_then(|m| m.schedule.balance_at(index));
        let surplus_or_deficit = mortgage.map(|_| investment_value - mortgage_balance.unwrap_or(0.0));

        let total_income = row.total_income();

        YearRecord {
            year_index: row.year_index,
            age: row.age,
            phase: self.phase_at(row.age),
            salary: row.salary,
            pension_by_scheme: row.pension_by_scheme,
            pension_income: row.pension_income(),
            state_pension: row.state_pension,
            drawdown: row.drawdown,
            investment_contribution: self.investment_contribution(row.year_index, row.age, term),
            investment_value,
            mortgage_balance,
            total_income,
            real_total_income: total_income * self.assumptions.real_terms_factor(row.year_index),
            surplus_or_deficit,
        }
    }
}
