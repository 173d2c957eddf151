//! Projection configuration
//!
//! Every field has a default matching the calculator's starting inputs, so
//! a JSON file only needs to name what it changes.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::mortgage::MortgageConfig;
use crate::pension::{RevaluationHistory, SchemeRule};

/// Stage of working life for a given age
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifePhase {
    FullTime,
    PartTime,
    RetiredBeforeStatePension,
    RetiredOnStatePension,
}

impl LifePhase {
    pub fn label(self) -> &'static str {
        match self {
            LifePhase::FullTime => "Full time",
            LifePhase::PartTime => "Part time",
            LifePhase::RetiredBeforeStatePension => "Retired",
            LifePhase::RetiredOnStatePension => "Retired (state pension)",
        }
    }
}

/// One amount per life phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseAmounts {
    pub full_time: f64,
    pub part_time: f64,
    pub retired_before_state_pension: f64,
    pub retired_on_state_pension: f64,
}

impl PhaseAmounts {
    /// Same amount in every phase
    pub fn uniform(amount: f64) -> Self {
        Self {
            full_time: amount,
            part_time: amount,
            retired_before_state_pension: amount,
            retired_on_state_pension: amount,
        }
    }

    /// One amount while working, another once retired
    pub fn working_and_retired(working: f64, retired: f64) -> Self {
        Self {
            full_time: working,
            part_time: working,
            retired_before_state_pension: retired,
            retired_on_state_pension: retired,
        }
    }

    /// One amount before state pension age, another from it
    pub fn before_and_after_state_pension(before: f64, after: f64) -> Self {
        Self {
            full_time: before,
            part_time: before,
            retired_before_state_pension: before,
            retired_on_state_pension: after,
        }
    }

    pub fn for_phase(&self, phase: LifePhase) -> f64 {
        match phase {
            LifePhase::FullTime => self.full_time,
            LifePhase::PartTime => self.part_time,
            LifePhase::RetiredBeforeStatePension => self.retired_before_state_pension,
            LifePhase::RetiredOnStatePension => self.retired_on_state_pension,
        }
    }
}

/// Reduced hours ahead of retirement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartTimePhase {
    /// First age worked part time
    pub start_age: u32,

    /// Percentage cut to the full-time salary (40.0 pays 60% of salary)
    pub salary_reduction_pct: f64,
}

/// How the NHS pension is estimated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PensionBasis {
    /// Rough estimate: `years_in_scheme / divisor * salary at retirement`,
    /// reported against a single scheme
    Simplified { scheme: SchemeRule, years_in_scheme: f64 },

    /// Full scheme-rule accrual with service split between sections
    Accrued {
        years_served: BTreeMap<SchemeRule, f64>,
        #[serde(default)]
        revaluation: RevaluationHistory,
    },
}

impl Default for PensionBasis {
    fn default() -> Self {
        PensionBasis::Simplified {
            scheme: SchemeRule::Care2015,
            years_in_scheme: 15.0,
        }
    }
}

impl PensionBasis {
    /// Service in a single scheme, using the scheme formula
    pub fn single_scheme(scheme: SchemeRule, years_served: f64) -> Self {
        PensionBasis::Accrued {
            years_served: BTreeMap::from([(scheme, years_served)]),
            revaluation: RevaluationHistory::default(),
        }
    }
}

/// Investment pot and the flows into and out of it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvestmentConfig {
    /// Value of investments today
    pub principal: f64,

    /// Annual growth rate (0.05 for 5%)
    pub growth_rate: f64,

    /// Lump sum added each year
    pub annual_contribution: PhaseAmounts,

    /// Disposable income invested each month
    pub monthly_disposable_income: PhaseAmounts,

    /// Extra monthly amount invested once the mortgage term has ended
    pub post_mortgage_monthly_uplift: f64,
}

impl Default for InvestmentConfig {
    fn default() -> Self {
        Self {
            principal: 60_000.0,
            growth_rate: 0.05,
            annual_contribution: PhaseAmounts::uniform(5_000.0),
            monthly_disposable_income: PhaseAmounts::default(),
            post_mortgage_monthly_uplift: 0.0,
        }
    }
}

/// Immutable input bundle for one projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub current_age: u32,
    pub retirement_age: u32,

    /// Last age modelled (inclusive)
    pub end_age: u32,

    pub current_salary: f64,

    /// Annual salary growth (0.02 for 2%)
    pub salary_growth_rate: f64,

    pub part_time: Option<PartTimePhase>,

    pub pension: PensionBasis,

    /// Annual increase of the NHS pension once in payment
    pub pension_indexation_rate: f64,

    pub investment: InvestmentConfig,

    /// Planned annual withdrawal from investments
    pub drawdown: PhaseAmounts,

    pub mortgage: Option<MortgageConfig>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            current_age: 40,
            retirement_age: 65,
            end_age: 85,
            current_salary: 50_000.0,
            salary_growth_rate: 0.02,
            part_time: None,
            pension: PensionBasis::default(),
            pension_indexation_rate: 0.0,
            investment: InvestmentConfig::default(),
            drawdown: PhaseAmounts::default(),
            mortgage: None,
        }
    }
}

impl ProjectionConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of modelled years, `end_age - current_age + 1`, or zero when
    /// the end age precedes the current age
    pub fn year_count(&self) -> u32 {
        if self.end_age < self.current_age {
            0
        } else {
            self.end_age - self.current_age + 1
        }
    }

    /// Life phase for `age` given the state pension age in force
    pub fn phase_at(&self, age: u32, state_pension_age: u32) -> LifePhase {
        if age >= self.retirement_age {
            if age >= state_pension_age {
                LifePhase::RetiredOnStatePension
            } else {
                LifePhase::RetiredBeforeStatePension
            }
        } else if self.part_time.as_ref().is_some_and(|p| age >= p.start_age) {
            LifePhase::PartTime
        } else {
            LifePhase::FullTime
        }
    }

    /// Salary actually paid in a phase, given the growth-compounded base
    pub fn salary_paid(&self, base_salary: f64, phase: LifePhase) -> f64 {
        match phase {
            LifePhase::FullTime => base_salary,
            LifePhase::PartTime => {
                let reduction = self
                    .part_time
                    .as_ref()
                    .map_or(0.0, |p| p.salary_reduction_pct);
                base_salary * (1.0 - reduction / 100.0)
            }
            LifePhase::RetiredBeforeStatePension | LifePhase::RetiredOnStatePension => 0.0,
        }
    }
}
