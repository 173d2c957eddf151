//! Year-by-year projection of salary, NHS and state pensions, investments and mortgage

mod aggregate;
mod cashflows;
mod config;
mod engine;
mod state;

pub use aggregate::{aggregate, IncomeRow};
pub use cashflows::{EarningsEntry, MortgageOutcome, ProjectionResult, ProjectionSummary, YearRecord};
pub use config::{
    InvestmentConfig, LifePhase, PartTimePhase, PensionBasis, PhaseAmounts, ProjectionConfig,
};
pub use engine::ProjectionEngine;
pub use state::ProjectionState;
