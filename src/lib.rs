//! Pension Projection - deterministic multi-year personal finance projections
//!
//! This library provides:
//! - NHS pension accrual under the 1995, 2008 and 2015 (CARE) scheme rules
//! - Fixed-rate mortgage amortization and lifetime cost
//! - Investment compounding with phase-dependent contributions and drawdown
//! - Year-by-year cash-flow projection of salary, pensions and balances
//! - Parallel what-if batches and retirement-age sweeps

pub mod error;
pub mod assumptions;
pub mod pension;
pub mod mortgage;
pub mod investment;
pub mod projection;
pub mod scenario;
pub mod report;

// Re-export commonly used types
pub use error::{ProjectionError, Result};
pub use assumptions::{Assumptions, StatePension};
pub use pension::{compute_pension, RevaluationHistory, SchemeBreakdown, SchemeRule};
pub use mortgage::{amortize, MortgageConfig, MortgageSchedule};
pub use investment::compound;
pub use projection::{ProjectionConfig, ProjectionEngine, ProjectionResult, ProjectionSummary, YearRecord};
pub use scenario::ScenarioRunner;
