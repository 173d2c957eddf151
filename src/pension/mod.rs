//! NHS pension accrual under the 1995, 2008 and 2015 scheme rules

mod scheme;
mod revaluation;

pub use scheme::{accrue_schemes, compute_pension, SchemeBreakdown, SchemeRule};
pub use revaluation::RevaluationHistory;
