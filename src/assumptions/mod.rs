//! Fixed scheme and state pension assumptions shared by every projection

mod state_pension;
pub mod loader;

pub use state_pension::StatePension;
pub use loader::{load_revaluation_history, load_revaluation_history_from_reader};

use serde::{Deserialize, Serialize};

/// Container for the constants a projection is run against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assumptions {
    pub state_pension: StatePension,

    /// Full career length used by the simplified NHS estimate
    /// (pension = years_in_scheme / divisor * salary)
    pub simplified_service_divisor: f64,

    /// Annual inflation used to restate income in today's money
    pub inflation_rate: f64,
}

impl Assumptions {
    /// UK defaults: state pension at 67 paying £11,000, 45-year career, 2.5% inflation
    pub fn default_nhs() -> Self {
        Self {
            state_pension: StatePension::default(),
            simplified_service_divisor: 45.0,
            inflation_rate: 0.025,
        }
    }

    /// Deflator for an amount `years` from now
    pub fn real_terms_factor(&self, years: u32) -> f64 {
        1.0 / (1.0 + self.inflation_rate).powi(years as i32)
    }
}

impl Default for Assumptions {
    fn default() -> Self {
        Self::default_nhs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_nhs_constants() {
        let assumptions = Assumptions::default_nhs();
        assert_eq!(assumptions.state_pension.age, 67);
        assert_eq!(assumptions.state_pension.annual_amount, 11_000.0);
        assert_eq!(assumptions.simplified_service_divisor, 45.0);
    }

    #[test]
    fn test_real_terms_factor() {
        let assumptions = Assumptions::default_nhs();
        assert_eq!(assumptions.real_terms_factor(0), 1.0);
        assert_relative_eq!(assumptions.real_terms_factor(2), 1.0 / 1.025_f64.powi(2), epsilon = 1e-12);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let assumptions: Assumptions = serde_json::from_str(r#"{"inflation_rate": 0.03}"#).unwrap();
        assert_eq!(assumptions.inflation_rate, 0.03);
        assert_eq!(assumptions.state_pension.age, 67);
    }
}
