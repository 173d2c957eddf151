//! Flat-rate state pension

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatePension {
    /// Age from which the state pension is paid
    pub age: u32,

    /// Annual amount once in payment
    pub annual_amount: f64,
}

impl Default for StatePension {
    fn default() -> Self {
        Self {
            age: 67,
            annual_amount: 11_000.0,
        }
    }
}

impl StatePension {
    /// Amount received in the year of the given age
    pub fn amount_at(&self, age: u32) -> f64 {
        if age >= self.age {
            self.annual_amount
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paid_from_state_pension_age() {
        let sp = StatePension::default();
        assert_eq!(sp.amount_at(66), 0.0);
        assert_eq!(sp.amount_at(67), 11_000.0);
        assert_eq!(sp.amount_at(90), 11_000.0);
    }
}
