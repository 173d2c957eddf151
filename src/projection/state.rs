//! Running values threaded from one projection year to the next

/// State carried into a projection year
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionState {
    /// Years since the start of the projection (0-indexed)
    pub year_index: u32,

    /// Age during this year
    pub age: u32,

    /// Growth-compounded full-time salary. Advances every year whether or
    /// not it is being paid.
    pub base_salary: f64,
}

impl ProjectionState {
    /// State for the first projection year
    pub fn initial(current_age: u32, current_salary: f64) -> Self {
        Self {
            year_index: 0,
            age: current_age,
            base_salary: current_salary,
        }
    }

    /// State for the following year
    pub fn advance(self, salary_growth_rate: f64) -> Self {
        Self {
            year_index: self.year_index + 1,
            age: self.age + 1,
            base_salary: self.base_salary * (1.0 + salary_growth_rate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_advance_compounds_salary() {
        let state = ProjectionState::initial(40, 50_000.0);
        let next = state.advance(0.02).advance(0.02);
        assert_eq!(next.year_index, 2);
        assert_eq!(next.age, 42);
        assert_relative_eq!(next.base_salary, 50_000.0 * 1.02 * 1.02, epsilon = 1e-9);
    }
}
