//! Cash-flow aggregation over the projection years

use super::state::ProjectionState;
use crate::pension::SchemeBreakdown;

/// Income received in one year, before investment and mortgage balances
/// are attached
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncomeRow {
    pub year_index: u32,
    pub age: u32,
    pub base_salary: f64,
    pub salary: f64,
    pub pension_by_scheme: SchemeBreakdown,
    pub state_pension: f64,
    pub drawdown: f64,
}

impl IncomeRow {
    pub fn pension_income(&self) -> f64 {
        self.pension_by_scheme.total()
    }

    pub fn total_income(&self) -> f64 {
        self.salary + self.pension_income() + self.state_pension + self.drawdown
    }
}

/// Income for every age in `current_age..=end_age`, in ascending order.
///
/// The base salary starts at `current_salary` and compounds by
/// `salary_growth_rate` after every year, whatever `salary_fn` decides to
/// pay out of it. Each year is a fold step from the previous year's state.
#[allow(clippy::too_many_arguments)]
pub fn aggregate<S, P, T, D>(
    current_age: u32,
    end_age: u32,
    current_salary: f64,
    salary_growth_rate: f64,
    salary_fn: S,
    pension_fn: P,
    state_pension_fn: T,
    drawdown_fn: D,
) -> Vec<IncomeRow>
where
    S: Fn(&ProjectionState) -> f64,
    P: Fn(&ProjectionState) -> SchemeBreakdown,
    T: Fn(u32) -> f64,
    D: Fn(u32) -> f64,
{
    let year_count = if end_age < current_age {
        0
    } else {
        end_age - current_age + 1
    };

    let step = |state: ProjectionState| -> (ProjectionState, IncomeRow) {
        let row = IncomeRow {
            year_index: state.year_index,
            age: state.age,
            base_salary: state.base_salary,
            salary: salary_fn(&state),
            pension_by_scheme: pension_fn(&state),
            state_pension: state_pension_fn(state.age),
            drawdown: drawdown_fn(state.age),
        };
        (state.advance(salary_growth_rate), row)
    };

    let initial = ProjectionState::initial(current_age, current_salary);
    let (_, rows) = (0..year_count).fold(
        (initial, Vec::with_capacity(year_count as usize)),
        |(state, mut rows), _| {
            let (next, row) = step(state);
            rows.push(row);
            (next, rows)
        },
    );

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rows_cover_every_age_in_order() {
        let rows = aggregate(40, 85, 50_000.0, 0.02, |s| s.base_salary, |_| SchemeBreakdown::default(), |_| 0.0, |_| 0.0);
        assert_eq!(rows.len(), 46);
        for (k, row) in rows.iter().enumerate() {
            assert_eq!(row.age, 40 + k as u32);
            assert_eq!(row.year_index, k as u32);
        }
    }

    #[test]
    fn test_empty_when_end_precedes_start() {
        let rows = aggregate(70, 60, 50_000.0, 0.02, |s| s.base_salary, |_| SchemeBreakdown::default(), |_| 0.0, |_| 0.0);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_base_salary_grows_while_unpaid() {
        // Salary stops at 42 but the base keeps compounding
        let rows = aggregate(
            40,
            44,
            10_000.0,
            0.10,
            |s| if s.age < 42 { s.base_salary } else { 0.0 },
            |_| SchemeBreakdown::default(),
            |_| 0.0,
            |_| 0.0,
        );
        assert_eq!(rows[2].salary, 0.0);
        assert_relative_eq!(rows[4].base_salary, 10_000.0 * 1.1_f64.powi(4), epsilon = 1e-6);
    }

    #[test]
    fn test_total_income_sums_components() {
        let rows = aggregate(
            66,
            68,
            0.0,
            0.0,
            |_| 1_000.0,
            |_| SchemeBreakdown {
                final_salary_1995: 100.0,
                final_salary_2008: 200.0,
                care_2015: 300.0,
            },
            |age| if age >= 67 { 11_000.0 } else { 0.0 },
            |_| 5_000.0,
        );
        assert_eq!(rows[0].total_income(), 1_000.0 + 600.0 + 5_000.0);
        assert_eq!(rows[1].total_income(), 1_000.0 + 600.0 + 11_000.0 + 5_000.0);
    }
}
