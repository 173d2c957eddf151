//! Fixed-rate repayment mortgage amortization

use log::warn;
use serde::{Deserialize, Serialize};

/// Mortgage inputs for a projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MortgageConfig {
    /// Amount borrowed
    pub principal: f64,

    /// Annual interest rate (0.0398 for 3.98%)
    pub annual_rate: f64,

    /// Repayment term in years
    pub term_years: u32,

    /// A product fee is paid every this many years of the term
    pub remortgage_frequency_years: u32,

    /// Fee charged on each remortgage
    pub product_fee: f64,
}

impl Default for MortgageConfig {
    fn default() -> Self {
        Self {
            principal: 170_000.0,
            annual_rate: 0.0398,
            term_years: 15,
            remortgage_frequency_years: 5,
            product_fee: 999.0,
        }
    }
}

impl MortgageConfig {
    pub fn schedule(&self) -> MortgageSchedule {
        amortize(self.principal, self.annual_rate, self.term_years)
    }
}

/// Level monthly payment and year-end balances over the term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageSchedule {
    pub principal: f64,
    pub annual_rate: f64,
    pub term_years: u32,

    /// Fixed monthly repayment
    pub monthly_payment: f64,

    /// Remaining balance at each year boundary; index 0 is the principal,
    /// index k the balance after k years of payments
    pub balances: Vec<f64>,
}

/// Build the repayment schedule for a fixed-rate loan.
///
/// A zero rate repays the principal in equal instalments. A zero term has
/// nothing to repay over and produces a zero payment with the principal as
/// the only balance.
pub fn amortize(principal: f64, annual_rate: f64, term_years: u32) -> MortgageSchedule {
    let monthly_rate = annual_rate / 12.0;
    let num_payments = term_years * 12;

    if num_payments == 0 {
        warn!("Mortgage of {:.2} has a zero-year term; no repayments scheduled", principal);
        return MortgageSchedule {
            principal,
            annual_rate,
            term_years,
            monthly_payment: 0.0,
            balances: vec![principal],
        };
    }

    if monthly_rate == 0.0 {
        let monthly_payment = principal / num_payments as f64;
        let balances = (0..=term_years)
            .map(|k| principal * (1.0 - k as f64 / term_years as f64))
            .collect();
        return MortgageSchedule {
            principal,
            annual_rate,
            term_years,
            monthly_payment,
            balances,
        };
    }

    let growth = (1.0 + monthly_rate).powi(num_payments as i32);
    let monthly_payment = principal * monthly_rate * growth / (growth - 1.0);

    let mut balances = Vec::with_capacity(term_years as usize + 1);
    balances.push(principal);

    let mut balance = principal;
    for _year in 0..term_years {
        for _month in 0..12 {
            let interest = balance * monthly_rate;
            let principal_paid = monthly_payment - interest;
            balance -= principal_paid;
        }
        balances.push(balance);
    }

    MortgageSchedule {
        principal,
        annual_rate,
        term_years,
        monthly_payment,
        balances,
    }
}

impl MortgageSchedule {
    pub fn num_payments(&self) -> u32 {
        self.term_years * 12
    }

    /// Balance after `years` of payments; `None` past the end of the term
    pub fn balance_at(&self, years: usize) -> Option<f64> {
        self.balances.get(years).copied()
    }

    /// Sum of every monthly repayment
    pub fn total_repayments(&self) -> f64 {
        self.monthly_payment * self.num_payments() as f64
    }

    pub fn total_interest(&self) -> f64 {
        self.total_repayments() - self.principal
    }

    /// Completed remortgage periods within the term; a partial final period
    /// is not counted
    pub fn remortgage_count(&self, frequency_years: u32) -> u32 {
        if frequency_years == 0 {
            warn!("Remortgage frequency of zero years; no product fees charged");
            return 0;
        }
        self.term_years / frequency_years
    }

    /// Repayments plus product fees over the term
    pub fn total_cost(&self, frequency_years: u32, product_fee: f64) -> f64 {
        self.total_repayments() + self.remortgage_count(frequency_years) as f64 * product_fee
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use proptest::prelude::{prop_assert, proptest};

    #[test]
    fn test_standard_annuity_payment() {
        let schedule = amortize(170_000.0, 0.0398, 15);
        assert_abs_diff_eq!(schedule.monthly_payment, 1_255.77, epsilon = 0.01);
        assert_eq!(schedule.balances.len(), 16);
        assert_eq!(schedule.balances[0], 170_000.0);
        assert_abs_diff_eq!(schedule.balances[15], 0.0, epsilon = 0.01);
    }

    #[test]
    fn test_balances_decrease_over_term() {
        let schedule = amortize(250_000.0, 0.05, 25);
        for pair in schedule.balances.windows(2) {
            assert!(pair[1] < pair[0]);
        }
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let schedule = amortize(120_000.0, 0.0, 10);
        assert_eq!(schedule.monthly_payment, 120_000.0 / 120.0);
        for (k, balance) in schedule.balances.iter().enumerate() {
            assert_eq!(*balance, 120_000.0 * (1.0 - k as f64 / 10.0));
        }
        assert_eq!(schedule.balances[10], 0.0);
    }

    #[test]
    fn test_zero_term_is_degenerate() {
        let schedule = amortize(50_000.0, 0.04, 0);
        assert_eq!(schedule.monthly_payment, 0.0);
        assert_eq!(schedule.balances, vec![50_000.0]);
        assert_eq!(schedule.total_repayments(), 0.0);
    }

    #[test]
    fn test_balance_past_term_is_absent() {
        let schedule = amortize(100_000.0, 0.03, 5);
        assert!(schedule.balance_at(5).is_some());
        assert!(schedule.balance_at(6).is_none());
    }

    #[test]
    fn test_total_cost_floors_remortgage_count() {
        let schedule = amortize(170_000.0, 0.0398, 15);
        assert_eq!(schedule.remortgage_count(5), 3);
        assert_eq!(schedule.remortgage_count(4), 3);
        assert_eq!(schedule.remortgage_count(0), 0);

        let expected = schedule.monthly_payment * 180.0 + 3.0 * 999.0;
        assert_relative_eq!(schedule.total_cost(5, 999.0), expected, max_relative = 1e-12);
        assert_relative_eq!(
            schedule.total_interest(),
            schedule.monthly_payment * 180.0 - 170_000.0,
            max_relative = 1e-12
        );
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_positive_rate_amortizes_to_zero(
            principal in 1_000u32..2_000_000,
            rate_bp in 1u32..1_500,
            term_years in 1u32..41
        ) {
            let schedule = amortize(principal as f64, rate_bp as f64 / 10_000.0, term_years);
            prop_assert!(schedule.balances.len() == term_years as usize + 1);
            prop_assert!(schedule.balances[term_years as usize].abs() < 0.01);
        }
    }
}
