//! NHS scheme rules and annual pension accrual

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::revaluation::RevaluationHistory;
use crate::error::ProjectionError;

/// Number of trailing pensionable-earnings entries averaged by the 2008 section
const FINAL_SALARY_2008_AVERAGING_YEARS: usize = 3;

/// Benefit formula of an NHS pension scheme section
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SchemeRule {
    /// 1995 section: final salary, 1/80th accrual
    #[serde(rename = "final_salary_1995")]
    FinalSalary1995,
    /// 2008 section: best of the final three years, 1/60th accrual
    #[serde(rename = "final_salary_2008")]
    FinalSalary2008,
    /// 2015 scheme: career average revalued earnings, 1/54th accrual
    #[serde(rename = "care_2015")]
    Care2015,
}

impl SchemeRule {
    pub const ALL: [SchemeRule; 3] = [
        SchemeRule::FinalSalary1995,
        SchemeRule::FinalSalary2008,
        SchemeRule::Care2015,
    ];

    /// Fraction of pensionable salary credited per year of service
    pub fn accrual_rate(self) -> f64 {
        match self {
            SchemeRule::FinalSalary1995 => 1.0 / 80.0,
            SchemeRule::FinalSalary2008 => 1.0 / 60.0,
            SchemeRule::Care2015 => 1.0 / 54.0,
        }
    }

    /// Display label as used on the calculator screens
    pub fn label(self) -> &'static str {
        match self {
            SchemeRule::FinalSalary1995 => "1995 Final Salary",
            SchemeRule::FinalSalary2008 => "2008 Final Salary",
            SchemeRule::Care2015 => "2015 CARE",
        }
    }

    /// Salary figure the accrual rate is applied to.
    ///
    /// `salary_history` is in chronological order, first entry being the
    /// current salary and last entry the salary at retirement. An empty
    /// history yields zero.
    pub fn pensionable_salary(self, salary_history: &[f64]) -> f64 {
        let (Some(&first), Some(&last)) = (salary_history.first(), salary_history.last()) else {
            return 0.0;
        };

        match self {
            SchemeRule::Care2015 => (first + last) / 2.0,
            SchemeRule::FinalSalary1995 => last,
            SchemeRule::FinalSalary2008 => {
                let take = salary_history.len().min(FINAL_SALARY_2008_AVERAGING_YEARS);
                let tail = &salary_history[salary_history.len() - take..];
                tail.iter().sum::<f64>() / take as f64
            }
        }
    }
}

impl fmt::Display for SchemeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SchemeRule {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1995" | "final_salary_1995" | "1995 final salary" => Ok(SchemeRule::FinalSalary1995),
            "2008" | "final_salary_2008" | "2008 final salary" => Ok(SchemeRule::FinalSalary2008),
            "2015" | "care" | "care_2015" | "2015 care" => Ok(SchemeRule::Care2015),
            _ => Err(ProjectionError::UnknownScheme(s.to_string())),
        }
    }
}

/// Annual pension under one scheme for the given service.
///
/// Zero years of service gives zero. Negative inputs are passed through
/// the arithmetic unchanged.
pub fn compute_pension(scheme: SchemeRule, salary_history: &[f64], years_served: f64) -> f64 {
    scheme.pensionable_salary(salary_history) * years_served * scheme.accrual_rate()
}

/// Annual pension split by scheme section
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemeBreakdown {
    pub final_salary_1995: f64,
    pub final_salary_2008: f64,
    pub care_2015: f64,
}

impl SchemeBreakdown {
    /// Breakdown with the whole amount attributed to one scheme
    pub fn single(scheme: SchemeRule, amount: f64) -> Self {
        let mut breakdown = Self::default();
        *breakdown.get_mut(scheme) = amount;
        breakdown
    }

    pub fn get(&self, scheme: SchemeRule) -> f64 {
        match scheme {
            SchemeRule::FinalSalary1995 => self.final_salary_1995,
            SchemeRule::FinalSalary2008 => self.final_salary_2008,
            SchemeRule::Care2015 => self.care_2015,
        }
    }

    fn get_mut(&mut self, scheme: SchemeRule) -> &mut f64 {
        match scheme {
            SchemeRule::FinalSalary1995 => &mut self.final_salary_1995,
            SchemeRule::FinalSalary2008 => &mut self.final_salary_2008,
            SchemeRule::Care2015 => &mut self.care_2015,
        }
    }

    pub fn total(&self) -> f64 {
        self.final_salary_1995 + self.final_salary_2008 + self.care_2015
    }

    /// Every component multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            final_salary_1995: self.final_salary_1995 * factor,
            final_salary_2008: self.final_salary_2008 * factor,
            care_2015: self.care_2015 * factor,
        }
    }
}

/// Pension across several scheme sections.
///
/// Each section is computed independently with its own years of service;
/// the caller is responsible for partitioning service between sections.
/// Revaluation is applied to the CARE amount only.
pub fn accrue_schemes(
    years_served: &BTreeMap<SchemeRule, f64>,
    salary_history: &[f64],
    revaluation: &RevaluationHistory,
) -> SchemeBreakdown {
    let mut breakdown = SchemeBreakdown::default();

    for (&scheme, &years) in years_served {
        let mut amount = compute_pension(scheme, salary_history, years);
        if scheme == SchemeRule::Care2015 {
            amount = revaluation.apply(amount);
        }
        *breakdown.get_mut(scheme) += amount;
    }

    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn grown_history(salary: f64, growth: f64, years: u32) -> Vec<f64> {
        (0..=years).map(|k| salary * (1.0 + growth).powi(k as i32)).collect()
    }

    #[test]
    fn test_care_uses_first_and_final_salary() {
        let history = grown_history(50_000.0, 0.02, 25);
        let final_salary = *history.last().unwrap();
        assert_relative_eq!(final_salary, 82_030.30, epsilon = 0.01);

        let pension = compute_pension(SchemeRule::Care2015, &history, 15.0);
        let expected = (50_000.0 + final_salary) / 2.0 * 15.0 / 54.0;
        assert_relative_eq!(pension, expected, epsilon = 1e-9);
        assert_relative_eq!(pension, 18_337.54, epsilon = 0.01);
    }

    #[test]
    fn test_final_salary_1995() {
        let history = vec![40_000.0, 45_000.0, 60_000.0];
        let pension = compute_pension(SchemeRule::FinalSalary1995, &history, 20.0);
        assert_relative_eq!(pension, 60_000.0 * 20.0 / 80.0, max_relative = 1e-12);
    }

    #[test]
    fn test_final_salary_2008_averages_last_three() {
        let history = vec![10_000.0, 30_000.0, 40_000.0, 50_000.0];
        let pension = compute_pension(SchemeRule::FinalSalary2008, &history, 6.0);
        assert_relative_eq!(pension, 40_000.0 * 6.0 / 60.0, max_relative = 1e-12);
    }

    #[test]
    fn test_final_salary_2008_short_history() {
        let history = vec![30_000.0, 50_000.0];
        let pension = compute_pension(SchemeRule::FinalSalary2008, &history, 6.0);
        assert_relative_eq!(pension, 40_000.0 * 6.0 / 60.0, max_relative = 1e-12);
    }

    #[test]
    fn test_empty_history_is_zero() {
        for scheme in SchemeRule::ALL {
            assert_eq!(compute_pension(scheme, &[], 10.0), 0.0);
        }
    }

    #[test]
    fn test_zero_years_is_zero() {
        let history = grown_history(90_000.0, 0.03, 10);
        assert_eq!(compute_pension(SchemeRule::Care2015, &history, 0.0), 0.0);
    }

    #[test]
    fn test_multi_scheme_sums_independent_sections() {
        let history = grown_history(50_000.0, 0.02, 25);
        let final_salary = *history.last().unwrap();

        let mut years = BTreeMap::new();
        years.insert(SchemeRule::FinalSalary1995, 5.0);
        years.insert(SchemeRule::FinalSalary2008, 5.0);
        years.insert(SchemeRule::Care2015, 5.0);

        let breakdown = accrue_schemes(&years, &history, &RevaluationHistory::default());
        assert_relative_eq!(breakdown.final_salary_1995, final_salary * 5.0 / 80.0, max_relative = 1e-12);
        assert_relative_eq!(
            breakdown.care_2015,
            (50_000.0 + final_salary) / 2.0 * 5.0 / 54.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(breakdown.final_salary_2008, final_salary * 5.0 / 60.0, max_relative = 0.05);
        assert!(breakdown.final_salary_2008 < final_salary * 5.0 / 60.0);
    }

    #[test]
    fn test_revaluation_only_touches_care() {
        let history = vec![50_000.0, 60_000.0];
        let mut years = BTreeMap::new();
        years.insert(SchemeRule::FinalSalary1995, 10.0);
        years.insert(SchemeRule::Care2015, 10.0);

        let revaluation = RevaluationHistory::from_entries([(2016, Some(10.0))]);
        let plain = accrue_schemes(&years, &history, &RevaluationHistory::default());
        let revalued = accrue_schemes(&years, &history, &revaluation);

        assert_eq!(revalued.final_salary_1995, plain.final_salary_1995);
        assert_relative_eq!(revalued.care_2015, plain.care_2015 * 1.1, epsilon = 1e-9);
    }

    #[test]
    fn test_scheme_from_str() {
        assert_eq!("2015 CARE".parse::<SchemeRule>().unwrap(), SchemeRule::Care2015);
        assert_eq!("1995".parse::<SchemeRule>().unwrap(), SchemeRule::FinalSalary1995);
        assert_eq!(
            "final_salary_2008".parse::<SchemeRule>().unwrap(),
            SchemeRule::FinalSalary2008
        );
        assert!(matches!(
            "1987".parse::<SchemeRule>(),
            Err(ProjectionError::UnknownScheme(_))
        ));
    }
}
