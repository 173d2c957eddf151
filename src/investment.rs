//! Investment compounding with phase-dependent contributions

/// Year-end investment balances.
///
/// Index 0 is `principal` with no growth applied. For each following year
/// the contribution for that year is added and the total grown:
/// `balance[k + 1] = (balance[k] + contribution(k, start_age + k)) * (1 + annual_rate)`.
///
/// `contribution` receives the year index and the age during that year, so
/// callers can switch amounts by phase (working, part-time, retired, before
/// or after a mortgage ends). A negative contribution models drawdown.
pub fn compound<F>(
    principal: f64,
    annual_rate: f64,
    start_age: u32,
    num_years: u32,
    contribution: F,
) -> Vec<f64>
where
    F: Fn(u32, u32) -> f64,
{
    let mut balances = Vec::with_capacity(num_years as usize + 1);
    balances.push(principal);

    let mut balance = principal;
    for year_index in 0..num_years {
        let age = start_age + year_index;
        balance = (balance + contribution(year_index, age)) * (1.0 + annual_rate);
        balances.push(balance);
    }

    balances
}

/// Compounding with the same contribution every year
pub fn compound_level(principal: f64, annual_rate: f64, annual_contribution: f64, num_years: u32) -> Vec<f64> {
    compound(principal, annual_rate, 0, num_years, |_, _| annual_contribution)
}
