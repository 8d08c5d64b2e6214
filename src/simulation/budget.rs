//! Monthly interest accrual, principal budget, and minimum-payment enforcement
//!
//! All functions here are pure: they read a snapshot of the active loans and
//! return vectors the driver later commits.

/// Per-loan accrued interest for one month: `balance * monthly_rate`.
pub fn accrue_interest(balances: &[f64], monthly_rates: &[f64]) -> Vec<f64> {
    balances
        .iter()
        .zip(monthly_rates)
        .map(|(&balance, &rate)| balance * rate)
        .collect()
}

/// Result of enforcing minimum principal payments against the budget.
#[derive(Debug, Clone)]
pub struct MinimumPlan {
    /// Minimum principal per active loan, scaled down if the budget required it
    pub scaled_min: Vec<f64>,

    /// Principal budget left over after minimums
    pub extra: f64,

    /// True when minimums had to be proportionally reduced to fit the budget
    pub scaled: bool,
}

/// Derive minimum principal payments and enforce them against the budget.
///
/// The minimum principal for a loan is its contractual total payment net of
/// this month's interest, floored at zero. When the combined minimums exceed
/// the principal budget, every loan's minimum is reduced by the same factor
/// rather than starving any single loan; no extra remains in that case.
///
/// Minimums are NOT capped at the loan balance here. An allocation above the
/// balance is handled by the overpayment redistributor.
pub fn enforce_minimums(interest: &[f64], min_total_payments: &[f64], principal_budget: f64) -> MinimumPlan {
    let mut scaled_min: Vec<f64> = min_total_payments
        .iter()
        .zip(interest)
        .map(|(&min_total, &accrued)| (min_total - accrued).max(0.0))
        .collect();

    let required: f64 = scaled_min.iter().sum();

    if required <= principal_budget {
        MinimumPlan {
            scaled_min,
            extra: principal_budget - required,
            scaled: false,
        }
    } else {
        let factor = principal_budget / required;
        for min in &mut scaled_min {
            *min *= factor;
        }
        MinimumPlan {
            scaled_min,
            extra: 0.0,
            scaled: true,
        }
    }
}
