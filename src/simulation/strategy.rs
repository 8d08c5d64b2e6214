//! Extra-principal allocation strategies
//!
//! Each variant decides how the principal budget beyond scaled minimums is
//! split across active loans. Allocation is a pure function of the active
//! snapshot; target selections break ties toward the lowest loan index.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::ledger::BALANCE_TOLERANCE;

/// How extra principal beyond minimum payments is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Split the extra equally across all active loans
    Even,
    /// Send all extra to the loan accruing the most interest this month
    HighInterestFirst,
    /// Send all extra to the loan with the largest balance
    HighBalanceFirst,
    /// Send all extra to the loan with the smallest balance
    Snowball,
    /// Allocate to minimize next month's total accrued interest
    MinimizeInterest,
}

impl Strategy {
    /// All variants, in comparison-report order.
    pub const ALL: [Strategy; 5] = [
        Strategy::Even,
        Strategy::HighInterestFirst,
        Strategy::HighBalanceFirst,
        Strategy::Snowball,
        Strategy::MinimizeInterest,
    ];

    /// Human-readable strategy name.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Even => "Even Payments",
            Strategy::HighInterestFirst => "High Interest First",
            Strategy::HighBalanceFirst => "High Balance First",
            Strategy::Snowball => "Snowball Method",
            Strategy::MinimizeInterest => "Minimize Accrued Interest",
        }
    }

    /// Decide this month's principal payment per active loan.
    ///
    /// Inputs are active-loan snapshots (`balances`, `monthly_rates`) and the
    /// enforcer's output (`scaled_min`, `extra`). Every payment is at least
    /// its scaled minimum, and the payments sum to the full principal budget
    /// (minimums plus extra), except for `MinimizeInterest`, which may leave
    /// budget unspent when every loan is already filled to its balance.
    ///
    /// Payments may still exceed individual balances; the overpayment
    /// redistributor resolves that afterwards.
    pub fn allocate(&self, balances: &[f64], monthly_rates: &[f64], scaled_min: &[f64], extra: f64) -> Vec<f64> {
        match self {
            Strategy::Even => {
                let share = extra / balances.len() as f64;
                scaled_min.iter().map(|&min| min + share).collect()
            }
            Strategy::MinimizeInterest => greedy_rate_fill(balances, monthly_rates, scaled_min, extra),
            _ => {
                let mut payments = scaled_min.to_vec();
                if let Some(target) = self.pick_target(balances, monthly_rates) {
                    payments[target] += extra;
                }
                payments
            }
        }
    }

    /// Select this strategy's target loan among entries with a balance above
    /// tolerance. `None` for `Even`, which has no single target.
    ///
    /// Also used by the redistributor, where `balances` holds balances
    /// remaining after the tentative allocation.
    pub(crate) fn pick_target(&self, balances: &[f64], monthly_rates: &[f64]) -> Option<usize> {
        let eligible = balances.iter().map(|&b| b > BALANCE_TOLERANCE);

        match self {
            Strategy::Even => None,
            Strategy::HighInterestFirst | Strategy::MinimizeInterest => {
                argmax(eligible, balances.iter().zip(monthly_rates).map(|(&b, &r)| b * r))
            }
            Strategy::HighBalanceFirst => argmax(eligible, balances.iter().copied()),
            Strategy::Snowball => argmin(eligible, balances.iter().copied()),
        }
    }
}

/// Index of the largest eligible value; first index wins ties.
fn argmax(eligible: impl Iterator<Item = bool>, values: impl Iterator<Item = f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, (ok, value)) in eligible.zip(values).enumerate() {
        if ok && best.map_or(true, |(_, v)| value > v) {
            best = Some((i, value));
        }
    }
    best.map(|(i, _)| i)
}

/// Index of the smallest eligible value; first index wins ties.
fn argmin(eligible: impl Iterator<Item = bool>, values: impl Iterator<Item = f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, (ok, value)) in eligible.zip(values).enumerate() {
        if ok && best.map_or(true, |(_, v)| value < v) {
            best = Some((i, value));
        }
    }
    best.map(|(i, _)| i)
}

/// Minimize next month's total accrued interest.
///
/// The underlying problem is a linear program: minimize
/// `sum((balance - payment) * rate)` subject to
/// `sum(payment) <= minimums + extra` and
/// `scaled_min <= payment <= balance` per loan. With a single sum constraint
/// and box bounds, the optimum is reached by filling loans to their balance
/// cap in descending rate order, so the greedy fill below is exact.
///
/// Lower bounds are capped at the balance (a minimum above the balance would
/// make the box infeasible); capacity freed by that cap goes to the
/// highest-rate loans along with the extra.
fn greedy_rate_fill(balances: &[f64], monthly_rates: &[f64], scaled_min: &[f64], extra: f64) -> Vec<f64> {
    let mut payments: Vec<f64> = scaled_min
        .iter()
        .zip(balances)
        .map(|(&min, &balance)| min.min(balance))
        .collect();

    let budget: f64 = scaled_min.iter().sum::<f64>() + extra;
    let mut remaining = budget - payments.iter().sum::<f64>();

    let mut order: Vec<usize> = (0..balances.len()).collect();
    order.sort_by(|&a, &b| {
        monthly_rates[b]
            .partial_cmp(&monthly_rates[a])
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(&b))
    });

    for i in order {
        if remaining <= 0.0 {
            break;
        }
        let headroom = balances[i] - payments[i];
        if headroom > 0.0 {
            let added = headroom.min(remaining);
            payments[i] += added;
            remaining -= added;
        }
    }

    payments
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // Rank-inversion fixture: accrued-interest order (a), balance order (b),
    // and reverse-balance order (c) all disagree.
    //   a: balance 100, rate 30% -> accrued 30/yr
    //   b: balance 500, rate  4% -> accrued 20/yr
    //   c: balance  50, rate 10% -> accrued  5/yr
    const BALANCES: [f64; 3] = [100.0, 500.0, 50.0];
    const RATES: [f64; 3] = [0.30 / 12.0, 0.04 / 12.0, 0.10 / 12.0];

    #[test]
    fn test_targets_distinct_under_rank_inversion() {
        assert_eq!(Strategy::HighInterestFirst.pick_target(&BALANCES, &RATES), Some(0));
        assert_eq!(Strategy::HighBalanceFirst.pick_target(&BALANCES, &RATES), Some(1));
        assert_eq!(Strategy::Snowball.pick_target(&BALANCES, &RATES), Some(2));
    }

    #[test]
    fn test_tie_breaks_to_lowest_index() {
        let balances = [200.0, 200.0];
        let rates = [0.005, 0.005];

        assert_eq!(Strategy::HighInterestFirst.pick_target(&balances, &rates), Some(0));
        assert_eq!(Strategy::HighBalanceFirst.pick_target(&balances, &rates), Some(0));
        assert_eq!(Strategy::Snowball.pick_target(&balances, &rates), Some(0));
    }

    #[test]
    fn test_retired_loans_ineligible_as_targets() {
        let balances = [0.0, 500.0, 0.005];
        let rates = [0.02, 0.001, 0.02];

        // Indices 0 and 2 are at/below tolerance; only 1 qualifies
        assert_eq!(Strategy::Snowball.pick_target(&balances, &rates), Some(1));
        assert_eq!(Strategy::HighInterestFirst.pick_target(&balances, &rates), Some(1));
    }

    #[test]
    fn test_even_splits_extra_uniformly() {
        let scaled_min = [10.0, 20.0, 30.0];
        let payments = Strategy::Even.allocate(&BALANCES, &RATES, &scaled_min, 30.0);

        assert_abs_diff_eq!(payments[0], 20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(payments[1], 30.0, epsilon = 1e-9);
        assert_abs_diff_eq!(payments[2], 40.0, epsilon = 1e-9);
    }

    #[test]
    fn test_targeted_strategies_respect_minimums_and_budget() {
        let scaled_min = [10.0, 20.0, 5.0];
        let extra = 40.0;
        let budget: f64 = scaled_min.iter().sum::<f64>() + extra;

        for strategy in [
            Strategy::HighInterestFirst,
            Strategy::HighBalanceFirst,
            Strategy::Snowball,
        ] {
            let payments = strategy.allocate(&BALANCES, &RATES, &scaled_min, extra);

            for (payment, &min) in payments.iter().zip(&scaled_min) {
                assert!(*payment >= min - 1e-9);
            }
            assert_abs_diff_eq!(payments.iter().sum::<f64>(), budget, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_minimize_fills_highest_rate_first() {
        let scaled_min = [10.0, 20.0, 5.0];
        let payments = Strategy::MinimizeInterest.allocate(&BALANCES, &RATES, &scaled_min, 40.0);

        // Loan 0 has the highest rate and headroom 90; all 40 of extra lands there
        assert_abs_diff_eq!(payments[0], 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(payments[1], 20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(payments[2], 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_minimize_spills_to_next_rate_after_cap() {
        // Extra large enough to exhaust loan 0 (highest rate), then loan 2
        // (next rate), with the rest landing on loan 1
        let scaled_min = [10.0, 20.0, 5.0];
        let payments = Strategy::MinimizeInterest.allocate(&BALANCES, &RATES, &scaled_min, 200.0);

        assert_abs_diff_eq!(payments[0], 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(payments[2], 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(payments[1], 85.0, epsilon = 1e-9);
        assert_abs_diff_eq!(payments.iter().sum::<f64>(), 235.0, epsilon = 1e-9);
    }

    #[test]
    fn test_minimize_caps_lower_bound_at_balance() {
        // Loan 1's minimum exceeds its balance; the freed budget must flow to
        // the higher-rate loan 0 instead of overpaying loan 1
        let balances = [300.0, 40.0];
        let rates = [0.01, 0.002];
        let scaled_min = [20.0, 60.0];
        let payments = Strategy::MinimizeInterest.allocate(&balances, &rates, &scaled_min, 0.0);

        assert_abs_diff_eq!(payments[1], 40.0, epsilon = 1e-9);
        assert_abs_diff_eq!(payments[0], 40.0, epsilon = 1e-9);
        assert!(payments.iter().sum::<f64>() <= 80.0 + 1e-9);
    }

    /// Next-month objective the LP minimizes.
    fn accrued_after(balances: &[f64], rates: &[f64], payments: &[f64]) -> f64 {
        balances
            .iter()
            .zip(rates)
            .zip(payments)
            .map(|((&b, &r), &p)| (b - p) * r)
            .sum()
    }

    #[test]
    fn test_minimize_optimal_against_feasible_grid() {
        // Brute-force the LP's feasible region on a coarse grid and confirm
        // the greedy fill is never beaten. Grid points: payment[i] in
        // [min, balance] in 25 steps, kept when the sum constraint holds.
        let balances = [120.0, 300.0, 80.0];
        let rates = [0.08 / 12.0, 0.03 / 12.0, 0.15 / 12.0];
        let scaled_min = [10.0, 15.0, 5.0];
        let extra = 70.0;
        let budget: f64 = scaled_min.iter().sum::<f64>() + extra;

        let greedy = Strategy::MinimizeInterest.allocate(&balances, &rates, &scaled_min, extra);
        let greedy_objective = accrued_after(&balances, &rates, &greedy);

        let steps = 25;
        let axis = |i: usize| {
            let lo = scaled_min[i];
            let hi = balances[i];
            (0..=steps).map(move |s| lo + (hi - lo) * s as f64 / steps as f64)
        };

        let mut best_feasible = f64::INFINITY;
        for p0 in axis(0) {
            for p1 in axis(1) {
                for p2 in axis(2) {
                    if p0 + p1 + p2 <= budget + 1e-9 {
                        let objective = accrued_after(&balances, &rates, &[p0, p1, p2]);
                        best_feasible = best_feasible.min(objective);
                    }
                }
            }
        }

        assert!(best_feasible.is_finite());
        assert!(
            greedy_objective <= best_feasible + 1e-9,
            "greedy fill {greedy_objective} beaten by grid point {best_feasible}"
        );
    }

    #[test]
    fn test_minimize_matches_greedy_budget_usage() {
        // When total balances exceed the budget, the full budget is spent
        let balances = [120.0, 300.0, 80.0];
        let rates = [0.08 / 12.0, 0.03 / 12.0, 0.15 / 12.0];
        let scaled_min = [10.0, 15.0, 5.0];
        let extra = 70.0;

        let payments = Strategy::MinimizeInterest.allocate(&balances, &rates, &scaled_min, extra);
        assert_abs_diff_eq!(payments.iter().sum::<f64>(), 100.0, epsilon = 1e-9);
    }
}
