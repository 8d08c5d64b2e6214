//! Overpayment redistribution
//!
//! After allocation, a loan may have been assigned more principal than it has
//! balance. The excess goes into a remainder pool and is reassigned using the
//! active strategy's own targeting rule until the pool is exhausted or no
//! loan can absorb more.

use super::ledger::BALANCE_TOLERANCE;
use super::strategy::Strategy;

/// Clamp payments at their balances and reassign the excess.
///
/// `payments` and `balances` are active-loan snapshots in the same order the
/// strategy allocated over. On return, `payments[i] <= balances[i]` for every
/// loan and the sum of payments never grows. Leftover remainder below
/// tolerance (or with nothing left to pay) is dropped from the month.
pub fn redistribute_overpayments(
    strategy: Strategy,
    payments: &mut [f64],
    balances: &[f64],
    monthly_rates: &[f64],
) {
    let mut remainder = 0.0;
    for (payment, &balance) in payments.iter_mut().zip(balances) {
        if *payment > balance {
            remainder += *payment - balance;
            *payment = balance;
        }
    }

    // Each pass either exhausts the remainder or retires at least one loan,
    // so the loop is bounded by the loan count.
    while remainder > BALANCE_TOLERANCE {
        let remaining: Vec<f64> = balances
            .iter()
            .zip(payments.iter())
            .map(|(&balance, &payment)| balance - payment)
            .collect();

        match strategy {
            Strategy::Even => {
                let eligible: Vec<usize> = remaining
                    .iter()
                    .enumerate()
                    .filter(|(_, &r)| r > BALANCE_TOLERANCE)
                    .map(|(i, _)| i)
                    .collect();
                if eligible.is_empty() {
                    break;
                }

                // Equal split, re-divided among the remaining loans each pass
                let share = remainder / eligible.len() as f64;
                for &i in &eligible {
                    let paid = share.min(remaining[i]);
                    payments[i] += paid;
                    remainder -= paid;
                }
            }
            _ => {
                let Some(target) = strategy.pick_target(&remaining, monthly_rates) else {
                    break;
                };
                let paid = remainder.min(remaining[target]);
                payments[target] += paid;
                remainder -= paid;
            }
        }
    }
}
