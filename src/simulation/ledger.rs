//! Per-run mutable loan state
//!
//! A `LoanLedger` is owned by exactly one simulation run. Stages read
//! snapshots of it; only the driver's commit step mutates balances.

use crate::loan::Loan;

/// Balances below this are treated as paid off
pub const BALANCE_TOLERANCE: f64 = 0.01;

/// Mutable per-loan state for one simulation run.
#[derive(Debug, Clone)]
pub struct LoanLedger {
    loan_ids: Vec<String>,
    balances: Vec<f64>,
    monthly_rates: Vec<f64>,
    min_total_payments: Vec<f64>,
}

impl LoanLedger {
    /// Build a ledger from caller-supplied loans.
    ///
    /// Copies everything; the caller's records are never mutated. Annual
    /// rates are converted to monthly here, once. Balances already below
    /// tolerance start retired.
    pub fn from_loans(loans: &[Loan]) -> Self {
        Self {
            loan_ids: loans.iter().map(|l| l.loan_id.clone()).collect(),
            balances: loans
                .iter()
                .map(|l| if l.balance < BALANCE_TOLERANCE { 0.0 } else { l.balance })
                .collect(),
            monthly_rates: loans.iter().map(|l| l.annual_rate / 12.0).collect(),
            min_total_payments: loans.iter().map(|l| l.min_total_payment).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    pub fn loan_ids(&self) -> &[String] {
        &self.loan_ids
    }

    pub fn balances(&self) -> &[f64] {
        &self.balances
    }

    pub fn monthly_rates(&self) -> &[f64] {
        &self.monthly_rates
    }

    pub fn min_total_payments(&self) -> &[f64] {
        &self.min_total_payments
    }

    /// Indices of loans still carrying a balance above tolerance.
    pub fn active_indices(&self) -> Vec<usize> {
        self.balances
            .iter()
            .enumerate()
            .filter(|(_, &b)| b > BALANCE_TOLERANCE)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn total_balance(&self) -> f64 {
        self.balances.iter().sum()
    }

    /// True once every loan is retired.
    pub fn all_retired(&self) -> bool {
        self.balances.iter().all(|&b| b <= BALANCE_TOLERANCE)
    }

    /// Commit a month's principal payments.
    ///
    /// `payments` is portfolio-length (zeros for retired loans). The clamp to
    /// zero absorbs floating-point drift; sub-tolerance residues are zeroed
    /// so they cannot accrue interest in later months.
    pub fn commit_payments(&mut self, payments: &[f64]) {
        debug_assert_eq!(payments.len(), self.balances.len());

        for (balance, &payment) in self.balances.iter_mut().zip(payments) {
            *balance = (*balance - payment).max(0.0);
            if *balance < BALANCE_TOLERANCE {
                *balance = 0.0;
            }
        }
    }
}
