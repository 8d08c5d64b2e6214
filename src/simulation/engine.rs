//! Simulation driver: the monthly amortization loop
//!
//! The driver is the only component holding mutable state. Each month it
//! reads an active-loan snapshot, runs the pure stages (interest/budget,
//! minimum enforcement, strategy allocation, overpayment redistribution),
//! and commits the resulting principal vector back to the ledger.

use log::{debug, info, warn};

use super::budget::{accrue_interest, enforce_minimums};
use super::ledger::LoanLedger;
use super::redistribute::redistribute_overpayments;
use super::schedule::{MonthRow, SimulationResult, SimulationStatus};
use super::strategy::Strategy;
use crate::error::SimulationError;
use crate::loan::{validate_portfolio, Loan};

/// Safety cap on simulated months (50 years)
pub const DEFAULT_MAX_ITERATIONS: u32 = 600;

/// Configuration for a simulation run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Fixed total payment budget per month
    pub max_monthly_payment: f64,

    /// Extra-principal allocation strategy
    pub strategy: Strategy,

    /// Iteration cap; hitting it yields `IterationLimitReached`, not an error
    pub max_iterations: u32,
}

impl SimulationConfig {
    pub fn new(max_monthly_payment: f64, strategy: Strategy) -> Self {
        Self {
            max_monthly_payment,
            strategy,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Runs the monthly payoff loop for one strategy.
pub struct SimulationEngine {
    config: SimulationConfig,
}

impl SimulationEngine {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Simulate payoff of `loans` under the configured budget and strategy.
    ///
    /// Validates inputs once, then iterates months until every loan is
    /// retired or the iteration cap is hit. The caller's loans are copied,
    /// never mutated.
    pub fn run(&self, loans: &[Loan]) -> Result<SimulationResult, SimulationError> {
        validate_portfolio(loans, self.config.max_monthly_payment)?;

        let mut ledger = LoanLedger::from_loans(loans);
        let loan_ids = ledger.loan_ids().to_vec();
        let mut rows: Vec<MonthRow> = Vec::new();

        let status = loop {
            if ledger.all_retired() {
                break SimulationStatus::PayoffComplete;
            }
            if rows.len() as u32 >= self.config.max_iterations {
                warn!(
                    "{}: payoff not reached within {} months, stopping",
                    self.config.strategy.name(),
                    self.config.max_iterations,
                );
                break SimulationStatus::IterationLimitReached;
            }

            let month = rows.len() as u32 + 1;
            let row = self.step(month, &mut ledger)?;
            debug!(
                "month {}: interest {:.2}, principal {:.2}, remaining balance {:.2}",
                month,
                row.total_interest,
                row.total_principal,
                ledger.total_balance(),
            );
            rows.push(row);
        };

        info!(
            "{}: {:?} after {} months",
            self.config.strategy.name(),
            status,
            rows.len(),
        );

        Ok(SimulationResult {
            strategy: self.config.strategy,
            status,
            loan_ids,
            months: rows,
        })
    }

    /// Compute one month and commit it to the ledger.
    fn step(&self, month: u32, ledger: &mut LoanLedger) -> Result<MonthRow, SimulationError> {
        let active = ledger.active_indices();

        // Active-loan snapshot the pure stages operate on
        let balances: Vec<f64> = active.iter().map(|&i| ledger.balances()[i]).collect();
        let rates: Vec<f64> = active.iter().map(|&i| ledger.monthly_rates()[i]).collect();
        let min_totals: Vec<f64> = active.iter().map(|&i| ledger.min_total_payments()[i]).collect();

        let interest = accrue_interest(&balances, &rates);
        let total_interest: f64 = interest.iter().sum();

        let principal_budget = self.config.max_monthly_payment - total_interest;
        if principal_budget <= 0.0 {
            return Err(SimulationError::InsufficientBudget {
                month,
                budget: self.config.max_monthly_payment,
                interest: total_interest,
            });
        }

        let plan = enforce_minimums(&interest, &min_totals, principal_budget);

        let mut payments = self
            .config
            .strategy
            .allocate(&balances, &rates, &plan.scaled_min, plan.extra);
        redistribute_overpayments(self.config.strategy, &mut payments, &balances, &rates);

        // Scatter the active-loan vectors back to portfolio order
        let n = ledger.len();
        let mut full_interest = vec![0.0; n];
        let mut full_principal = vec![0.0; n];
        for (slot, &i) in active.iter().enumerate() {
            full_interest[i] = interest[slot];
            full_principal[i] = payments[slot];
        }

        ledger.commit_payments(&full_principal);

        Ok(MonthRow {
            month,
            total_interest,
            total_principal: payments.iter().sum(),
            interest: full_interest,
            principal: full_principal,
            balance: ledger.balances().to_vec(),
            minimums_scaled: plan.scaled,
        })
    }
}
