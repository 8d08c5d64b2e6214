//! Multi-strategy comparison runner
//!
//! Holds the portfolio and payment budget once, then runs any number of
//! strategies against it. Runs are independent (each gets a private ledger
//! copy), so the full comparison executes in parallel.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::loan::Loan;
use crate::simulation::{
    SimulationConfig, SimulationEngine, SimulationResult, SimulationStatus, Strategy,
    DEFAULT_MAX_ITERATIONS,
};

/// One line of the strategy comparison report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub strategy: Strategy,
    pub status: SimulationStatus,
    pub months: u32,
    pub total_cost: f64,
    pub total_interest: f64,
}

/// Runs strategies against a fixed portfolio and budget.
#[derive(Debug, Clone)]
pub struct StrategyRunner {
    loans: Vec<Loan>,
    max_monthly_payment: f64,
    max_iterations: u32,
}

impl StrategyRunner {
    pub fn new(loans: Vec<Loan>, max_monthly_payment: f64) -> Self {
        Self {
            loans,
            max_monthly_payment,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Override the iteration safety cap.
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Run a single strategy.
    pub fn run(&self, strategy: Strategy) -> Result<SimulationResult, SimulationError> {
        let config = SimulationConfig {
            max_monthly_payment: self.max_monthly_payment,
            strategy,
            max_iterations: self.max_iterations,
        };
        SimulationEngine::new(config).run(&self.loans)
    }

    /// Run all five strategies in parallel.
    ///
    /// Results come back in `Strategy::ALL` order regardless of which run
    /// finishes first.
    pub fn run_all(&self) -> Vec<Result<SimulationResult, SimulationError>> {
        Strategy::ALL
            .par_iter()
            .map(|&strategy| self.run(strategy))
            .collect()
    }

    /// Run all strategies and summarize one comparison row per strategy.
    ///
    /// Any fatal error (bad input, budget below interest) aborts the whole
    /// comparison: such conditions do not depend on the strategy.
    pub fn compare(&self) -> Result<Vec<ComparisonRow>, SimulationError> {
        self.run_all()
            .into_iter()
            .map(|result| {
                let result = result?;
                let summary = result.summary();
                Ok(ComparisonRow {
                    strategy: summary.strategy,
                    status: summary.status,
                    months: summary.months,
                    total_cost: summary.total_cost,
                    total_interest: summary.total_interest,
                })
            })
            .collect()
    }
}
