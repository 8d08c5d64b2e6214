//! Simulation output structures

use serde::{Deserialize, Serialize};

use super::strategy::Strategy;

/// Terminal state of a completed run.
///
/// Fatal conditions (insufficient budget, invalid input) surface as errors
/// instead and never produce a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationStatus {
    /// Every loan retired within the iteration cap
    PayoffComplete,
    /// The cap was hit before full payoff; the rows cover the simulated months
    IterationLimitReached,
}

/// One simulated month.
///
/// Per-loan vectors are portfolio-length and portfolio-ordered; retired loans
/// carry zeros.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthRow {
    /// Month number (1-indexed)
    pub month: u32,

    /// Interest charged per loan this month
    pub interest: Vec<f64>,

    /// Principal paid per loan this month
    pub principal: Vec<f64>,

    /// Balance per loan after this month's commit
    pub balance: Vec<f64>,

    /// Total interest across loans
    pub total_interest: f64,

    /// Total principal across loans
    pub total_principal: f64,

    /// True when contractual minimums were proportionally reduced to fit the
    /// budget this month
    pub minimums_scaled: bool,
}

impl MonthRow {
    /// Total amount paid this month (interest plus principal).
    pub fn total_payment(&self) -> f64 {
        self.total_interest + self.total_principal
    }
}

/// Complete result of one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Strategy that produced this run
    pub strategy: Strategy,

    /// Terminal status
    pub status: SimulationStatus,

    /// Loan identifiers, in the order the per-loan vectors use
    pub loan_ids: Vec<String>,

    /// One row per simulated month
    pub months: Vec<MonthRow>,
}

impl SimulationResult {
    pub fn months_elapsed(&self) -> u32 {
        self.months.len() as u32
    }

    /// Sum of all monthly payments over the run.
    pub fn total_cost(&self) -> f64 {
        self.months.iter().map(|row| row.total_payment()).sum()
    }

    /// Sum of all interest charged over the run.
    pub fn total_interest(&self) -> f64 {
        self.months.iter().map(|row| row.total_interest).sum()
    }

    /// Condensed summary for reports.
    pub fn summary(&self) -> SimulationSummary {
        SimulationSummary {
            strategy: self.strategy,
            status: self.status,
            months: self.months_elapsed(),
            total_cost: self.total_cost(),
            total_interest: self.total_interest(),
        }
    }
}

/// Summary statistics for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub strategy: Strategy,
    pub status: SimulationStatus,
    pub months: u32,
    pub total_cost: f64,
    pub total_interest: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn row(month: u32, interest: f64, principal: f64) -> MonthRow {
        MonthRow {
            month,
            interest: vec![interest],
            principal: vec![principal],
            balance: vec![0.0],
            total_interest: interest,
            total_principal: principal,
            minimums_scaled: false,
        }
    }

    #[test]
    fn test_summary_totals() {
        let result = SimulationResult {
            strategy: Strategy::Snowball,
            status: SimulationStatus::PayoffComplete,
            loan_ids: vec!["1".into()],
            months: vec![row(1, 5.0, 95.0), row(2, 4.5, 95.5)],
        };

        let summary = result.summary();
        assert_eq!(summary.months, 2);
        assert_abs_diff_eq!(summary.total_cost, 200.0, epsilon = 1e-9);
        assert_abs_diff_eq!(summary.total_interest, 9.5, epsilon = 1e-9);
    }
}
