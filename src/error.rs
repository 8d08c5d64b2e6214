//! Error taxonomy for simulation runs
//!
//! `InsufficientBudget` aborts a run mid-loop; `InvalidInput` is raised once
//! at run start, before any month is simulated. Hitting the iteration cap is
//! not an error: it is reported as a terminal status on the result.

use thiserror::Error;

/// Errors surfaced by the simulation entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// The monthly payment cap cannot cover this month's accrued interest.
    #[error(
        "maximum monthly payment {budget:.2} cannot cover accrued interest {interest:.2} in month {month}"
    )]
    InsufficientBudget {
        /// Month in which the shortfall occurred (1-indexed)
        month: u32,
        /// The configured payment cap
        budget: f64,
        /// Total interest accrued across active loans that month
        interest: f64,
    },

    /// Portfolio or parameter validation failed before the run started.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Validation failures detected before simulation starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    #[error("loan portfolio is empty")]
    EmptyPortfolio,

    #[error("max_monthly_payment must be positive, got {0}")]
    NonPositivePayment(f64),

    #[error("loan '{loan_id}': balance must be a non-negative finite number, got {value}")]
    BadBalance { loan_id: String, value: f64 },

    #[error("loan '{loan_id}': annual rate must be a fraction in [0, 1], got {value}")]
    BadRate { loan_id: String, value: f64 },

    #[error("loan '{loan_id}': minimum payment must be a non-negative finite number, got {value}")]
    BadMinPayment { loan_id: String, value: f64 },
}
