//! Loan Payoff System - amortization simulator for multi-loan portfolios
//!
//! This library provides:
//! - Month-by-month payoff simulation under a fixed total payment budget
//! - Five extra-principal allocation strategies (even, high-interest-first,
//!   high-balance-first, snowball, minimize-accrued-interest)
//! - Minimum-payment enforcement and overpayment redistribution
//! - Parallel multi-strategy comparison over a shared portfolio

pub mod error;
pub mod loan;
pub mod runner;
pub mod simulation;

// Re-export commonly used types
pub use error::SimulationError;
pub use loan::Loan;
pub use runner::{ComparisonRow, StrategyRunner};
pub use simulation::{
    MonthRow, SimulationConfig, SimulationEngine, SimulationResult, SimulationStatus, Strategy,
};
