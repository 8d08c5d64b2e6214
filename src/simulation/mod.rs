//! Month-by-month payoff simulation engine

pub mod budget;
mod engine;
mod ledger;
mod redistribute;
mod schedule;
mod strategy;

pub use engine::{SimulationConfig, SimulationEngine, DEFAULT_MAX_ITERATIONS};
pub use ledger::{LoanLedger, BALANCE_TOLERANCE};
pub use schedule::{MonthRow, SimulationResult, SimulationStatus, SimulationSummary};
pub use strategy::Strategy;
