//! Loan data structures and portfolio loading

mod data;
pub mod loader;

pub use data::{validate_portfolio, Loan};
pub use loader::{load_portfolio, write_template};
