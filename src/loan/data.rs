//! Loan records as consumed by the simulation engine

use serde::{Deserialize, Serialize};

use crate::error::InvalidInputError;

/// A single loan in the portfolio.
///
/// The loading collaborator is responsible for normalizing `annual_rate` into
/// a fraction (0.045, not 4.5) before the record reaches the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    /// Opaque identifier, passed through unchanged into results
    pub loan_id: String,

    /// Current outstanding principal
    pub balance: f64,

    /// Annual interest rate as a fraction in [0, 1]
    pub annual_rate: f64,

    /// Minimum required total (interest + principal) payment per month
    pub min_total_payment: f64,
}

impl Loan {
    pub fn new(loan_id: impl Into<String>, balance: f64, annual_rate: f64, min_total_payment: f64) -> Self {
        Self {
            loan_id: loan_id.into(),
            balance,
            annual_rate,
            min_total_payment,
        }
    }
}

/// Validate a portfolio and its payment cap before a run starts.
///
/// Runs once per simulation; the engine never re-validates mid-run.
pub fn validate_portfolio(loans: &[Loan], max_monthly_payment: f64) -> Result<(), InvalidInputError> {
    if loans.is_empty() {
        return Err(InvalidInputError::EmptyPortfolio);
    }
    if !(max_monthly_payment > 0.0) || !max_monthly_payment.is_finite() {
        return Err(InvalidInputError::NonPositivePayment(max_monthly_payment));
    }

    for loan in loans {
        if !loan.balance.is_finite() || loan.balance < 0.0 {
            return Err(InvalidInputError::BadBalance {
                loan_id: loan.loan_id.clone(),
                value: loan.balance,
            });
        }
        if !loan.annual_rate.is_finite() || loan.annual_rate < 0.0 || loan.annual_rate > 1.0 {
            return Err(InvalidInputError::BadRate {
                loan_id: loan.loan_id.clone(),
                value: loan.annual_rate,
            });
        }
        if !loan.min_total_payment.is_finite() || loan.min_total_payment < 0.0 {
            return Err(InvalidInputError::BadMinPayment {
                loan_id: loan.loan_id.clone(),
                value: loan.min_total_payment,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_loans() -> Vec<Loan> {
        vec![
            Loan::new("1", 1000.0, 0.06, 50.0),
            Loan::new("2", 2000.0, 0.03, 60.0),
        ]
    }

    #[test]
    fn test_valid_portfolio_passes() {
        assert!(validate_portfolio(&sample_loans(), 200.0).is_ok());
    }

    #[test]
    fn test_empty_portfolio_rejected() {
        let err = validate_portfolio(&[], 200.0).unwrap_err();
        assert_eq!(err, InvalidInputError::EmptyPortfolio);
    }

    #[test]
    fn test_non_positive_payment_rejected() {
        assert!(matches!(
            validate_portfolio(&sample_loans(), 0.0),
            Err(InvalidInputError::NonPositivePayment(_))
        ));
        assert!(matches!(
            validate_portfolio(&sample_loans(), -10.0),
            Err(InvalidInputError::NonPositivePayment(_))
        ));
    }

    #[test]
    fn test_percentage_style_rate_rejected() {
        // 4.5 instead of 0.045: the loader should have normalized this
        let loans = vec![Loan::new("1", 1000.0, 4.5, 50.0)];
        assert!(matches!(
            validate_portfolio(&loans, 200.0),
            Err(InvalidInputError::BadRate { .. })
        ));
    }

    #[test]
    fn test_negative_fields_rejected() {
        let loans = vec![Loan::new("1", -5.0, 0.05, 50.0)];
        assert!(matches!(
            validate_portfolio(&loans, 200.0),
            Err(InvalidInputError::BadBalance { .. })
        ));

        let loans = vec![Loan::new("1", 1000.0, 0.05, -1.0)];
        assert!(matches!(
            validate_portfolio(&loans, 200.0),
            Err(InvalidInputError::BadMinPayment { .. })
        ));
    }
}
