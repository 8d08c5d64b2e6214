//! Load loan portfolios from CSV/TSV files
//!
//! Column layout follows the standard input template (see [`write_template`]).
//! Annual rates may be given as percentages (4.5) or fractions (0.045); the
//! loader detects the format file-wide and normalizes to fractions before the
//! records reach the engine.

use super::Loan;
use csv::{ReaderBuilder, WriterBuilder};
use log::warn;
use std::error::Error;
use std::path::Path;

/// Raw CSV row matching the input template columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Loan Number")]
    loan_number: String,
    #[serde(rename = "Lender/Description")]
    description: String,
    #[serde(rename = "Loan Type")]
    _loan_type: String,
    #[serde(rename = "Term (months)")]
    _term_months: u32,
    #[serde(rename = "Principal Balance")]
    principal_balance: f64,
    #[serde(rename = "Minimum Monthly Payment")]
    min_monthly_payment: f64,
    #[serde(rename = "Annual Interest Rate (%)")]
    annual_rate: f64,
}

impl CsvRow {
    fn to_loan(&self, rate_divisor: f64) -> Loan {
        let loan_id = if self.description.trim().is_empty() {
            self.loan_number.trim().to_string()
        } else {
            format!("{} {}", self.loan_number.trim(), self.description.trim())
        };

        Loan {
            loan_id,
            balance: self.principal_balance,
            annual_rate: self.annual_rate / rate_divisor,
            min_total_payment: self.min_monthly_payment,
        }
    }
}

/// Load a loan portfolio from a `.csv` or `.tsv` file.
///
/// Delimiter is chosen by extension (tab for `.tsv`, comma otherwise).
pub fn load_portfolio<P: AsRef<Path>>(path: P) -> Result<Vec<Loan>, Box<dyn Error>> {
    let path = path.as_ref();
    let delimiter = match path.extension().and_then(|e| e.to_str()) {
        Some("tsv") => b'\t',
        _ => b',',
    };

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(format!("no loan rows found in {}", path.display()).into());
    }

    // Rate format detection applies to the whole file: if any rate exceeds 1,
    // every rate is treated as a percentage.
    let as_percentage = rows.iter().any(|r| r.annual_rate > 1.0);
    let rate_divisor = if as_percentage { 100.0 } else { 1.0 };

    let loans: Vec<Loan> = rows.iter().map(|r| r.to_loan(rate_divisor)).collect();

    for loan in &loans {
        if loan.annual_rate < 0.001 || loan.annual_rate > 0.5 {
            warn!(
                "loan '{}' has unusual annual rate {:.4} (input format detected as {})",
                loan.loan_id,
                loan.annual_rate,
                if as_percentage { "percentage" } else { "fraction" },
            );
        }
    }

    Ok(loans)
}

/// Write a template portfolio file for users to fill in.
pub fn write_template<P: AsRef<Path>>(path: P) -> Result<(), Box<dyn Error>> {
    let mut writer = WriterBuilder::new().from_path(path)?;

    writer.write_record([
        "Loan Number",
        "Lender/Description",
        "Loan Type",
        "Term (months)",
        "Principal Balance",
        "Minimum Monthly Payment",
        "Annual Interest Rate (%)",
    ])?;
    writer.write_record(["1", "Student Loan A", "Federal", "120", "25000", "250", "4.5"])?;
    writer.write_record(["2", "Student Loan B", "Federal", "120", "15000", "200", "5.2"])?;
    writer.write_record(["3", "Credit Card", "Private", "60", "8000", "300", "19.99"])?;
    writer.flush()?;

    Ok(())
}
