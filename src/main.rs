//! Loan Payoff CLI
//!
//! Compares repayment strategies for a loan portfolio under a fixed monthly
//! payment budget.

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use loan_payoff::loan::{load_portfolio, write_template};
use loan_payoff::simulation::DEFAULT_MAX_ITERATIONS;
use loan_payoff::{SimulationStatus, Strategy, StrategyRunner};

#[derive(Parser)]
#[command(name = "loan_payoff", version, about = "Loan payoff strategy simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate payoff strategies for a loan portfolio
    Run {
        /// Portfolio file (.csv or .tsv)
        input: PathBuf,

        /// Total monthly payment budget
        #[arg(long)]
        payment: f64,

        /// Run a single strategy instead of comparing all five
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Safety cap on simulated months
        #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
        max_iterations: u32,

        /// Emit JSON instead of a text table
        #[arg(long)]
        json: bool,
    },
    /// Write a template portfolio file to fill in
    Template {
        /// Output path for the template CSV
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Even,
    HighInterest,
    HighBalance,
    Snowball,
    MinimizeInterest,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Even => Strategy::Even,
            StrategyArg::HighInterest => Strategy::HighInterestFirst,
            StrategyArg::HighBalance => Strategy::HighBalanceFirst,
            StrategyArg::Snowball => Strategy::Snowball,
            StrategyArg::MinimizeInterest => Strategy::MinimizeInterest,
        }
    }
}

fn status_label(status: SimulationStatus) -> &'static str {
    match status {
        SimulationStatus::PayoffComplete => "paid off",
        SimulationStatus::IterationLimitReached => "cap hit",
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::Run {
            input,
            payment,
            strategy,
            max_iterations,
            json,
        } => run(input, payment, strategy, max_iterations, json),
        Command::Template { output } => {
            write_template(&output).map_err(|e| anyhow!("{e}"))?;
            println!("Template written to {}", output.display());
            Ok(())
        }
    }
}

fn run(
    input: PathBuf,
    payment: f64,
    strategy: Option<StrategyArg>,
    max_iterations: u32,
    json: bool,
) -> anyhow::Result<()> {
    let loans = load_portfolio(&input)
        .map_err(|e| anyhow!("{e}"))
        .with_context(|| format!("failed to load portfolio from {}", input.display()))?;

    let runner = StrategyRunner::new(loans, payment).with_max_iterations(max_iterations);

    match strategy {
        Some(arg) => {
            let result = runner.run(arg.into())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
                return Ok(());
            }

            let summary = result.summary();
            println!("Strategy: {}", result.strategy.name());
            println!("Status:   {}", status_label(summary.status));
            println!("Months:   {}", summary.months);
            println!("Total cost:     ${:.2}", summary.total_cost);
            println!("Total interest: ${:.2}", summary.total_interest);
            println!();
            println!("{:>5} {:>14} {:>14} {:>14} {:>14}",
                "Month", "Interest", "Principal", "Payment", "Balance");
            println!("{}", "-".repeat(64));
            for row in &result.months {
                let remaining: f64 = row.balance.iter().sum();
                println!("{:>5} {:>14.2} {:>14.2} {:>14.2} {:>14.2}",
                    row.month,
                    row.total_interest,
                    row.total_principal,
                    row.total_payment(),
                    remaining,
                );
            }
        }
        None => {
            let rows = runner.compare()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
                return Ok(());
            }

            println!("{:>28} {:>10} {:>8} {:>14} {:>16}",
                "Strategy", "Status", "Months", "Total Cost", "Total Interest");
            println!("{}", "-".repeat(80));
            for row in &rows {
                println!("{:>28} {:>10} {:>8} {:>14.2} {:>16.2}",
                    row.strategy.name(),
                    status_label(row.status),
                    row.months,
                    row.total_cost,
                    row.total_interest,
                );
            }
        }
    }

    Ok(())
}
