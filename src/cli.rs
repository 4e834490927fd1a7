//! Command line surface: argument parsing and the load → spend → print pipeline.
//!
//! Nothing here exits the process; `main` maps errors to an exit code.

use crate::balances::PayerBalances;
use crate::error::{EngineError, Result};
use crate::loader::read_transactions;
use crate::spender::spend;
use log::info;
use std::io::Write;
use std::path::PathBuf;

/// Parsed `<points-to-spend> <transactions.csv>` arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub points_to_spend: i64,
    pub input_path: PathBuf,
}

impl CliArgs {
    /// Parses arguments without the program name.
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        if args.len() != 2 {
            return Err(EngineError::Usage);
        }

        let raw_amount = args[0].trim();
        let points_to_spend = raw_amount
            .parse::<i64>()
            .map_err(|_| EngineError::InvalidAmount(raw_amount.to_string()))?;
        if points_to_spend < 0 {
            return Err(EngineError::NegativeAmount(points_to_spend));
        }

        Ok(CliArgs {
            points_to_spend,
            input_path: PathBuf::from(&args[1]),
        })
    }
}

/// Loads the ledger, spends the requested points and writes the per-payer deltas.
pub fn run<W: Write>(args: &CliArgs, writer: W) -> Result<PayerBalances> {
    let transactions = read_transactions(&args.input_path)?;
    let outcome = spend(args.points_to_spend, &transactions)?;

    info!(
        "Spent {} of {} points across {} payers",
        outcome.points_spent(),
        args.points_to_spend,
        outcome.spent.len()
    );

    outcome.spent.write_output(writer)?;
    Ok(outcome.spent)
}
