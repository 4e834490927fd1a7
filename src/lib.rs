//! # Points Spender
//!
//! Spends reward points from a ledger of payer grants, oldest grant first,
//! and reports how many points were taken from each payer.
//!
//! ## Design Principles
//!
//! - **Oldest first**: grants are drawn in timestamp order, ties in file order
//! - **Corrections settle first**: negative records cancel their payer's grants
//!   before any spending and are never drawn from
//! - **No hidden mutation**: `spend` returns an updated copy of the ledger
//! - **Deterministic output**: payers rendered sorted by name
//!
//! ## Example
//!
//! ```
//! use points_spender::{read_transactions_from, spend};
//! use std::io::Cursor;
//!
//! let csv = "payer,points,timestamp\n\
//!            UNILEVER,200,2020-10-31T11:00:00Z\n\
//!            DANNON,1000,2020-11-02T14:00:00Z\n";
//! let transactions = read_transactions_from(Cursor::new(csv)).unwrap();
//! let outcome = spend(500, &transactions).unwrap();
//! assert_eq!(outcome.spent.to_string(), "{DANNON=-300, UNILEVER=-200}");
//! ```

pub mod balances;
pub mod cli;
pub mod error;
pub mod loader;
pub mod spender;
pub mod transaction;

pub use balances::PayerBalances;
pub use cli::{run, CliArgs};
pub use error::{EngineError, Result};
pub use loader::{read_transactions, read_transactions_from};
pub use spender::{spend, SpendOutcome};
pub use transaction::{Transaction, TransactionRecord};
