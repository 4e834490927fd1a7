//! Ledger loading from `payer,points,timestamp` CSV files.
//!
//! The first line is a header and is discarded regardless of its contents.
//! Any malformed row aborts the load with the row number in the error.

use crate::error::{EngineError, Result};
use crate::transaction::{Transaction, TransactionRecord};
use csv::{ReaderBuilder, Trim};
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Number of fields in every ledger row.
const FIELD_COUNT: usize = 3;

/// Reads all transactions from the file at `path`, in file order.
///
/// The file handle is dropped before returning, on success or failure.
pub fn read_transactions<P: AsRef<Path>>(path: P) -> Result<Vec<Transaction>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let transactions = read_transactions_from(BufReader::new(file))?;
    info!(
        "Loaded {} transactions from {}",
        transactions.len(),
        path.display()
    );
    Ok(transactions)
}

/// Reads all transactions from any CSV source, in source order.
pub fn read_transactions_from<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .quoting(false)
        .flexible(true)
        .from_reader(reader);

    let mut transactions = Vec::new();

    for (row_idx, result) in csv_reader.records().enumerate() {
        let raw = result?;
        let row = raw
            .position()
            .map(|pos| pos.line() as usize)
            .unwrap_or(row_idx + 2); // 1-indexed, accounting for header row

        if raw.len() != FIELD_COUNT {
            return Err(EngineError::InvalidRecord {
                row,
                message: format!("expected {} fields, found {}", FIELD_COUNT, raw.len()),
            });
        }

        let record: TransactionRecord =
            raw.deserialize(None).map_err(|e| EngineError::InvalidRecord {
                row,
                message: e.to_string(),
            })?;
        let tx = record.parse(row)?;

        debug!(
            "Row {}: {} {} at {}",
            row,
            tx.payer(),
            tx.points(),
            tx.timestamp()
        );
        transactions.push(tx);
    }

    Ok(transactions)
}
