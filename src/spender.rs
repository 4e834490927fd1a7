//! Oldest-first point spending.
//!
//! Spending works on a time-sorted copy of the ledger in two passes:
//!
//! 1. **Corrections.** A record with negative points cancels that payer's
//!    earlier grants, oldest first. Whatever it cannot cancel is carried
//!    forward and taken from the payer's next grants as they appear.
//! 2. **Drawing.** The requested amount is taken from grants with positive
//!    points, oldest first, until it is covered or the grants run out.
//!
//! Corrections never count as spending and are never drawn from.

use crate::balances::PayerBalances;
use crate::error::{EngineError, Result};
use crate::transaction::Transaction;
use log::{debug, warn};
use std::collections::{HashMap, VecDeque};

/// Result of one spend.
#[derive(Debug, Clone)]
pub struct SpendOutcome {
    /// The ledger sorted by timestamp with points left after corrections and spending.
    pub transactions: Vec<Transaction>,

    /// Points taken from each payer, as negative deltas. Payers not drawn from are absent.
    pub spent: PayerBalances,

    /// Portion of the requested amount the ledger could not cover.
    pub unspent: i64,
}

impl SpendOutcome {
    /// Total points actually taken.
    pub fn points_spent(&self) -> i64 {
        -self.spent.total()
    }

    /// Points each payer still has after the spend.
    ///
    /// Every payer in the ledger is listed, including those at zero. A payer
    /// whose corrections exceed its grants shows a negative balance. Totals
    /// beyond the `i64` range saturate.
    pub fn remaining_balances(&self) -> PayerBalances {
        self.transactions
            .iter()
            .map(|tx| (tx.payer().to_string(), tx.points()))
            .collect()
    }
}

/// Spends `amount` points from `transactions`, oldest grants first.
///
/// The caller's records are left untouched; the updated ledger is part of the
/// returned [`SpendOutcome`]. Running out of points is not an error: the
/// shortfall is reported in [`SpendOutcome::unspent`].
///
/// # Errors
///
/// Returns [`EngineError::NegativeAmount`] if `amount` is below zero.
pub fn spend(amount: i64, transactions: &[Transaction]) -> Result<SpendOutcome> {
    if amount < 0 {
        return Err(EngineError::NegativeAmount(amount));
    }

    let mut ledger = transactions.to_vec();
    // stable: equal timestamps keep their input order
    ledger.sort_by_key(|tx| tx.timestamp());

    apply_corrections(&mut ledger);

    let mut spent = PayerBalances::new();
    let mut remaining = amount;

    for tx in ledger.iter_mut() {
        if remaining == 0 {
            break;
        }

        let take = tx.draw(remaining);
        if take == 0 {
            continue;
        }

        spent.add(tx.payer(), -take);
        remaining -= take;
        debug!(
            "Spent {} from {} grant at {}, {} left to spend",
            take,
            tx.payer(),
            tx.timestamp(),
            remaining
        );
    }

    if remaining > 0 {
        warn!(
            "Ledger covers only {} of {} requested points",
            amount - remaining,
            amount
        );
    }

    Ok(SpendOutcome {
        transactions: ledger,
        spent,
        unspent: remaining,
    })
}

/// Settles every correction in a time-sorted ledger against its payer's grants.
fn apply_corrections(ledger: &mut [Transaction]) {
    // Grants with points left, per payer, oldest first.
    let mut open_grants: HashMap<String, VecDeque<usize>> = HashMap::new();
    // Corrections not yet fully settled, per payer, oldest first.
    let mut outstanding: HashMap<String, VecDeque<usize>> = HashMap::new();

    for idx in 0..ledger.len() {
        let payer = ledger[idx].payer().to_string();

        if ledger[idx].is_correction() {
            let grants = open_grants.entry(payer.clone()).or_default();
            while ledger[idx].is_correction() {
                let Some(&grant) = grants.front() else {
                    break;
                };
                let owed = ledger[idx].owed();
                let taken = ledger[grant].draw(owed);
                ledger[idx].absorb(taken);
                if ledger[grant].points() == 0 {
                    grants.pop_front();
                }
                if taken == 0 {
                    break;
                }
            }

            if ledger[idx].is_correction() {
                debug!(
                    "Correction for {} at {} has {} points unsettled",
                    payer,
                    ledger[idx].timestamp(),
                    ledger[idx].owed()
                );
                outstanding.entry(payer).or_default().push_back(idx);
            }
        } else if ledger[idx].points() > 0 {
            if let Some(corrections) = outstanding.get_mut(&payer) {
                while let Some(&correction) = corrections.front() {
                    let owed = ledger[correction].owed();
                    let taken = ledger[idx].draw(owed);
                    ledger[correction].absorb(taken);
                    if ledger[correction].is_correction() || taken == 0 {
                        break;
                    }
                    corrections.pop_front();
                }
            }

            if ledger[idx].points() > 0 {
                open_grants.entry(payer).or_default().push_back(idx);
            }
        }
    }

    for (payer, corrections) in &outstanding {
        if !corrections.is_empty() {
            warn!("Corrections for {} exceed its grants", payer);
        }
    }
}
