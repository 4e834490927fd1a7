//! Per-payer point deltas produced by one spend.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::io::Write;

use crate::error::Result;

/// Mapping from payer to the signed number of points attributed to it.
///
/// Entries are ordered by payer name so the rendered form is deterministic:
///
/// ```
/// use points_spender::PayerBalances;
///
/// let mut balances = PayerBalances::new();
/// balances.add("UNILEVER", -200);
/// balances.add("DANNON", -100);
/// assert_eq!(balances.to_string(), "{DANNON=-100, UNILEVER=-200}");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayerBalances(BTreeMap<String, i64>);

impl PayerBalances {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        PayerBalances(BTreeMap::new())
    }

    /// Adds `delta` to the payer's entry, creating it at zero if absent.
    ///
    /// Entries saturate at `i64::MIN` and `i64::MAX` instead of wrapping.
    pub fn add(&mut self, payer: &str, delta: i64) {
        match self.0.get_mut(payer) {
            Some(value) => *value = value.saturating_add(delta),
            None => {
                self.0.insert(payer.to_string(), delta);
            }
        }
    }

    /// Returns the payer's entry, if any.
    pub fn get(&self, payer: &str) -> Option<i64> {
        self.0.get(payer).copied()
    }

    /// Sum of all entries, saturating like [`PayerBalances::add`].
    pub fn total(&self) -> i64 {
        self.0
            .values()
            .fold(0i64, |sum, value| sum.saturating_add(*value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in payer order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, i64> {
        self.0.iter()
    }

    /// Writes the rendered mapping followed by a newline.
    pub fn write_output<W: Write>(&self, mut writer: W) -> Result<()> {
        writeln!(writer, "{}", self)?;
        writer.flush()?;
        Ok(())
    }
}

impl fmt::Display for PayerBalances {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (idx, (payer, points)) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", payer, points)?;
        }
        f.write_str("}")
    }
}

impl FromIterator<(String, i64)> for PayerBalances {
    fn from_iter<I: IntoIterator<Item = (String, i64)>>(iter: I) -> Self {
        let mut balances = PayerBalances::new();
        for (payer, delta) in iter {
            balances.add(&payer, delta);
        }
        balances
    }
}
