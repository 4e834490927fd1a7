//! Transaction models for CSV parsing and internal representation.

use crate::error::{EngineError, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

/// Format accepted for timestamps that carry no UTC offset.
const LOCAL_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Raw ledger row as read from CSV.
///
/// Fields are positional (`payer,points,timestamp`) and kept as strings so
/// that each one can be reported precisely when it fails to parse.
#[derive(Debug, Deserialize)]
pub struct TransactionRecord {
    /// Payer name, no embedded commas
    pub payer: String,

    /// Signed integer points; negative values are corrections
    pub points: String,

    /// ISO-8601 date-time
    pub timestamp: String,
}

impl TransactionRecord {
    /// Parses the raw CSV record into a typed transaction.
    ///
    /// `row` is the 1-based line in the source file and only feeds error messages.
    pub fn parse(&self, row: usize) -> Result<Transaction> {
        let payer = self.payer.trim();
        if payer.is_empty() {
            return Err(EngineError::InvalidRecord {
                row,
                message: "empty payer".to_string(),
            });
        }

        let points = self
            .points
            .trim()
            .parse::<i64>()
            .map_err(|_| EngineError::InvalidPoints {
                row,
                value: self.points.clone(),
            })?;

        let timestamp =
            parse_timestamp(&self.timestamp).ok_or_else(|| EngineError::InvalidTimestamp {
                row,
                value: self.timestamp.clone(),
            })?;

        Ok(Transaction::new(payer, points, timestamp))
    }
}

/// Parses an ISO-8601 date-time.
///
/// Values with a `Z` or numeric offset are converted to UTC. Values without
/// an offset are taken to already be UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let trimmed = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(trimmed, LOCAL_TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// A single point grant, or a correction when `points` is negative.
///
/// Records are values: spending works on its own copy and hands the
/// updated records back in a `SpendOutcome`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    payer: String,
    points: i64,
    timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Creates a new transaction.
    pub fn new(payer: impl Into<String>, points: i64, timestamp: DateTime<Utc>) -> Self {
        Transaction {
            payer: payer.into(),
            points,
            timestamp,
        }
    }

    /// Payer this record belongs to.
    pub fn payer(&self) -> &str {
        &self.payer
    }

    /// Points still attributable to this record.
    pub fn points(&self) -> i64 {
        self.points
    }

    /// Time of the grant, the sole ordering key.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns `true` if this record is a correction rather than a grant.
    pub fn is_correction(&self) -> bool {
        self.points < 0
    }

    /// Removes up to `wanted` points from a grant and returns how many were taken.
    ///
    /// Corrections and empty grants yield nothing.
    pub(crate) fn draw(&mut self, wanted: i64) -> i64 {
        if self.points <= 0 || wanted <= 0 {
            return 0;
        }
        let take = self.points.min(wanted);
        self.points -= take;
        take
    }

    /// Points a correction still has to cancel, zero for grants.
    ///
    /// Clamped to `i64::MAX`, so a correction of `i64::MIN` owes one point
    /// more than this reports until it has been partly settled.
    pub fn owed(&self) -> i64 {
        if self.points >= 0 {
            return 0;
        }
        self.points.checked_neg().unwrap_or(i64::MAX)
    }

    /// Settles `settled` points of a correction against its payer's grants,
    /// moving `points` toward zero.
    pub(crate) fn absorb(&mut self, settled: i64) {
        debug_assert!(self.points < 0 && settled >= 0 && settled <= self.owed());
        self.points += settled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(payer: &str, points: &str, timestamp: &str) -> TransactionRecord {
        TransactionRecord {
            payer: payer.to_string(),
            points: points.to_string(),
            timestamp: timestamp.to_string(),
        }
    }

    #[test]
    fn test_parse_grant() {
        let tx = record("DANNON", "1000", "2020-11-02T14:00:00Z")
            .parse(2)
            .unwrap();

        assert_eq!(tx.payer(), "DANNON");
        assert_eq!(tx.points(), 1000);
        assert_eq!(
            tx.timestamp(),
            Utc.with_ymd_and_hms(2020, 11, 2, 14, 0, 0).unwrap()
        );
        assert!(!tx.is_correction());
    }

    #[test]
    fn test_parse_correction() {
        let tx = record("DANNON", "-200", "2020-10-31T15:00:00Z")
            .parse(2)
            .unwrap();
        assert_eq!(tx.points(), -200);
        assert!(tx.is_correction());
    }

    #[test]
    fn test_parse_handles_whitespace() {
        let tx = record("  MILLER COORS ", " 10000 ", " 2020-11-01T14:00:00Z ")
            .parse(2)
            .unwrap();
        assert_eq!(tx.payer(), "MILLER COORS");
        assert_eq!(tx.points(), 10000);
    }

    #[test]
    fn test_parse_rejects_bad_points() {
        let err = record("DANNON", "10.5", "2020-11-02T14:00:00Z")
            .parse(7)
            .unwrap_err();
        match err {
            EngineError::InvalidPoints { row, value } => {
                assert_eq!(row, 7);
                assert_eq!(value, "10.5");
            }
            other => panic!("Expected InvalidPoints, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_bad_timestamp() {
        let err = record("DANNON", "100", "yesterday").parse(3).unwrap_err();
        assert!(matches!(err, EngineError::InvalidTimestamp { row: 3, .. }));
    }

    #[test]
    fn test_parse_rejects_empty_payer() {
        let err = record("  ", "100", "2020-11-02T14:00:00Z")
            .parse(4)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidRecord { row: 4, .. }));
    }

    #[test]
    fn test_timestamp_offsets_normalize_to_utc() {
        let zulu = parse_timestamp("2020-11-02T14:00:00Z").unwrap();
        let offset = parse_timestamp("2020-11-02T16:00:00+02:00").unwrap();
        assert_eq!(zulu, offset);
    }

    #[test]
    fn test_timestamp_without_offset_is_utc() {
        let naive = parse_timestamp("2020-11-02T14:00:00").unwrap();
        assert_eq!(naive, Utc.with_ymd_and_hms(2020, 11, 2, 14, 0, 0).unwrap());

        let fractional = parse_timestamp("2020-11-02T14:00:00.250").unwrap();
        assert!(fractional > naive);
    }

    #[test]
    fn test_draw_never_increases_points() {
        let ts = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();

        let mut grant = Transaction::new("A", 100, ts);
        assert_eq!(grant.draw(30), 30);
        assert_eq!(grant.points(), 70);
        assert_eq!(grant.draw(500), 70);
        assert_eq!(grant.points(), 0);
        assert_eq!(grant.draw(10), 0);

        let mut correction = Transaction::new("A", -50, ts);
        assert_eq!(correction.draw(10), 0);
        assert_eq!(correction.points(), -50);
    }

    #[test]
    fn test_owed_at_range_limits() {
        let ts = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();

        assert_eq!(Transaction::new("A", 10, ts).owed(), 0);
        assert_eq!(Transaction::new("A", -10, ts).owed(), 10);
        assert_eq!(Transaction::new("A", -i64::MAX, ts).owed(), i64::MAX);

        let mut correction = Transaction::new("A", i64::MIN, ts);
        assert_eq!(correction.owed(), i64::MAX);
        correction.absorb(i64::MAX);
        assert_eq!(correction.points(), -1);
        assert_eq!(correction.owed(), 1);
    }

    #[test]
    fn test_parse_accepts_extreme_points() {
        let max = record("A", "9223372036854775807", "2020-01-01T00:00:00Z")
            .parse(2)
            .unwrap();
        assert_eq!(max.points(), i64::MAX);

        let min = record("A", "-9223372036854775808", "2020-01-01T00:00:00Z")
            .parse(2)
            .unwrap();
        assert_eq!(min.points(), i64::MIN);

        let err = record("A", "9223372036854775808", "2020-01-01T00:00:00Z")
            .parse(5)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidPoints { row: 5, .. }));
    }
}
