use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

use crate::models::series::{AuditBalance, CumulativePoint, MonthBucket, PassFailCounts};
use crate::models::transaction::{ResultRecord, Transaction, TransactionKind};

/// Folds raw API rows into the numeric series the charts consume.
///
/// Every method is a pure fold over its input slice: no I/O, no shared
/// state, and the same rows always produce the same series.
pub struct AggregationService;

impl AggregationService {
    pub fn new() -> Self {
        Self
    }

    /// Group XP transactions by calendar month of `created_at`.
    ///
    /// Buckets come back in chronological order. The sum of all bucket
    /// totals equals the sum of all XP amounts — bucketing neither
    /// drops nor double-counts.
    #[must_use]
    pub fn xp_by_month(&self, transactions: &[Transaction]) -> Vec<MonthBucket> {
        // BTreeMap keyed by first-of-month gives chronological order for free
        let mut buckets: BTreeMap<NaiveDate, i64> = BTreeMap::new();

        for tx in transactions {
            if tx.kind != TransactionKind::Xp {
                continue;
            }
            let date = tx.created_at.date_naive();
            let month = date.with_day(1).unwrap_or(date);
            *buckets.entry(month).or_insert(0) += tx.amount;
        }

        buckets
            .into_iter()
            .map(|(month, total)| MonthBucket {
                label: month.format("%b %y").to_string(),
                month,
                total,
            })
            .collect()
    }

    /// Running XP total over time, one point per transaction, sorted
    /// ascending by `created_at`. The series is non-decreasing for
    /// non-negative amounts and its final value equals the total sum.
    #[must_use]
    pub fn cumulative_over_time(&self, transactions: &[Transaction]) -> Vec<CumulativePoint> {
        let mut sorted: Vec<&Transaction> = transactions
            .iter()
            .filter(|tx| tx.kind == TransactionKind::Xp)
            .collect();
        sorted.sort_by_key(|tx| tx.created_at);

        let mut running = 0;
        sorted
            .into_iter()
            .map(|tx| {
                running += tx.amount;
                CumulativePoint {
                    at: tx.created_at,
                    total: running,
                }
            })
            .collect()
    }

    /// Total XP across all XP transactions.
    #[must_use]
    pub fn total_xp(&self, transactions: &[Transaction]) -> i64 {
        transactions
            .iter()
            .filter(|tx| tx.kind == TransactionKind::Xp)
            .map(|tx| tx.amount)
            .sum()
    }

    /// Count passed and failed attempts over project and piscine paths.
    ///
    /// Only paths containing "project" or "piscine" participate.
    /// Grade 1 counts as a pass, 0 as a fail; any other grade value is
    /// silently excluded (not an error).
    #[must_use]
    pub fn pass_fail_counts(&self, results: &[ResultRecord]) -> PassFailCounts {
        let mut counts = PassFailCounts::default();

        for record in results {
            if !record.path.contains("project") && !record.path.contains("piscine") {
                continue;
            }
            match record.grade {
                1 => counts.pass += 1,
                0 => counts.fail += 1,
                _ => {}
            }
        }

        counts
    }

    /// Sum audit points given (up) and received (down) and derive the
    /// ratio `up / (up + down)`; 0 when both sums are zero.
    #[must_use]
    pub fn audit_balance(&self, transactions: &[Transaction]) -> AuditBalance {
        let mut total_up = 0;
        let mut total_down = 0;

        for tx in transactions {
            match tx.kind {
                TransactionKind::Up => total_up += tx.amount,
                TransactionKind::Down => total_down += tx.amount,
                _ => {}
            }
        }

        let denominator = total_up + total_down;
        let ratio = if denominator == 0 {
            0.0
        } else {
            total_up as f64 / denominator as f64
        };

        AuditBalance {
            total_up,
            total_down,
            ratio,
        }
    }
}

impl Default for AggregationService {
    fn default() -> Self {
        Self::new()
    }
}
