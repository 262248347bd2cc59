use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// XP earned in one calendar month.
///
/// Buckets are emitted in chronological order. The label is a fixed
/// "%b %y" rendering ("Jan 24") so the same rows always produce the
/// same series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBucket {
    /// Human-readable month label, e.g. "Jan 24"
    pub label: String,

    /// First day of the bucket's month, kept for sorting and tick layout
    pub month: chrono::NaiveDate,

    /// Total XP earned in this month
    pub total: i64,
}

/// One point of the running XP total over time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CumulativePoint {
    pub at: DateTime<Utc>,

    /// Running total of all amounts up to and including `at`
    pub total: i64,
}

/// Pass/fail counts over project and piscine results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PassFailCounts {
    pub pass: usize,
    pub fail: usize,
}

impl PassFailCounts {
    #[must_use]
    pub fn total(&self) -> usize {
        self.pass + self.fail
    }
}

/// Audit points given vs. received, with the derived ratio.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AuditBalance {
    /// Points given (type "up")
    pub total_up: i64,

    /// Points received (type "down")
    pub total_down: i64,

    /// total_up / (total_up + total_down), or 0 when both are zero
    pub ratio: f64,
}
