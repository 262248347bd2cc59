use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of a ledger transaction, as reported by the platform API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Experience points earned for a project or exercise
    Xp,
    /// Audit points given to peers
    Up,
    /// Audit points received from peers
    Down,
    /// Project-completion marker transaction
    Project,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Xp => write!(f, "xp"),
            TransactionKind::Up => write!(f, "up"),
            TransactionKind::Down => write!(f, "down"),
            TransactionKind::Project => write!(f, "project"),
        }
    }
}

/// An append-only ledger entry sourced from the platform API.
///
/// The aggregator never mutates transactions — it only folds over them,
/// so recomputing any derived series from the same rows is idempotent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,

    /// xp, up, down or project
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Amount in platform units (XP points or audit points)
    pub amount: i64,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    /// Slash-delimited curriculum path, e.g. "/rouen/div-01/graphql"
    pub path: String,
}

impl Transaction {
    pub fn new(
        id: i64,
        kind: TransactionKind,
        amount: i64,
        created_at: DateTime<Utc>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            id,
            kind,
            amount,
            created_at,
            path: path.into(),
        }
    }
}

/// Pass/fail outcome of a project attempt.
///
/// `grade` is nominally 0 (fail) or 1 (pass); other values exist in the
/// wild and are silently excluded from pass/fail counting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub id: i64,

    pub grade: i64,

    pub path: String,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl ResultRecord {
    pub fn new(
        id: i64,
        grade: i64,
        path: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            grade,
            path: path.into(),
            created_at,
        }
    }
}

/// Extract the project name from a curriculum path: the final non-empty
/// `/`-delimited segment (paths may end with a trailing slash).
#[must_use]
pub fn project_name(path: &str) -> Option<&str> {
    path.rsplit('/').find(|segment| !segment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_name_takes_last_segment() {
        assert_eq!(project_name("/rouen/div-01/ascii-art"), Some("ascii-art"));
    }

    #[test]
    fn project_name_skips_trailing_slash() {
        assert_eq!(project_name("/rouen/div-01/forum/"), Some("forum"));
    }

    #[test]
    fn project_name_empty_path() {
        assert_eq!(project_name(""), None);
        assert_eq!(project_name("///"), None);
    }
}
