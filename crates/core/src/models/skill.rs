use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Skill category a classified keyword maps into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkillCategory {
    /// Programming languages (Go, JavaScript, SQL, ...)
    Languages,
    /// Frameworks & libraries (React, Node, ...)
    Frameworks,
    /// Concepts & algorithms (recursion, sorting, data structures, ...)
    Concepts,
    /// Tools & technologies (Docker, Git, GraphQL, ...)
    Tools,
}

impl std::fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkillCategory::Languages => write!(f, "Programming Languages"),
            SkillCategory::Frameworks => write!(f, "Frameworks & Libraries"),
            SkillCategory::Concepts => write!(f, "Concepts & Algorithms"),
            SkillCategory::Tools => write!(f, "Tools & Technologies"),
        }
    }
}

/// A skill accumulator derived by folding XP transactions through the
/// keyword tables. Recomputed from scratch each load, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub name: String,

    pub category: SkillCategory,

    /// Total XP accumulated from matching transactions
    pub xp: i64,

    /// 0..=5, derived from xp and passed projects
    pub level: u8,

    /// Deduplicated project names that contributed to this skill
    pub projects: BTreeSet<String>,
}

/// Completion score for one curriculum domain, used as a radar axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainScore {
    /// Uppercased domain name, e.g. "GO", "JS"
    pub name: String,

    /// Results with grade > 0 in this domain
    pub completed: usize,

    /// All results in this domain
    pub total: usize,

    /// completed / total, in 0.0..=1.0
    pub score: f64,
}
