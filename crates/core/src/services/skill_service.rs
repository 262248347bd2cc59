use std::collections::BTreeMap;

use crate::models::skill::{DomainScore, SkillCategory, SkillRecord};
use crate::models::transaction::{project_name, ResultRecord, Transaction, TransactionKind};

/// XP needed per skill level before project passes kick in.
const XP_PER_LEVEL: i64 = 500;

/// Skill levels are capped here.
const MAX_LEVEL: u8 = 5;

/// Generic keyword rules: keyword appearing in the project name feeds a
/// skill named after the keyword (capitalized) in the given category.
/// The table is ordered; a project name may match several rules and
/// contribute to several skills — keyword collision is intentional.
const KEYWORD_RULES: &[(&str, SkillCategory)] = &[
    // Languages
    ("go", SkillCategory::Languages),
    ("golang", SkillCategory::Languages),
    ("js", SkillCategory::Languages),
    ("javascript", SkillCategory::Languages),
    ("html", SkillCategory::Languages),
    ("css", SkillCategory::Languages),
    ("php", SkillCategory::Languages),
    ("sql", SkillCategory::Languages),
    ("python", SkillCategory::Languages),
    // Frameworks
    ("react", SkillCategory::Frameworks),
    ("vue", SkillCategory::Frameworks),
    ("node", SkillCategory::Frameworks),
    ("express", SkillCategory::Frameworks),
    ("svelte", SkillCategory::Frameworks),
    ("bootstrap", SkillCategory::Frameworks),
    ("tailwind", SkillCategory::Frameworks),
    // Concepts
    ("algo", SkillCategory::Concepts),
    ("algorithm", SkillCategory::Concepts),
    ("data-structure", SkillCategory::Concepts),
    ("structure", SkillCategory::Concepts),
    ("recursion", SkillCategory::Concepts),
    ("sorting", SkillCategory::Concepts),
    ("search", SkillCategory::Concepts),
    ("linked-list", SkillCategory::Concepts),
    ("hash", SkillCategory::Concepts),
    ("tree", SkillCategory::Concepts),
    ("graph", SkillCategory::Concepts),
    // Tools
    ("docker", SkillCategory::Tools),
    ("git", SkillCategory::Tools),
    ("graphql", SkillCategory::Tools),
    ("api", SkillCategory::Tools),
    ("rest", SkillCategory::Tools),
    ("database", SkillCategory::Tools),
    ("mongodb", SkillCategory::Tools),
    ("web", SkillCategory::Tools),
];

/// Named-skill rules: keyword maps to a fixed display name rather than
/// the keyword itself.
const NAMED_RULES: &[(&str, &str, SkillCategory)] = &[
    ("graphql", "GraphQL", SkillCategory::Tools),
    ("ascii-art", "ASCII Art", SkillCategory::Concepts),
    ("groupie-tracker", "API Integration", SkillCategory::Tools),
    ("forum", "Full-Stack Development", SkillCategory::Concepts),
    ("social-network", "Full-Stack Development", SkillCategory::Concepts),
    ("piscine-js", "JavaScript", SkillCategory::Languages),
    ("piscine-go", "Go", SkillCategory::Languages),
    ("blockchain", "Blockchain", SkillCategory::Concepts),
];

/// Curriculum domains used as radar axes, matched against whole paths.
const RADAR_DOMAINS: &[&str] = &["go", "js", "html", "css", "sql", "graphql", "docker", "react"];

/// Classifies project paths into skill buckets via the declarative
/// keyword tables, and scores curriculum domains for the radar chart.
///
/// The heuristic is inherently approximate: it is a substring scan
/// over project names, recomputed from scratch each load.
pub struct SkillService;

impl SkillService {
    pub fn new() -> Self {
        Self
    }

    /// Fold XP transactions through the keyword tables and combine with
    /// project results into levelled skill records.
    ///
    /// Level = min(5, xp / 500), raised to the count of passed projects
    /// associated with the skill if that is higher, clamped to 5, and
    /// floored at 1 while any xp was earned. Skills that end up at
    /// level 0 are dropped. Output order is deterministic: category,
    /// then level descending, then name.
    #[must_use]
    pub fn classify(
        &self,
        transactions: &[Transaction],
        results: &[ResultRecord],
    ) -> Vec<SkillRecord> {
        // Keyed by (category, name) so the same display name may exist
        // in different categories without merging.
        let mut buckets: BTreeMap<(SkillCategory, String), SkillRecord> = BTreeMap::new();

        for tx in transactions {
            if tx.kind != TransactionKind::Xp {
                continue;
            }
            let Some(project) = project_name(&tx.path) else {
                continue;
            };
            let lowered = project.to_lowercase();

            for (keyword, name, category) in NAMED_RULES {
                if lowered.contains(keyword) {
                    credit(&mut buckets, *category, name, tx.amount, project);
                }
            }

            for (keyword, category) in KEYWORD_RULES {
                if lowered.contains(keyword) {
                    let name = capitalize(keyword);
                    credit(&mut buckets, *category, &name, tx.amount, project);
                }
            }
        }

        // Passed results raise the level of every skill their project
        // contributed to.
        let mut passes: BTreeMap<(SkillCategory, String), u8> = BTreeMap::new();
        for record in results {
            if record.grade < 1 {
                continue;
            }
            let Some(project) = project_name(&record.path) else {
                continue;
            };
            for (key, skill) in &buckets {
                if skill.projects.contains(project) {
                    *passes.entry(key.clone()).or_insert(0) += 1;
                }
            }
        }

        let mut skills: Vec<SkillRecord> = buckets
            .into_iter()
            .map(|(key, mut skill)| {
                let pass_count = passes.get(&key).copied().unwrap_or(0);
                skill.level = skill_level(skill.xp, pass_count);
                skill
            })
            .filter(|skill| skill.level > 0)
            .collect();

        skills.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then(b.level.cmp(&a.level))
                .then(a.name.cmp(&b.name))
        });

        skills
    }

    /// Score curriculum domains from project results for the radar
    /// chart: completed/total ratio per domain keyword, highest first.
    #[must_use]
    pub fn domain_scores(&self, results: &[ResultRecord]) -> Vec<DomainScore> {
        let mut domains: BTreeMap<String, (usize, usize)> = BTreeMap::new();

        for record in results {
            let Some(domain) = extract_domain(&record.path) else {
                continue;
            };
            let entry = domains.entry(domain).or_insert((0, 0));
            entry.1 += 1;
            if record.grade > 0 {
                entry.0 += 1;
            }
        }

        let mut scores: Vec<DomainScore> = domains
            .into_iter()
            .map(|(name, (completed, total))| DomainScore {
                name,
                completed,
                total,
                score: if total > 0 {
                    completed as f64 / total as f64
                } else {
                    0.0
                },
            })
            .collect();

        scores.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.name.cmp(&b.name))
        });

        scores
    }
}

impl Default for SkillService {
    fn default() -> Self {
        Self::new()
    }
}

/// Level formula: XP-driven floor, raised by passed projects, capped at
/// 5, floored at 1 while any XP exists. Monotonic in xp for a fixed
/// pass count.
fn skill_level(xp: i64, pass_count: u8) -> u8 {
    let xp_level = (xp / XP_PER_LEVEL).clamp(0, MAX_LEVEL as i64) as u8;
    let mut level = xp_level.max(pass_count).min(MAX_LEVEL);
    if level < 1 && xp > 0 {
        level = 1;
    }
    level
}

fn credit(
    buckets: &mut BTreeMap<(SkillCategory, String), SkillRecord>,
    category: SkillCategory,
    name: &str,
    amount: i64,
    project: &str,
) {
    let skill = buckets
        .entry((category, name.to_string()))
        .or_insert_with(|| SkillRecord {
            name: name.to_string(),
            category,
            xp: 0,
            level: 0,
            projects: Default::default(),
        });
    skill.xp += amount;
    skill.projects.insert(project.to_string());
}

fn capitalize(keyword: &str) -> String {
    let mut chars = keyword.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Map a result path onto a radar domain: the first domain keyword
/// found in the path wins; piscine paths fall back to their language.
fn extract_domain(path: &str) -> Option<String> {
    let lowered = path.to_lowercase();

    for domain in RADAR_DOMAINS {
        if lowered.contains(domain) {
            return Some(domain.to_uppercase());
        }
    }

    if lowered.contains("piscine") {
        return Some("PISCINE".to_string());
    }

    // Fall back to the first path segment after the campus prefix
    let segments: Vec<&str> = lowered.split('/').filter(|s| !s.is_empty()).collect();
    if segments.len() > 1 {
        return Some(segments[1].to_uppercase());
    }

    None
}
