//! Skill taxonomy: canonical skill phrases with importance weights

use crate::error::{JobMatcherError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Languages,
    WebFrontend,
    WebBackend,
    Data,
    Cloud,
    MlAi,
    ToolsPractices,
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkillCategory::Languages => write!(f, "Languages"),
            SkillCategory::WebFrontend => write!(f, "Web Frontend"),
            SkillCategory::WebBackend => write!(f, "Web Backend"),
            SkillCategory::Data => write!(f, "Data"),
            SkillCategory::Cloud => write!(f, "Cloud"),
            SkillCategory::MlAi => write!(f, "ML/AI"),
            SkillCategory::ToolsPractices => write!(f, "Tools & Practices"),
        }
    }
}

/// A single taxonomy entry. Phrases are stored lowercase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub phrase: String,
    pub weight: f64,
    pub category: SkillCategory,
}

type SkillGroup = (SkillCategory, &'static [(&'static str, f64)]);

const TECH_SKILLS: &[SkillGroup] = &[
    (
        SkillCategory::Languages,
        &[
            ("python", 1.0), ("java", 1.0), ("javascript", 1.0), ("typescript", 0.9),
            ("c++", 1.0), ("c#", 1.0), ("ruby", 0.9), ("php", 0.9), ("swift", 0.9),
            ("kotlin", 0.9), ("go", 0.9), ("rust", 0.8), ("scala", 0.8),
        ],
    ),
    (
        SkillCategory::WebFrontend,
        &[
            ("html", 0.8), ("css", 0.8), ("react", 1.0), ("angular", 1.0), ("vue", 0.9),
            ("redux", 0.9), ("webpack", 0.8), ("sass", 0.7), ("bootstrap", 0.7),
            ("tailwind", 0.8), ("responsive design", 0.8), ("web components", 0.8),
        ],
    ),
    (
        SkillCategory::WebBackend,
        &[
            ("node.js", 1.0), ("express", 0.9), ("django", 1.0), ("flask", 0.9),
            ("spring", 1.0), ("asp.net", 1.0), ("fastapi", 0.8), ("graphql", 0.9),
            ("rest api", 0.9), ("microservices", 1.0),
        ],
    ),
    (
        SkillCategory::Data,
        &[
            ("sql", 1.0), ("mysql", 0.9), ("postgresql", 0.9), ("mongodb", 0.9),
            ("redis", 0.8), ("elasticsearch", 0.9), ("hadoop", 0.9), ("spark", 1.0),
            ("tableau", 0.8), ("power bi", 0.8), ("data analysis", 0.9),
            ("data visualization", 0.8), ("etl", 0.9),
        ],
    ),
    (
        SkillCategory::Cloud,
        &[
            ("aws", 1.0), ("azure", 1.0), ("gcp", 1.0), ("docker", 1.0),
            ("kubernetes", 1.0), ("terraform", 0.9), ("jenkins", 0.9),
            ("devops", 1.0), ("ci/cd", 0.9), ("serverless", 0.9),
        ],
    ),
    (
        SkillCategory::MlAi,
        &[
            ("machine learning", 1.0), ("deep learning", 1.0), ("nlp", 1.0),
            ("computer vision", 1.0), ("tensorflow", 1.0), ("pytorch", 1.0),
            ("scikit-learn", 0.9), ("neural networks", 1.0), ("ai", 0.9),
            ("data science", 1.0), ("statistical analysis", 0.9),
        ],
    ),
    (
        SkillCategory::ToolsPractices,
        &[
            ("git", 0.8), ("jira", 0.7), ("agile", 0.9), ("scrum", 0.8),
            ("tdd", 0.9), ("unit testing", 0.9), ("debugging", 0.8),
            ("problem solving", 0.9), ("code review", 0.8),
            ("system design", 1.0), ("architecture", 1.0),
        ],
    ),
];

static BUILTIN: LazyLock<SkillTaxonomy> = LazyLock::new(|| {
    SkillTaxonomy::from_entries(builtin_entries()).expect("built-in skill taxonomy must be valid")
});

fn builtin_entries() -> Vec<SkillEntry> {
    TECH_SKILLS
        .iter()
        .flat_map(|(category, skills)| {
            skills.iter().map(move |(phrase, weight)| SkillEntry {
                phrase: phrase.to_string(),
                weight: *weight,
                category: *category,
            })
        })
        .collect()
}

/// Flattened phrase → entry lookup table
#[derive(Debug, Clone)]
pub struct SkillTaxonomy {
    entries: HashMap<String, SkillEntry>,
}

impl SkillTaxonomy {
    /// The built-in taxonomy, flattened and validated once per process
    pub fn builtin() -> &'static SkillTaxonomy {
        &BUILTIN
    }

    /// Built-in taxonomy extended with additional skills
    pub fn with_custom_skills(additional: Vec<SkillEntry>) -> Result<Self> {
        let mut entries = builtin_entries();
        entries.extend(additional);
        Self::from_entries(entries)
    }

    /// Build a taxonomy, rejecting duplicate phrases and out-of-range weights
    pub fn from_entries(entries: Vec<SkillEntry>) -> Result<Self> {
        let mut table: HashMap<String, SkillEntry> = HashMap::with_capacity(entries.len());

        for mut entry in entries {
            entry.phrase = entry.phrase.trim().to_lowercase();

            if entry.phrase.is_empty() {
                return Err(JobMatcherError::Taxonomy("Skill phrase must not be empty".to_string()));
            }

            if !(entry.weight > 0.0 && entry.weight <= 1.0) {
                return Err(JobMatcherError::Taxonomy(format!(
                    "Weight for '{}' must be in (0, 1], got {}",
                    entry.phrase, entry.weight
                )));
            }

            if let Some(existing) = table.get(&entry.phrase) {
                return Err(JobMatcherError::Taxonomy(format!(
                    "Duplicate skill phrase '{}' in {} and {}",
                    entry.phrase, existing.category, entry.category
                )));
            }

            table.insert(entry.phrase.clone(), entry);
        }

        Ok(Self { entries: table })
    }

    /// Case-insensitive exact lookup of a phrase's weight
    pub fn weight(&self, phrase: &str) -> Option<f64> {
        self.get(phrase).map(|entry| entry.weight)
    }

    pub fn get(&self, phrase: &str) -> Option<&SkillEntry> {
        self.entries.get(&phrase.trim().to_lowercase())
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.get(phrase).is_some()
    }

    /// Skill count
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries grouped by category, phrases sorted
    pub fn by_category(&self) -> BTreeMap<SkillCategory, Vec<&SkillEntry>> {
        let mut grouped: BTreeMap<SkillCategory, Vec<&SkillEntry>> = BTreeMap::new();
        for entry in self.entries.values() {
            grouped.entry(entry.category).or_default().push(entry);
        }
        for entries in grouped.values_mut() {
            entries.sort_by(|a, b| a.phrase.cmp(&b.phrase));
        }
        grouped
    }
}

impl Default for SkillTaxonomy {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(phrase: &str, weight: f64) -> SkillEntry {
        SkillEntry {
            phrase: phrase.to_string(),
            weight,
            category: SkillCategory::ToolsPractices,
        }
    }

    #[test]
    fn test_builtin_taxonomy() {
        let taxonomy = SkillTaxonomy::builtin();
        let expected: usize = TECH_SKILLS.iter().map(|(_, skills)| skills.len()).sum();

        assert_eq!(taxonomy.len(), expected);
        assert_eq!(taxonomy.weight("python"), Some(1.0));
        assert_eq!(taxonomy.weight("sass"), Some(0.7));
        assert_eq!(taxonomy.weight("machine learning"), Some(1.0));
    }

    #[test]
    fn test_lookup_is_case_insensitive_and_trimmed() {
        let taxonomy = SkillTaxonomy::builtin();
        assert_eq!(taxonomy.weight("  Node.JS "), Some(1.0));
        assert_eq!(taxonomy.get("CI/CD").map(|e| e.category), Some(SkillCategory::Cloud));
        assert!(!taxonomy.contains("machine"));
    }

    #[test]
    fn test_custom_skills() {
        let taxonomy = SkillTaxonomy::with_custom_skills(vec![entry("Airflow", 0.8)]).unwrap();
        assert_eq!(taxonomy.len(), SkillTaxonomy::builtin().len() + 1);
        assert_eq!(taxonomy.weight("airflow"), Some(0.8));
    }

    #[test]
    fn test_duplicate_rejected() {
        let result = SkillTaxonomy::with_custom_skills(vec![entry("Python", 0.5)]);
        assert!(matches!(result, Err(JobMatcherError::Taxonomy(_))));
    }

    #[test]
    fn test_weight_range_rejected() {
        assert!(SkillTaxonomy::from_entries(vec![entry("zig", 0.0)]).is_err());
        assert!(SkillTaxonomy::from_entries(vec![entry("zig", 1.5)]).is_err());
        assert!(SkillTaxonomy::from_entries(vec![entry("zig", f64::NAN)]).is_err());
        assert!(SkillTaxonomy::from_entries(vec![entry("   ", 0.5)]).is_err());
    }

    #[test]
    fn test_by_category() {
        let grouped = SkillTaxonomy::builtin().by_category();
        assert_eq!(grouped.len(), 7);
        let cloud = &grouped[&SkillCategory::Cloud];
        assert!(cloud.windows(2).all(|w| w[0].phrase <= w[1].phrase));
    }
}
