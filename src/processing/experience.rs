//! Experience tier classification

use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Seniority implied by a document, ordered entry < mid < senior
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceTier {
    Entry,
    #[default]
    Mid,
    Senior,
}

impl ExperienceTier {
    fn rank(self) -> u8 {
        match self {
            ExperienceTier::Entry => 0,
            ExperienceTier::Mid => 1,
            ExperienceTier::Senior => 2,
        }
    }

    /// Number of steps between two tiers (0, 1 or 2)
    pub fn distance(self, other: ExperienceTier) -> u8 {
        self.rank().abs_diff(other.rank())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExperienceTier::Entry => "entry",
            ExperienceTier::Mid => "mid",
            ExperienceTier::Senior => "senior",
        }
    }
}

impl fmt::Display for ExperienceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tier keywords in checking order. The first tier with a hit wins.
const EXPERIENCE_LEVELS: &[(ExperienceTier, &[&str])] = &[
    (
        ExperienceTier::Entry,
        &["entry level", "junior", "graduate", "fresh", "trainee", "0-2 years", "1-2 years"],
    ),
    (
        ExperienceTier::Mid,
        &["mid level", "intermediate", "associate", "2-5 years", "3-5 years"],
    ),
    (
        ExperienceTier::Senior,
        &["senior", "lead", "principal", "architect", "5+ years", "7+ years", "8+ years"],
    ),
];

static TIER_MATCHERS: LazyLock<Vec<(ExperienceTier, AhoCorasick)>> = LazyLock::new(|| {
    EXPERIENCE_LEVELS
        .iter()
        .map(|(tier, keywords)| {
            let matcher = AhoCorasick::new(keywords.iter()).expect("Invalid experience keywords");
            (*tier, matcher)
        })
        .collect()
});

/// Classify the experience tier of `text`.
///
/// Keywords are matched as substrings of the lowercased text, so "lead"
/// also fires inside "leadership". Falls back to [`ExperienceTier::Mid`].
pub fn classify_experience(text: &str) -> ExperienceTier {
    let lowered = text.to_lowercase();

    TIER_MATCHERS
        .iter()
        .find(|(_, matcher)| matcher.is_match(&lowered))
        .map(|(tier, _)| *tier)
        .unwrap_or_default()
}
