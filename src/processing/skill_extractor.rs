//! Weighted skill extraction against the skill taxonomy

use crate::error::Result;
use crate::processing::nlp::NlpPipeline;
use crate::processing::taxonomy::SkillTaxonomy;
use crate::processing::text_processor::normalize;
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

/// Skills detected in one document, keyed by canonical phrase.
///
/// Built once per document and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SkillProfile {
    skills: BTreeMap<String, f64>,
}

impl SkillProfile {
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn weight(&self, skill: &str) -> Option<f64> {
        self.skills.get(skill).copied()
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.skills.contains_key(skill)
    }

    /// Sum of all skill weights in the profile
    pub fn total_weight(&self) -> f64 {
        self.skills.values().sum()
    }

    /// Phrases in sorted order
    pub fn skills(&self) -> impl Iterator<Item = &str> {
        self.skills.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.skills.iter().map(|(skill, weight)| (skill.as_str(), *weight))
    }

    /// Skills present in both profiles
    pub fn matching(&self, other: &SkillProfile) -> BTreeSet<String> {
        self.skills
            .keys()
            .filter(|skill| other.contains(skill))
            .cloned()
            .collect()
    }
}

impl FromIterator<(String, f64)> for SkillProfile {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            skills: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[(&str, f64); N]> for SkillProfile {
    fn from(pairs: [(&str, f64); N]) -> Self {
        pairs
            .into_iter()
            .map(|(skill, weight)| (skill.to_string(), weight))
            .collect()
    }
}

/// Extract the weighted taxonomy skills present in `text`.
///
/// Candidates are the pipeline's noun phrases and content tokens plus every
/// word bigram and trigram of the normalized text. Only exact taxonomy
/// phrases are credited.
pub fn extract_skills(
    text: &str,
    pipeline: &dyn NlpPipeline,
    taxonomy: &SkillTaxonomy,
) -> Result<SkillProfile> {
    let normalized = normalize(text);
    let mut candidates: HashSet<String> = HashSet::new();

    for phrase in pipeline.noun_phrases(&normalized)? {
        candidates.insert(phrase);
    }

    for token in pipeline.tokenize(&normalized)? {
        if token.is_content() {
            candidates.insert(token.text);
        }
    }

    let words: Vec<&str> = normalized.split_whitespace().collect();
    for n in [2, 3] {
        for window in words.windows(n) {
            candidates.insert(window.join(" "));
        }
    }

    let profile: SkillProfile = candidates
        .iter()
        .filter_map(|candidate| taxonomy.get(candidate))
        .map(|entry| (entry.phrase.clone(), entry.weight))
        .collect();

    debug!(
        "Extracted {} skills: {:?}",
        profile.len(),
        profile.skills().collect::<Vec<_>>()
    );

    Ok(profile)
}

/// Skill extractor bound to a taxonomy and an NLP pipeline
#[derive(Clone)]
pub struct SkillExtractor {
    taxonomy: SkillTaxonomy,
    pipeline: Arc<dyn NlpPipeline>,
}

impl SkillExtractor {
    pub fn new(taxonomy: SkillTaxonomy, pipeline: Arc<dyn NlpPipeline>) -> Self {
        Self { taxonomy, pipeline }
    }

    pub fn extract(&self, text: &str) -> Result<SkillProfile> {
        extract_skills(text, self.pipeline.as_ref(), &self.taxonomy)
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        &self.taxonomy
    }

    pub fn pipeline(&self) -> &dyn NlpPipeline {
        self.pipeline.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JobMatcherError;
    use crate::processing::nlp::{RuleBasedPipeline, Token};

    /// Pipeline that only ever yields the whole text as one phrase
    struct PhraseOnlyPipeline;

    impl NlpPipeline for PhraseOnlyPipeline {
        fn tokenize(&self, _text: &str) -> anyhow::Result<Vec<Token>> {
            Ok(Vec::new())
        }

        fn noun_phrases(&self, text: &str) -> anyhow::Result<Vec<String>> {
            Ok(vec![text.to_string()])
        }
    }

    struct BrokenPipeline;

    impl NlpPipeline for BrokenPipeline {
        fn tokenize(&self, _text: &str) -> anyhow::Result<Vec<Token>> {
            anyhow::bail!("tokenizer unavailable")
        }

        fn noun_phrases(&self, _text: &str) -> anyhow::Result<Vec<String>> {
            anyhow::bail!("chunker unavailable")
        }
    }

    fn extract(text: &str) -> SkillProfile {
        extract_skills(text, &RuleBasedPipeline::new(), SkillTaxonomy::builtin()).unwrap()
    }

    #[test]
    fn test_single_word_skills() {
        let profile = extract("Experienced in Python, Docker and AWS.");

        assert_eq!(profile.weight("python"), Some(1.0));
        assert_eq!(profile.weight("docker"), Some(1.0));
        assert_eq!(profile.weight("aws"), Some(1.0));
        assert_eq!(profile.len(), 3);
    }

    #[test]
    fn test_multi_word_skills_from_ngrams() {
        let profile = extract("Built machine learning models and REST API services with unit testing");

        assert!(profile.contains("machine learning"));
        assert!(profile.contains("rest api"));
        assert!(profile.contains("unit testing"));
        assert!(!profile.contains("machine"));
    }

    #[test]
    fn test_joined_skills() {
        let profile = extract("Node.js, C++ and C# with CI / CD and scikit-learn");

        assert!(profile.contains("node.js"));
        assert!(profile.contains("c++"));
        assert!(profile.contains("c#"));
        assert!(profile.contains("ci/cd"));
        assert!(profile.contains("scikit-learn"));
    }

    #[test]
    fn test_substring_not_credited() {
        let profile = extract("javascripting gopher reactive");
        assert!(profile.is_empty());
    }

    #[test]
    fn test_empty_text() {
        assert!(extract("").is_empty());
        assert!(extract("the and of").is_empty());
    }

    #[test]
    fn test_noun_phrase_candidates() {
        let profile = extract_skills("Data Science", &PhraseOnlyPipeline, SkillTaxonomy::builtin()).unwrap();
        assert_eq!(profile.weight("data science"), Some(1.0));
    }

    #[test]
    fn test_pipeline_failure_propagates() {
        let result = extract_skills("python", &BrokenPipeline, SkillTaxonomy::builtin());
        assert!(matches!(result, Err(JobMatcherError::Nlp(_))));
    }

    #[test]
    fn test_profile_helpers() {
        let resume = SkillProfile::from([("python", 1.0), ("aws", 1.0), ("sass", 0.7)]);
        let job = SkillProfile::from([("python", 1.0), ("sass", 0.7), ("react", 1.0)]);

        assert!((resume.total_weight() - 2.7).abs() < 1e-9);
        let matching: Vec<String> = resume.matching(&job).into_iter().collect();
        assert_eq!(matching, vec!["python".to_string(), "sass".to_string()]);
        assert_eq!(resume.skills().collect::<Vec<_>>(), vec!["aws", "python", "sass"]);
    }

    #[test]
    fn test_extractor_with_custom_taxonomy() {
        use crate::processing::taxonomy::{SkillCategory, SkillEntry};

        let taxonomy = SkillTaxonomy::with_custom_skills(vec![SkillEntry {
            phrase: "apache airflow".to_string(),
            weight: 0.8,
            category: SkillCategory::Data,
        }])
        .unwrap();
        let extractor = SkillExtractor::new(taxonomy, Arc::new(RuleBasedPipeline::new()));

        let profile = extractor.extract("Orchestrated pipelines in Apache Airflow and SQL").unwrap();
        assert_eq!(profile.weight("apache airflow"), Some(0.8));
        assert!(profile.contains("sql"));
    }
}
