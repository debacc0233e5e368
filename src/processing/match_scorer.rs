//! Composite resume/job match scoring

use crate::config::ScoringConfig;
use crate::processing::experience::{classify_experience, ExperienceTier};
use crate::processing::similarity::{TextSimilarity, TfIdfSimilarity};
use crate::processing::skill_extractor::SkillProfile;
use log::{debug, warn};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Upper bound of the composite score under the default weights:
/// `100 * 0.6 + 100 * 0.3 + 100 * 0.1 * 1.2`. Scores are not clamped to 100.
pub const MAX_COMPOSITE_SCORE: f64 = 132.0;

/// Score breakdown for one resume/job pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchScore {
    pub composite: f64,
    pub skill_score: f64,
    pub similarity: f64,
    pub experience_multiplier: f64,
    pub matching: BTreeSet<String>,
}

impl MatchScore {
    pub fn zero() -> Self {
        Self {
            composite: 0.0,
            skill_score: 0.0,
            similarity: 0.0,
            experience_multiplier: 1.0,
            matching: BTreeSet::new(),
        }
    }
}

/// Weighted skill overlap on a 0-100 scale.
///
/// `2 * shared / (resume_total + job_total) * 100`, where a shared skill
/// counts the mean of its two weights so the score is symmetric.
pub fn skill_score(resume: &SkillProfile, job: &SkillProfile) -> f64 {
    let resume_total = resume.total_weight();
    let job_total = job.total_weight();

    if resume_total <= 0.0 || job_total <= 0.0 {
        return 0.0;
    }

    let shared: f64 = resume
        .iter()
        .filter_map(|(skill, weight)| job.weight(skill).map(|other| (weight + other) / 2.0))
        .sum();

    2.0 * shared / (resume_total + job_total) * 100.0
}

/// Combines skill overlap, text similarity and experience alignment
#[derive(Clone)]
pub struct MatchScorer {
    weights: ScoringConfig,
    similarity: Arc<dyn TextSimilarity>,
}

impl Default for MatchScorer {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl MatchScorer {
    pub fn new(weights: ScoringConfig) -> Self {
        let similarity = Arc::new(TfIdfSimilarity::new(weights.max_features));
        Self { weights, similarity }
    }

    /// Swap the similarity backend
    pub fn with_similarity(mut self, similarity: Arc<dyn TextSimilarity>) -> Self {
        self.similarity = similarity;
        self
    }

    pub fn weights(&self) -> &ScoringConfig {
        &self.weights
    }

    /// Multiplier applied to the experience component of the composite
    pub fn experience_multiplier(&self, resume: ExperienceTier, job: ExperienceTier) -> f64 {
        match resume.distance(job) {
            0 => self.weights.same_tier_multiplier,
            1 => self.weights.adjacent_tier_multiplier,
            _ => self.weights.distant_tier_multiplier,
        }
    }

    /// Score one resume/job pair.
    ///
    /// Empty profiles on either side score zero. A similarity failure is
    /// logged and counts as 0 so one bad pair never aborts a ranking.
    pub fn score(
        &self,
        resume_profile: &SkillProfile,
        job_profile: &SkillProfile,
        resume_text: &str,
        job_text: &str,
    ) -> MatchScore {
        if resume_profile.is_empty() || job_profile.is_empty() {
            debug!("No skills found in either resume or job");
            return MatchScore::zero();
        }

        let matching = resume_profile.matching(job_profile);
        let skill_score = skill_score(resume_profile, job_profile);

        let similarity = self
            .similarity
            .similarity(resume_text, job_text)
            .unwrap_or_else(|e| {
                warn!("Falling back to zero similarity: {}", e);
                0.0
            });

        let resume_tier = classify_experience(resume_text);
        let job_tier = classify_experience(job_text);
        let experience_multiplier = self.experience_multiplier(resume_tier, job_tier);

        let composite = skill_score * self.weights.skill_weight
            + similarity * self.weights.similarity_weight
            + skill_score * self.weights.experience_weight * experience_multiplier;

        debug!(
            "Scores - Final: {:.2}, Skills: {:.2}, Similarity: {:.2}, Exp Multiplier: {:.1} ({} vs {}), Matching: {}",
            composite,
            skill_score,
            similarity,
            experience_multiplier,
            resume_tier,
            job_tier,
            matching.len()
        );

        MatchScore {
            composite,
            skill_score,
            similarity,
            experience_multiplier,
            matching,
        }
    }
}
