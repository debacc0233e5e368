//! Serializable report structures for recommendations, skills and errors

use crate::error::JobMatcherError;
use crate::processing::experience::ExperienceTier;
use crate::processing::ranking::MatchResult;
use crate::processing::skill_extractor::SkillProfile;
use crate::processing::taxonomy::{SkillCategory, SkillTaxonomy};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recommended job, as emitted to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub apply_link: String,
    /// Composite score, two decimals
    pub match_score: f64,
    /// Skill overlap score, two decimals
    pub skill_score: f64,
    /// Sorted skill phrases shared with the resume
    pub matching_skills: Vec<String>,
    pub experience_level: ExperienceTier,
}

impl Recommendation {
    pub fn from_match(result: &MatchResult<'_>) -> Self {
        let job = result.job;
        Self {
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            description: job.description.clone(),
            apply_link: job.apply_link.clone(),
            match_score: round2(result.composite_score),
            skill_score: round2(result.skill_score),
            matching_skills: result.matching_skills.iter().cloned().collect(),
            experience_level: result.experience_tier,
        }
    }
}

/// Run metadata shown alongside recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub version: String,
    pub resume_file: String,
    pub jobs_file: String,
    pub jobs_considered: usize,
    pub resume_experience: ExperienceTier,
}

impl ReportMetadata {
    pub fn new(
        resume_file: impl Into<String>,
        jobs_file: impl Into<String>,
        jobs_considered: usize,
        resume_experience: ExperienceTier,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            resume_file: resume_file.into(),
            jobs_file: jobs_file.into(),
            jobs_considered,
            resume_experience,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub metadata: ReportMetadata,
    pub recommendations: Vec<Recommendation>,
}

impl RecommendationReport {
    pub fn new(metadata: ReportMetadata, results: &[MatchResult<'_>]) -> Self {
        Self {
            metadata,
            recommendations: results.iter().map(Recommendation::from_match).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillLine {
    pub skill: String,
    pub weight: f64,
    pub category: Option<SkillCategory>,
}

/// Skills detected in a single document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillReport {
    pub source: String,
    pub experience_level: ExperienceTier,
    pub total_weight: f64,
    pub skills: Vec<SkillLine>,
}

impl SkillReport {
    pub fn new(
        source: impl Into<String>,
        profile: &SkillProfile,
        taxonomy: &SkillTaxonomy,
        experience_level: ExperienceTier,
    ) -> Self {
        let skills = profile
            .iter()
            .map(|(skill, weight)| SkillLine {
                skill: skill.to_string(),
                weight,
                category: taxonomy.get(skill).map(|entry| entry.category),
            })
            .collect();

        Self {
            source: source.into(),
            experience_level,
            total_weight: round2(profile.total_weight()),
            skills,
        }
    }
}

/// `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub error: String,
}

impl ErrorReport {
    pub fn from_error(error: &JobMatcherError) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
