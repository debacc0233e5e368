//! Ranks a job corpus against one resume

use crate::config::Config;
use crate::error::{JobMatcherError, Result};
use crate::input::job_loader::JobRecord;
use crate::processing::experience::{classify_experience, ExperienceTier};
use crate::processing::match_scorer::MatchScorer;
use crate::processing::nlp::{NlpPipeline, RuleBasedPipeline};
use crate::processing::skill_extractor::{SkillExtractor, SkillProfile};
use crate::processing::taxonomy::SkillTaxonomy;
use crate::processing::text_processor::normalize;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;

pub const DEFAULT_TOP_N: usize = 5;

/// One scored job, borrowing the record it was built from
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'a> {
    pub job: &'a JobRecord,
    pub composite_score: f64,
    pub skill_score: f64,
    pub similarity: f64,
    pub matching_skills: BTreeSet<String>,
    pub experience_tier: ExperienceTier,
}

#[derive(Clone)]
pub struct RankingEngine {
    extractor: SkillExtractor,
    scorer: MatchScorer,
    parallel: bool,
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::new(
            SkillExtractor::new(SkillTaxonomy::default(), Arc::new(RuleBasedPipeline::new())),
            MatchScorer::default(),
        )
    }
}

impl RankingEngine {
    pub fn new(extractor: SkillExtractor, scorer: MatchScorer) -> Self {
        Self {
            extractor,
            scorer,
            parallel: true,
        }
    }

    /// Engine with the configured weights, taxonomy extensions and parallelism
    pub fn from_config(config: &Config) -> Result<Self> {
        let taxonomy = if config.taxonomy.extra_skills.is_empty() {
            SkillTaxonomy::default()
        } else {
            SkillTaxonomy::with_custom_skills(config.taxonomy.extra_skills.clone())?
        };

        let extractor = SkillExtractor::new(taxonomy, Arc::new(RuleBasedPipeline::new()));
        let scorer = MatchScorer::new(config.scoring.clone());

        Ok(Self::new(extractor, scorer).with_parallel(config.processing.parallel))
    }

    /// Replace the NLP pipeline, keeping the taxonomy
    pub fn with_pipeline(mut self, pipeline: Arc<dyn NlpPipeline>) -> Self {
        self.extractor = SkillExtractor::new(self.extractor.taxonomy().clone(), pipeline);
        self
    }

    pub fn with_scorer(mut self, scorer: MatchScorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn extractor(&self) -> &SkillExtractor {
        &self.extractor
    }

    pub fn extract_profile(&self, text: &str) -> Result<SkillProfile> {
        self.extractor.extract(text)
    }

    /// Extract the resume profile, then rank `jobs` against it
    pub fn recommend<'a>(
        &self,
        resume_text: &str,
        jobs: &'a [JobRecord],
        n: usize,
    ) -> Result<Vec<MatchResult<'a>>> {
        let resume_profile = self.extract_profile(resume_text)?;
        self.rank(resume_text, &resume_profile, jobs, n)
    }

    /// Top `n` jobs by composite score, highest first.
    ///
    /// Jobs that fail to process are logged and skipped. A job without
    /// recognised skills, including one with a blank description, is kept
    /// with a zero score. Equal scores keep their input order.
    pub fn rank<'a>(
        &self,
        resume_text: &str,
        resume_profile: &SkillProfile,
        jobs: &'a [JobRecord],
        n: usize,
    ) -> Result<Vec<MatchResult<'a>>> {
        if n == 0 {
            return Err(JobMatcherError::InvalidInput(
                "number of recommendations must be at least 1".to_string(),
            ));
        }

        if resume_profile.is_empty() {
            return Err(JobMatcherError::NoSkillsInResume);
        }

        info!(
            "Ranking {} jobs against {} resume skills",
            jobs.len(),
            resume_profile.len()
        );

        let outcomes: Vec<Result<MatchResult<'a>>> = if self.parallel {
            jobs.par_iter()
                .map(|job| self.score_job(resume_text, resume_profile, job))
                .collect()
        } else {
            jobs.iter()
                .map(|job| self.score_job(resume_text, resume_profile, job))
                .collect()
        };

        let mut results: Vec<MatchResult<'a>> = outcomes
            .into_iter()
            .zip(jobs)
            .filter_map(|(outcome, job)| match outcome {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!("Skipping job '{}': {}", job.title, e);
                    None
                }
            })
            .collect();

        if results.is_empty() {
            return Err(JobMatcherError::NoMatchingJobs);
        }

        results.sort_by(|a, b| b.composite_score.total_cmp(&a.composite_score));
        results.truncate(n);

        info!("Returning {} recommendations", results.len());
        Ok(results)
    }

    fn score_job<'a>(
        &self,
        resume_text: &str,
        resume_profile: &SkillProfile,
        job: &'a JobRecord,
    ) -> Result<MatchResult<'a>> {
        let job_text = normalize(&job.description);
        let job_profile = self.extractor.extract(&job_text)?;
        let score = self
            .scorer
            .score(resume_profile, &job_profile, resume_text, &job_text);

        if !score.composite.is_finite() {
            return Err(JobMatcherError::JobProcessing(format!(
                "non-finite score {}",
                score.composite
            )));
        }

        debug!("Job '{}' scored {:.2}", job.title, score.composite);

        Ok(MatchResult {
            job,
            composite_score: score.composite,
            skill_score: score.skill_score,
            similarity: score.similarity,
            matching_skills: score.matching,
            experience_tier: classify_experience(&job_text),
        })
    }
}

/// Narrow a ranking to the results a user asked for.
///
/// `query` matches case-insensitively as a substring of the title, company
/// or location. Every entry of `skills` must be a case-insensitive substring
/// of at least one matching skill. A blank query and an empty skill list
/// both let everything through. Order is preserved.
pub fn filter_results<'a>(
    results: Vec<MatchResult<'a>>,
    query: Option<&str>,
    skills: &[String],
) -> Vec<MatchResult<'a>> {
    let query = query
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());
    let skills: Vec<String> = skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    results
        .into_iter()
        .filter(|result| {
            let job = result.job;
            let matches_query = query.as_deref().map_or(true, |q| {
                [&job.title, &job.company, &job.location]
                    .iter()
                    .any(|field| field.to_lowercase().contains(q))
            });

            let matches_skills = skills.iter().all(|wanted| {
                result
                    .matching_skills
                    .iter()
                    .any(|skill| skill.to_lowercase().contains(wanted.as_str()))
            });

            matches_query && matches_skills
        })
        .collect()
}
