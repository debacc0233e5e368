//! Job corpus loading from CSV or JSON

use crate::error::{JobMatcherError, Result};
use crate::input::file_detector::FileType;
use csv::{ReaderBuilder, Trim};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One job posting. Read-only input to ranking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobRecord {
    #[serde(alias = "j_tittle")]
    pub title: String,
    #[serde(alias = "c_name")]
    pub company: String,
    #[serde(alias = "company_locations")]
    pub location: String,
    #[serde(alias = "job_description")]
    pub description: String,
    #[serde(alias = "Apply_link")]
    pub apply_link: String,
}

impl JobRecord {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }
}

pub struct JobLoader;

impl JobLoader {
    /// Load every well-formed job in `path`; malformed rows are skipped
    pub fn load(path: &Path) -> Result<Vec<JobRecord>> {
        if !path.is_file() {
            return Err(JobMatcherError::InputUnavailable(format!(
                "Job file not found: {}",
                path.display()
            )));
        }

        let file_type = FileType::from_path(path);
        if !file_type.is_job_corpus() {
            return Err(JobMatcherError::UnsupportedFormat(format!(
                "Job file must be .csv or .json: {}",
                path.display()
            )));
        }

        let jobs = if file_type == FileType::Json {
            Self::load_json(path)?
        } else {
            Self::load_csv(path)?
        };

        info!("Loaded {} jobs from {}", jobs.len(), path.display());
        Ok(jobs)
    }

    fn load_csv(path: &Path) -> Result<Vec<JobRecord>> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_path(path)
            .map_err(|e| unavailable(path, e))?;

        let mut jobs = Vec::new();
        for (index, row) in reader.deserialize::<JobRecord>().enumerate() {
            match row {
                Ok(job) => jobs.push(job),
                // Header is line 1
                Err(e) => warn!("Skipping malformed job row {} in {}: {}", index + 2, path.display(), e),
            }
        }
        Ok(jobs)
    }

    fn load_json(path: &Path) -> Result<Vec<JobRecord>> {
        let content = std::fs::read_to_string(path).map_err(|e| unavailable(path, e))?;
        let values: Vec<serde_json::Value> = serde_json::from_str(&content)?;

        let mut jobs = Vec::with_capacity(values.len());
        for (index, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<JobRecord>(value) {
                Ok(job) => jobs.push(job),
                Err(e) => warn!("Skipping malformed job entry {} in {}: {}", index, path.display(), e),
            }
        }
        Ok(jobs)
    }

    /// Jobs file expected beside the resume when none is given
    pub fn default_path(resume: &Path, file_name: &str) -> PathBuf {
        resume
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(file_name)
    }
}

fn unavailable(path: &Path, err: impl std::fmt::Display) -> JobMatcherError {
    JobMatcherError::InputUnavailable(format!("Failed to read {}: {}", path.display(), err))
}
