//! Configuration management for the job matcher

use crate::error::{JobMatcherError, Result};
use crate::processing::similarity::DEFAULT_MAX_FEATURES;
use crate::processing::taxonomy::SkillEntry;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub processing: ProcessingConfig,
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Composite score weights.
///
/// The defaults reproduce the legacy ranking exactly; they are tuning knobs
/// rather than derived values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub skill_weight: f64,
    pub similarity_weight: f64,
    pub experience_weight: f64,
    pub same_tier_multiplier: f64,
    pub adjacent_tier_multiplier: f64,
    pub distant_tier_multiplier: f64,
    pub max_features: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    pub top_n: usize,
    pub parallel: bool,
    pub max_resume_bytes: u64,
    pub default_jobs_file: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonomyConfig {
    pub extra_skills: Vec<SkillEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Console,
    Json,
    Markdown,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            skill_weight: 0.6,
            similarity_weight: 0.3,
            experience_weight: 0.1,
            same_tier_multiplier: 1.2,
            adjacent_tier_multiplier: 0.8,
            distant_tier_multiplier: 1.0,
            max_features: DEFAULT_MAX_FEATURES,
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            top_n: 5,
            parallel: true,
            max_resume_bytes: 5 * 1024 * 1024,
            default_jobs_file: "linkdindata.csv".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            color_output: true,
            pretty_json: true,
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load from an explicit path; the file must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            JobMatcherError::Configuration(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| JobMatcherError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| JobMatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("job-matcher")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let scoring = &self.scoring;
        let weights = [
            ("skill_weight", scoring.skill_weight),
            ("similarity_weight", scoring.similarity_weight),
            ("experience_weight", scoring.experience_weight),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(JobMatcherError::Configuration(format!(
                    "scoring.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        let multipliers = [
            ("same_tier_multiplier", scoring.same_tier_multiplier),
            ("adjacent_tier_multiplier", scoring.adjacent_tier_multiplier),
            ("distant_tier_multiplier", scoring.distant_tier_multiplier),
        ];
        for (name, value) in multipliers {
            if !value.is_finite() || value <= 0.0 {
                return Err(JobMatcherError::Configuration(format!(
                    "scoring.{} must be positive, got {}",
                    name, value
                )));
            }
        }

        if scoring.max_features == 0 {
            return Err(JobMatcherError::Configuration(
                "scoring.max_features must be at least 1".to_string(),
            ));
        }

        if self.processing.top_n == 0 {
            return Err(JobMatcherError::Configuration(
                "processing.top_n must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
