//! Error handling for the job matcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobMatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Input unavailable: {0}")]
    InputUnavailable(String),

    #[error("Could not extract text from {0}")]
    ExtractionEmpty(String),

    #[error("No relevant skills found in resume")]
    NoSkillsInResume,

    #[error("No matching jobs found")]
    NoMatchingJobs,

    #[error("Job processing error: {0}")]
    JobProcessing(String),

    #[error("NLP pipeline error: {0}")]
    Nlp(String),

    #[error("Similarity computation error: {0}")]
    Similarity(String),

    #[error("Skill taxonomy error: {0}")]
    Taxonomy(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

impl JobMatcherError {
    /// Whether this error invalidates the whole run rather than a single job.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            JobMatcherError::JobProcessing(_)
                | JobMatcherError::Nlp(_)
                | JobMatcherError::Similarity(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, JobMatcherError>;

/// NLP pipelines report opaque errors through anyhow
impl From<anyhow::Error> for JobMatcherError {
    fn from(err: anyhow::Error) -> Self {
        JobMatcherError::Nlp(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(JobMatcherError::NoSkillsInResume.is_fatal());
        assert!(JobMatcherError::InputUnavailable("jobs.csv".into()).is_fatal());
        assert!(!JobMatcherError::JobProcessing("blank".into()).is_fatal());
        assert!(!JobMatcherError::Similarity("empty vocabulary".into()).is_fatal());
    }

    #[test]
    fn test_anyhow_conversion() {
        let err: JobMatcherError = anyhow::anyhow!("model not loaded").into();
        assert!(matches!(err, JobMatcherError::Nlp(ref msg) if msg == "model not loaded"));
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            JobMatcherError::ExtractionEmpty("resume".into()).to_string(),
            "Could not extract text from resume"
        );
        assert_eq!(JobMatcherError::NoSkillsInResume.to_string(), "No relevant skills found in resume");
    }
}
