//! Input manager for resume documents

use crate::error::{JobMatcherError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::info;
use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_MAX_RESUME_BYTES: u64 = 5 * 1024 * 1024;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
    max_bytes: u64,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
            max_bytes: DEFAULT_MAX_RESUME_BYTES,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Extract lowercased, trimmed text from a PDF, TXT or Markdown file
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.is_file() {
            return Err(JobMatcherError::InvalidInput(format!(
                "Resume file not found: {}",
                path.display()
            )));
        }

        let file_type = FileType::from_path(path);
        if !file_type.is_document() {
            return Err(JobMatcherError::UnsupportedFormat(format!(
                "Unsupported file type for: {}",
                path.display()
            )));
        }

        let size = tokio::fs::metadata(path).await?.len();
        if size > self.max_bytes {
            return Err(JobMatcherError::InvalidInput(format!(
                "{} is {} bytes, limit is {}",
                path.display(),
                size,
                self.max_bytes
            )));
        }

        let raw = match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            _ => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
        };

        let text = raw.trim().to_lowercase();
        if text.is_empty() {
            return Err(JobMatcherError::ExtractionEmpty("resume".to_string()));
        }

        info!("Extracted {} characters from {}", text.len(), path.display());

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[tokio::test]
    async fn test_lowercases_and_trims() {
        let mut file = Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "\n  Senior Rust Engineer  \n").unwrap();

        let text = InputManager::new().extract_text(file.path()).await.unwrap();
        assert_eq!(text, "senior rust engineer");
    }

    #[tokio::test]
    async fn test_blank_file_is_extraction_empty() {
        let mut file = Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "   ").unwrap();

        let err = InputManager::new().extract_text(file.path()).await.unwrap_err();
        assert!(matches!(err, JobMatcherError::ExtractionEmpty(_)));
        assert_eq!(err.to_string(), "Could not extract text from resume");
    }

    #[tokio::test]
    async fn test_size_limit() {
        let mut file = Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(&[b'a'; 64]).unwrap();

        let mut manager = InputManager::new().with_max_bytes(16);
        let err = manager.extract_text(file.path()).await.unwrap_err();
        assert!(matches!(err, JobMatcherError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_job_corpus_is_not_a_resume() {
        let file = Builder::new().suffix(".csv").tempfile().unwrap();
        let err = InputManager::new().extract_text(file.path()).await.unwrap_err();
        assert!(matches!(err, JobMatcherError::UnsupportedFormat(_)));
    }
}
