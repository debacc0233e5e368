//! CLI interface for the job matcher

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "job-matcher")]
#[command(about = "Rank job postings against a resume")]
#[command(long_about = "Recommend the best-fitting job postings for a resume using weighted skill matching, TF-IDF text similarity and experience alignment")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recommend jobs for a resume
    Recommend {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Job corpus (CSV or JSON); defaults to the configured file next to the resume
        #[arg(short, long)]
        jobs: Option<PathBuf>,

        /// Number of recommendations to return
        #[arg(short = 'n', long)]
        top: Option<usize>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Score jobs on a single thread
        #[arg(long)]
        sequential: bool,

        /// Keep only jobs whose title, company or location contains this text
        #[arg(long)]
        search: Option<String>,

        /// Keep only jobs matching this skill (repeatable)
        #[arg(long = "skill")]
        skills: Vec<String>,
    },

    /// Show the skills and experience level detected in a document
    Skills {
        /// Path to a resume or job description (PDF, TXT, MD)
        file: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

impl Commands {
    /// Output format requested on the command line, if it parses
    pub fn requested_format(&self) -> Option<OutputFormat> {
        let output = match self {
            Commands::Recommend { output, .. } | Commands::Skills { output, .. } => output.as_deref()?,
            Commands::Config { .. } => return None,
        };
        parse_output_format(output).ok()
    }
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_recommend() {
        let cli = Cli::parse_from([
            "job-matcher", "recommend", "-r", "cv.pdf", "--top", "3", "-o", "json", "--sequential",
        ]);

        match cli.command {
            Commands::Recommend { resume, jobs, top, output, sequential, .. } => {
                assert_eq!(resume, PathBuf::from("cv.pdf"));
                assert!(jobs.is_none());
                assert_eq!(top, Some(3));
                assert_eq!(output.as_deref(), Some("json"));
                assert!(sequential);
            }
            _ => panic!("expected recommend"),
        }
    }

    #[test]
    fn test_parse_result_filters() {
        let cli = Cli::parse_from([
            "job-matcher", "recommend", "-r", "cv.txt", "--search", "Berlin", "--skill", "rust", "--skill", "sql",
        ]);

        match cli.command {
            Commands::Recommend { search, skills, .. } => {
                assert_eq!(search.as_deref(), Some("Berlin"));
                assert_eq!(skills, vec!["rust".to_string(), "sql".to_string()]);
            }
            _ => panic!("expected recommend"),
        }

        let cli = Cli::parse_from(["job-matcher", "recommend", "-r", "cv.txt"]);
        match cli.command {
            Commands::Recommend { search, skills, .. } => {
                assert!(search.is_none());
                assert!(skills.is_empty());
            }
            _ => panic!("expected recommend"),
        }
    }

    #[test]
    fn test_requested_format() {
        let cli = Cli::parse_from(["job-matcher", "recommend", "-r", "cv.txt", "-o", "json"]);
        assert_eq!(cli.command.requested_format(), Some(OutputFormat::Json));

        let cli = Cli::parse_from(["job-matcher", "skills", "cv.txt", "-o", "md"]);
        assert_eq!(cli.command.requested_format(), Some(OutputFormat::Markdown));

        let cli = Cli::parse_from(["job-matcher", "skills", "cv.txt", "-o", "yaml"]);
        assert_eq!(cli.command.requested_format(), None);

        let cli = Cli::parse_from(["job-matcher", "config", "show"]);
        assert_eq!(cli.command.requested_format(), None);
    }

    #[test]
    fn test_output_formats() {
        assert_eq!(parse_output_format("MD"), Ok(OutputFormat::Markdown));
        assert_eq!(parse_output_format("json"), Ok(OutputFormat::Json));
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_extension_validation() {
        assert!(validate_file_extension(Path::new("cv.PDF"), &["pdf", "txt"]).is_ok());
        assert!(validate_file_extension(Path::new("cv.docx"), &["pdf", "txt"]).is_err());
        assert!(validate_file_extension(Path::new("cv"), &["pdf"]).is_err());
    }
}
