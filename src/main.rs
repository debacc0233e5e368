//! Job matcher: rank job postings against a resume

use clap::Parser;
use job_matcher::cli::{self, Cli, Commands, ConfigAction};
use job_matcher::config::{Config, OutputFormat};
use job_matcher::error::{JobMatcherError, Result};
use job_matcher::input::{InputManager, JobLoader};
use job_matcher::output::{
    save_report_to_file, suggest_filename, RecommendationReport, ReportGenerator, ReportMetadata, SkillReport,
};
use job_matcher::processing::experience::classify_experience;
use job_matcher::processing::ranking::filter_results;
use job_matcher::RankingEngine;
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process;

const RESUME_EXTENSIONS: &[&str] = &["pdf", "txt", "md", "markdown"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            // No config means no configured format; fall back to the requested one
            let format = cli.command.requested_format().unwrap_or_default();
            print_error(&ReportGenerator::new(), &e, format);
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn print_error(generator: &ReportGenerator, error: &JobMatcherError, format: OutputFormat) {
    match generator.generate_error(error, format) {
        Ok(rendered) => println!("{}", rendered),
        Err(e) => error!("Failed to format error: {}", e),
    }
}

fn resolve_format(requested: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match requested {
        Some(format) => cli::parse_output_format(format).map_err(JobMatcherError::InvalidInput),
        None => Ok(config.output.format),
    }
}

async fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> Result<()> {
    let generator = ReportGenerator::with_options(config.output.color_output, config.output.pretty_json, true);

    match command {
        Commands::Recommend {
            resume,
            jobs,
            top,
            output,
            save,
            sequential,
            search,
            skills,
        } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let top = top.unwrap_or(config.processing.top_n);

            let filter = ResultFilter { search, skills };
            let report = match recommend(&config, &resume, jobs, top, sequential, &filter).await {
                Ok(report) => report,
                Err(e) => {
                    print_error(&generator, &e, format);
                    return Err(e);
                }
            };

            let rendered = generator.generate_report(&report, format)?;
            println!("{}", rendered);

            if let Some(save_path) = save {
                let target = if save_path.is_dir() {
                    save_path.join(suggest_filename(format, &resume.to_string_lossy(), true))
                } else {
                    save_path
                };
                save_report_to_file(&rendered, &target)?;
                info!("Report saved to {}", target.display());
            }
        }

        Commands::Skills { file, output } => {
            let format = resolve_format(output.as_deref(), &config)?;

            match skill_report(&config, &file).await {
                Ok(report) => println!("{}", generator.generate_skills(&report, format)?),
                Err(e) => {
                    print_error(&generator, &e, format);
                    return Err(e);
                }
            }
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);

            match action {
                Some(ConfigAction::Show) | None => {
                    let content = toml::to_string_pretty(&config)
                        .map_err(|e| JobMatcherError::Configuration(e.to_string()))?;
                    println!("# {}\n{}", path.display(), content);
                }

                Some(ConfigAction::Reset) => {
                    Config::default().save_to(&path)?;
                    println!("Configuration reset: {}", path.display());
                }

                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}

struct ResultFilter {
    search: Option<String>,
    skills: Vec<String>,
}

async fn skill_report(config: &Config, file: &Path) -> Result<SkillReport> {
    cli::validate_file_extension(file, RESUME_EXTENSIONS).map_err(JobMatcherError::InvalidInput)?;

    let mut input_manager = InputManager::new().with_max_bytes(config.processing.max_resume_bytes);
    let text = input_manager.extract_text(file).await?;

    let engine = RankingEngine::from_config(config)?;
    let profile = engine.extract_profile(&text)?;

    Ok(SkillReport::new(
        file.display().to_string(),
        &profile,
        engine.extractor().taxonomy(),
        classify_experience(&text),
    ))
}

async fn recommend(
    config: &Config,
    resume: &Path,
    jobs: Option<PathBuf>,
    top: usize,
    sequential: bool,
    filter: &ResultFilter,
) -> Result<RecommendationReport> {
    if top == 0 {
        return Err(JobMatcherError::InvalidInput("--top must be at least 1".to_string()));
    }

    cli::validate_file_extension(resume, RESUME_EXTENSIONS)
        .map_err(|e| JobMatcherError::InvalidInput(format!("Resume file: {}", e)))?;

    let mut input_manager = InputManager::new().with_max_bytes(config.processing.max_resume_bytes);
    let resume_text = input_manager.extract_text(resume).await?;

    let jobs_path = jobs.unwrap_or_else(|| JobLoader::default_path(resume, &config.processing.default_jobs_file));
    let jobs = JobLoader::load(&jobs_path)?;

    let engine = RankingEngine::from_config(config)?.with_parallel(config.processing.parallel && !sequential);
    let results = engine.recommend(&resume_text, &jobs, top)?;
    let results = filter_results(results, filter.search.as_deref(), &filter.skills);
    if results.is_empty() {
        info!("No recommendations left after filtering");
    }

    let metadata = ReportMetadata::new(
        resume.display().to_string(),
        jobs_path.display().to_string(),
        jobs.len(),
        classify_experience(&resume_text),
    );

    Ok(RecommendationReport::new(metadata, &results))
}
