//! Output formatters for recommendations, skill profiles and errors

use crate::config::OutputFormat;
use crate::error::{JobMatcherError, Result};
use crate::output::report::*;
use crate::processing::experience::ExperienceTier;
use colored::{Color, Colorize};
use std::path::Path;

pub trait OutputFormatter {
    fn format_recommendations(&self, report: &RecommendationReport) -> Result<String>;
    fn format_skills(&self, report: &SkillReport) -> Result<String>;
    fn format_error(&self, error: &ErrorReport) -> Result<String>;
}

/// Terminal output with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON for API clients. Recommendations serialize as a bare array.
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Dispatches to the formatter for an [`OutputFormat`]
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

const DESCRIPTION_PREVIEW_CHARS: usize = 160;

fn preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= DESCRIPTION_PREVIEW_CHARS {
        flat
    } else {
        let cut: String = flat.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
        format!("{}...", cut.trim_end())
    }
}

fn or_unknown(value: &str) -> &str {
    if value.is_empty() {
        "n/a"
    } else {
        value
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: f64) -> String {
        let (badge, color) = match score {
            s if s >= 80.0 => ("STRONG", Color::Green),
            s if s >= 60.0 => ("GOOD", Color::BrightGreen),
            s if s >= 40.0 => ("FAIR", Color::Yellow),
            _ => ("WEAK", Color::BrightRed),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn tier_color(tier: ExperienceTier) -> Color {
        match tier {
            ExperienceTier::Entry => Color::Cyan,
            ExperienceTier::Mid => Color::Blue,
            ExperienceTier::Senior => Color::Magenta,
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_recommendations(&self, report: &RecommendationReport) -> Result<String> {
        let mut output = String::new();
        let meta = &report.metadata;

        output.push_str(&self.format_header("JOB RECOMMENDATIONS", 1));
        output.push_str(&format!(
            "Generated: {} | Resume: {} | Jobs: {} ({} considered)\n",
            meta.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            meta.resume_file,
            meta.jobs_file,
            meta.jobs_considered
        ));
        output.push_str(&format!(
            "Resume experience: {}\n",
            self.colorize(meta.resume_experience.as_str(), Self::tier_color(meta.resume_experience))
        ));

        for (i, rec) in report.recommendations.iter().enumerate() {
            output.push_str(&self.format_header(
                &format!("{}. {} @ {}", i + 1, rec.title, or_unknown(&rec.company)),
                2,
            ));
            output.push_str(&format!(
                "Match: {:.2} {} | Skills: {:.2}\n",
                rec.match_score,
                self.format_score_badge(rec.match_score),
                rec.skill_score
            ));
            output.push_str(&format!(
                "Level: {} | Location: {}\n",
                self.colorize(rec.experience_level.as_str(), Self::tier_color(rec.experience_level)),
                or_unknown(&rec.location)
            ));

            if !rec.matching_skills.is_empty() {
                let skills: Vec<String> = rec
                    .matching_skills
                    .iter()
                    .map(|s| self.colorize(s, Color::Green))
                    .collect();
                output.push_str(&format!("Matching skills: {}\n", skills.join(", ")));
            }

            if !rec.apply_link.is_empty() {
                output.push_str(&format!("Apply: {}\n", self.colorize(&rec.apply_link, Color::Cyan)));
            }

            output.push_str(&format!("  {}\n", preview(&rec.description)));
        }

        output.push('\n');
        Ok(output)
    }

    fn format_skills(&self, report: &SkillReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header(&format!("SKILLS IN {}", report.source), 1));
        output.push_str(&format!(
            "Experience level: {} | Total weight: {:.2}\n",
            self.colorize(report.experience_level.as_str(), Self::tier_color(report.experience_level)),
            report.total_weight
        ));

        if report.skills.is_empty() {
            output.push_str(&self.colorize("No recognised skills\n", Color::Yellow));
        }

        for line in &report.skills {
            let category = line
                .category
                .map(|c| c.to_string())
                .unwrap_or_else(|| "Other".to_string());
            output.push_str(&format!(
                "  • {:<24} {:.1}  {}\n",
                self.colorize(&line.skill, Color::Green),
                line.weight,
                category
            ));
        }

        Ok(output)
    }

    fn format_error(&self, error: &ErrorReport) -> Result<String> {
        Ok(format!("{} {}\n", self.colorize("Error:", Color::Red), error.error))
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_recommendations(&self, report: &RecommendationReport) -> Result<String> {
        self.to_json(&report.recommendations)
    }

    fn format_skills(&self, report: &SkillReport) -> Result<String> {
        self.to_json(report)
    }

    fn format_error(&self, error: &ErrorReport) -> Result<String> {
        self.to_json(error)
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_recommendations(&self, report: &RecommendationReport) -> Result<String> {
        let mut output = String::new();
        let meta = &report.metadata;

        output.push_str("# Job Recommendations\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Version:** {}\n",
                meta.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                meta.version
            ));
            output.push_str(&format!(
                "**Resume:** `{}` ({}) | **Jobs:** `{}` ({} considered)\n\n",
                meta.resume_file, meta.resume_experience, meta.jobs_file, meta.jobs_considered
            ));
        }

        output.push_str("| # | Title | Company | Location | Match | Skills | Level |\n");
        output.push_str("|---|-------|---------|----------|-------|--------|-------|\n");
        for (i, rec) in report.recommendations.iter().enumerate() {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {:.2} | {:.2} | {} |\n",
                i + 1,
                Self::escape_cell(&rec.title),
                Self::escape_cell(or_unknown(&rec.company)),
                Self::escape_cell(or_unknown(&rec.location)),
                rec.match_score,
                rec.skill_score,
                rec.experience_level
            ));
        }
        output.push('\n');

        for (i, rec) in report.recommendations.iter().enumerate() {
            output.push_str(&format!("## {}. {}\n\n", i + 1, rec.title));
            if !rec.matching_skills.is_empty() {
                let skills: Vec<String> = rec.matching_skills.iter().map(|s| format!("`{}`", s)).collect();
                output.push_str(&format!("**Matching skills:** {}\n\n", skills.join(", ")));
            }
            if !rec.apply_link.is_empty() {
                output.push_str(&format!("[Apply]({})\n\n", rec.apply_link));
            }
            output.push_str(&format!("> {}\n\n", preview(&rec.description)));
        }

        Ok(output)
    }

    fn format_skills(&self, report: &SkillReport) -> Result<String> {
        let mut output = format!("# Skills in `{}`\n\n", report.source);
        output.push_str(&format!(
            "**Experience level:** {} | **Total weight:** {:.2}\n\n",
            report.experience_level, report.total_weight
        ));
        output.push_str("| Skill | Weight | Category |\n");
        output.push_str("|-------|--------|----------|\n");
        for line in &report.skills {
            let category = line.category.map(|c| c.to_string()).unwrap_or_else(|| "Other".to_string());
            output.push_str(&format!(
                "| {} | {:.1} | {} |\n",
                Self::escape_cell(&line.skill),
                line.weight,
                category
            ));
        }
        Ok(output)
    }

    fn format_error(&self, error: &ErrorReport) -> Result<String> {
        Ok(format!("> **Error:** {}\n", error.error))
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, true, true)
    }

    pub fn with_options(use_colors: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        }
    }

    pub fn generate_report(&self, report: &RecommendationReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_recommendations(report)
    }

    pub fn generate_skills(&self, report: &SkillReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_skills(report)
    }

    pub fn generate_error(&self, error: &JobMatcherError, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_error(&ErrorReport::from_error(error))
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    };

    format!("{}_jobs{}.{}", base_name, timestamp_suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> RecommendationReport {
        RecommendationReport {
            metadata: ReportMetadata::new("cv.pdf", "linkdindata.csv", 3, ExperienceTier::Mid),
            recommendations: vec![Recommendation {
                title: "Data Engineer".to_string(),
                company: "Acme | Labs".to_string(),
                location: String::new(),
                description: "python, sql and spark".to_string(),
                apply_link: "https://acme.test/apply".to_string(),
                match_score: 64.5,
                skill_score: 75.0,
                matching_skills: vec!["python".to_string(), "sql".to_string()],
                experience_level: ExperienceTier::Senior,
            }],
        }
    }

    #[test]
    fn test_json_is_bare_array() {
        let json = JsonFormatter::new(false).format_recommendations(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["match_score"], 64.5);
        assert_eq!(items[0]["matching_skills"][1], "sql");
    }

    #[test]
    fn test_json_error() {
        let generator = ReportGenerator::with_options(false, false, false);
        let json = generator
            .generate_error(&JobMatcherError::NoSkillsInResume, OutputFormat::Json)
            .unwrap();
        assert_eq!(json, r#"{"error":"No relevant skills found in resume"}"#);
    }

    #[test]
    fn test_configuration_error_as_json() {
        let error = JobMatcherError::Configuration("weights must sum to 1.0".to_string());
        let json = ReportGenerator::new().generate_error(&error, OutputFormat::Json).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let message = value["error"].as_str().unwrap();
        assert!(message.contains("weights must sum to 1.0"));
    }

    #[test]
    fn test_console_without_colors() {
        let output = ConsoleFormatter::new(false).format_recommendations(&sample_report()).unwrap();

        assert!(output.contains("1. Data Engineer @ Acme | Labs"));
        assert!(output.contains("Match: 64.50 [GOOD] | Skills: 75.00"));
        assert!(output.contains("Location: n/a"));
        assert!(output.contains("Matching skills: python, sql"));
        assert!(!output.contains("\u{1b}["));
    }

    #[test]
    fn test_markdown_table() {
        let output = MarkdownFormatter::new(false).format_recommendations(&sample_report()).unwrap();

        assert!(output.starts_with("# Job Recommendations"));
        assert!(output.contains("| 1 | Data Engineer | Acme \\| Labs | n/a | 64.50 | 75.00 | senior |"));
        assert!(output.contains("[Apply](https://acme.test/apply)"));
        assert!(!output.contains("**Generated:**"));
    }

    #[test]
    fn test_preview_truncates() {
        let long = "word ".repeat(100);
        let short = preview(&long);
        assert!(short.ends_with("..."));
        assert!(short.chars().count() <= DESCRIPTION_PREVIEW_CHARS + 3);
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(suggest_filename(OutputFormat::Json, "/tmp/jane_cv.pdf", false), "jane_cv_jobs.json");
        assert!(suggest_filename(OutputFormat::Markdown, "cv.txt", true).ends_with(".md"));
    }

    #[test]
    fn test_save_report_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("out.txt");
        save_report_to_file("hello", &path).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "hello");
    }
}
