//! Output formatters for analysis reports

use crate::config::OutputFormat;
use crate::error::{Result, ResumeScorerError};
use crate::llm::enhancer::Enhancement;
use crate::output::report::{executive_summary, join_or_none, score_breakdown, PerformanceTier};
use crate::processing::analyzer::AnalysisReport;
use crate::processing::matcher::SectionQuality;
use colored::{Color, Colorize};
use std::path::{Path, PathBuf};

/// Suggestions shown per category unless detailed output is requested
const TOP_SUGGESTIONS: usize = 3;

pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Colored terminal output
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Plain-text summary suitable for pasting or saving
pub struct TextFormatter;

/// Report generator that coordinates the different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    text_formatter: TextFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let (badge, color) = match PerformanceTier::from_score(score) {
            PerformanceTier::Excellent => ("EXCELLENT", Color::Green),
            PerformanceTier::Good => ("GOOD", Color::Yellow),
            PerformanceTier::Moderate => ("FAIR", Color::BrightYellow),
            PerformanceTier::NeedsImprovement => ("POOR", Color::BrightRed),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn quality_color(quality: SectionQuality) -> Color {
        match quality {
            SectionQuality::Good => Color::Green,
            SectionQuality::NeedsImprovement => Color::Yellow,
            SectionQuality::Poor => Color::BrightRed,
            SectionQuality::Missing => Color::BrightBlack,
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME ANALYSIS", 1));
        output.push_str(&format!(
            "Resume: {} | Target: {}\n",
            report.resume_name,
            self.colorize(&report.target, Color::Cyan)
        ));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.processing_time_ms
        ));

        output.push_str(&self.format_header("Executive Summary", 2));
        output.push_str(&format!(
            "Overall Score: {}/100 {}\n\n",
            result.overall_score,
            self.format_score_badge(result.overall_score)
        ));
        output.push_str(&format!("{}\n", executive_summary(report)));

        output.push_str(&self.format_header("Score Breakdown", 3));
        for line in score_breakdown(report) {
            output.push_str(&format!(
                "  {:<22} {:>6.1}  (weight: {:.0}%)\n",
                line.name,
                line.score,
                line.weight * 100.0
            ));
        }
        output.push_str(&format!("  {:<22} {:>6.1}\n", "Raw Readability", result.readability_score));

        output.push_str(&self.format_header(&format!("Matched Skills ({})", result.matched_skills.len()), 3));
        output.push_str(&format!("  {}\n", self.colorize(&join_or_none(&result.matched_skills), Color::Green)));

        output.push_str(&self.format_header(&format!("Missing Skills ({})", result.missing_skills.len()), 3));
        output.push_str(&format!("  {}\n", self.colorize(&join_or_none(&result.missing_skills), Color::Red)));

        output.push_str(&self.format_header(
            &format!(
                "Keywords ({} matched, {} missing)",
                result.keyword_counts.matched, result.keyword_counts.missing
            ),
            3,
        ));
        if !result.matched_keywords.is_empty() {
            output.push_str(&format!("  Found: {}\n", result.matched_keywords.join(", ")));
        }
        if !result.missing_keywords.is_empty() {
            output.push_str(&format!(
                "  Missing: {}\n",
                self.colorize(&result.missing_keywords.join(", "), Color::Yellow)
            ));
        }

        output.push_str(&self.format_header("Recommendations", 2));
        for (category, items) in report.suggestions.iter() {
            output.push_str(&format!("{}\n", self.colorize(&category.to_string(), Color::Cyan)));
            let shown = if self.detailed { items.len() } else { TOP_SUGGESTIONS };
            for item in items.iter().take(shown) {
                output.push_str(&format!("  • {}\n", item));
            }
        }

        if let Some(enhancements) = &report.enhancements {
            output.push_str(&self.format_header("AI Suggestions", 2));
            for (label, enhancement) in enhancements {
                match enhancement {
                    Enhancement::Available(text) => {
                        output.push_str(&format!("{}\n{}\n\n", self.colorize(&label.to_string(), Color::Cyan), text));
                    }
                    Enhancement::Unavailable(reason) => {
                        output.push_str(&format!(
                            "{}: {}\n",
                            label,
                            self.colorize(reason, Color::BrightBlack)
                        ));
                    }
                }
            }
        }

        if self.detailed {
            output.push_str(&self.format_header("Section Analysis", 2));
            for (label, analysis) in &result.section_analysis {
                output.push_str(&format!(
                    "  {:<15} {:<18} {:>4} words {:>3} lines\n",
                    label.to_string(),
                    self.colorize(analysis.quality.as_str(), Self::quality_color(analysis.quality)),
                    analysis.word_count,
                    analysis.line_count
                ));
            }

            output.push_str(&self.format_header("Resume Facts", 2));
            let contact = &report.facts.contact;
            let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
            output.push_str(&format!("  Email: {}\n", field(&contact.email)));
            output.push_str(&format!("  Phone: {}\n", field(&contact.phone)));
            output.push_str(&format!("  LinkedIn: {}\n", field(&contact.linkedin)));
            output.push_str(&format!("  GitHub: {}\n", field(&contact.github)));
            output.push_str(&format!("  Estimated experience: {} years\n", report.facts.experience_years));
            let stats = &report.facts.statistics;
            output.push_str(&format!(
                "  {} words, {} non-empty lines, {:.1} words per line\n",
                stats.total_words, stats.non_empty_lines, stats.average_words_per_line
            ));

            let skills: Vec<String> = result.resume_skills.iter().cloned().collect();
            output.push_str(&format!("  Skills detected: {}\n", join_or_none(&skills)));
        }

        output.push_str(&format!(
            "\n{} Generated by resume-scorer v{}\n",
            self.colorize("ℹ", Color::Blue),
            env!("CARGO_PKG_VERSION")
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_score_badge(score: u8) -> &'static str {
        match PerformanceTier::from_score(score) {
            PerformanceTier::Excellent => "🟢 Excellent",
            PerformanceTier::Good => "🟡 Good",
            PerformanceTier::Moderate => "🟠 Fair",
            PerformanceTier::NeedsImprovement => "🔴 Poor",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str("# Resume Analysis Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Resume:** `{}` | **Target Role:** {}\n\n",
                report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.resume_name,
                report.target
            ));
        }

        output.push_str("## Executive Summary\n\n");
        output.push_str(&format!(
            "**Overall Score:** {}/100 {}\n\n",
            result.overall_score,
            Self::markdown_score_badge(result.overall_score)
        ));
        output.push_str(&format!("{}\n\n", executive_summary(report)));

        output.push_str("### Score Breakdown\n\n");
        output.push_str("| Component | Score | Weight |\n");
        output.push_str("|-----------|-------|--------|\n");
        for line in score_breakdown(report) {
            output.push_str(&format!("| {} | {:.1} | {:.0}% |\n", line.name, line.score, line.weight * 100.0));
        }
        output.push('\n');

        output.push_str("## Skills\n\n");
        output.push_str(&format!(
            "**Matched ({}):** {}\n\n",
            result.matched_skills.len(),
            join_or_none(&result.matched_skills)
        ));
        output.push_str(&format!(
            "**Missing ({}):** {}\n\n",
            result.missing_skills.len(),
            join_or_none(&result.missing_skills)
        ));

        if !result.missing_keywords.is_empty() {
            output.push_str(&format!(
                "**Missing keywords:** `{}`\n\n",
                result.missing_keywords.join("`, `")
            ));
        }

        output.push_str("## Sections\n\n");
        output.push_str("| Section | Quality | Words |\n");
        output.push_str("|---------|---------|-------|\n");
        for (label, analysis) in &result.section_analysis {
            output.push_str(&format!("| {} | {} | {} |\n", label, analysis.quality.as_str(), analysis.word_count));
        }
        output.push('\n');

        output.push_str("## Recommendations\n\n");
        for (category, items) in report.suggestions.iter() {
            output.push_str(&format!("### {}\n\n", category));
            for item in items {
                output.push_str(&format!("- {}\n", item));
            }
            output.push('\n');
        }

        if let Some(enhancements) = &report.enhancements {
            output.push_str("## AI Suggestions\n\n");
            for (label, enhancement) in enhancements {
                output.push_str(&format!("### {}\n\n", label));
                match enhancement {
                    Enhancement::Available(text) => output.push_str(&format!("{}\n\n", text)),
                    Enhancement::Unavailable(reason) => output.push_str(&format!("> {}\n\n", reason)),
                }
            }
        }

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!("*Generated by resume-scorer v{}*\n", env!("CARGO_PKG_VERSION")));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl OutputFormatter for TextFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str("RESUME ANALYSIS REPORT\n");
        output.push_str(&format!("Generated on: {}\n", report.generated_at.format("%Y-%m-%d %H:%M:%S")));
        output.push_str(&format!("Target Role: {}\n\n", report.target));

        output.push_str("OVERALL SCORES:\n");
        output.push_str(&format!("- Overall Score: {}/100\n", result.overall_score));
        output.push_str(&format!("- Skill Match: {:.1}%\n", result.skill_match_percentage));
        output.push_str(&format!("- Readability: {:.1}\n\n", result.readability_score));

        output.push_str(&format!("MATCHED SKILLS ({}):\n", result.matched_skills.len()));
        output.push_str(&format!("{}\n\n", join_or_none(&result.matched_skills)));

        output.push_str(&format!("MISSING SKILLS ({}):\n", result.missing_skills.len()));
        output.push_str(&format!("{}\n\n", join_or_none(&result.missing_skills)));

        output.push_str("KEY RECOMMENDATIONS:\n");
        for (category, items) in report.suggestions.iter() {
            output.push_str(&format!("\n{}:\n", category.to_string().to_uppercase()));
            for item in items.iter().take(TOP_SUGGESTIONS) {
                output.push_str(&format!("- {}\n", item));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Text
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            text_formatter: TextFormatter,
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: OutputFormat) -> Result<String> {
        let formatter: &dyn OutputFormatter = match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
            OutputFormat::Text => &self.text_formatter,
        };
        debug_assert_eq!(formatter.supports_format(), format);
        formatter.format_report(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content).map_err(|e| {
        ResumeScorerError::OutputFormatting(format!("Failed to write report to {}: {}", file_path.display(), e))
    })
}

/// Where a report should be written: a directory gets a generated file name, anything else is used as given.
pub fn resolve_save_path(path: &Path, format: OutputFormat, resume_name: &str) -> PathBuf {
    if path.is_dir() {
        path.join(suggest_filename(format, resume_name, true))
    } else {
        path.to_path_buf()
    }
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
        OutputFormat::Console | OutputFormat::Text => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    };

    format!("{}_analysis{}.{}", base_name, timestamp_suffix, extension)
}
