//! CLI interface for the resume scorer

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-scorer")]
#[command(about = "Score a resume against a job role or job description")]
#[command(long_about = "Analyze resume fit using skill matching, content similarity, keywords, readability and section completeness, with optional AI-generated rewrites")]
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
    /// Score a resume against a predefined role or a job description
    Analyze {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Predefined role name, see `roles`
        #[arg(long, conflicts_with = "job", required_unless_present = "job")]
        role: Option<String>,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Output format: console, json, markdown, text
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to a file, or to a generated file name inside a directory
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include section analysis and extracted resume facts
        #[arg(short, long)]
        detailed: bool,

        /// Request AI-generated rewrites (needs an API key)
        #[arg(short, long)]
        enhance: bool,
    },

    /// List predefined roles
    Roles,

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
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
        "text" | "txt" => Ok(OutputFormat::Text),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown, text", format)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert_eq!(parse_output_format("txt"), Ok(OutputFormat::Text));
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_analyze_with_role() {
        let cli = Cli::try_parse_from([
            "resume-scorer",
            "analyze",
            "--resume",
            "cv.pdf",
            "--role",
            "Data Scientist",
            "--enhance",
        ])
        .unwrap();

        match cli.command {
            Commands::Analyze { role, job, enhance, .. } => {
                assert_eq!(role.as_deref(), Some("Data Scientist"));
                assert!(job.is_none());
                assert!(enhance);
            }
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn test_role_and_job_conflict() {
        let result = Cli::try_parse_from([
            "resume-scorer",
            "analyze",
            "-r",
            "cv.txt",
            "--role",
            "Data Scientist",
            "--job",
            "job.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_target_is_required() {
        assert!(Cli::try_parse_from(["resume-scorer", "analyze", "-r", "cv.txt"]).is_err());
    }
}
