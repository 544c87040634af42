//! Resume scorer: score a resume against a job role or description

use anyhow::{bail, Context};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::error;
use resume_scorer::cli::{self, Cli, Commands, ConfigAction};
use resume_scorer::config::Config;
use resume_scorer::input::InputManager;
use resume_scorer::llm::{EnhancementService, OpenAiEnhancer};
use resume_scorer::output::{resolve_save_path, save_report_to_file, ReportGenerator};
use resume_scorer::{JobTarget, ResumeAnalyzer};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path).with_context(|| format!("reading {}", path.display())),
        None => Ok(Config::load()?),
    }
}

async fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    match command {
        Commands::Analyze {
            resume,
            role,
            job,
            output,
            save,
            detailed,
            enhance,
        } => {
            let format = match output {
                Some(output) => cli::parse_output_format(&output).map_err(anyhow::Error::msg)?,
                None => config.output.format,
            };

            let analyzer = ResumeAnalyzer::from_config(&config).context("building analyzer")?;
            let input_manager = InputManager::new();

            let target = match (role, job) {
                (Some(role), _) => {
                    if analyzer.taxonomy().role(&role).is_none() {
                        let hint = analyzer
                            .taxonomy()
                            .closest_role(&role)
                            .map(|name| format!(" Did you mean '{}'?", name))
                            .unwrap_or_default();
                        bail!("Unknown role '{}'.{} Run `resume-scorer roles` to list roles.", role, hint);
                    }
                    JobTarget::Role(role)
                }
                (None, Some(job)) => JobTarget::Description(
                    input_manager
                        .load_job_description(&job)
                        .await
                        .with_context(|| format!("loading job description {}", job.display()))?,
                ),
                (None, None) => bail!("Either --role or --job is required"),
            };

            let document = input_manager
                .load_resume(&resume)
                .await
                .with_context(|| format!("loading resume {}", resume.display()))?;

            let mut report = analyzer.analyze(&document, &target);

            if enhance || config.enhancer.enabled {
                match OpenAiEnhancer::from_config(&config.enhancer) {
                    Ok(enhancer) => {
                        let service =
                            EnhancementService::new(enhancer, Duration::from_secs(config.enhancer.timeout_secs));

                        let spinner = ProgressBar::new_spinner();
                        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
                            spinner.set_style(style);
                        }
                        spinner.set_message("Generating AI suggestions...");
                        spinner.enable_steady_tick(Duration::from_millis(100));

                        analyzer.enhance(&mut report, &service).await;
                        spinner.finish_and_clear();
                    }
                    Err(e) => analyzer.enhancement_unavailable(&mut report, &e.to_string()),
                }
            }

            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                detailed || config.output.detailed,
                true,
                true,
            );
            let rendered = generator.generate_report(&report, format)?;

            match save {
                Some(path) => {
                    let path = resolve_save_path(&path, format, &report.resume_name);
                    save_report_to_file(&rendered, &path)?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Roles => {
            let analyzer = ResumeAnalyzer::from_config(&config)?;
            println!("Available roles:\n");
            for role in analyzer.taxonomy().roles() {
                println!("  • {}", role.name);
                println!("    {}", role.description);
                println!(
                    "    {} required, {} preferred skills",
                    role.required_skills.len(),
                    role.preferred_skills.len()
                );
            }
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("Current Configuration ({})\n", path.display());
                    print!("{}", toml::to_string_pretty(&config)?);
                }

                Some(ConfigAction::Reset) => {
                    Config::default().save_to(&path)?;
                    println!("Configuration reset to defaults at {}", path.display());
                }

                Some(ConfigAction::Path) => println!("{}", path.display()),
            }
        }
    }

    Ok(())
}
