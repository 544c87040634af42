//! Configuration management for the resume scorer

use crate::error::{Result, ResumeScorerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub taxonomy: TaxonomyConfig,
    pub enhancer: EnhancerConfig,
    pub output: OutputConfig,
}

/// Weights of the five sub-scores combined into the overall score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub skills_weight: f32,
    pub similarity_weight: f32,
    pub keyword_weight: f32,
    pub readability_weight: f32,
    pub sections_weight: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonomyConfig {
    /// Optional TOML catalog replacing the built-in role profiles
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancerConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub model: String,
    /// Falls back to the OPENAI_API_KEY environment variable when unset
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Text,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            skills_weight: 0.3,
            similarity_weight: 0.2,
            keyword_weight: 0.2,
            readability_weight: 0.1,
            sections_weight: 0.2,
        }
    }
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            api_key: None,
            timeout_secs: 30,
            max_tokens: 600,
            temperature: 0.7,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl ScoringConfig {
    pub fn weights(&self) -> [f32; 5] {
        [
            self.skills_weight,
            self.similarity_weight,
            self.keyword_weight,
            self.readability_weight,
            self.sections_weight,
        ]
    }

    /// Weights must be non-negative and sum to 1.0 so the overall score stays in 0..=100.
    pub fn validate(&self) -> Result<()> {
        let weights = self.weights();
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ResumeScorerError::Configuration(
                "Scoring weights must be finite and non-negative".to_string(),
            ));
        }

        let total: f32 = weights.iter().sum();
        if (total - 1.0).abs() > 1e-3 {
            return Err(ResumeScorerError::Configuration(format!(
                "Scoring weights must sum to 1.0 (got {:.3})",
                total
            )));
        }

        Ok(())
    }
}

impl EnhancerConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
    }
}

impl Config {
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

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ResumeScorerError::Configuration(format!("Failed to parse config: {}", e)))?;
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
            .map_err(|e| ResumeScorerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;

        if self.enhancer.timeout_secs == 0 {
            return Err(ResumeScorerError::Configuration(
                "enhancer.timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-scorer")
            .join("config.toml")
    }
}
