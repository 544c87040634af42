//! Analysis pipeline tying segmentation, profile resolution, matching and suggestions together

use crate::config::{Config, ScoringConfig};
use crate::error::Result;
use crate::input::ResumeDocument;
use crate::llm::enhancer::{
    all_unavailable, Enhancement, EnhancementLabel, EnhancementRequest, EnhancementService, TextEnhancer,
};
use crate::processing::job_profile::JobProfileResolver;
use crate::processing::matcher::{AnalysisResult, MatchEngine};
use crate::processing::resume_facts::{FactExtractor, ResumeFacts};
use crate::processing::sections::{SectionMap, SectionSegmenter};
use crate::processing::suggestions::{SuggestionEngine, SuggestionSet};
use crate::processing::taxonomy::{JobProfile, SkillTaxonomy};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

/// What the resume is scored against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobTarget {
    Role(String),
    Description(String),
}

impl JobTarget {
    pub fn label(&self) -> String {
        match self {
            JobTarget::Role(name) => name.clone(),
            JobTarget::Description(_) => "Custom Job Description".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub target: String,
    pub resume_name: String,
    pub generated_at: DateTime<Utc>,
    pub processing_time_ms: u64,
    pub scoring: ScoringConfig,
    pub profile: JobProfile,
    pub sections: SectionMap,
    pub result: AnalysisResult,
    pub suggestions: SuggestionSet,
    pub facts: ResumeFacts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhancements: Option<BTreeMap<EnhancementLabel, Enhancement>>,
}

impl AnalysisReport {
    pub fn enhancement_request(&self) -> EnhancementRequest<'_> {
        EnhancementRequest::new(&self.sections, &self.profile, &self.result)
    }
}

/// Scores resumes against roles or job descriptions.
///
/// Holds only read-only state, so one analyzer can serve concurrent callers.
pub struct ResumeAnalyzer {
    taxonomy: Arc<SkillTaxonomy>,
    segmenter: SectionSegmenter,
    resolver: JobProfileResolver,
    engine: MatchEngine,
    suggestions: SuggestionEngine,
    facts: FactExtractor,
}

impl ResumeAnalyzer {
    pub fn new(taxonomy: Arc<SkillTaxonomy>, scoring: ScoringConfig) -> Result<Self> {
        let engine = MatchEngine::new(&taxonomy, scoring)?;

        Ok(Self {
            resolver: JobProfileResolver::new(Arc::clone(&taxonomy)),
            taxonomy,
            segmenter: SectionSegmenter::new(),
            engine,
            suggestions: SuggestionEngine::new(),
            facts: FactExtractor::new(),
        })
    }

    /// Build an analyzer from configuration, loading a custom taxonomy when one is configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let taxonomy = match &config.taxonomy.path {
            Some(path) => SkillTaxonomy::load(path)?,
            None => SkillTaxonomy::builtin(),
        };
        Self::new(Arc::new(taxonomy), config.scoring.clone())
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        &self.taxonomy
    }

    pub fn resolve(&self, target: &JobTarget) -> JobProfile {
        match target {
            JobTarget::Role(name) => self.resolver.role_profile(name),
            JobTarget::Description(text) => self.resolver.resolve_from_description(text),
        }
    }

    pub fn analyze(&self, document: &ResumeDocument, target: &JobTarget) -> AnalysisReport {
        let start = Instant::now();
        log::info!("Analyzing {} against '{}'", document.display_name(), target.label());

        let sections = self.segmenter.segment(&document.text);
        log::debug!("Detected sections: {:?}", sections.present_labels());

        let profile = self.resolve(target);
        let result = self.engine.analyze(&document.text, &sections, &profile);
        let suggestions = self.suggestions.generate(&result, &sections, &profile);
        let facts = self.facts.extract(&document.text);

        let processing_time_ms = start.elapsed().as_millis() as u64;
        log::info!(
            "Analysis complete: overall score {} in {}ms",
            result.overall_score,
            processing_time_ms
        );

        AnalysisReport {
            target: target.label(),
            resume_name: document.display_name(),
            generated_at: Utc::now(),
            processing_time_ms,
            scoring: self.engine.scoring().clone(),
            profile,
            sections,
            result,
            suggestions,
            facts,
            enhancements: None,
        }
    }

    /// Attach generated enhancements to a finished report. Scores are left untouched.
    pub async fn enhance<E: TextEnhancer>(&self, report: &mut AnalysisReport, service: &EnhancementService<E>) {
        let enhancements = service.enhance_all(&report.enhancement_request()).await;
        let available = enhancements.values().filter(|e| e.is_available()).count();
        log::info!("{} of {} enhancements available", available, enhancements.len());
        report.enhancements = Some(enhancements);
    }

    /// Record that enhancement was requested but could not run. Scores are left untouched.
    pub fn enhancement_unavailable(&self, report: &mut AnalysisReport, reason: &str) {
        log::warn!("AI enhancement unavailable: {}", reason);
        report.enhancements = Some(all_unavailable(&report.sections, reason));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::SourceFormat;
    use crate::processing::sections::SectionLabel;
    use std::time::Duration;

    const RESUME: &str = "Jane Doe\n\
                          jane@example.com\n\
                          SUMMARY\n\
                          Backend developer with 6 years of experience building APIs in Python and SQL.\n\
                          EXPERIENCE\n\
                          Developed payment services handling 2,000 requests per second.\n\
                          Led the migration to Docker and improved deploy time by 40%.\n\
                          EDUCATION\n\
                          BSc Computer Science, State University, graduated 2016 with honors\n\
                          SKILLS\n\
                          Python, SQL, Git, Docker, Testing, Agile\n";

    fn analyzer() -> ResumeAnalyzer {
        ResumeAnalyzer::new(Arc::new(SkillTaxonomy::builtin()), ScoringConfig::default()).unwrap()
    }

    fn document() -> ResumeDocument {
        ResumeDocument::from_text(RESUME, SourceFormat::Text)
    }

    #[test]
    fn test_analyze_against_role() {
        let report = analyzer().analyze(&document(), &JobTarget::Role("Software Engineer".to_string()));

        assert_eq!(report.target, "Software Engineer");
        assert!(report.sections.is_present(SectionLabel::Experience));
        assert!(report.result.matched_skills.contains(&"Python".to_string()));
        assert!(!report.suggestions.is_empty());
        assert_eq!(report.facts.contact.email.as_deref(), Some("jane@example.com"));
        assert!(report.enhancements.is_none());
    }

    #[test]
    fn test_analyze_against_description() {
        let target = JobTarget::Description("Must know Python and React, 3+ years experience required".to_string());
        let report = analyzer().analyze(&document(), &target);

        assert_eq!(report.target, "Custom Job Description");
        assert!(report.profile.required_skills.contains(&"React".to_string()));
        assert!(report.result.missing_skills.contains(&"React".to_string()));
        assert!(report.result.similarity_score > 0.0);
    }

    #[test]
    fn test_unknown_role_still_produces_report() {
        let report = analyzer().analyze(&document(), &JobTarget::Role("Astronaut".to_string()));
        assert!(report.profile.is_empty());
        assert_eq!(report.result.skill_match_percentage, 0.0);
    }

    #[test]
    fn test_concurrent_analyses_share_taxonomy() {
        let analyzer = analyzer();
        let target = JobTarget::Role("Data Scientist".to_string());
        let expected = analyzer.analyze(&document(), &target).result;

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| analyzer.analyze(&document(), &target).result))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn test_from_config_with_custom_taxonomy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roles.toml");
        std::fs::write(
            &path,
            "[[roles]]\nname = \"Platform Engineer\"\ndescription = \"Run infrastructure\"\nrequired_skills = [\"Docker\", \"Terraform\"]\n",
        )
        .unwrap();

        let mut config = Config::default();
        config.taxonomy.path = Some(path);
        let analyzer = ResumeAnalyzer::from_config(&config).unwrap();

        assert_eq!(analyzer.taxonomy().role_names(), vec!["Platform Engineer"]);
        let report = analyzer.analyze(&document(), &JobTarget::Role("Platform Engineer".to_string()));
        assert_eq!(report.result.matched_skills, vec!["Docker"]);
        assert_eq!(report.result.missing_skills, vec!["Terraform"]);
    }

    #[test]
    fn test_missing_enhancer_still_yields_full_report() {
        let analyzer = analyzer();
        let mut report = analyzer.analyze(&document(), &JobTarget::Role("Software Engineer".to_string()));
        let before = report.result.clone();
        let suggestions = report.suggestions.clone();

        analyzer.enhancement_unavailable(&mut report, "Configuration error: No API key configured");

        assert_eq!(report.result, before);
        assert_eq!(report.suggestions, suggestions);
        let enhancements = report.enhancements.as_ref().unwrap();
        assert_eq!(enhancements.len(), 5);
        assert!(enhancements.values().all(|e| !e.is_available()));
        assert!(enhancements[&EnhancementLabel::Overall]
            .text()
            .starts_with("AI optimization unavailable: "));

        let rendered = crate::output::ReportGenerator::with_options(false, false, true, true)
            .generate_report(&report, crate::config::OutputFormat::Json)
            .unwrap();
        assert!(rendered.contains("\"overall_score\""));
        assert!(rendered.contains("\"unavailable\""));
    }

    struct StaticEnhancer;

    impl TextEnhancer for StaticEnhancer {
        async fn enhance(&self, label: EnhancementLabel, _request: &EnhancementRequest<'_>) -> Result<String> {
            Ok(format!("Improved {}", label))
        }
    }

    #[tokio::test]
    async fn test_enhance_leaves_scores_untouched() {
        let analyzer = analyzer();
        let mut report = analyzer.analyze(&document(), &JobTarget::Role("Software Engineer".to_string()));
        let before = report.result.clone();

        let service = EnhancementService::new(StaticEnhancer, Duration::from_secs(1));
        analyzer.enhance(&mut report, &service).await;

        assert_eq!(report.result, before);
        let enhancements = report.enhancements.unwrap();
        assert_eq!(enhancements.len(), 5);
        assert_eq!(
            enhancements[&EnhancementLabel::Skills],
            Enhancement::Available("Improved Skills".to_string())
        );
    }
}
