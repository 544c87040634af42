//! Optional generative enhancement of resume sections

use crate::error::Result;
use crate::processing::matcher::AnalysisResult;
use crate::processing::sections::{SectionLabel, SectionMap};
use crate::processing::taxonomy::JobProfile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnhancementLabel {
    Summary,
    Experience,
    Skills,
    Overall,
    CoverLetter,
}

impl EnhancementLabel {
    pub const ALL: [EnhancementLabel; 5] = [
        EnhancementLabel::Summary,
        EnhancementLabel::Experience,
        EnhancementLabel::Skills,
        EnhancementLabel::Overall,
        EnhancementLabel::CoverLetter,
    ];

    /// The resume section a label rewrites, if any
    pub fn section(&self) -> Option<SectionLabel> {
        match self {
            EnhancementLabel::Summary => Some(SectionLabel::Summary),
            EnhancementLabel::Experience => Some(SectionLabel::Experience),
            EnhancementLabel::Skills => Some(SectionLabel::Skills),
            EnhancementLabel::Overall | EnhancementLabel::CoverLetter => None,
        }
    }

    /// Labels worth requesting: section rewrites only for sections with content.
    pub fn applicable(sections: &SectionMap) -> Vec<EnhancementLabel> {
        Self::ALL
            .iter()
            .copied()
            .filter(|label| label.section().map_or(true, |section| sections.is_present(section)))
            .collect()
    }

    pub fn max_tokens(&self) -> u32 {
        match self {
            EnhancementLabel::Summary | EnhancementLabel::Skills => 500,
            _ => 600,
        }
    }
}

impl fmt::Display for EnhancementLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnhancementLabel::Summary => write!(f, "Summary"),
            EnhancementLabel::Experience => write!(f, "Experience"),
            EnhancementLabel::Skills => write!(f, "Skills"),
            EnhancementLabel::Overall => write!(f, "Overall Strategy"),
            EnhancementLabel::CoverLetter => write!(f, "Cover Letter"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum Enhancement {
    Available(String),
    Unavailable(String),
}

impl Enhancement {
    pub fn is_available(&self) -> bool {
        matches!(self, Enhancement::Available(_))
    }

    pub fn text(&self) -> &str {
        match self {
            Enhancement::Available(text) | Enhancement::Unavailable(text) => text,
        }
    }
}

/// Every applicable label marked unavailable, for when no enhancer can be built.
pub fn all_unavailable(sections: &SectionMap, reason: &str) -> BTreeMap<EnhancementLabel, Enhancement> {
    EnhancementLabel::applicable(sections)
        .into_iter()
        .map(|label| (label, Enhancement::Unavailable(format!("AI optimization unavailable: {}", reason))))
        .collect()
}

/// Everything an enhancer may draw on, borrowed from a finished analysis
#[derive(Debug, Clone, Copy)]
pub struct EnhancementRequest<'a> {
    pub sections: &'a SectionMap,
    pub profile: &'a JobProfile,
    pub result: &'a AnalysisResult,
}

impl<'a> EnhancementRequest<'a> {
    pub fn new(sections: &'a SectionMap, profile: &'a JobProfile, result: &'a AnalysisResult) -> Self {
        Self {
            sections,
            profile,
            result,
        }
    }
}

/// A black-box text generator. Output is free-form and may differ between calls.
pub trait TextEnhancer {
    fn enhance(
        &self,
        label: EnhancementLabel,
        request: &EnhancementRequest<'_>,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// Runs an enhancer over every applicable label, isolating failures per label.
pub struct EnhancementService<E> {
    enhancer: E,
    timeout: Duration,
}

impl<E: TextEnhancer> EnhancementService<E> {
    pub fn new(enhancer: E, timeout: Duration) -> Self {
        Self { enhancer, timeout }
    }

    pub async fn enhance_all(&self, request: &EnhancementRequest<'_>) -> BTreeMap<EnhancementLabel, Enhancement> {
        let mut enhancements = BTreeMap::new();

        for label in EnhancementLabel::applicable(request.sections) {
            let outcome = match tokio::time::timeout(self.timeout, self.enhancer.enhance(label, request)).await {
                Ok(Ok(text)) => Enhancement::Available(text),
                Ok(Err(e)) => {
                    log::warn!("Enhancement for {} failed: {}", label, e);
                    Enhancement::Unavailable(format!("AI optimization unavailable: {}", e))
                }
                Err(_) => {
                    log::warn!("Enhancement for {} timed out after {:?}", label, self.timeout);
                    Enhancement::Unavailable(format!(
                        "AI optimization unavailable: timed out after {}s",
                        self.timeout.as_secs_f32()
                    ))
                }
            };
            enhancements.insert(label, outcome);
        }

        enhancements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResumeScorerError;

    struct EchoEnhancer;

    impl TextEnhancer for EchoEnhancer {
        async fn enhance(&self, label: EnhancementLabel, request: &EnhancementRequest<'_>) -> Result<String> {
            Ok(format!("{} at {}", label, request.result.overall_score))
        }
    }

    struct FlakyEnhancer;

    impl TextEnhancer for FlakyEnhancer {
        async fn enhance(&self, label: EnhancementLabel, _request: &EnhancementRequest<'_>) -> Result<String> {
            match label {
                EnhancementLabel::Overall => Err(ResumeScorerError::Enhancement("quota exceeded".to_string())),
                _ => Ok("ok".to_string()),
            }
        }
    }

    struct SlowEnhancer;

    impl TextEnhancer for SlowEnhancer {
        async fn enhance(&self, label: EnhancementLabel, _request: &EnhancementRequest<'_>) -> Result<String> {
            if label == EnhancementLabel::CoverLetter {
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
            Ok("done".to_string())
        }
    }

    fn result() -> AnalysisResult {
        AnalysisResult {
            overall_score: 42,
            skill_match_percentage: 10.0,
            similarity_score: 0.0,
            readability_score: 50.0,
            matched_skills: vec![],
            missing_skills: vec!["Rust".to_string()],
            matched_keywords: vec![],
            missing_keywords: vec![],
            resume_skills: Default::default(),
            section_analysis: Default::default(),
            keyword_counts: Default::default(),
            components: Default::default(),
        }
    }

    #[test]
    fn test_applicable_labels() {
        let empty = SectionMap::default();
        assert_eq!(
            EnhancementLabel::applicable(&empty),
            vec![EnhancementLabel::Overall, EnhancementLabel::CoverLetter]
        );

        let sections = SectionMap::default().with_section(SectionLabel::Skills, "Rust, Go");
        let labels = EnhancementLabel::applicable(&sections);
        assert!(labels.contains(&EnhancementLabel::Skills));
        assert!(!labels.contains(&EnhancementLabel::Summary));
    }

    #[test]
    fn test_all_unavailable() {
        let sections = SectionMap::default().with_section(SectionLabel::Skills, "Rust");
        let enhancements = all_unavailable(&sections, "no API key");

        assert_eq!(enhancements.len(), 3);
        assert!(enhancements.values().all(|e| !e.is_available()));
        assert_eq!(
            enhancements[&EnhancementLabel::Skills].text(),
            "AI optimization unavailable: no API key"
        );
    }

    #[tokio::test]
    async fn test_enhance_all() {
        let sections = SectionMap::default().with_section(SectionLabel::Summary, "Engineer");
        let profile = JobProfile::default();
        let result = result();
        let request = EnhancementRequest::new(&sections, &profile, &result);

        let service = EnhancementService::new(EchoEnhancer, Duration::from_secs(1));
        let enhancements = service.enhance_all(&request).await;

        assert_eq!(enhancements.len(), 3);
        assert_eq!(
            enhancements[&EnhancementLabel::Summary],
            Enhancement::Available("Summary at 42".to_string())
        );
    }

    #[tokio::test]
    async fn test_failure_is_isolated_per_label() {
        let sections = SectionMap::default().with_section(SectionLabel::Experience, "Built things");
        let profile = JobProfile::default();
        let result = result();
        let request = EnhancementRequest::new(&sections, &profile, &result);

        let service = EnhancementService::new(FlakyEnhancer, Duration::from_secs(1));
        let enhancements = service.enhance_all(&request).await;

        assert!(enhancements[&EnhancementLabel::Experience].is_available());
        assert!(enhancements[&EnhancementLabel::CoverLetter].is_available());
        let overall = &enhancements[&EnhancementLabel::Overall];
        assert!(!overall.is_available());
        assert!(overall.text().contains("quota exceeded"));
    }

    #[tokio::test]
    async fn test_timeout_becomes_unavailable() {
        let sections = SectionMap::default();
        let profile = JobProfile::default();
        let result = result();
        let request = EnhancementRequest::new(&sections, &profile, &result);

        let service = EnhancementService::new(SlowEnhancer, Duration::from_millis(50));
        let enhancements = service.enhance_all(&request).await;

        assert!(enhancements[&EnhancementLabel::Overall].is_available());
        let cover = &enhancements[&EnhancementLabel::CoverLetter];
        assert!(!cover.is_available());
        assert!(cover.text().contains("timed out"));
    }
}
