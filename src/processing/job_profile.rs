//! Resolution of a job target into a normalized job profile

use crate::processing::taxonomy::{JobProfile, SkillTaxonomy};
use crate::processing::text_processor::title_case;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;

const MAX_RESOLVED_SKILLS: usize = 15;
const MAX_CAPITALIZED_TERMS: usize = 10;
const MAX_RESOLVED_KEYWORDS: usize = 20;

/// Domain-agnostic phrases looked for in free-text job descriptions
const KEYWORD_PHRASES: &[&str] = &[
    "experience", "knowledge", "skills", "ability", "responsible",
    "develop", "manage", "lead", "analyze", "design", "implement",
    "collaborate", "communicate", "problem solving", "team work",
    "project management", "data analysis", "software development",
];

/// Builds job profiles from catalog roles or from arbitrary job description text
pub struct JobProfileResolver {
    taxonomy: Arc<SkillTaxonomy>,
    vocabulary: Vec<(String, String)>,
    capitalized_term: Regex,
}

impl JobProfileResolver {
    pub fn new(taxonomy: Arc<SkillTaxonomy>) -> Self {
        let vocabulary = taxonomy
            .vocabulary()
            .into_iter()
            .map(|skill| (skill.to_lowercase(), skill))
            .collect();

        let capitalized_term = Regex::new(r"\b[A-Z][a-z]*(?:\.[a-z]+|[A-Z][a-z]*)*\b")
            .expect("Invalid capitalized term regex");

        Self {
            taxonomy,
            vocabulary,
            capitalized_term,
        }
    }

    /// Profile of a catalog role; unknown roles yield an empty profile.
    pub fn role_profile(&self, role_name: &str) -> JobProfile {
        match self.taxonomy.role(role_name) {
            Some(role) => role.to_profile(),
            None => {
                log::warn!("Unknown role '{}', using an empty job profile", role_name);
                JobProfile::default()
            }
        }
    }

    /// Extract skills and keywords from a free-text job description.
    ///
    /// This is a recall-oriented substring heuristic: any catalog skill whose
    /// text appears anywhere in the description counts as required.
    pub fn resolve_from_description(&self, job_text: &str) -> JobProfile {
        let lowered = job_text.to_lowercase();

        let required_skills: Vec<String> = self
            .vocabulary
            .iter()
            .filter(|(needle, _)| lowered.contains(needle.as_str()))
            .take(MAX_RESOLVED_SKILLS)
            .map(|(_, display)| display.clone())
            .collect();

        let keywords = self.extract_keywords(job_text);

        log::debug!(
            "Resolved job description: {} skills, {} keywords",
            required_skills.len(),
            keywords.len()
        );

        JobProfile {
            description: job_text.to_string(),
            required_skills,
            preferred_skills: Vec::new(),
            keywords,
        }
    }

    fn extract_keywords(&self, job_text: &str) -> Vec<String> {
        let lowered = job_text.to_lowercase();

        let phrases = KEYWORD_PHRASES
            .iter()
            .filter(|phrase| lowered.contains(*phrase))
            .map(|phrase| title_case(phrase));

        let capitalized = self
            .capitalized_term
            .find_iter(job_text)
            .take(MAX_CAPITALIZED_TERMS)
            .map(|m| m.as_str().to_string());

        let mut seen = HashSet::new();
        phrases
            .chain(capitalized)
            .filter(|keyword| seen.insert(keyword.to_lowercase()))
            .take(MAX_RESOLVED_KEYWORDS)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> JobProfileResolver {
        JobProfileResolver::new(Arc::new(SkillTaxonomy::builtin()))
    }

    #[test]
    fn test_role_profile() {
        let profile = resolver().role_profile("Data Scientist");
        assert!(profile.required_skills.contains(&"Pandas".to_string()));
        assert!(!profile.keywords.is_empty());
    }

    #[test]
    fn test_unknown_role_is_empty() {
        let profile = resolver().role_profile("Astronaut");
        assert_eq!(profile, JobProfile::default());
        assert!(profile.is_empty());
    }

    #[test]
    fn test_resolve_from_description() {
        let profile = resolver().resolve_from_description(
            "Must know Python and React, 3+ years experience required",
        );

        assert!(profile.required_skills.contains(&"Python".to_string()));
        assert!(profile.required_skills.contains(&"React".to_string()));
        assert!(profile.preferred_skills.is_empty());
        assert!(profile.keywords.contains(&"Experience".to_string()));
        assert!(profile.keywords.contains(&"Must".to_string()));
        assert_eq!(profile.description, "Must know Python and React, 3+ years experience required");
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let text = "We want SQL, Tableau, Power BI and Excel. You will analyze data and lead projects.";
        let first = resolver().resolve_from_description(text);
        let second = resolver().resolve_from_description(text);
        assert_eq!(first, second);
        assert_eq!(first.required_skills.first().map(String::as_str), Some("SQL"));
    }

    #[test]
    fn test_caps_are_applied() {
        let text = "Python Java JavaScript C++ Git SQL HTML CSS React Node.js Docker Kubernetes AWS \
                    GraphQL TypeScript MongoDB Redis Pandas NumPy Tableau Figma Sketch";
        let profile = resolver().resolve_from_description(text);
        assert_eq!(profile.required_skills.len(), 15);
        assert!(profile.keywords.len() <= 20);
    }

    #[test]
    fn test_empty_description() {
        let profile = resolver().resolve_from_description("");
        assert!(profile.required_skills.is_empty());
        assert!(profile.keywords.is_empty());
    }

    #[test]
    fn test_keywords_are_deduplicated() {
        let profile = resolver().resolve_from_description("Design matters. Design systems experience.");
        let designs = profile.keywords.iter().filter(|k| k.as_str() == "Design").count();
        assert_eq!(designs, 1);
    }
}
