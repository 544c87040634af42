//! Rule-based improvement suggestions

use crate::processing::matcher::{AnalysisResult, SectionQuality};
use crate::processing::sections::{SectionLabel, SectionMap};
use crate::processing::taxonomy::JobProfile;
use crate::processing::text_processor::word_count;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

const TOP_MISSING: usize = 5;

const ACTION_VERBS: &[&str] = &[
    "developed", "managed", "led", "created", "implemented",
    "designed", "analyzed", "improved", "achieved", "delivered",
];

const RESPONSIBILITY_PHRASES: &[&str] = &["responsible for", "duties included", "tasks involved"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionCategory {
    SkillsImprovement,
    KeywordOptimization,
    SectionImprovements,
    ContentEnhancement,
    FormattingTips,
    ExperienceEnhancement,
    EducationTips,
    GeneralAdvice,
}

impl SuggestionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionCategory::SkillsImprovement => "skills_improvement",
            SuggestionCategory::KeywordOptimization => "keyword_optimization",
            SuggestionCategory::SectionImprovements => "section_improvements",
            SuggestionCategory::ContentEnhancement => "content_enhancement",
            SuggestionCategory::FormattingTips => "formatting_tips",
            SuggestionCategory::ExperienceEnhancement => "experience_enhancement",
            SuggestionCategory::EducationTips => "education_tips",
            SuggestionCategory::GeneralAdvice => "general_advice",
        }
    }
}

impl fmt::Display for SuggestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = match self {
            SuggestionCategory::SkillsImprovement => "Skills Improvement",
            SuggestionCategory::KeywordOptimization => "Keyword Optimization",
            SuggestionCategory::SectionImprovements => "Section Improvements",
            SuggestionCategory::ContentEnhancement => "Content Enhancement",
            SuggestionCategory::FormattingTips => "Formatting Tips",
            SuggestionCategory::ExperienceEnhancement => "Experience Enhancement",
            SuggestionCategory::EducationTips => "Education Tips",
            SuggestionCategory::GeneralAdvice => "General Advice",
        };
        write!(f, "{}", title)
    }
}

/// Suggestions grouped by category. Categories without suggestions are never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuggestionSet {
    categories: BTreeMap<SuggestionCategory, Vec<String>>,
}

impl SuggestionSet {
    pub fn insert(&mut self, category: SuggestionCategory, suggestions: Vec<String>) {
        if suggestions.is_empty() {
            return;
        }
        self.categories.entry(category).or_default().extend(suggestions);
    }

    pub fn get(&self, category: SuggestionCategory) -> &[String] {
        self.categories.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (SuggestionCategory, &[String])> {
        self.categories.iter().map(|(category, items)| (*category, items.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn total(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }
}

pub struct SuggestionEngine {
    number_pattern: Regex,
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionEngine {
    pub fn new() -> Self {
        let number_pattern = Regex::new(r"\d+(?:,\d{3})*(?:\.\d+)?[%$]?").expect("Invalid number regex");
        Self { number_pattern }
    }

    /// Build the categorized suggestions for one analysis.
    ///
    /// The job profile is accepted alongside the result it produced; every
    /// current rule reads profile-derived data through `result`, so it is unused.
    pub fn generate(&self, result: &AnalysisResult, sections: &SectionMap, _profile: &JobProfile) -> SuggestionSet {
        let mut set = SuggestionSet::default();

        set.insert(
            SuggestionCategory::SkillsImprovement,
            result
                .missing_skills
                .iter()
                .take(TOP_MISSING)
                .map(|skill| format!("Consider adding '{}' to your skillset as it's highly valued for this role", skill))
                .collect(),
        );

        set.insert(
            SuggestionCategory::KeywordOptimization,
            result
                .missing_keywords
                .iter()
                .take(TOP_MISSING)
                .map(|keyword| format!("Include '{}' in your resume to better match job requirements", keyword))
                .collect(),
        );

        set.insert(SuggestionCategory::SectionImprovements, section_suggestions(result));
        set.insert(SuggestionCategory::ContentEnhancement, content_suggestions(result));
        set.insert(
            SuggestionCategory::ExperienceEnhancement,
            self.experience_suggestions(sections.get(SectionLabel::Experience)),
        );
        set.insert(
            SuggestionCategory::EducationTips,
            education_suggestions(sections.get(SectionLabel::Education)),
        );
        set.insert(SuggestionCategory::FormattingTips, formatting_suggestions(sections));
        set.insert(SuggestionCategory::GeneralAdvice, general_advice(result));

        log::debug!("Generated {} suggestions in {} categories", set.total(), set.len());
        set
    }

    fn experience_suggestions(&self, experience: &str) -> Vec<String> {
        if experience.trim().is_empty() {
            return vec![
                "Add a comprehensive work experience section detailing your professional background".to_string(),
            ];
        }

        let mut suggestions = Vec::new();
        let lowered = experience.to_lowercase();

        let verbs_found = ACTION_VERBS.iter().filter(|verb| lowered.contains(*verb)).count();
        if verbs_found < 3 {
            suggestions.push(
                "Start your bullet points with strong action verbs like 'Developed', 'Managed', 'Led', or 'Implemented'"
                    .to_string(),
            );
        }

        if self.number_pattern.find_iter(experience).count() < 2 {
            suggestions.push("Include specific numbers, percentages, and metrics to quantify your achievements".to_string());
            suggestions.push(
                "Add measurable results like 'Increased sales by 25%' or 'Managed team of 10 people'".to_string(),
            );
        }

        if RESPONSIBILITY_PHRASES.iter().any(|phrase| lowered.contains(phrase)) {
            suggestions.push("Focus on achievements and results rather than just listing job responsibilities".to_string());
        }

        suggestions
    }
}

fn section_suggestions(result: &AnalysisResult) -> Vec<String> {
    let mut suggestions = Vec::new();
    let quality_of = |label: SectionLabel| {
        result
            .section_analysis
            .get(&label)
            .map(|analysis| analysis.quality)
            .unwrap_or(SectionQuality::Missing)
    };

    for label in [
        SectionLabel::Summary,
        SectionLabel::Experience,
        SectionLabel::Education,
        SectionLabel::Skills,
    ] {
        match quality_of(label) {
            SectionQuality::Missing => {
                let text = match label {
                    SectionLabel::Summary => "Add a professional summary section at the top to highlight your key qualifications and career objectives",
                    SectionLabel::Skills => "Include a dedicated skills section listing both technical and soft skills relevant to your target role",
                    SectionLabel::Experience => "Add a work experience section detailing your professional background and achievements",
                    _ => "Include an education section with your degrees, certifications, and relevant coursework",
                };
                suggestions.push(text.to_string());
            }
            SectionQuality::Poor => {
                suggestions.push(format!(
                    "Expand your {} section with more detailed and relevant information",
                    label.as_str()
                ));
            }
            _ => {}
        }
    }

    if quality_of(SectionLabel::Projects) == SectionQuality::Missing {
        suggestions.push("Consider adding a projects section to showcase your practical skills and achievements".to_string());
    }
    if quality_of(SectionLabel::Certifications) == SectionQuality::Missing {
        suggestions.push("Add a certifications section if you have relevant professional certifications".to_string());
    }

    suggestions
}

fn content_suggestions(result: &AnalysisResult) -> Vec<String> {
    let mut suggestions = Vec::new();

    if result.readability_score < 30.0 {
        suggestions.push("Simplify your language and use shorter sentences to improve readability".to_string());
    } else if result.readability_score > 90.0 {
        suggestions.push("Consider using more professional terminology to demonstrate your expertise".to_string());
    }

    if result.skill_match_percentage < 50.0 {
        suggestions.push("Highlight more skills that are relevant to your target job role".to_string());
        suggestions.push("Use specific examples to demonstrate your proficiency in key skills".to_string());
    }

    // Compares the displayed lists, so the missing side is at most ten long
    if result.matched_keywords.len() < result.missing_keywords.len() {
        suggestions.push("Incorporate more industry-specific keywords and terminology throughout your resume".to_string());
        suggestions.push(
            "Review the job description and naturally include relevant terms in your experience descriptions"
                .to_string(),
        );
    }

    suggestions
}

fn education_suggestions(education: &str) -> Vec<String> {
    if education.trim().is_empty() {
        return vec!["Include your educational background with degrees, institutions, and graduation dates".to_string()];
    }

    let mut suggestions = Vec::new();
    if word_count(education) < 20 {
        suggestions.push(
            "Consider adding relevant coursework, academic projects, or honors to strengthen your education section"
                .to_string(),
        );
    }

    let lowered = education.to_lowercase();
    if !lowered.contains("gpa") && !lowered.contains("grade") {
        suggestions.push("If you're a recent graduate with a strong GPA (3.5+), consider including it".to_string());
    }

    suggestions
}

fn formatting_suggestions(sections: &SectionMap) -> Vec<String> {
    let mut suggestions = Vec::new();

    let words = sections.total_word_count();
    if words < 200 {
        suggestions.push(
            "Your resume appears quite brief. Consider adding more detail about your experience and achievements"
                .to_string(),
        );
    } else if words > 800 {
        suggestions.push(
            "Consider condensing your resume to 1-2 pages by focusing on the most relevant information".to_string(),
        );
    }

    suggestions.extend(
        [
            "Use consistent bullet points and formatting throughout all sections",
            "Ensure proper spacing between sections for better readability",
            "Use a professional font and maintain consistent font sizes",
            "Keep margins uniform and ensure the layout is clean and organized",
        ]
        .iter()
        .map(|s| s.to_string()),
    );

    suggestions
}

fn general_advice(result: &AnalysisResult) -> Vec<String> {
    let bracket: [&str; 4] = match result.overall_score {
        0..=49 => [
            "Your resume needs significant improvement to be competitive for your target role",
            "Focus on adding more relevant skills and experience details",
            "Consider seeking feedback from industry professionals or career counselors",
            "Tailor your resume specifically for each job application",
        ],
        50..=69 => [
            "Your resume is on the right track but could use some improvements",
            "Focus on incorporating more relevant keywords and skills",
            "Strengthen your experience descriptions with specific achievements",
            "Consider adding more quantifiable results to demonstrate your impact",
        ],
        70..=84 => [
            "Your resume is quite good! Focus on fine-tuning the details",
            "Add a few more relevant keywords to improve ATS compatibility",
            "Consider adding any missing skills that are important for your target role",
            "Ensure all sections are well-developed and professional",
        ],
        _ => [
            "Excellent resume! You're well-positioned for your target role",
            "Continue to tailor your resume for specific job applications",
            "Keep your resume updated with new skills and achievements",
            "Consider this resume as a strong foundation for your job search",
        ],
    };

    let mut suggestions: Vec<String> = bracket.iter().map(|s| s.to_string()).collect();
    if result.skill_match_percentage < 30.0 {
        suggestions.push(
            "Consider developing more skills relevant to your target role through courses or projects".to_string(),
        );
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;
    use crate::processing::matcher::MatchEngine;
    use crate::processing::sections::SectionSegmenter;
    use crate::processing::taxonomy::SkillTaxonomy;

    fn analyze(text: &str, role: &str) -> (AnalysisResult, SectionMap, JobProfile) {
        let taxonomy = SkillTaxonomy::builtin();
        let profile = taxonomy.role(role).unwrap().to_profile();
        let sections = SectionSegmenter::new().segment(text);
        let engine = MatchEngine::new(&taxonomy, ScoringConfig::default()).unwrap();
        let result = engine.analyze(text, &sections, &profile);
        (result, sections, profile)
    }

    #[test]
    fn test_sparse_resume_suggestions() {
        let (result, sections, profile) =
            analyze("Python developer with 5 years experience. Skills: Python, SQL, Git.", "Software Engineer");
        let set = SuggestionEngine::new().generate(&result, &sections, &profile);

        let skills = set.get(SuggestionCategory::SkillsImprovement);
        assert_eq!(skills.len(), 5);
        assert_eq!(
            skills[0],
            "Consider adding 'Java' to your skillset as it's highly valued for this role"
        );

        assert_eq!(
            set.get(SuggestionCategory::ExperienceEnhancement),
            &["Add a comprehensive work experience section detailing your professional background".to_string()]
        );
        assert_eq!(set.get(SuggestionCategory::EducationTips).len(), 1);

        let formatting = set.get(SuggestionCategory::FormattingTips);
        assert_eq!(formatting.len(), 5);
        assert!(formatting[0].starts_with("Your resume appears quite brief"));

        let general = set.get(SuggestionCategory::GeneralAdvice);
        assert_eq!(general.len(), 5);
        assert!(general[0].starts_with("Your resume needs significant improvement"));
    }

    #[test]
    fn test_no_empty_categories() {
        let (result, sections, profile) = analyze("", "Data Scientist");
        let set = SuggestionEngine::new().generate(&result, &sections, &profile);
        assert!(set.iter().all(|(_, items)| !items.is_empty()));

        let empty = AnalysisResult {
            missing_skills: vec![],
            missing_keywords: vec![],
            ..result
        };
        let set = SuggestionEngine::new().generate(&empty, &sections, &profile);
        assert!(set.get(SuggestionCategory::SkillsImprovement).is_empty());
        assert!(set.iter().all(|(category, _)| category != SuggestionCategory::SkillsImprovement));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let text = "SUMMARY\nEngineer\nEXPERIENCE\nResponsible for deployments\nEDUCATION\nBSc";
        let (result, sections, profile) = analyze(text, "Software Engineer");
        let engine = SuggestionEngine::new();
        assert_eq!(
            engine.generate(&result, &sections, &profile),
            engine.generate(&result, &sections, &profile)
        );
    }

    #[test]
    fn test_experience_rules() {
        let engine = SuggestionEngine::new();

        let strong = "Developed a billing platform serving 2,000 customers. Led a team of 6. \
                      Implemented caching that improved latency by 35%.";
        assert!(engine.experience_suggestions(strong).is_empty());

        let weak = "Responsible for maintaining servers";
        let suggestions = engine.experience_suggestions(weak);
        assert_eq!(suggestions.len(), 4);
        assert!(suggestions[3].starts_with("Focus on achievements"));
    }

    #[test]
    fn test_education_rules() {
        let with_gpa = "BSc Computer Science, State University, 2018. GPA 3.8. Coursework in \
                        algorithms, compilers, operating systems, databases, networks, security, graphics and distributed systems.";
        assert!(education_suggestions(with_gpa).is_empty());

        let short = education_suggestions("BSc Computer Science");
        assert_eq!(short.len(), 2);
    }

    #[test]
    fn test_poor_sections_are_flagged() {
        let text = "SUMMARY\nEngineer\nEXPERIENCE\nBuilt things at Acme for many years with great results\nEDUCATION\nBSc\nSKILLS\nRust";
        let (result, _, _) = analyze(text, "Software Engineer");
        let suggestions = section_suggestions(&result);

        assert!(suggestions.contains(&"Expand your summary section with more detailed and relevant information".to_string()));
        assert!(suggestions.contains(&"Expand your skills section with more detailed and relevant information".to_string()));
        assert!(!suggestions.iter().any(|s| s.contains("Expand your experience")));
        assert!(suggestions.iter().any(|s| s.starts_with("Consider adding a projects section")));
    }

    #[test]
    fn test_general_advice_brackets() {
        let (mut result, _, _) = analyze("", "Software Engineer");
        result.skill_match_percentage = 80.0;

        result.overall_score = 90;
        assert!(general_advice(&result)[0].starts_with("Excellent resume"));
        result.overall_score = 84;
        assert!(general_advice(&result)[0].starts_with("Your resume is quite good"));
        result.overall_score = 50;
        assert!(general_advice(&result)[0].starts_with("Your resume is on the right track"));
        assert_eq!(general_advice(&result).len(), 4);
    }
}
