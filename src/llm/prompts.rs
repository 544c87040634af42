//! Prompt templates for section rewriting and career advice

use crate::llm::enhancer::{EnhancementLabel, EnhancementRequest};
use crate::processing::sections::SectionLabel;

/// Experience text longer than this is cut before it is sent
const EXPERIENCE_PROMPT_CHARS: usize = 1000;

#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub summary: String,
    pub experience: String,
    pub skills: String,
    pub overall: String,
    pub cover_letter: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            summary: SUMMARY_TEMPLATE.to_string(),
            experience: EXPERIENCE_TEMPLATE.to_string(),
            skills: SKILLS_TEMPLATE.to_string(),
            overall: OVERALL_TEMPLATE.to_string(),
            cover_letter: COVER_LETTER_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    pub fn render(&self, label: EnhancementLabel, request: &EnhancementRequest<'_>) -> String {
        let profile = request.profile;
        let result = request.result;
        let sections = request.sections;

        let role = if profile.description.trim().is_empty() {
            "professional role"
        } else {
            profile.description.as_str()
        };

        match label {
            EnhancementLabel::Summary => self
                .summary
                .replace("{role}", role)
                .replace("{summary}", sections.get(SectionLabel::Summary))
                .replace("{required_skills}", &join_first(&profile.required_skills, 10))
                .replace("{keywords}", &join_first(&profile.keywords, 10))
                .replace("{skill_match}", &format!("{:.1}", result.skill_match_percentage))
                .replace("{missing_skills}", &join_first(&result.missing_skills, 5)),
            EnhancementLabel::Experience => self
                .experience
                .replace("{role}", role)
                .replace(
                    "{experience}",
                    &truncate_chars(sections.get(SectionLabel::Experience), EXPERIENCE_PROMPT_CHARS),
                )
                .replace("{required_skills}", &join_first(&profile.required_skills, 8))
                .replace("{keywords}", &join_first(&profile.keywords, 8)),
            EnhancementLabel::Skills => self
                .skills
                .replace("{skills}", sections.get(SectionLabel::Skills))
                .replace("{required_skills}", &join_first(&profile.required_skills, 10))
                .replace("{missing_skills}", &join_first(&result.missing_skills, 10)),
            EnhancementLabel::Overall => {
                let present: Vec<&str> = sections
                    .present_labels()
                    .iter()
                    .map(|label| label.as_str())
                    .collect();
                self.overall
                    .replace("{overall_score}", &result.overall_score.to_string())
                    .replace("{skill_match}", &format!("{:.1}", result.skill_match_percentage))
                    .replace("{sections_present}", &present.join(", "))
                    .replace("{role}", role)
                    .replace("{missing_skills}", &join_first(&result.missing_skills, 5))
            }
            EnhancementLabel::CoverLetter => self
                .cover_letter
                .replace("{summary}", &excerpt(sections.get(SectionLabel::Summary), 200))
                .replace("{skills}", &excerpt(sections.get(SectionLabel::Skills), 200))
                .replace("{experience}", &excerpt(sections.get(SectionLabel::Experience), 300))
                .replace("{role}", role)
                .replace("{required_skills}", &join_first(&profile.required_skills, 8)),
        }
    }
}

fn join_first(items: &[String], count: usize) -> String {
    items.iter().take(count).cloned().collect::<Vec<_>>().join(", ")
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut)
}

/// Leading excerpt of a section, or a placeholder when the section is empty
fn excerpt(text: &str, max_chars: usize) -> String {
    if text.trim().is_empty() {
        "Not provided".to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}

const SUMMARY_TEMPLATE: &str = r#"As a professional resume writer, please improve this professional summary for a {role}:

Current Summary:
{summary}

Job Requirements:
- Required Skills: {required_skills}
- Key Keywords: {keywords}

Current Analysis:
- Skill Match: {skill_match}%
- Missing Skills: {missing_skills}

Please provide:
1. An improved version of the summary (2-3 sentences)
2. Specific suggestions for enhancement
3. Keywords to naturally incorporate

Focus on making it more compelling and aligned with the target role while maintaining authenticity."#;

const EXPERIENCE_TEMPLATE: &str = r#"As a professional resume writer, please provide suggestions to improve this work experience section for a {role}:

Current Experience:
{experience}

Target Role Requirements:
- Required Skills: {required_skills}
- Important Keywords: {keywords}

Please provide:
1. Suggestions for stronger action verbs
2. Ways to quantify achievements
3. How to better align with target role requirements
4. Keywords to naturally incorporate
5. Structure improvements

Focus on making accomplishments more impactful and relevant to the target role."#;

const SKILLS_TEMPLATE: &str = r#"As a professional resume writer, please provide suggestions to improve this skills section:

Current Skills:
{skills}

Target Role Requirements:
- Required Skills: {required_skills}
- Missing Skills: {missing_skills}

Please provide:
1. How to better organize and present current skills
2. Suggestions for skills to add or develop
3. How to categorize skills (technical vs. soft skills)
4. Ways to demonstrate proficiency levels
5. Skills that should be prioritized for this role

Focus on making the skills section more comprehensive and aligned with the target role."#;

const OVERALL_TEMPLATE: &str = r#"As a senior career coach, please provide strategic advice for improving this resume:

Resume Analysis:
- Overall Score: {overall_score}/100
- Skill Match: {skill_match}%
- Sections Present: {sections_present}

Target Role: {role}
Top Missing Skills: {missing_skills}

Please provide:
1. Top 3 strategic improvements to focus on
2. Industry-specific advice for this role
3. Common mistakes to avoid
4. Next steps for skill development
5. How to stand out from other candidates

Provide actionable, specific advice that will have the biggest impact on job search success."#;

const COVER_LETTER_TEMPLATE: &str = r#"Based on this resume analysis, provide suggestions for writing a compelling cover letter:

Resume Highlights:
- Summary: {summary}
- Key Skills: {skills}
- Experience: {experience}

Target Role: {role}
Required Skills: {required_skills}

Please provide:
1. Key points to highlight in the cover letter
2. How to connect experience to job requirements
3. Compelling opening and closing suggestions
4. Ways to demonstrate value to the employer
5. Common cover letter mistakes to avoid

Focus on making the candidate stand out while staying authentic."#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;
    use crate::processing::matcher::MatchEngine;
    use crate::processing::sections::{SectionMap, SectionSegmenter};
    use crate::processing::taxonomy::SkillTaxonomy;

    fn fixture() -> (SectionMap, crate::processing::taxonomy::JobProfile, crate::processing::matcher::AnalysisResult) {
        let taxonomy = SkillTaxonomy::builtin();
        let profile = taxonomy.role("Software Engineer").unwrap().to_profile();
        let text = format!(
            "SUMMARY\nBackend engineer focused on reliability\nEXPERIENCE\n{}",
            "Built payment services in Python. ".repeat(60)
        );
        let sections = SectionSegmenter::new().segment(&text);
        let engine = MatchEngine::new(&taxonomy, ScoringConfig::default()).unwrap();
        let result = engine.analyze(&text, &sections, &profile);
        (sections, profile, result)
    }

    #[test]
    fn test_summary_prompt_substitution() {
        let (sections, profile, result) = fixture();
        let request = EnhancementRequest::new(&sections, &profile, &result);
        let prompt = PromptTemplates::default().render(EnhancementLabel::Summary, &request);

        assert!(prompt.contains("Backend engineer focused on reliability"));
        assert!(prompt.contains("Develop and maintain software applications"));
        assert!(prompt.contains("Required Skills: Python, Java, JavaScript"));
        assert!(!prompt.contains('{'));
    }

    #[test]
    fn test_experience_prompt_is_truncated() {
        let (sections, profile, result) = fixture();
        let request = EnhancementRequest::new(&sections, &profile, &result);
        let prompt = PromptTemplates::default().render(EnhancementLabel::Experience, &request);

        assert!(prompt.contains("..."));
        assert!(prompt.len() < sections.get(SectionLabel::Experience).len() + EXPERIENCE_TEMPLATE.len());
    }

    #[test]
    fn test_cover_letter_placeholders() {
        let (sections, profile, result) = fixture();
        let request = EnhancementRequest::new(&sections, &profile, &result);
        let prompt = PromptTemplates::default().render(EnhancementLabel::CoverLetter, &request);

        assert!(prompt.contains("- Key Skills: Not provided"));
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("abcdef", 3), "abc...");
    }
}
