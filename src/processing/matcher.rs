//! Resume-to-job matching and scoring

use crate::config::ScoringConfig;
use crate::error::{Result, ResumeScorerError};
use crate::processing::readability::flesch_reading_ease;
use crate::processing::sections::{SectionLabel, SectionMap};
use crate::processing::similarity::TfIdfSimilarity;
use crate::processing::taxonomy::{JobProfile, SkillTaxonomy};
use crate::processing::text_processor::{non_blank_line_count, word_count};
use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Missing skill and keyword lists are cut to this many entries
pub const MAX_MISSING_ITEMS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionQuality {
    Good,
    NeedsImprovement,
    Poor,
    Missing,
}

impl SectionQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionQuality::Good => "good",
            SectionQuality::NeedsImprovement => "needs_improvement",
            SectionQuality::Poor => "poor",
            SectionQuality::Missing => "missing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionAnalysis {
    pub present: bool,
    pub word_count: usize,
    pub line_count: usize,
    pub quality: SectionQuality,
}

/// Keyword totals before the missing list is truncated
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordCounts {
    pub matched: usize,
    pub missing: usize,
}

/// The five weighted inputs of the overall score, each in 0..=100
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponents {
    pub skills: f32,
    pub similarity: f32,
    pub keywords: f32,
    pub readability: f32,
    pub sections: f32,
}

impl ScoreComponents {
    pub fn values(&self) -> [f32; 5] {
        [self.skills, self.similarity, self.keywords, self.readability, self.sections]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub overall_score: u8,
    pub skill_match_percentage: f32,
    pub similarity_score: f32,
    pub readability_score: f32,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub resume_skills: BTreeSet<String>,
    pub section_analysis: BTreeMap<SectionLabel, SectionAnalysis>,
    pub keyword_counts: KeywordCounts,
    pub components: ScoreComponents,
}

/// Finds every known skill mentioned anywhere in a text.
pub struct SkillScanner {
    automaton: AhoCorasick,
    skills: Vec<String>,
}

impl SkillScanner {
    pub fn new(skills: Vec<String>) -> Result<Self> {
        let skills: Vec<String> = skills.into_iter().filter(|s| !s.trim().is_empty()).collect();
        let patterns: Vec<String> = skills.iter().map(|s| s.to_lowercase()).collect();

        // Standard semantics so overlapping search reports "Java" inside "JavaScript"
        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&patterns)
            .map_err(|e| ResumeScorerError::Taxonomy(format!("Failed to build skill matcher: {}", e)))?;

        Ok(Self { automaton, skills })
    }

    /// Skills whose lower-cased text occurs in the lower-cased input, in display spelling.
    pub fn scan(&self, text: &str) -> BTreeSet<String> {
        let lowered = text.to_lowercase();
        let mut found = vec![false; self.skills.len()];
        for mat in self.automaton.find_overlapping_iter(&lowered) {
            found[mat.pattern().as_usize()] = true;
        }

        self.skills
            .iter()
            .zip(found)
            .filter(|(_, hit)| *hit)
            .map(|(skill, _)| skill.clone())
            .collect()
    }
}

/// Computes skill, keyword, similarity, readability and section scores
/// for one resume against one job profile.
pub struct MatchEngine {
    scanner: SkillScanner,
    similarity: TfIdfSimilarity,
    scoring: ScoringConfig,
}

impl MatchEngine {
    pub fn new(taxonomy: &SkillTaxonomy, scoring: ScoringConfig) -> Result<Self> {
        scoring.validate()?;
        let scanner = SkillScanner::new(taxonomy.resume_skill_vocabulary())?;

        Ok(Self {
            scanner,
            similarity: TfIdfSimilarity::new(),
            scoring,
        })
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    /// Score `resume_text` against `profile`. Never fails; degenerate input
    /// produces zero components.
    pub fn analyze(&self, resume_text: &str, sections: &SectionMap, profile: &JobProfile) -> AnalysisResult {
        let resume_skills = self.scanner.scan(resume_text);
        let resume_skill_keys: HashSet<String> = resume_skills.iter().map(|s| s.to_lowercase()).collect();

        let required = dedup_case_insensitive(&profile.required_skills);
        let (matched_skills, mut missing_skills): (Vec<String>, Vec<String>) = required
            .iter()
            .cloned()
            .partition(|skill| resume_skill_keys.contains(&skill.to_lowercase()));
        let skill_match_percentage = matched_skills.len() as f32 / required.len().max(1) as f32 * 100.0;
        missing_skills.truncate(MAX_MISSING_ITEMS);

        let lowered_resume = resume_text.to_lowercase();
        let (matched_keywords, mut missing_keywords): (Vec<String>, Vec<String>) = profile
            .keywords
            .iter()
            .cloned()
            .partition(|keyword| lowered_resume.contains(&keyword.to_lowercase()));
        let keyword_counts = KeywordCounts {
            matched: matched_keywords.len(),
            missing: missing_keywords.len(),
        };
        missing_keywords.truncate(MAX_MISSING_ITEMS);

        let similarity_score = match self.similarity.cosine(resume_text, &profile.description) {
            Ok(score) => score * 100.0,
            Err(e) => {
                log::debug!("Similarity unavailable, scoring 0: {}", e);
                0.0
            }
        };

        let readability_score = flesch_reading_ease(resume_text);
        let section_analysis = analyze_sections(sections);

        let components = ScoreComponents {
            skills: skill_match_percentage.min(100.0),
            similarity: similarity_score.min(100.0),
            keywords: keyword_percentage(keyword_counts),
            readability: readability_score.clamp(0.0, 100.0),
            sections: section_score(sections),
        };
        let weighted: f32 = components
            .values()
            .iter()
            .zip(self.scoring.weights())
            .map(|(component, weight)| component * weight)
            .sum();
        let overall_score = weighted.round().clamp(0.0, 100.0) as u8;

        log::debug!(
            "Scores: overall={} skills={:.1} similarity={:.1} keywords={:.1} readability={:.1} sections={:.1}",
            overall_score,
            components.skills,
            components.similarity,
            components.keywords,
            components.readability,
            components.sections
        );

        AnalysisResult {
            overall_score,
            skill_match_percentage,
            similarity_score,
            readability_score,
            matched_skills,
            missing_skills,
            matched_keywords,
            missing_keywords,
            resume_skills,
            section_analysis,
            keyword_counts,
            components,
        }
    }
}

fn dedup_case_insensitive(items: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| seen.insert(item.to_lowercase()))
        .cloned()
        .collect()
}

fn keyword_percentage(counts: KeywordCounts) -> f32 {
    let total = counts.matched + counts.missing;
    if total == 0 {
        return 0.0;
    }
    counts.matched as f32 / total as f32 * 100.0
}

/// Mean of the per-section completeness scores of the four core sections
fn section_score(sections: &SectionMap) -> f32 {
    let total: f32 = SectionLabel::IMPORTANT
        .iter()
        .map(|label| match word_count(sections.get(*label)) {
            n if n > 50 => 100.0,
            n if n > 20 => 80.0,
            n if n > 5 => 60.0,
            n if n > 0 => 40.0,
            _ => 0.0,
        })
        .sum();
    total / SectionLabel::IMPORTANT.len() as f32
}

fn analyze_sections(sections: &SectionMap) -> BTreeMap<SectionLabel, SectionAnalysis> {
    sections
        .iter()
        .map(|(label, text)| {
            let present = !text.trim().is_empty();
            let words = word_count(text);
            let quality = match (present, words) {
                (false, _) => SectionQuality::Missing,
                (true, n) if n > 20 => SectionQuality::Good,
                (true, n) if n > 5 => SectionQuality::NeedsImprovement,
                _ => SectionQuality::Poor,
            };

            let analysis = SectionAnalysis {
                present,
                word_count: words,
                line_count: non_blank_line_count(text),
                quality,
            };
            (label, analysis)
        })
        .collect()
}
