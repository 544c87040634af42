//! Resume section detection

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Lines this long or longer are body text even when they mention a section name.
pub const HEADER_MAX_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionLabel {
    Contact,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Achievements,
    Other,
}

impl SectionLabel {
    pub const ALL: [SectionLabel; 9] = [
        SectionLabel::Contact,
        SectionLabel::Summary,
        SectionLabel::Experience,
        SectionLabel::Education,
        SectionLabel::Skills,
        SectionLabel::Projects,
        SectionLabel::Certifications,
        SectionLabel::Achievements,
        SectionLabel::Other,
    ];

    /// Sections that feed the section quality score.
    pub const IMPORTANT: [SectionLabel; 4] = [
        SectionLabel::Summary,
        SectionLabel::Experience,
        SectionLabel::Education,
        SectionLabel::Skills,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionLabel::Contact => "contact",
            SectionLabel::Summary => "summary",
            SectionLabel::Experience => "experience",
            SectionLabel::Education => "education",
            SectionLabel::Skills => "skills",
            SectionLabel::Projects => "projects",
            SectionLabel::Certifications => "certifications",
            SectionLabel::Achievements => "achievements",
            SectionLabel::Other => "other",
        }
    }
}

impl fmt::Display for SectionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionLabel::Contact => write!(f, "Contact"),
            SectionLabel::Summary => write!(f, "Summary"),
            SectionLabel::Experience => write!(f, "Experience"),
            SectionLabel::Education => write!(f, "Education"),
            SectionLabel::Skills => write!(f, "Skills"),
            SectionLabel::Projects => write!(f, "Projects"),
            SectionLabel::Certifications => write!(f, "Certifications"),
            SectionLabel::Achievements => write!(f, "Achievements"),
            SectionLabel::Other => write!(f, "Other"),
        }
    }
}

/// Text of every section label. Labels without content map to an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<SectionLabel, String>", into = "BTreeMap<SectionLabel, String>")]
pub struct SectionMap {
    sections: BTreeMap<SectionLabel, String>,
}

impl Default for SectionMap {
    fn default() -> Self {
        Self {
            sections: SectionLabel::ALL
                .iter()
                .map(|label| (*label, String::new()))
                .collect(),
        }
    }
}

impl From<BTreeMap<SectionLabel, String>> for SectionMap {
    fn from(partial: BTreeMap<SectionLabel, String>) -> Self {
        let mut map = Self::default();
        for (label, text) in partial {
            map.sections.insert(label, text.trim().to_string());
        }
        map
    }
}

impl From<SectionMap> for BTreeMap<SectionLabel, String> {
    fn from(map: SectionMap) -> Self {
        map.sections
    }
}

impl SectionMap {
    pub fn get(&self, label: SectionLabel) -> &str {
        self.sections.get(&label).map(String::as_str).unwrap_or("")
    }

    pub fn with_section(mut self, label: SectionLabel, text: impl Into<String>) -> Self {
        self.sections.insert(label, text.into().trim().to_string());
        self
    }

    pub fn is_present(&self, label: SectionLabel) -> bool {
        !self.get(label).trim().is_empty()
    }

    /// Sections in label order.
    pub fn iter(&self) -> impl Iterator<Item = (SectionLabel, &str)> {
        self.sections.iter().map(|(label, text)| (*label, text.as_str()))
    }

    pub fn present_labels(&self) -> Vec<SectionLabel> {
        self.iter()
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(label, _)| label)
            .collect()
    }

    pub fn total_word_count(&self) -> usize {
        self.sections
            .values()
            .map(|text| text.split_whitespace().count())
            .sum()
    }
}

/// Splits raw resume text into labeled sections using header-line heuristics
pub struct SectionSegmenter {
    header_patterns: Vec<(SectionLabel, Regex)>,
}

impl Default for SectionSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionSegmenter {
    pub fn new() -> Self {
        // Order matters: the first matching pattern wins.
        let table = [
            (SectionLabel::Contact, r"(?i)(email|phone|address|linkedin|github)"),
            (SectionLabel::Summary, r"(?i)(summary|profile|objective|about)"),
            (SectionLabel::Experience, r"(?i)(experience|work|employment|career|professional)"),
            (SectionLabel::Education, r"(?i)(education|academic|degree|university|college)"),
            (SectionLabel::Skills, r"(?i)(skills|technical|competencies|expertise|technologies)"),
            (SectionLabel::Projects, r"(?i)(projects|portfolio|work samples)"),
            (SectionLabel::Certifications, r"(?i)(certifications|certificates|licenses)"),
            (SectionLabel::Achievements, r"(?i)(achievements|awards|honors|accomplishments)"),
        ];

        let header_patterns = table
            .iter()
            .map(|(label, pattern)| (*label, Regex::new(pattern).expect("Invalid section header regex")))
            .collect();

        Self { header_patterns }
    }

    /// Partition the non-blank lines of `text` into sections.
    pub fn segment(&self, text: &str) -> SectionMap {
        let mut buckets: BTreeMap<SectionLabel, Vec<&str>> = SectionLabel::ALL
            .iter()
            .map(|label| (*label, Vec::new()))
            .collect();
        let mut current = SectionLabel::Other;

        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            match self.detect_header(trimmed) {
                Some(label) => {
                    log::trace!("Section header '{}' -> {}", trimmed, label);
                    current = label;
                }
                None => buckets.entry(current).or_default().push(line),
            }
        }

        let sections = buckets
            .into_iter()
            .map(|(label, lines)| (label, lines.join("\n").trim().to_string()))
            .collect();

        SectionMap { sections }
    }

    /// Header label for a trimmed, non-empty line, if it looks like one.
    pub fn detect_header(&self, trimmed: &str) -> Option<SectionLabel> {
        if trimmed.chars().count() >= HEADER_MAX_CHARS {
            return None;
        }

        self.header_patterns
            .iter()
            .find(|(_, pattern)| pattern.is_match(trimmed))
            .map(|(label, _)| *label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Smith\njane@example.com\n\nSummary\nBackend developer focused on reliable services.\n\nExperience\nSenior Engineer at Acme Corp\nLed migration of billing to Rust\n\nEducation\nB.Sc. Computer Science\n\nSkills\nRust, Python, SQL";

    #[test]
    fn test_every_label_present() {
        let sections = SectionSegmenter::new().segment("");
        for label in SectionLabel::ALL {
            assert_eq!(sections.get(label), "");
        }
        assert_eq!(sections.iter().count(), 9);
    }

    #[test]
    fn test_section_detection() {
        let sections = SectionSegmenter::new().segment(RESUME);

        assert_eq!(sections.get(SectionLabel::Other), "Jane Smith\njane@example.com");
        assert_eq!(sections.get(SectionLabel::Summary), "Backend developer focused on reliable services.");
        assert_eq!(
            sections.get(SectionLabel::Experience),
            "Senior Engineer at Acme Corp\nLed migration of billing to Rust"
        );
        assert_eq!(sections.get(SectionLabel::Education), "B.Sc. Computer Science");
        assert_eq!(sections.get(SectionLabel::Skills), "Rust, Python, SQL");
        assert!(!sections.is_present(SectionLabel::Projects));
    }

    #[test]
    fn test_long_lines_are_not_headers() {
        let segmenter = SectionSegmenter::new();
        let line = "Five years of experience building distributed payment systems";
        assert!(line.chars().count() >= HEADER_MAX_CHARS);
        assert_eq!(segmenter.detect_header(line), None);
        assert_eq!(segmenter.detect_header("Work Experience"), Some(SectionLabel::Experience));
    }

    #[test]
    fn test_first_pattern_wins() {
        let segmenter = SectionSegmenter::new();
        // "professional" (experience) is checked before "skills"
        assert_eq!(segmenter.detect_header("Professional Skills"), Some(SectionLabel::Experience));
        // "profile" (summary) is checked before "experience"
        assert_eq!(segmenter.detect_header("Profile and Experience"), Some(SectionLabel::Summary));
        assert_eq!(segmenter.detect_header("GitHub"), Some(SectionLabel::Contact));
    }

    #[test]
    fn test_no_headers_goes_to_other() {
        let text = "Just some plain text without any section keywords in it at all really\nSecond line of body";
        let sections = SectionSegmenter::new().segment(text);
        assert_eq!(sections.get(SectionLabel::Other), text);
        assert_eq!(sections.present_labels(), vec![SectionLabel::Other]);
    }

    #[test]
    fn test_segmentation_is_a_partition() {
        let segmenter = SectionSegmenter::new();
        let sections = segmenter.segment(RESUME);

        let mut body_lines = Vec::new();
        let mut encounter_order = vec![SectionLabel::Other];
        let mut expected: BTreeMap<SectionLabel, Vec<&str>> = BTreeMap::new();
        let mut current = SectionLabel::Other;
        for line in RESUME.lines().map(str::trim).filter(|l| !l.is_empty()) {
            match segmenter.detect_header(line) {
                Some(label) => {
                    current = label;
                    if !encounter_order.contains(&label) {
                        encounter_order.push(label);
                    }
                }
                None => {
                    body_lines.push(line);
                    expected.entry(current).or_default().push(line);
                }
            }
        }

        for label in SectionLabel::ALL {
            let actual: Vec<&str> = sections.get(label).lines().map(str::trim).collect();
            let wanted = expected.get(&label).cloned().unwrap_or_default();
            assert_eq!(actual, wanted, "section {}", label);
        }

        let concatenated: Vec<&str> = encounter_order
            .iter()
            .map(|label| sections.get(*label))
            .filter(|text| !text.is_empty())
            .flat_map(str::lines)
            .map(str::trim)
            .collect();
        assert_eq!(concatenated, body_lines);
    }

    #[test]
    fn test_deserialize_fills_missing_labels() {
        let json = r#"{"skills": "  Rust  "}"#;
        let sections: SectionMap = serde_json::from_str(json).unwrap();
        assert_eq!(sections.get(SectionLabel::Skills), "Rust");
        assert_eq!(sections.iter().count(), 9);
    }

    #[test]
    fn test_total_word_count() {
        let sections = SectionMap::default()
            .with_section(SectionLabel::Summary, "one two three")
            .with_section(SectionLabel::Skills, "four five");
        assert_eq!(sections.total_word_count(), 5);
    }
}
