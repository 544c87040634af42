//! Contact details, experience estimate and text statistics pulled from a resume

use crate::processing::text_processor::{non_blank_line_count, word_count};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Year spans at or beyond this are treated as noise rather than a career
const MAX_PLAUSIBLE_CAREER_YEARS: u32 = 50;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.phone.is_none() && self.linkedin.is_none() && self.github.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStatistics {
    pub total_lines: usize,
    pub total_words: usize,
    pub total_characters: usize,
    pub non_empty_lines: usize,
    pub average_words_per_line: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeFacts {
    pub contact: ContactInfo,
    pub experience_years: u32,
    pub statistics: TextStatistics,
}

pub struct FactExtractor {
    email: Regex,
    phone: Regex,
    linkedin: Regex,
    github: Regex,
    experience_phrases: Vec<Regex>,
    year: Regex,
}

impl Default for FactExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FactExtractor {
    pub fn new() -> Self {
        let compile = |pattern: &str| Regex::new(pattern).expect("Invalid resume fact regex");

        Self {
            email: compile(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b"),
            phone: compile(r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}"),
            linkedin: compile(r"linkedin\.com/in/[\w-]+"),
            github: compile(r"github\.com/[\w-]+"),
            experience_phrases: [
                r"(\d+)\+?\s*years?\s*(?:of\s*)?(?:experience|exp)",
                r"(\d+)\+?\s*yrs?\s*(?:of\s*)?(?:experience|exp)",
                r"experience.*?(\d+)\+?\s*years?",
                r"(\d+)\+?\s*years?\s*in",
            ]
            .iter()
            .map(|p| compile(p))
            .collect(),
            year: compile(r"\b(?:19|20)\d{2}\b"),
        }
    }

    pub fn extract(&self, text: &str) -> ResumeFacts {
        ResumeFacts {
            contact: self.contact_info(text),
            experience_years: self.experience_years(text),
            statistics: statistics(text),
        }
    }

    pub fn contact_info(&self, text: &str) -> ContactInfo {
        let lowered = text.to_lowercase();
        let first = |re: &Regex, haystack: &str| re.find(haystack).map(|m| m.as_str().trim().to_string());

        ContactInfo {
            email: first(&self.email, text),
            phone: first(&self.phone, text),
            linkedin: first(&self.linkedin, &lowered),
            github: first(&self.github, &lowered),
        }
    }

    /// Largest of the stated "N years" figures and the span between the
    /// earliest and latest four-digit year mentioned.
    pub fn experience_years(&self, text: &str) -> u32 {
        let lowered = text.to_lowercase();

        let stated = self
            .experience_phrases
            .iter()
            .flat_map(|re| re.captures_iter(&lowered))
            .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok());

        let years: Vec<u32> = self
            .year
            .find_iter(text)
            .filter_map(|m| m.as_str().parse().ok())
            .collect();
        let span = match (years.iter().min(), years.iter().max()) {
            (Some(min), Some(max)) if max - min > 0 && max - min < MAX_PLAUSIBLE_CAREER_YEARS => Some(max - min),
            _ => None,
        };

        stated.chain(span).max().unwrap_or(0)
    }
}

pub fn statistics(text: &str) -> TextStatistics {
    let total_words = word_count(text);
    let non_empty_lines = non_blank_line_count(text);

    TextStatistics {
        total_lines: text.split('\n').count(),
        total_words,
        total_characters: text.chars().count(),
        non_empty_lines,
        average_words_per_line: total_words as f32 / non_empty_lines.max(1) as f32,
    }
}
