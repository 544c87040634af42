//! Presentation helpers shared by the report formatters

use crate::processing::analyzer::AnalysisReport;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceTier {
    Excellent,
    Good,
    Moderate,
    NeedsImprovement,
}

impl PerformanceTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            85..=u8::MAX => PerformanceTier::Excellent,
            70..=84 => PerformanceTier::Good,
            50..=69 => PerformanceTier::Moderate,
            _ => PerformanceTier::NeedsImprovement,
        }
    }

    fn advice(&self) -> &'static str {
        match self {
            PerformanceTier::Excellent => "Your resume is highly competitive and well-aligned with the target role.",
            PerformanceTier::Good => "Your resume shows strong potential with room for targeted improvements.",
            PerformanceTier::Moderate => "Your resume needs significant improvements to be competitive.",
            PerformanceTier::NeedsImprovement => "Your resume requires substantial revision to meet job requirements.",
        }
    }
}

impl fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerformanceTier::Excellent => write!(f, "excellent"),
            PerformanceTier::Good => write!(f, "good"),
            PerformanceTier::Moderate => write!(f, "moderate"),
            PerformanceTier::NeedsImprovement => write!(f, "needs improvement"),
        }
    }
}

/// One row of the score breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreLine {
    pub name: &'static str,
    pub score: f32,
    pub weight: f32,
}

pub fn score_breakdown(report: &AnalysisReport) -> Vec<ScoreLine> {
    let names = ["Skills Match", "Content Similarity", "Keyword Optimization", "Readability", "Section Completeness"];

    names
        .into_iter()
        .zip(report.result.components.values())
        .zip(report.scoring.weights())
        .map(|((name, score), weight)| ScoreLine { name, score, weight })
        .collect()
}

/// Two-sentence verdict on how well the resume fits the target.
pub fn executive_summary(report: &AnalysisReport) -> String {
    let score = report.result.overall_score;
    let tier = PerformanceTier::from_score(score);

    format!(
        "Your resume demonstrates {} alignment with the target role, achieving an overall score of {}/100. \
         With a {:.1}% skill match rate, {} Focus on the recommendations below to enhance your \
         competitiveness and improve your chances of securing interviews.",
        tier,
        score,
        report.result.skill_match_percentage,
        tier.advice()
    )
}

/// Comma-joined list, or a placeholder when there is nothing to show
pub fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None identified".to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers() {
        assert_eq!(PerformanceTier::from_score(100), PerformanceTier::Excellent);
        assert_eq!(PerformanceTier::from_score(85), PerformanceTier::Excellent);
        assert_eq!(PerformanceTier::from_score(70), PerformanceTier::Good);
        assert_eq!(PerformanceTier::from_score(50), PerformanceTier::Moderate);
        assert_eq!(PerformanceTier::from_score(0), PerformanceTier::NeedsImprovement);
    }

    #[test]
    fn test_join_or_none() {
        assert_eq!(join_or_none(&[]), "None identified");
        assert_eq!(join_or_none(&["Rust".to_string(), "SQL".to_string()]), "Rust, SQL");
    }
}
