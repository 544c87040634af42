//! TF-IDF cosine similarity between a resume and a job description

use crate::processing::text_processor::TextProcessor;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimilarityError {
    #[error("cannot vectorize an empty document")]
    EmptyDocument,

    #[error("empty vocabulary; documents only contain stop words")]
    EmptyVocabulary,
}

/// Vectorizes a two-document corpus with smoothed TF-IDF and compares the vectors
pub struct TfIdfSimilarity {
    processor: TextProcessor,
    max_features: usize,
}

impl Default for TfIdfSimilarity {
    fn default() -> Self {
        Self::new()
    }
}

impl TfIdfSimilarity {
    pub const DEFAULT_MAX_FEATURES: usize = 1000;

    pub fn new() -> Self {
        Self::with_max_features(Self::DEFAULT_MAX_FEATURES)
    }

    pub fn with_max_features(max_features: usize) -> Self {
        Self {
            processor: TextProcessor::new(),
            max_features: max_features.max(1),
        }
    }

    /// Cosine similarity in 0.0..=1.0
    pub fn cosine(&self, first: &str, second: &str) -> Result<f32, SimilarityError> {
        if first.trim().is_empty() || second.trim().is_empty() {
            return Err(SimilarityError::EmptyDocument);
        }

        let first_counts = self.term_counts(first);
        let second_counts = self.term_counts(second);

        let vocabulary = self.select_features(&first_counts, &second_counts);
        if vocabulary.is_empty() {
            return Err(SimilarityError::EmptyVocabulary);
        }

        let first_vector = Self::weigh(&vocabulary, &first_counts);
        let second_vector = Self::weigh(&vocabulary, &second_counts);

        let first_norm = norm(&first_vector);
        let second_norm = norm(&second_vector);
        if first_norm == 0.0 || second_norm == 0.0 {
            return Ok(0.0);
        }

        let dot: f64 = first_vector
            .iter()
            .zip(second_vector.iter())
            .map(|(a, b)| a * b)
            .sum();

        Ok(((dot / (first_norm * second_norm)) as f32).clamp(0.0, 1.0))
    }

    fn term_counts(&self, text: &str) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for token in self.processor.tokenize(text) {
            *counts.entry(token).or_insert(0) += 1;
        }
        counts
    }

    /// Terms with their smoothed idf, capped to the most frequent `max_features`.
    fn select_features(
        &self,
        first: &BTreeMap<String, usize>,
        second: &BTreeMap<String, usize>,
    ) -> Vec<(String, f64)> {
        let mut corpus: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for counts in [first, second] {
            for (term, count) in counts {
                let entry = corpus.entry(term.as_str()).or_insert((0, 0));
                entry.0 += count;
                entry.1 += 1;
            }
        }

        let mut terms: Vec<(&str, usize, usize)> = corpus
            .into_iter()
            .map(|(term, (frequency, document_frequency))| (term, frequency, document_frequency))
            .collect();

        // Highest corpus frequency first, ties alphabetical
        terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        terms.truncate(self.max_features);

        let documents = 2.0_f64;
        terms
            .into_iter()
            .map(|(term, _, document_frequency)| {
                let idf = ((1.0 + documents) / (1.0 + document_frequency as f64)).ln() + 1.0;
                (term.to_string(), idf)
            })
            .collect()
    }

    fn weigh(vocabulary: &[(String, f64)], counts: &BTreeMap<String, usize>) -> Vec<f64> {
        vocabulary
            .iter()
            .map(|(term, idf)| counts.get(term).copied().unwrap_or(0) as f64 * idf)
            .collect()
    }
}

fn norm(vector: &[f64]) -> f64 {
    vector.iter().map(|v| v * v).sum::<f64>().sqrt()
}
