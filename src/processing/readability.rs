//! Flesch reading-ease scoring

use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextCounts {
    pub words: usize,
    pub sentences: usize,
    pub syllables: usize,
}

pub fn text_counts(text: &str) -> TextCounts {
    let words: Vec<&str> = text.unicode_words().collect();
    let syllables = words.iter().map(|w| count_syllables(w)).sum();

    let sentences = text
        .unicode_sentences()
        .filter(|s| s.unicode_words().next().is_some())
        .count()
        .max(1);

    TextCounts {
        words: words.len(),
        sentences,
        syllables,
    }
}

/// Flesch reading ease, rounded to two decimals.
///
/// Higher is easier. The formula is unbounded; typical prose lands in 0..=100.
/// Text without any words scores 0.0.
pub fn flesch_reading_ease(text: &str) -> f32 {
    let counts = text_counts(text);
    if counts.words == 0 {
        return 0.0;
    }

    let words = counts.words as f64;
    let words_per_sentence = words / counts.sentences as f64;
    let syllables_per_word = counts.syllables as f64 / words;

    let score = 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word;
    ((score * 100.0).round() / 100.0) as f32
}

/// Vowel-group syllable estimate; every word has at least one syllable.
pub fn count_syllables(word: &str) -> usize {
    let lowered: Vec<char> = word
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphabetic())
        .collect();

    if lowered.is_empty() {
        return 1;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');

    let mut groups = 0;
    let mut previous_vowel = false;
    for &c in &lowered {
        let vowel = is_vowel(c);
        if vowel && !previous_vowel {
            groups += 1;
        }
        previous_vowel = vowel;
    }

    // Silent trailing "e" ("make"), but not "-le" ("table")
    let len = lowered.len();
    if groups > 1 && lowered[len - 1] == 'e' && !(len >= 2 && lowered[len - 2] == 'l') {
        groups -= 1;
    }

    groups.max(1)
}
