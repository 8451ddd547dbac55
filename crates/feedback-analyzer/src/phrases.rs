//! Keyword extraction.
//!
//! Noun phrases are approximated as maximal runs of two or more content words
//! inside one clause ("great customer service"). When a text yields no such
//! run, keywords fall back to the most frequent long whitespace tokens.
use crate::tokenize;
use std::collections::{HashMap, HashSet};

/// Fallback tokens must be longer than this many characters before stripping.
const FALLBACK_MIN_CHARS: usize = 3;
const FALLBACK_STRIP: [char; 10] = ['.', ',', '!', '?', ':', ';', '(', ')', '[', ']'];

// Function words and very common verbs/adverbs never start or continue a phrase.
const STOPWORDS: &[&str] = &[
    "a", "about", "after", "again", "all", "also", "always", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "but", "by", "can", "could", "did",
    "do", "does", "doing", "done", "even", "ever", "every", "feel", "felt", "find", "for",
    "found", "from", "get", "gets", "got", "had", "has", "have", "he", "her", "here", "him",
    "his", "how", "i", "if", "in", "into", "is", "it", "its", "it's", "just", "keep", "know",
    "like", "liked", "love", "loved", "made", "make", "makes", "me", "more", "most", "much",
    "my", "need", "needs", "never", "no", "not", "now", "of", "off", "often", "on", "once",
    "only", "or", "other", "our", "out", "over", "please", "pretty", "quite", "really",
    "say", "see", "she", "should", "so", "some", "still", "such", "than", "that", "the",
    "their", "them", "then", "there", "these", "they", "think", "this", "those", "though",
    "through", "to", "too", "took", "try", "tried", "under", "until", "up", "us", "use",
    "used", "using", "very", "want", "was", "we", "well", "went", "were", "what", "when",
    "where", "which", "while", "who", "why", "will", "with", "without", "would", "yet", "you",
    "your",
];

#[derive(Debug, Clone)]
pub struct PhraseExtractor {
    stopwords: HashSet<&'static str>,
}

impl Default for PhraseExtractor {
    fn default() -> Self {
        Self {
            stopwords: STOPWORDS.iter().copied().collect(),
        }
    }
}

impl PhraseExtractor {
    /// Up to `max` keywords, most frequent first, ties in order of first appearance.
    pub fn keywords(&self, text: &str, max: usize) -> Vec<String> {
        let phrases = self.noun_phrases(text);
        let candidates = if phrases.is_empty() {
            fallback_tokens(text)
        } else {
            phrases
        };
        top_by_frequency(candidates, max)
    }

    /// Candidate noun phrases in order of appearance, duplicates included.
    pub fn noun_phrases(&self, text: &str) -> Vec<String> {
        let mut phrases = Vec::new();
        let mut run: Vec<String> = Vec::new();
        for token in tokenize::tokens(text) {
            if self.is_content(&token.word) {
                run.push(token.word);
            } else {
                flush(&mut run, &mut phrases);
            }
            if token.ends_clause {
                flush(&mut run, &mut phrases);
            }
        }
        flush(&mut run, &mut phrases);
        phrases
    }

    fn is_content(&self, word: &str) -> bool {
        word.chars().count() >= 2
            && word.chars().all(|c| c.is_alphabetic() || c == '-')
            && !self.stopwords.contains(word)
    }
}

fn flush(run: &mut Vec<String>, phrases: &mut Vec<String>) {
    if run.len() >= 2 {
        phrases.push(run.join(" "));
    }
    run.clear();
}

fn fallback_tokens(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter(|word| word.chars().count() > FALLBACK_MIN_CHARS)
        .map(|word| {
            word.to_lowercase()
                .trim_matches(FALLBACK_STRIP)
                .to_string()
        })
        .filter(|word| !word.is_empty())
        .collect()
}

fn top_by_frequency(candidates: Vec<String>, max: usize) -> Vec<String> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for candidate in candidates {
        match index.get(&candidate) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(candidate.clone(), counts.len());
                counts.push((candidate, 1));
            }
        }
    }
    // Stable sort keeps first-appearance order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(max).map(|(word, _)| word).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_multi_word_phrases_within_clauses() {
        let extractor = PhraseExtractor::default();
        let phrases =
            extractor.noun_phrases("Great customer service, fast delivery. The mobile app crashes");
        assert_eq!(
            phrases,
            ["great customer service", "fast delivery", "mobile app crashes"]
        );
    }

    #[test]
    fn clause_boundary_splits_runs() {
        let extractor = PhraseExtractor::default();
        assert!(extractor.noun_phrases("Pricing. Support").is_empty());
    }

    #[test]
    fn falls_back_to_long_tokens() {
        let extractor = PhraseExtractor::default();
        let keywords = extractor.keywords("This is wonderful, I love it!", 8);
        assert_eq!(keywords, ["this", "wonderful", "love"]);
    }

    #[test]
    fn fallback_strips_both_ends_and_counts() {
        let extractor = PhraseExtractor::default();
        let keywords = extractor.keywords("(Slow). slow, SLOW! okay. fine.", 8);
        assert_eq!(keywords, ["slow", "okay", "fine"]);
    }

    #[test]
    fn ranks_by_frequency_then_first_appearance() {
        let extractor = PhraseExtractor::default();
        let keywords = extractor.keywords(
            "checkout page. delivery time. checkout page. support team. delivery time. checkout page",
            8,
        );
        assert_eq!(keywords, ["checkout page", "delivery time", "support team"]);
    }

    #[test]
    fn caps_keyword_count() {
        let extractor = PhraseExtractor::default();
        let text = "alpha beta, gamma delta, epsilon zeta, eta theta, iota kappa, \
                    lambda omicron, sigma tau, upsilon phi, omega psi";
        let keywords = extractor.keywords(text, 8);
        assert_eq!(keywords.len(), 8);
        assert_eq!(keywords[0], "alpha beta");
    }
}
