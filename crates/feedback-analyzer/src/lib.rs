//! Text analysis for free-text feedback.
//!
//! # Purpose
//! Scores a piece of feedback for polarity, dominant emotion, and keywords.
//! The service only depends on the [`TextAnalyzer`] trait; [`LexiconAnalyzer`]
//! is the default engine and composes three independent capabilities:
//! - [`PolarityScorer`]: prior-polarity word list with negation and intensifiers.
//! - [`EmotionLexicon`]: word to emotion-category tallies.
//! - [`PhraseExtractor`]: noun-phrase chunking with a token-frequency fallback.
//!
//! # Key invariants
//! - Sentiment scores are always within `[-1.0, 1.0]`.
//! - Labels follow the fixed thresholds in [`SentimentLabel::from_score`].
//! - At most [`MAX_KEYWORDS`] keywords are returned, most frequent first.
//! - Analysis is a pure function of the input text.
mod emotion;
mod phrases;
mod polarity;
mod tokenize;

pub use emotion::EmotionLexicon;
pub use phrases::PhraseExtractor;
pub use polarity::PolarityScorer;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scores strictly above this are labelled positive.
pub const POSITIVE_THRESHOLD: f64 = 0.1;
/// Scores strictly below this are labelled negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.1;
pub const MAX_KEYWORDS: usize = 8;
/// Emotion reported when the text carries no emotion signal.
pub const NEUTRAL_EMOTION: &str = "neutral";

#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("analyzer unavailable: {0}")]
    Unavailable(String),
    #[error("unknown sentiment label: {0}")]
    UnknownLabel(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Neutral,
        SentimentLabel::Negative,
    ];

    pub fn from_score(score: f64) -> Self {
        if score > POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if score < NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = AnalyzerError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "positive" => Ok(SentimentLabel::Positive),
            "neutral" => Ok(SentimentLabel::Neutral),
            "negative" => Ok(SentimentLabel::Negative),
            other => Err(AnalyzerError::UnknownLabel(other.to_string())),
        }
    }
}

/// Result of analyzing one piece of feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
    pub emotion: String,
    pub keywords: Vec<String>,
}

/// Scores feedback text.
///
/// Implementations must be pure: the same input always yields the same
/// [`Analysis`]. Engines backed by something that can go away report
/// [`AnalyzerError::Unavailable`].
pub trait TextAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> Result<Analysis, AnalyzerError>;
}

/// Default analyzer built from embedded word lists. Never fails.
#[derive(Debug, Clone, Default)]
pub struct LexiconAnalyzer {
    polarity: PolarityScorer,
    emotions: EmotionLexicon,
    phrases: PhraseExtractor,
}

impl LexiconAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextAnalyzer for LexiconAnalyzer {
    fn analyze(&self, text: &str) -> Result<Analysis, AnalyzerError> {
        let sentiment_score = self.polarity.score(text);
        Ok(Analysis {
            sentiment_score,
            sentiment_label: SentimentLabel::from_score(sentiment_score),
            emotion: self.emotions.dominant(text),
            keywords: self.phrases.keywords(text, MAX_KEYWORDS),
        })
    }
}
