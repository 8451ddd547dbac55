//! Lexicon-based emotion tallies.
//!
//! Every word maps to zero or more emotion categories; the dominant emotion is
//! the category with the highest raw count. Ties go to the lexically smallest
//! category name so repeated runs always agree.
use crate::NEUTRAL_EMOTION;
use crate::tokenize;
use std::collections::{BTreeMap, HashMap};

const ANGER: &str = "anger";
const ANTICIPATION: &str = "anticipation";
const DISGUST: &str = "disgust";
const FEAR: &str = "fear";
const JOY: &str = "joy";
const NEGATIVE: &str = "negative";
const POSITIVE: &str = "positive";
const SADNESS: &str = "sadness";
const SURPRISE: &str = "surprise";
const TRUST: &str = "trust";

const ENTRIES: &[(&str, &[&str])] = &[
    ("abandoned", &[ANGER, FEAR, NEGATIVE, SADNESS]),
    ("angry", &[ANGER, DISGUST, NEGATIVE]),
    ("annoying", &[ANGER, NEGATIVE]),
    ("anxious", &[ANTICIPATION, FEAR, NEGATIVE]),
    ("awful", &[ANGER, DISGUST, FEAR, NEGATIVE, SADNESS]),
    ("bad", &[ANGER, DISGUST, FEAR, NEGATIVE, SADNESS]),
    ("beautiful", &[JOY, POSITIVE]),
    ("broken", &[ANGER, FEAR, NEGATIVE, SADNESS]),
    ("cheat", &[ANGER, DISGUST, NEGATIVE]),
    ("confusing", &[FEAR, NEGATIVE]),
    ("crash", &[FEAR, NEGATIVE, SADNESS, SURPRISE]),
    ("delay", &[ANGER, NEGATIVE, SADNESS]),
    ("delighted", &[ANTICIPATION, JOY, POSITIVE, SURPRISE]),
    ("disappointed", &[ANGER, DISGUST, NEGATIVE, SADNESS]),
    ("disappointing", &[DISGUST, NEGATIVE, SADNESS]),
    ("dirty", &[DISGUST, NEGATIVE]),
    ("enjoy", &[ANTICIPATION, JOY, POSITIVE, TRUST]),
    ("excellent", &[JOY, POSITIVE, TRUST]),
    ("excited", &[ANTICIPATION, JOY, POSITIVE, SURPRISE]),
    ("expensive", &[NEGATIVE]),
    ("fail", &[DISGUST, FEAR, NEGATIVE, SADNESS]),
    ("failure", &[DISGUST, FEAR, NEGATIVE, SADNESS]),
    ("fantastic", &[ANTICIPATION, JOY, POSITIVE, SURPRISE, TRUST]),
    ("fear", &[ANGER, FEAR, NEGATIVE]),
    ("friendly", &[ANTICIPATION, JOY, POSITIVE, TRUST]),
    ("fun", &[ANTICIPATION, JOY, POSITIVE]),
    ("glad", &[JOY, POSITIVE]),
    ("good", &[ANTICIPATION, JOY, POSITIVE, SURPRISE, TRUST]),
    ("great", &[JOY, POSITIVE]),
    ("happy", &[ANTICIPATION, JOY, POSITIVE, TRUST]),
    ("hate", &[ANGER, DISGUST, FEAR, NEGATIVE, SADNESS]),
    ("helpful", &[JOY, POSITIVE, TRUST]),
    ("hope", &[ANTICIPATION, JOY, POSITIVE, SURPRISE, TRUST]),
    ("horrible", &[ANGER, DISGUST, FEAR, NEGATIVE]),
    ("love", &[JOY, POSITIVE]),
    ("lovely", &[ANTICIPATION, JOY, POSITIVE, SADNESS, SURPRISE, TRUST]),
    ("mess", &[DISGUST, NEGATIVE]),
    ("nice", &[JOY, POSITIVE]),
    ("pain", &[FEAR, NEGATIVE, SADNESS]),
    ("perfect", &[ANTICIPATION, JOY, POSITIVE, TRUST]),
    ("pleasant", &[ANTICIPATION, JOY, POSITIVE, SURPRISE, TRUST]),
    ("problem", &[FEAR, NEGATIVE, SADNESS]),
    ("recommend", &[POSITIVE, TRUST]),
    ("refund", &[ANTICIPATION, POSITIVE, TRUST]),
    ("reliable", &[POSITIVE, TRUST]),
    ("rude", &[ANGER, DISGUST, NEGATIVE]),
    ("sad", &[NEGATIVE, SADNESS]),
    ("safe", &[JOY, POSITIVE, TRUST]),
    ("scam", &[ANGER, DISGUST, NEGATIVE]),
    ("slow", &[NEGATIVE]),
    ("smooth", &[POSITIVE]),
    ("sorry", &[NEGATIVE, SADNESS]),
    ("surprise", &[FEAR, JOY, POSITIVE, SURPRISE]),
    ("surprised", &[SURPRISE]),
    ("terrible", &[ANGER, DISGUST, FEAR, NEGATIVE, SADNESS]),
    ("thank", &[JOY, POSITIVE, TRUST]),
    ("trust", &[TRUST]),
    ("unexpected", &[ANTICIPATION, FEAR, JOY, NEGATIVE, POSITIVE, SURPRISE]),
    ("unhappy", &[ANGER, DISGUST, NEGATIVE, SADNESS]),
    ("useless", &[NEGATIVE]),
    ("wait", &[ANTICIPATION, NEGATIVE]),
    ("waste", &[DISGUST, NEGATIVE]),
    ("wonderful", &[JOY, POSITIVE, SURPRISE, TRUST]),
    ("worry", &[ANTICIPATION, FEAR, NEGATIVE, SADNESS]),
    ("worst", &[NEGATIVE]),
];

#[derive(Debug, Clone)]
pub struct EmotionLexicon {
    entries: HashMap<&'static str, &'static [&'static str]>,
}

impl Default for EmotionLexicon {
    fn default() -> Self {
        Self {
            entries: ENTRIES.iter().copied().collect(),
        }
    }
}

impl EmotionLexicon {
    /// Raw count per emotion category, keyed in lexical order.
    pub fn raw_scores(&self, text: &str) -> BTreeMap<&'static str, u32> {
        let mut scores = BTreeMap::new();
        for token in tokenize::tokens(text) {
            if let Some(categories) = self.lookup(&token.word) {
                for category in categories {
                    *scores.entry(*category).or_insert(0) += 1;
                }
            }
        }
        scores
    }

    /// Highest-scoring emotion, or [`NEUTRAL_EMOTION`] when nothing matched.
    pub fn dominant(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return NEUTRAL_EMOTION.to_string();
        }
        let mut best: Option<(&str, u32)> = None;
        // BTreeMap iterates lexically; strict `>` keeps the earliest on ties.
        for (category, count) in self.raw_scores(text) {
            if best.is_none_or(|(_, top)| count > top) {
                best = Some((category, count));
            }
        }
        best.map(|(category, _)| category.to_string())
            .unwrap_or_else(|| NEUTRAL_EMOTION.to_string())
    }

    fn lookup(&self, word: &str) -> Option<&'static [&'static str]> {
        self.entries.get(word).copied().or_else(|| {
            // Plural and third-person forms share the base entry.
            word.strip_suffix('s')
                .and_then(|base| self.entries.get(base).copied())
        })
    }
}
