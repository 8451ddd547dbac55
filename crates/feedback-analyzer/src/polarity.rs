//! Prior-polarity sentiment scoring.
//!
//! Each known word contributes its prior score. A preceding intensifier scales
//! it, and a negation within the previous [`NEGATION_WINDOW`] tokens of the
//! same clause flips and dampens it. The text score is the mean contribution.
use crate::tokenize::{self, Token};
use std::collections::{HashMap, HashSet};

const NEGATION_WINDOW: usize = 3;
const NEGATION_FACTOR: f64 = -0.5;

const PRIORS: &[(&str, f64)] = &[
    // positive
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("better", 0.5),
    ("brilliant", 0.9),
    ("clean", 0.37),
    ("clear", 0.1),
    ("comfortable", 0.4),
    ("convenient", 0.5),
    ("delighted", 0.7),
    ("easy", 0.43),
    ("efficient", 0.6),
    ("enjoy", 0.4),
    ("enjoyed", 0.4),
    ("excellent", 1.0),
    ("fantastic", 0.4),
    ("fast", 0.2),
    ("fine", 0.42),
    ("friendly", 0.38),
    ("fun", 0.3),
    ("glad", 0.5),
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("helpful", 0.5),
    ("impressive", 1.0),
    ("intuitive", 0.5),
    ("like", 0.2),
    ("liked", 0.3),
    ("love", 0.5),
    ("loved", 0.7),
    ("lovely", 0.5),
    ("nice", 0.6),
    ("perfect", 1.0),
    ("pleasant", 0.73),
    ("polite", 0.4),
    ("quick", 0.33),
    ("recommend", 0.4),
    ("reliable", 0.5),
    ("satisfied", 0.5),
    ("simple", 0.1),
    ("smooth", 0.4),
    ("superb", 1.0),
    ("thank", 0.3),
    ("thanks", 0.2),
    ("useful", 0.3),
    ("wonderful", 1.0),
    // negative
    ("angry", -0.5),
    ("annoying", -0.8),
    ("awful", -1.0),
    ("bad", -0.7),
    ("boring", -1.0),
    ("broken", -0.4),
    ("buggy", -0.6),
    ("confusing", -0.3),
    ("crash", -0.6),
    ("crashes", -0.6),
    ("difficult", -0.5),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
    ("dirty", -0.6),
    ("expensive", -0.5),
    ("fail", -0.5),
    ("failed", -0.5),
    ("frustrating", -0.4),
    ("hard", -0.29),
    ("hate", -0.8),
    ("horrible", -1.0),
    ("late", -0.3),
    ("poor", -0.4),
    ("problem", -0.4),
    ("rude", -0.3),
    ("sad", -0.5),
    ("slow", -0.3),
    ("terrible", -1.0),
    ("ugly", -0.7),
    ("unhappy", -0.6),
    ("unreliable", -0.5),
    ("useless", -0.5),
    ("waste", -0.6),
    ("worse", -0.4),
    ("worst", -1.0),
    ("wrong", -0.5),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("absolutely", 1.5),
    ("extremely", 1.5),
    ("fairly", 0.8),
    ("incredibly", 1.5),
    ("quite", 1.1),
    ("really", 1.3),
    ("slightly", 0.5),
    ("so", 1.2),
    ("somewhat", 0.7),
    ("super", 1.4),
    ("too", 1.2),
    ("totally", 1.4),
    ("very", 1.3),
];

const NEGATIONS: &[&str] = &[
    "barely", "cannot", "hardly", "neither", "never", "no", "nobody", "none", "nor", "not",
    "nothing", "without",
];

#[derive(Debug, Clone)]
pub struct PolarityScorer {
    priors: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
    negations: HashSet<&'static str>,
}

impl Default for PolarityScorer {
    fn default() -> Self {
        Self {
            priors: PRIORS.iter().copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
            negations: NEGATIONS.iter().copied().collect(),
        }
    }
}

impl PolarityScorer {
    /// Polarity of `text` in `[-1.0, 1.0]`; `0.0` when no sentiment word is present.
    pub fn score(&self, text: &str) -> f64 {
        let tokens = tokenize::tokens(text);
        let mut total = 0.0;
        let mut hits = 0usize;
        for (idx, token) in tokens.iter().enumerate() {
            let Some(&prior) = self.priors.get(token.word.as_str()) else {
                continue;
            };
            let mut value = prior;
            if let Some(previous) = idx.checked_sub(1).map(|i| &tokens[i]) {
                if !previous.ends_clause {
                    if let Some(&factor) = self.intensifiers.get(previous.word.as_str()) {
                        value = (value * factor).clamp(-1.0, 1.0);
                    }
                }
            }
            if self.negated(&tokens, idx) {
                value *= NEGATION_FACTOR;
            }
            total += value;
            hits += 1;
        }
        if hits == 0 {
            return 0.0;
        }
        (total / hits as f64).clamp(-1.0, 1.0)
    }

    fn negated(&self, tokens: &[Token], idx: usize) -> bool {
        let start = idx.saturating_sub(NEGATION_WINDOW);
        for token in tokens[start..idx].iter().rev() {
            if token.ends_clause {
                return false;
            }
            if self.is_negation(&token.word) {
                return true;
            }
        }
        false
    }

    fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word) || word.ends_with("n't")
    }
}
