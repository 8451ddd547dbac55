//! Feedback records and aggregate views.
//!
//! # Purpose
//! Defines the persisted record shape (one per submission) and the summary
//! types produced by aggregation queries.
//!
//! # Key invariants
//! - Records are immutable once stored; `created_at` is set before insertion.
//! - `id` is assigned by the store, never by callers.
use chrono::{DateTime, Utc};
use feedback_analyzer::{Analysis, SentimentLabel};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Emotion bucket used when a record carries an empty emotion.
pub const UNKNOWN_EMOTION: &str = "unknown";

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct FeedbackRecord {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub feedback: String,
    pub rating: i64,
    pub sentiment_score: f64,
    #[schema(value_type = String, example = "positive")]
    pub sentiment_label: SentimentLabel,
    pub emotion: String,
    pub keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// A validated, analyzed submission waiting for the store to assign identity.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFeedback {
    pub name: String,
    pub email: String,
    pub feedback: String,
    pub rating: i64,
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
    pub emotion: String,
    pub keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl NewFeedback {
    pub fn new(
        name: String,
        email: String,
        feedback: String,
        rating: i64,
        analysis: Analysis,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name,
            email,
            feedback,
            rating,
            sentiment_score: analysis.sentiment_score,
            sentiment_label: analysis.sentiment_label,
            emotion: analysis.emotion,
            keywords: analysis.keywords,
            created_at,
        }
    }

    pub fn into_record(self, id: Uuid) -> FeedbackRecord {
        FeedbackRecord {
            id,
            name: self.name,
            email: self.email,
            feedback: self.feedback,
            rating: self.rating,
            sentiment_score: self.sentiment_score,
            sentiment_label: self.sentiment_label,
            emotion: self.emotion,
            keywords: self.keywords,
            created_at: self.created_at,
        }
    }
}

/// Record count per sentiment label. Labels with no records report zero.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentCounts {
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
}

impl SentimentCounts {
    pub fn add(&mut self, label: SentimentLabel, count: u64) {
        match label {
            SentimentLabel::Positive => self.positive += count,
            SentimentLabel::Neutral => self.neutral += count,
            SentimentLabel::Negative => self.negative += count,
        }
    }

    pub fn total(&self) -> u64 {
        self.positive + self.neutral + self.negative
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis() -> Analysis {
        Analysis {
            sentiment_score: 0.75,
            sentiment_label: SentimentLabel::Positive,
            emotion: "joy".to_string(),
            keywords: vec!["wonderful".to_string()],
        }
    }

    #[test]
    fn record_serializes_store_identity_as_underscore_id() {
        let created_at = Utc::now();
        let id = Uuid::new_v4();
        let record = NewFeedback::new(
            "Al".to_string(),
            "a@x.com".to_string(),
            "This is wonderful".to_string(),
            5,
            analysis(),
            created_at,
        )
        .into_record(id);
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["_id"], id.to_string());
        assert_eq!(json["sentiment_label"], "positive");
        assert_eq!(json["rating"], 5);
        assert_eq!(json["keywords"][0], "wonderful");
        assert!(json.get("id").is_none());
        let back: FeedbackRecord = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, record);
    }

    #[test]
    fn sentiment_counts_accumulate_per_label() {
        let mut counts = SentimentCounts::default();
        counts.add(SentimentLabel::Positive, 2);
        counts.add(SentimentLabel::Negative, 1);
        counts.add(SentimentLabel::Positive, 1);
        assert_eq!(
            counts,
            SentimentCounts {
                positive: 3,
                neutral: 0,
                negative: 1
            }
        );
        assert_eq!(counts.total(), 4);
    }
}
