//! Feedback data model.
//!
//! # Purpose
//! Re-exports the persisted feedback record and the aggregate views computed
//! over it, shared by the store and HTTP API layers.
mod feedback;

pub use feedback::{
    FeedbackRecord, KeywordCount, NewFeedback, SentimentCounts, UNKNOWN_EMOTION,
};
