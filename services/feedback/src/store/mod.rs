//! Feedback storage.
//!
//! # Purpose
//! Defines the [`FeedbackStore`] contract shared by the in-memory and Postgres
//! backends. The store owns record identity and persistence; handlers receive
//! an explicitly constructed handle through application state.
//!
//! # Key invariants
//! - `insert` is atomic per record; there are no cross-record transactions.
//! - Aggregations are read-only and computed per call from current contents.
//! - Keyword ties are broken by keyword in ascending byte order.
//! - `recent` orders by `created_at` descending; equal timestamps list the
//!   most recently inserted record first.
use crate::model::{FeedbackRecord, KeywordCount, NewFeedback, SentimentCounts};
use async_trait::async_trait;
use std::collections::BTreeMap;
use thiserror::Error;

pub mod memory;
pub mod postgres;

#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Logical collection that reads and writes are scoped to.
    pub collection: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store is closed")]
    Closed,
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait FeedbackStore: Send + Sync {
    async fn insert(&self, feedback: NewFeedback) -> StoreResult<FeedbackRecord>;

    async fn sentiment_counts(&self) -> StoreResult<SentimentCounts>;
    /// Record count per emotion; empty emotions are bucketed as `unknown`.
    async fn emotion_counts(&self) -> StoreResult<BTreeMap<String, u64>>;
    /// Keyword occurrence counts across all records, highest first.
    async fn top_keywords(&self, limit: usize) -> StoreResult<Vec<KeywordCount>>;
    async fn recent(&self, limit: usize) -> StoreResult<Vec<FeedbackRecord>>;
    async fn count(&self) -> StoreResult<u64>;

    async fn health_check(&self) -> StoreResult<()>;
    /// Release backend resources. Later calls fail with [`StoreError::Closed`]
    /// or a backend error.
    async fn close(&self);
    fn collection(&self) -> &str;
    fn is_durable(&self) -> bool;
    fn backend_name(&self) -> &'static str;
}
