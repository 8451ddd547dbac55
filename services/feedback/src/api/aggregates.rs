//! Read-only aggregate views over stored feedback.
//!
//! Every view is computed from the store on each request; nothing is cached.
use crate::api::error::{ApiError, api_internal};
use crate::api::types::EmotionCounts;
use crate::app::AppState;
use crate::model::{FeedbackRecord, KeywordCount, SentimentCounts};
use axum::Json;
use axum::extract::State;

pub const TOP_KEYWORDS_LIMIT: usize = 20;
pub const RECENT_FEEDBACK_LIMIT: usize = 20;

#[utoipa::path(
    get,
    path = "/get_feedback_counts",
    tag = "feedback",
    responses(
        (status = 200, description = "Record count per sentiment label", body = SentimentCounts),
        (status = 500, description = "Storage failure", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_feedback_counts(
    State(state): State<AppState>,
) -> Result<Json<SentimentCounts>, ApiError> {
    let counts = state
        .store
        .sentiment_counts()
        .await
        .map_err(|err| api_internal("failed to count feedback", &err))?;
    tracing::debug!(
        total = counts.total(),
        positive = counts.positive,
        negative = counts.negative,
        "sentiment counts computed"
    );
    Ok(Json(counts))
}

#[utoipa::path(
    get,
    path = "/get_emotion_counts",
    tag = "feedback",
    responses(
        (status = 200, description = "Record count per emotion", body = EmotionCounts),
        (status = 500, description = "Storage failure", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_emotion_counts(
    State(state): State<AppState>,
) -> Result<Json<EmotionCounts>, ApiError> {
    let counts = state
        .store
        .emotion_counts()
        .await
        .map_err(|err| api_internal("failed to count emotions", &err))?;
    Ok(Json(EmotionCounts(counts)))
}

#[utoipa::path(
    get,
    path = "/get_top_keywords",
    tag = "feedback",
    responses(
        (status = 200, description = "Most frequent keywords, highest count first", body = [KeywordCount]),
        (status = 500, description = "Storage failure", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_top_keywords(
    State(state): State<AppState>,
) -> Result<Json<Vec<KeywordCount>>, ApiError> {
    let keywords = state
        .store
        .top_keywords(TOP_KEYWORDS_LIMIT)
        .await
        .map_err(|err| api_internal("failed to rank keywords", &err))?;
    Ok(Json(keywords))
}

#[utoipa::path(
    get,
    path = "/get_feedback",
    tag = "feedback",
    responses(
        (status = 200, description = "Most recent feedback records, newest first", body = [FeedbackRecord]),
        (status = 500, description = "Storage failure", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_feedback(
    State(state): State<AppState>,
) -> Result<Json<Vec<FeedbackRecord>>, ApiError> {
    let records = state
        .store
        .recent(RECENT_FEEDBACK_LIMIT)
        .await
        .map_err(|err| api_internal("failed to list feedback", &err))?;
    Ok(Json(records))
}
