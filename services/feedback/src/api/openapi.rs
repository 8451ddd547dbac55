//! OpenAPI schema aggregation for the feedback API.
use crate::api::types::{
    EmotionCounts, ErrorResponse, HealthStatus, SubmitRequest, SubmitResponse, SystemInfo,
};
use crate::api::{aggregates, submit, system};
use crate::model::{FeedbackRecord, KeywordCount, SentimentCounts};
use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "feedback-service",
        version = "v1",
        description = "Feedback ingestion and sentiment reporting API"
    ),
    paths(
        submit::submit_feedback,
        aggregates::get_feedback_counts,
        aggregates::get_emotion_counts,
        aggregates::get_top_keywords,
        aggregates::get_feedback,
        system::system_info,
        system::system_health
    ),
    components(schemas(
        SubmitRequest,
        SubmitResponse,
        SentimentCounts,
        EmotionCounts,
        KeywordCount,
        FeedbackRecord,
        SystemInfo,
        HealthStatus,
        ErrorResponse
    )),
    tags(
        (name = "feedback", description = "Feedback submission and aggregate views"),
        (name = "system", description = "System and discovery endpoints")
    )
)]
pub struct ApiDoc;

pub(crate) async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
