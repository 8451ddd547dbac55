//! Feedback ingestion handler.
//!
//! # Purpose
//! Validates a submission, runs text analysis, stores one record, and echoes
//! the analysis back to the client.
//!
//! # Key invariants
//! - A rejected submission (400) never reaches the analyzer or the store.
//! - A successful response (201) always corresponds to exactly one stored
//!   record whose label, emotion, and keywords match the response body.
//! - The body is parsed as JSON regardless of `Content-Type`.
use crate::api::error::{ApiError, api_analyzer_failure, api_internal, api_validation_error};
use crate::api::types::{STATUS_SUCCESS, SubmitRequest, SubmitResponse};
use crate::app::AppState;
use crate::model::NewFeedback;
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::Utc;
use serde_json::Value;

pub const VALIDATION_MESSAGE: &str = "name, email and feedback required";

/// A submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub feedback: String,
    pub rating: i64,
}

impl Submission {
    /// Parse a raw request body.
    ///
    /// # Errors
    /// Returns `VALIDATION_MESSAGE` when the body is not a JSON object or any
    /// required field is missing, not a string, or blank after trimming.
    pub fn from_body(body: &[u8]) -> Result<Self, &'static str> {
        let value: Value = serde_json::from_slice(body).map_err(|_| VALIDATION_MESSAGE)?;
        if !value.is_object() {
            return Err(VALIDATION_MESSAGE);
        }
        let request: SubmitRequest =
            serde_json::from_value(value).map_err(|_| VALIDATION_MESSAGE)?;
        Self::from_request(&request)
    }

    pub fn from_request(request: &SubmitRequest) -> Result<Self, &'static str> {
        let name = required_text(request.name.as_ref()).ok_or(VALIDATION_MESSAGE)?;
        let email = required_text(request.email.as_ref()).ok_or(VALIDATION_MESSAGE)?;
        let feedback = required_text(request.feedback.as_ref()).ok_or(VALIDATION_MESSAGE)?;
        Ok(Self {
            name,
            email,
            feedback,
            rating: parse_rating(request.rating.as_ref()),
        })
    }
}

fn required_text(value: Option<&Value>) -> Option<String> {
    let text = value?.as_str()?.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Coerce a rating to an integer; anything unparseable becomes 0.
pub fn parse_rating(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Some(Value::Bool(flag)) => i64::from(*flag),
        Some(Value::String(text)) => text.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

#[utoipa::path(
    post,
    path = "/submit",
    tag = "feedback",
    request_body = SubmitRequest,
    responses(
        (status = 201, description = "Feedback stored", body = SubmitResponse),
        (status = 400, description = "Missing name, email or feedback", body = crate::api::types::ErrorResponse),
        (status = 500, description = "Analysis or storage failure", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn submit_feedback(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    let submission = match Submission::from_body(&body) {
        Ok(submission) => submission,
        Err(message) => {
            metrics::counter!("feedback_submissions_total", "outcome" => "rejected").increment(1);
            return Err(api_validation_error(message));
        }
    };

    let analysis = state.analyzer.analyze(&submission.feedback).map_err(|err| {
        metrics::counter!("feedback_submissions_total", "outcome" => "failed").increment(1);
        api_analyzer_failure(&err)
    })?;

    let record = NewFeedback::new(
        submission.name,
        submission.email,
        submission.feedback,
        submission.rating,
        analysis,
        Utc::now(),
    );
    let stored = state.store.insert(record).await.map_err(|err| {
        metrics::counter!("feedback_submissions_total", "outcome" => "failed").increment(1);
        api_internal("failed to store feedback", &err)
    })?;

    metrics::counter!("feedback_submissions_total", "outcome" => "accepted").increment(1);
    metrics::counter!("feedback_sentiment_total", "label" => stored.sentiment_label.as_str())
        .increment(1);
    tracing::info!(
        id = %stored.id,
        sentiment = %stored.sentiment_label,
        emotion = %stored.emotion,
        keywords = stored.keywords.len(),
        "feedback stored"
    );

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            status: STATUS_SUCCESS.to_string(),
            sentiment: stored.sentiment_label.to_string(),
            emotion: stored.emotion,
            keywords: stored.keywords,
        }),
    ))
}
