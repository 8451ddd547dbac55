//! Feedback HTTP application wiring.
//!
//! # Purpose
//! Builds the Axum router, configures middleware, and defines the shared
//! application state injected into handlers.
//!
//! # Notes
//! The store and analyzer are explicit handles in [`AppState`]; nothing in the
//! handlers reaches for process-wide state.
use crate::api;
use crate::observability;
use crate::store::FeedbackStore;
use axum::Router;
use feedback_analyzer::TextAnalyzer;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_opentelemetry::OpenTelemetrySpanExt;

pub const API_VERSION: &str = "v1";

#[derive(Clone)]
pub struct AppState {
    pub api_version: String,
    pub store: Arc<dyn FeedbackStore + Send + Sync>,
    pub analyzer: Arc<dyn TextAnalyzer + Send + Sync>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn FeedbackStore + Send + Sync>,
        analyzer: Arc<dyn TextAnalyzer + Send + Sync>,
    ) -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            store,
            analyzer,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer =
        TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
            let parent = observability::trace_context_from_headers(request.headers());
            let span = tracing::info_span!(
                "http.request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version()
            );
            span.set_parent(parent);
            span
        });

    Router::new()
        .route(
            "/submit",
            axum::routing::post(api::submit::submit_feedback),
        )
        .route(
            "/get_feedback_counts",
            axum::routing::get(api::aggregates::get_feedback_counts),
        )
        .route(
            "/get_emotion_counts",
            axum::routing::get(api::aggregates::get_emotion_counts),
        )
        .route(
            "/get_top_keywords",
            axum::routing::get(api::aggregates::get_top_keywords),
        )
        .route(
            "/get_feedback",
            axum::routing::get(api::aggregates::get_feedback),
        )
        .route(
            "/v1/system/info",
            axum::routing::get(api::system::system_info),
        )
        .route(
            "/v1/system/health",
            axum::routing::get(api::system::system_health),
        )
        .route(
            "/v1/openapi.json",
            axum::routing::get(api::openapi::openapi_json),
        )
        .layer(trace_layer)
        .with_state(state)
}
