//! HTTP API request/response types.
//!
//! # Purpose
//! Defines the payload shapes for the feedback REST API and OpenAPI schema
//! generation.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

/// Raw submission body.
///
/// Fields stay as untyped JSON so wrong-typed values can be treated as missing
/// (text fields) or coerced (rating) instead of failing deserialization.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema, Clone)]
pub struct SubmitRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "Al")]
    pub name: Option<serde_json::Value>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "a@x.com")]
    pub email: Option<serde_json::Value>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "This is wonderful, I love it!")]
    pub feedback: Option<serde_json::Value>,
    #[serde(default)]
    #[schema(value_type = Option<i64>, example = 5)]
    pub rating: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct SubmitResponse {
    pub status: String,
    #[schema(example = "positive")]
    pub sentiment: String,
    #[schema(example = "joy")]
    pub emotion: String,
    pub keywords: Vec<String>,
}

/// Record count per emotion label.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct EmotionCounts(pub BTreeMap<String, u64>);

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct SystemInfo {
    pub service: String,
    pub api_version: String,
    pub storage_backend: String,
    pub durable_storage: bool,
    pub collection: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct HealthStatus {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ErrorResponse {
    #[schema(example = "error")]
    pub status: String,
    pub code: String,
    pub message: String,
}
