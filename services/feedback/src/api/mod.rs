//! Feedback HTTP API module.
//!
//! # Purpose
//! Route handlers for submission, aggregate views, and system endpoints, plus
//! shared error and payload types.
pub mod aggregates;
pub mod error;
pub mod openapi;
pub mod submit;
pub mod system;
pub mod types;
