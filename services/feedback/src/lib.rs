//! Feedback service library crate.
//!
//! # Purpose
//! Exposes the feedback API surface, configuration, observability, and
//! storage implementations for use by the binary and tests.
pub mod api;
pub mod app;
pub mod config;
pub mod model;
pub mod observability;
pub mod store;
