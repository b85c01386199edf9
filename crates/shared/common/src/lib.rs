//! Common utilities shared by the task and user services.
//!
//! This crate provides:
//! - Unified error handling with JSON error bodies
//! - Environment-backed configuration helpers
//! - API key and request tracing middleware
//! - JSON extractors that reject with [`AppError`]

pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;

pub use config::*;
pub use error::{method_not_allowed, AppError, AppResult, OptionExt};
pub use extractors::{Payload, ValidatedJson};
pub use middleware::{request_trace_layer, require_api_key, ApiKeyAuth, API_KEY_HEADER};
