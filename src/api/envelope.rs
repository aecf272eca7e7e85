//! JSON envelope shared by every dashboard endpoint.
//!
//! Success bodies are `{ "data": ..., "meta": ... }` and failures are
//! `{ "error": { "code", "message" }, "meta": ... }`. The dashboard front
//! end dispatches on `error.code`, so the code strings are part of the wire
//! contract, not free text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Wire format version reported in `meta.version`.
const API_VERSION: &str = "1";

/// Metadata attached to every envelope.
#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub timestamp: DateTime<Utc>,
    pub version: &'static str,
}

impl ResponseMeta {
    fn now() -> Self {
        Self { timestamp: Utc::now(), version: API_VERSION }
    }
}

/// Success envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub meta: ResponseMeta,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap a payload as a 200 response.
    pub fn ok(data: T) -> Response {
        (StatusCode::OK, Json(Self { data, meta: ResponseMeta::now() })).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// Error envelope.
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ErrorDetail,
    pub meta: ResponseMeta,
}

impl ApiErrorResponse {
    fn respond(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
        let body = Self {
            error: ErrorDetail { code, message: message.into() },
            meta: ResponseMeta::now(),
        };
        (status, Json(body)).into_response()
    }

    /// Unknown line or resource.
    pub fn not_found(message: impl Into<String>) -> Response {
        Self::respond(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    /// Malformed query parameter.
    pub fn bad_request(message: impl Into<String>) -> Response {
        Self::respond(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    /// Well-formed request rejected by a domain contract (empty session,
    /// non-finite reading, invalid config candidate).
    pub fn unprocessable(message: impl Into<String>) -> Response {
        Self::respond(StatusCode::UNPROCESSABLE_ENTITY, "INVALID_INPUT", message)
    }

    /// Storage or other unexpected failure.
    pub fn internal(message: impl Into<String>) -> Response {
        Self::respond(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }
}
