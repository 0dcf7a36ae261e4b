// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The response envelope every handler returns through (§4.6): `{
//! request_id, timestamp, data | error }`. `gowa_core::AdminError` becomes
//! the HTTP response by way of `ApiError`'s `IntoResponse` impl (§7
//! "Propagation").

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use gowa_core::{AdminError, ErrorKind};
use serde::Serialize;
use uuid::Uuid;

fn new_request_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Serialize)]
pub struct SuccessEnvelope<T: Serialize> {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub reason: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    pub error: ErrorBody,
}

impl ErrorBody {
    /// Built directly (not through `AdminError`) for the auth middleware,
    /// which runs before any handler or controller call.
    pub fn unauthenticated() -> Response {
        let err = AdminError::unauthenticated();
        ApiError(err).into_response()
    }
}

/// Success response with the given status code, wrapped in the envelope.
pub fn ok<T: Serialize>(status: StatusCode, data: T) -> Response {
    let body = SuccessEnvelope { request_id: new_request_id(), timestamp: Utc::now(), data };
    (status, axum::Json(body)).into_response()
}

/// `204 No Content` has no envelope body (§6 DELETE success).
pub fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

/// Wraps `AdminError` so it can be returned directly from a handler (via
/// `?`) and rendered through the same envelope as a success response.
pub struct ApiError(pub AdminError);

impl From<AdminError> for ApiError {
    fn from(err: AdminError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.kind.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorEnvelope {
            request_id: new_request_id(),
            timestamp: Utc::now(),
            error: ErrorBody { kind: self.0.kind, reason: self.0.reason, message: self.0.message },
        };
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
#[path = "envelope_tests.rs"]
mod tests;
