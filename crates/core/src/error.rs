// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The error taxonomy (§7) every layer below the HTTP surface speaks.

use serde::Serialize;
use thiserror::Error;

/// Closed set of error kinds produced anywhere in the lifecycle controller
/// or its collaborators. The HTTP surface (`gowa-http`) is the only layer
/// that knows about status codes; it maps each kind to one (§7
/// "Propagation").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    InvalidPort,
    InvalidBody,
    Unauthenticated,
    NotFound,
    AlreadyExists,
    Conflict,
    StartFailed,
    StopFailed,
    RestoreFailed,
    Unavailable,
    Internal,
}

impl ErrorKind {
    /// The status code the HTTP surface renders this kind as (§6, §7).
    pub fn http_status(self) -> u16 {
        match self {
            ErrorKind::InvalidPort | ErrorKind::InvalidBody => 400,
            ErrorKind::Unauthenticated => 401,
            ErrorKind::NotFound => 404,
            ErrorKind::AlreadyExists | ErrorKind::Conflict => 409,
            ErrorKind::StartFailed
            | ErrorKind::StopFailed
            | ErrorKind::RestoreFailed
            | ErrorKind::Internal => 500,
            ErrorKind::Unavailable => 503,
        }
    }
}

/// A classified, API-renderable error (§7: "kind, a short machine-readable
/// reason, a human-readable message").
#[derive(Debug, Error, Clone)]
#[error("{message}")]
pub struct AdminError {
    pub kind: ErrorKind,
    /// Short machine-readable reason, e.g. `"port_already_bound"`.
    pub reason: String,
    pub message: String,
}

impl AdminError {
    pub fn new(kind: ErrorKind, reason: impl Into<String>, message: impl Into<String>) -> Self {
        AdminError { kind, reason: reason.into(), message: message.into() }
    }

    pub fn invalid_port(port: i64) -> Self {
        AdminError::new(
            ErrorKind::InvalidPort,
            "port_out_of_range",
            format!("port {port} is outside the valid range [1024, 65535]"),
        )
    }

    pub fn invalid_body(detail: impl Into<String>) -> Self {
        AdminError::new(ErrorKind::InvalidBody, "invalid_body", detail.into())
    }

    pub fn unauthenticated() -> Self {
        AdminError::new(
            ErrorKind::Unauthenticated,
            "missing_or_invalid_token",
            "missing or invalid bearer token",
        )
    }

    pub fn not_found(port: crate::port::Port) -> Self {
        AdminError::new(
            ErrorKind::NotFound,
            "instance_not_found",
            format!("no instance on port {port}"),
        )
    }

    pub fn already_exists(port: crate::port::Port) -> Self {
        AdminError::new(
            ErrorKind::AlreadyExists,
            "instance_already_exists",
            format!("an instance already exists on port {port}"),
        )
    }

    pub fn conflict(port: crate::port::Port) -> Self {
        AdminError::new(
            ErrorKind::Conflict,
            "port_locked",
            format!("another mutation is in progress for port {port}"),
        )
    }

    pub fn start_failed(detail: impl Into<String>) -> Self {
        AdminError::new(ErrorKind::StartFailed, "start_failed", detail.into())
    }

    pub fn stop_failed(detail: impl Into<String>) -> Self {
        AdminError::new(ErrorKind::StopFailed, "stop_failed", detail.into())
    }

    pub fn restore_failed(detail: impl Into<String>) -> Self {
        AdminError::new(ErrorKind::RestoreFailed, "restore_failed", detail.into())
    }

    pub fn unavailable(detail: impl Into<String>) -> Self {
        AdminError::new(ErrorKind::Unavailable, "supervisor_unreachable", detail.into())
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        AdminError::new(ErrorKind::Internal, "internal_error", detail.into())
    }
}

impl From<std::io::Error> for AdminError {
    fn from(err: std::io::Error) -> Self {
        AdminError::internal(format!("io error: {err}"))
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
