// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bearer-token auth middleware (§6, §9 "Bearer auth"). Constant-time
//! comparison against `ADMIN_TOKEN` so a timing side channel can't be used
//! to guess the token byte-by-byte; the token itself is never logged.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use gowa_supervisor::SupervisorClient;
use subtle::ConstantTimeEq;

use crate::app::AppState;
use crate::envelope::ErrorBody;

pub async fn require_bearer_token<S: SupervisorClient>(
    State(state): State<AppState<S>>,
    req: Request,
    next: Next,
) -> Response {
    if !state.config.auth_enabled() {
        return next.run(req).await;
    }

    let Some(expected) = state.config.admin_token.as_deref() else {
        return next.run(req).await;
    };

    let presented = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match presented {
        Some(token) if bool::from(token.as_bytes().ct_eq(expected.as_bytes())) => next.run(req).await,
        _ => ErrorBody::unauthenticated(),
    }
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
