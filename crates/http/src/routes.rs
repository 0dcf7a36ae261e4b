// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handlers (C6, §4.6): parse path/body, validate, call the controller,
//! serialize the result through the envelope. Mechanical adapters only —
//! every decision lives in `gowa-controller`.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gowa_core::{AdminError, PartialInstanceConfig, Port};
use gowa_supervisor::SupervisorClient;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::app::{rpc_deadline, AppState};
use crate::config::layer_partial;
use crate::envelope::{no_content, ok, ApiError};

fn parse_port(raw: &str) -> Result<Port, ApiError> {
    let value: i64 = raw.parse().map_err(|_| ApiError(AdminError::invalid_port(i64::MIN)))?;
    Port::new(value).map_err(|_| ApiError(AdminError::invalid_port(value)))
}

/// Parse a JSON body ourselves rather than via axum's `Json` extractor, so a
/// malformed or missing-field body renders through the `{error: {...}}`
/// envelope (`INVALID_BODY`, §4.6/§7) instead of axum's plain-text rejection.
fn parse_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(bytes).map_err(|e| ApiError(AdminError::invalid_body(e.to_string())))
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
    pub port: i64,
    #[serde(flatten)]
    pub config: PartialInstanceConfig,
}

pub async fn create<S: SupervisorClient>(
    State(state): State<AppState<S>>,
    raw_body: Bytes,
) -> Result<Response, ApiError> {
    let body: CreateBody = parse_json(&raw_body)?;
    let port = Port::new(body.port).map_err(|_| ApiError(AdminError::invalid_port(body.port)))?;
    let effective = layer_partial(&state.config.gowa_defaults, &body.config);
    let instance = state.controller.create(port, &effective).await?;
    Ok(ok(StatusCode::CREATED, instance))
}

pub async fn list<S: SupervisorClient>(State(state): State<AppState<S>>) -> Result<Response, ApiError> {
    let instances = state.controller.list().await?;
    Ok(ok(StatusCode::OK, instances))
}

pub async fn get_one<S: SupervisorClient>(
    State(state): State<AppState<S>>,
    Path(raw_port): Path<String>,
) -> Result<Response, ApiError> {
    let port = parse_port(&raw_port)?;
    let instance = state.controller.get(port).await?;
    Ok(ok(StatusCode::OK, instance))
}

pub async fn update<S: SupervisorClient>(
    State(state): State<AppState<S>>,
    Path(raw_port): Path<String>,
    raw_body: Bytes,
) -> Result<Response, ApiError> {
    let port = parse_port(&raw_port)?;
    let partial: PartialInstanceConfig = parse_json(&raw_body)?;
    let instance = state.controller.update(port, &partial).await?;
    Ok(ok(StatusCode::OK, instance))
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub purge: bool,
}

pub async fn delete<S: SupervisorClient>(
    State(state): State<AppState<S>>,
    Path(raw_port): Path<String>,
    Query(params): Query<DeleteParams>,
) -> Result<Response, ApiError> {
    let port = parse_port(&raw_port)?;
    state.controller.delete(port, params.purge).await?;
    Ok(no_content())
}

pub async fn healthz() -> Response {
    ok(StatusCode::OK, serde_json::json!({"status": "ok"}))
}

pub async fn readyz<S: SupervisorClient>(State(state): State<AppState<S>>) -> Response {
    match state.controller.ping(rpc_deadline(&state.config)).await {
        Ok(()) => ok(StatusCode::OK, serde_json::json!({"status": "ok"})),
        Err(err) => ApiError(AdminError::unavailable(format!("readiness probe failed: {err}"))).into_response(),
    }
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
