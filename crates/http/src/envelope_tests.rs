// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use axum::response::IntoResponse;
use gowa_core::{AdminError, ErrorKind, Port};

use super::*;

#[tokio::test]
async fn already_exists_maps_to_409() {
    let response = ApiError(AdminError::already_exists(Port::new(3001).unwrap())).into_response();
    assert_eq!(response.status(), axum::http::StatusCode::CONFLICT);
}

#[tokio::test]
async fn not_found_maps_to_404() {
    let response = ApiError(AdminError::not_found(Port::new(3001).unwrap())).into_response();
    assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn start_failed_maps_to_500() {
    let response = ApiError(AdminError::start_failed("spawn error")).into_response();
    assert_eq!(response.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn unavailable_maps_to_503() {
    let response = ApiError(AdminError::unavailable("supervisor down")).into_response();
    assert_eq!(response.status(), axum::http::StatusCode::SERVICE_UNAVAILABLE);
}

#[test]
fn error_kind_round_trips_through_json_as_screaming_snake_case() {
    let json = serde_json::to_string(&ErrorKind::AlreadyExists).unwrap();
    assert_eq!(json, "\"ALREADY_EXISTS\"");
}
