// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::Router;
use gowa_confstore::{ConfigStore, PortLocks};
use gowa_controller::LifecycleController;
use gowa_core::PartialInstanceConfig;
use gowa_supervisor::FakeSupervisorClient;
use gowa_template::RenderPaths;
use tower::ServiceExt;

use super::*;
use crate::app::AppState;
use crate::config::Config;

fn test_config(token: Option<&str>) -> Config {
    Config {
        admin_token: token.map(str::to_string),
        admin_port: 8088,
        supervisor_url: "http://127.0.0.1:9001/RPC2".to_string(),
        supervisor_user: String::new(),
        supervisor_pass: String::new(),
        supervisor_conf_dir: PathBuf::from("/tmp/gowa/conf"),
        supervisor_log_dir: PathBuf::from("/tmp/gowa/logs"),
        instances_dir: PathBuf::from("/tmp/gowa/instances"),
        gowa_bin: PathBuf::from("/usr/local/bin/gowa"),
        lock_dir: None,
        gowa_defaults: PartialInstanceConfig::default(),
        dev_mode: token.is_none(),
    }
}

fn test_state(token: Option<&str>) -> AppState<FakeSupervisorClient> {
    let controller = LifecycleController::new(
        ConfigStore::new("/tmp/gowa-http-auth-tests"),
        PortLocks::new(None),
        FakeSupervisorClient::new(),
        RenderPaths {
            gowa_bin: PathBuf::from("/usr/local/bin/gowa"),
            log_dir: PathBuf::from("/tmp/gowa/logs"),
            instances_dir: PathBuf::from("/tmp/gowa/instances"),
        },
    );
    AppState { controller: Arc::new(controller), config: Arc::new(test_config(token)) }
}

fn protected_router(state: AppState<FakeSupervisorClient>) -> Router {
    Router::new()
        .route("/protected", get(|| async { "ok" }))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_bearer_token::<FakeSupervisorClient>,
        ))
        .with_state(state)
}

#[tokio::test]
async fn missing_token_is_rejected_when_auth_is_enabled() {
    let router = protected_router(test_state(Some("s3cret")));
    let response = router
        .oneshot(Request::builder().uri("/protected").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_token_is_rejected() {
    let router = protected_router(test_state(Some("s3cret")));
    let response = router
        .oneshot(
            Request::builder()
                .uri("/protected")
                .header("Authorization", "Bearer wrong")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn correct_token_is_accepted() {
    let router = protected_router(test_state(Some("s3cret")));
    let response = router
        .oneshot(
            Request::builder()
                .uri("/protected")
                .header("Authorization", "Bearer s3cret")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn dev_mode_without_a_token_configured_allows_every_request() {
    let router = protected_router(test_state(None));
    let response = router
        .oneshot(Request::builder().uri("/protected").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
