// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wires the axum router, the auth middleware, and the lifecycle
//! controller into one `Router` (C6, §4.6). Generic over the supervisor
//! client so tests can swap in `FakeSupervisorClient` without touching the
//! route table.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use gowa_controller::LifecycleController;
use gowa_supervisor::SupervisorClient;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::routes;

pub struct AppState<S: SupervisorClient> {
    pub controller: Arc<LifecycleController<S>>,
    pub config: Arc<Config>,
}

impl<S: SupervisorClient> Clone for AppState<S> {
    fn clone(&self) -> Self {
        AppState { controller: self.controller.clone(), config: self.config.clone() }
    }
}

pub fn build_router<S: SupervisorClient>(controller: LifecycleController<S>, config: Config) -> Router {
    let state = AppState { controller: Arc::new(controller), config: Arc::new(config) };

    let protected = Router::new()
        .route("/admin/instances", post(routes::create::<S>).get(routes::list::<S>))
        .route(
            "/admin/instances/:port",
            get(routes::get_one::<S>).patch(routes::update::<S>).delete(routes::delete::<S>),
        )
        .route_layer(axum::middleware::from_fn_with_state(state.clone(), crate::auth::require_bearer_token::<S>));

    Router::new()
        .route("/healthz", get(routes::healthz))
        .route("/readyz", get(routes::readyz::<S>))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Per-request RPC deadline: the configured timeout minus a small safety
/// margin (§5 "Cancellation and timeouts").
pub fn rpc_deadline(config: &Config) -> Duration {
    config.rpc_timeout().saturating_sub(Duration::from_millis(200)).max(Duration::from_millis(500))
}
