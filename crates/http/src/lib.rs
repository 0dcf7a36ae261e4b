// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Admin API's HTTP surface (C6): the axum router, the bearer-auth
//! middleware, the response envelope, and process configuration. The
//! binary entrypoint lives in `main.rs`.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod app;
pub mod auth;
pub mod config;
pub mod envelope;
pub mod routes;

pub use app::{build_router, AppState};
pub use config::{Config, ConfigError};
