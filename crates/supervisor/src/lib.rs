// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! gowa-supervisor: the C1 client contract for the supervisor daemon, and
//! its two implementations — `XmlRpcSupervisorClient` for production,
//! `FakeSupervisorClient` (behind `test-support`) for everything else.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::panic))]

mod client;
mod error;
mod xmlrpc_client;

#[cfg(any(test, feature = "test-support"))]
mod fake;

pub use client::{ProcessInfo, SupervisorClient};
pub use error::{SupervisorError, SupervisorFault, SupervisorTransportError};
pub use xmlrpc_client::XmlRpcSupervisorClient;

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeSupervisorClient, ScriptedFault};
