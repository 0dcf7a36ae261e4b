// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use async_trait::async_trait;

use crate::error::SupervisorError;

/// One process group's state as the supervisor itself reports it (§4.1).
/// Deliberately mirrors the supervisor wire vocabulary rather than
/// [`gowa_core::InstanceState`] — translating between the two is the
/// lifecycle controller's job, not this crate's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInfo {
    pub group: String,
    pub statename: String,
    pub pid: Option<u32>,
    pub start_unix: Option<i64>,
    pub exit_status: Option<i32>,
    pub spawn_error: Option<String>,
}

/// The C1 contract: everything the lifecycle controller needs from the
/// supervisor daemon. One method per RPC the controller actually calls
/// (§4.1) — no passthrough of the supervisor's full XML-RPC surface.
#[async_trait]
pub trait SupervisorClient: Send + Sync + 'static {
    async fn ping(&self, deadline: Duration) -> Result<(), SupervisorError>;

    /// Re-read the config directory and apply added/changed/removed groups.
    async fn reload(&self, deadline: Duration) -> Result<(), SupervisorError>;

    async fn start(&self, group: &str, deadline: Duration) -> Result<(), SupervisorError>;

    async fn stop(&self, group: &str, deadline: Duration) -> Result<(), SupervisorError>;

    /// Remove a stopped process group's in-memory bookkeeping (after its
    /// config file has already been deleted and `reload` run).
    async fn remove(&self, group: &str, deadline: Duration) -> Result<(), SupervisorError>;

    async fn info(&self, group: &str, deadline: Duration) -> Result<ProcessInfo, SupervisorError>;

    async fn info_all(&self, deadline: Duration) -> Result<Vec<ProcessInfo>, SupervisorError>;
}
