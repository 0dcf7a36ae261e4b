// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory `SupervisorClient` for tests (§8 scenarios), grounded on the
//! teacher's adapter fakes (see `oj-adapters::notify::fake`): a
//! `parking_lot::Mutex`-guarded state struct plus scriptable fault
//! injection, gated behind the `test-support` feature.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::client::{ProcessInfo, SupervisorClient};
use crate::error::{SupervisorError, SupervisorFault, SupervisorTransportError};

/// A fault to return the next time a given method is called for a group,
/// consumed after one use so later calls behave normally again.
#[derive(Debug, Clone)]
pub enum ScriptedFault {
    Fault(SupervisorFault),
    Transport(SupervisorTransportError),
}

#[derive(Debug, Clone, Default)]
struct GroupState {
    running: bool,
    pid: Option<u32>,
    statename: String,
    exit_status: Option<i32>,
    spawn_error: Option<String>,
}

struct Inner {
    groups: HashMap<String, GroupState>,
    scripted: HashMap<(String, &'static str), ScriptedFault>,
    next_pid: u32,
}

/// Fake supervisor: every `start` succeeds and transitions the group to
/// `RUNNING` unless a fault has been scripted for `(group, "start")` (or
/// whichever method) via [`FakeSupervisorClient::script_fault`].
#[derive(Clone)]
pub struct FakeSupervisorClient {
    inner: std::sync::Arc<Mutex<Inner>>,
}

impl Default for FakeSupervisorClient {
    fn default() -> Self {
        FakeSupervisorClient {
            inner: std::sync::Arc::new(Mutex::new(Inner {
                groups: HashMap::new(),
                scripted: HashMap::new(),
                next_pid: 1000,
            })),
        }
    }
}

impl FakeSupervisorClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arrange for the next call to `method` ("start", "stop", "remove",
    /// "info", "ping", "reload") against `group` to fail with `fault`.
    pub fn script_fault(&self, group: &str, method: &'static str, fault: ScriptedFault) {
        self.inner.lock().scripted.insert((group.to_string(), method), fault);
    }

    fn take_scripted(&self, group: &str, method: &'static str) -> Option<ScriptedFault> {
        self.inner.lock().scripted.remove(&(group.to_string(), method))
    }

    fn scripted_to_error(fault: ScriptedFault) -> SupervisorError {
        match fault {
            ScriptedFault::Fault(f) => f.into(),
            ScriptedFault::Transport(t) => t.into(),
        }
    }

    pub fn is_registered(&self, group: &str) -> bool {
        self.inner.lock().groups.contains_key(group)
    }

    /// Force a group's reported state without going through `start`/`stop`,
    /// for simulating a crash discovered on a later `info` poll (e.g. §8
    /// "report FATAL after the first start").
    pub fn force_state(&self, group: &str, statename: &str, exit_status: Option<i32>, spawn_error: Option<&str>) {
        let mut inner = self.inner.lock();
        let state = inner.groups.entry(group.to_string()).or_default();
        state.statename = statename.to_string();
        state.running = statename == "RUNNING" || statename == "STARTING" || statename == "BACKOFF";
        if !state.running {
            state.pid = None;
        }
        state.exit_status = exit_status;
        state.spawn_error = spawn_error.map(str::to_string);
    }
}

#[async_trait]
impl SupervisorClient for FakeSupervisorClient {
    async fn ping(&self, _deadline: Duration) -> Result<(), SupervisorError> {
        if let Some(fault) = self.take_scripted("*", "ping") {
            return Err(Self::scripted_to_error(fault));
        }
        Ok(())
    }

    async fn reload(&self, _deadline: Duration) -> Result<(), SupervisorError> {
        if let Some(fault) = self.take_scripted("*", "reload") {
            return Err(Self::scripted_to_error(fault));
        }
        let mut inner = self.inner.lock();
        inner.groups.entry("*".to_string()).or_default();
        Ok(())
    }

    async fn start(&self, group: &str, _deadline: Duration) -> Result<(), SupervisorError> {
        if let Some(fault) = self.take_scripted(group, "start") {
            return Err(Self::scripted_to_error(fault));
        }
        let mut inner = self.inner.lock();
        let pid = inner.next_pid;
        inner.next_pid += 1;
        let state = inner.groups.entry(group.to_string()).or_default();
        state.running = true;
        state.pid = Some(pid);
        state.statename = "RUNNING".to_string();
        state.exit_status = None;
        state.spawn_error = None;
        Ok(())
    }

    async fn stop(&self, group: &str, _deadline: Duration) -> Result<(), SupervisorError> {
        if let Some(fault) = self.take_scripted(group, "stop") {
            return Err(Self::scripted_to_error(fault));
        }
        let mut inner = self.inner.lock();
        let state = inner.groups.entry(group.to_string()).or_default();
        state.running = false;
        state.pid = None;
        state.statename = "STOPPED".to_string();
        Ok(())
    }

    async fn remove(&self, group: &str, _deadline: Duration) -> Result<(), SupervisorError> {
        if let Some(fault) = self.take_scripted(group, "remove") {
            return Err(Self::scripted_to_error(fault));
        }
        self.inner.lock().groups.remove(group);
        Ok(())
    }

    async fn info(&self, group: &str, _deadline: Duration) -> Result<ProcessInfo, SupervisorError> {
        if let Some(fault) = self.take_scripted(group, "info") {
            return Err(Self::scripted_to_error(fault));
        }
        let inner = self.inner.lock();
        let state = inner.groups.get(group).ok_or_else(|| {
            SupervisorError::from(SupervisorFault::NotFound(group.to_string()))
        })?;
        Ok(ProcessInfo {
            group: group.to_string(),
            statename: if state.statename.is_empty() { "STOPPED".to_string() } else { state.statename.clone() },
            pid: state.pid,
            start_unix: state.pid.map(|_| 0),
            exit_status: state.exit_status,
            spawn_error: state.spawn_error.clone(),
        })
    }

    async fn info_all(&self, _deadline: Duration) -> Result<Vec<ProcessInfo>, SupervisorError> {
        let inner = self.inner.lock();
        Ok(inner
            .groups
            .keys()
            .filter(|g| g.as_str() != "*")
            .map(|group| {
                let state = &inner.groups[group];
                ProcessInfo {
                    group: group.clone(),
                    statename: if state.statename.is_empty() {
                        "STOPPED".to_string()
                    } else {
                        state.statename.clone()
                    },
                    pid: state.pid,
                    start_unix: state.pid.map(|_| 0),
                    exit_status: state.exit_status,
                    spawn_error: state.spawn_error.clone(),
                }
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
