// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The instance projection and its state machine (§3, §4.5).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::InstanceConfig;
use crate::port::Port;

/// Per-instance state, derived from the supervisor's process-info reply —
/// never synthesized by the controller, except `Absent` (no config file)
/// and `Unknown` (config/supervisor divergence, §4.5 Get/List).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstanceState {
    Absent,
    Stopped,
    Starting,
    Running,
    Backoff,
    Stopping,
    Exited,
    Fatal,
    Unknown,
}

crate::simple_display! {
    InstanceState {
        Absent => "Absent",
        Stopped => "Stopped",
        Starting => "Starting",
        Running => "Running",
        Backoff => "Backoff",
        Stopping => "Stopping",
        Exited => "Exited",
        Fatal => "Fatal",
        Unknown => "Unknown",
    }
}

impl InstanceState {
    /// States in which a `pid` is reported (§3 "Instance" attributes).
    pub fn carries_pid(self) -> bool {
        matches!(self, InstanceState::Running | InstanceState::Backoff)
    }

    /// Terminal-for-the-API states per the §4.5 state machine diagram:
    /// `Running` is terminal-success, the rest listed here are
    /// terminal-failure. `Exited` is only terminal when paired with a
    /// non-zero exit status, which the caller must check separately.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            InstanceState::Running | InstanceState::Fatal | InstanceState::Exited | InstanceState::Backoff
        )
    }
}

/// Observed disagreement between the config file and the supervisor's
/// process table for a given port (§4.5 Get/List, §7).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Divergence {
    pub config_file_present: bool,
    pub supervisor_group_present: bool,
}

/// The wire/API projection of one instance (§6 "Instance projection on the
/// wire").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub port: Port,
    pub state: InstanceState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pid: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_status: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    pub config: InstanceConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divergence: Option<Divergence>,
}

impl Instance {
    /// Synthesize the `Absent` instance for a port with neither a config
    /// file nor a supervisor record.
    pub fn absent(port: Port, config: InstanceConfig) -> Self {
        Instance {
            port,
            state: InstanceState::Absent,
            pid: None,
            started_at: None,
            exit_status: None,
            last_error: None,
            config,
            divergence: None,
        }
    }
}

#[cfg(test)]
#[path = "instance_tests.rs"]
mod tests;
