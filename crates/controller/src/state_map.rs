// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Translates supervisor-native process state names into
//! [`gowa_core::InstanceState`] (§3, §4.5).

use chrono::{DateTime, Utc};
use gowa_core::InstanceState;
use gowa_supervisor::ProcessInfo;

pub fn state_from_name(statename: &str) -> InstanceState {
    match statename {
        "STOPPED" => InstanceState::Stopped,
        "STARTING" => InstanceState::Starting,
        "RUNNING" => InstanceState::Running,
        "BACKOFF" => InstanceState::Backoff,
        "STOPPING" => InstanceState::Stopping,
        "EXITED" => InstanceState::Exited,
        "FATAL" => InstanceState::Fatal,
        _ => InstanceState::Unknown,
    }
}

pub fn started_at(info: &ProcessInfo) -> Option<DateTime<Utc>> {
    if !matches!(state_from_name(&info.statename), InstanceState::Running | InstanceState::Backoff) {
        return None;
    }
    info.start_unix.and_then(|secs| DateTime::from_timestamp(secs, 0))
}

pub fn last_error(info: &ProcessInfo) -> Option<String> {
    info.spawn_error.clone()
}

#[cfg(test)]
#[path = "state_map_tests.rs"]
mod tests;
