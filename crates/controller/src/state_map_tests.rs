// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use gowa_supervisor::ProcessInfo;
use yare::parameterized;

use super::*;

#[parameterized(
    stopped = { "STOPPED", InstanceState::Stopped },
    starting = { "STARTING", InstanceState::Starting },
    running = { "RUNNING", InstanceState::Running },
    backoff = { "BACKOFF", InstanceState::Backoff },
    stopping = { "STOPPING", InstanceState::Stopping },
    exited = { "EXITED", InstanceState::Exited },
    fatal = { "FATAL", InstanceState::Fatal },
    garbage = { "SOMETHING_ELSE", InstanceState::Unknown },
)]
fn maps_every_supervisor_statename(name: &str, expected: InstanceState) {
    assert_eq!(state_from_name(name), expected);
}

fn info_with(statename: &str, start_unix: Option<i64>) -> ProcessInfo {
    ProcessInfo {
        group: "instance-3001".to_string(),
        statename: statename.to_string(),
        pid: Some(42),
        start_unix,
        exit_status: None,
        spawn_error: None,
    }
}

#[test]
fn started_at_is_none_when_not_running_or_backoff() {
    assert_eq!(started_at(&info_with("STOPPED", Some(100))), None);
}

#[test]
fn started_at_is_derived_from_unix_seconds_when_running() {
    let ts = started_at(&info_with("RUNNING", Some(1_700_000_000))).unwrap();
    assert_eq!(ts.timestamp(), 1_700_000_000);
}

#[test]
fn last_error_passes_through_spawn_error() {
    let mut info = info_with("FATAL", None);
    info.spawn_error = Some("boom".to_string());
    assert_eq!(last_error(&info), Some("boom".to_string()));
}
