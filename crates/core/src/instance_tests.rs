// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn carries_pid_matches_spec_states() {
    assert!(InstanceState::Running.carries_pid());
    assert!(InstanceState::Backoff.carries_pid());
    assert!(!InstanceState::Stopped.carries_pid());
    assert!(!InstanceState::Absent.carries_pid());
}

#[test]
fn display_matches_wire_strings() {
    assert_eq!(InstanceState::Running.to_string(), "Running");
    assert_eq!(InstanceState::Unknown.to_string(), "Unknown");
}

#[test]
fn absent_instance_has_no_pid_or_timestamps() {
    let port = Port::new(3001).unwrap();
    let instance = Instance::absent(port, InstanceConfig::default());
    assert_eq!(instance.state, InstanceState::Absent);
    assert!(instance.pid.is_none());
    assert!(instance.started_at.is_none());
    assert!(instance.divergence.is_none());
}

#[test]
fn serializes_without_null_optional_fields() {
    let port = Port::new(3001).unwrap();
    let instance = Instance::absent(port, InstanceConfig::default());
    let json = serde_json::to_value(&instance).unwrap();
    assert!(json.get("pid").is_none());
    assert!(json.get("started_at").is_none());
}
