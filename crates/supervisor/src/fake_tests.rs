// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use super::*;

const DEADLINE: Duration = Duration::from_secs(1);

#[tokio::test]
async fn start_then_info_reports_running_with_a_pid() {
    let client = FakeSupervisorClient::new();
    client.start("instance-3001", DEADLINE).await.unwrap();

    let info = client.info("instance-3001", DEADLINE).await.unwrap();
    assert_eq!(info.statename, "RUNNING");
    assert!(info.pid.is_some());
}

#[tokio::test]
async fn stop_clears_pid_and_reports_stopped() {
    let client = FakeSupervisorClient::new();
    client.start("instance-3001", DEADLINE).await.unwrap();
    client.stop("instance-3001", DEADLINE).await.unwrap();

    let info = client.info("instance-3001", DEADLINE).await.unwrap();
    assert_eq!(info.statename, "STOPPED");
    assert!(info.pid.is_none());
}

#[tokio::test]
async fn info_on_unknown_group_is_not_found() {
    let client = FakeSupervisorClient::new();
    let err = client.info("instance-9999", DEADLINE).await.unwrap_err();
    assert!(matches!(err, SupervisorError::Fault(SupervisorFault::NotFound(_))));
}

#[tokio::test]
async fn scripted_fault_applies_once_then_clears() {
    let client = FakeSupervisorClient::new();
    client.script_fault("instance-3001", "start", ScriptedFault::Fault(SupervisorFault::SpawnError(
        "instance-3001".to_string(),
        "binary not found".to_string(),
    )));

    let first = client.start("instance-3001", DEADLINE).await;
    assert!(first.is_err());

    client.start("instance-3001", DEADLINE).await.unwrap();
    let info = client.info("instance-3001", DEADLINE).await.unwrap();
    assert_eq!(info.statename, "RUNNING");
}

#[tokio::test]
async fn force_state_simulates_crash_after_successful_start() {
    let client = FakeSupervisorClient::new();
    client.start("instance-3001", DEADLINE).await.unwrap();
    client.force_state("instance-3001", "FATAL", Some(1), Some("crashed"));

    let info = client.info("instance-3001", DEADLINE).await.unwrap();
    assert_eq!(info.statename, "FATAL");
    assert!(info.pid.is_none());
    assert_eq!(info.spawn_error.as_deref(), Some("crashed"));
}

#[tokio::test]
async fn info_all_excludes_the_reload_marker_group() {
    let client = FakeSupervisorClient::new();
    client.reload(DEADLINE).await.unwrap();
    client.start("instance-3001", DEADLINE).await.unwrap();

    let all = client.info_all(DEADLINE).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].group, "instance-3001");
}
