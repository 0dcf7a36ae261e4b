// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use xmlrpc::{Fault, Value};
use yare::parameterized;

use super::*;

#[test]
fn reload_result_splits_into_added_changed_removed() {
    let value = Value::Array(vec![Value::Array(vec![
        Value::Array(vec![Value::from("instance-3001")]),
        Value::Array(vec![Value::from("instance-3002")]),
        Value::Array(vec![Value::from("instance-3003")]),
    ])]);

    let (added, changed, removed) = parse_reload_result(value).unwrap();
    assert_eq!(added, vec!["instance-3001".to_string()]);
    assert_eq!(changed, vec!["instance-3002".to_string()]);
    assert_eq!(removed, vec!["instance-3003".to_string()]);
}

#[test]
fn reload_result_with_empty_sets_parses_to_empty_vecs() {
    let value = Value::Array(vec![Value::Array(vec![
        Value::Array(vec![]),
        Value::Array(vec![]),
        Value::Array(vec![]),
    ])]);

    let (added, changed, removed) = parse_reload_result(value).unwrap();
    assert!(added.is_empty() && changed.is_empty() && removed.is_empty());
}

#[test]
fn reload_result_that_is_not_the_expected_shape_is_a_malformed_response() {
    let value = Value::String("unexpected".to_string());
    assert!(matches!(
        parse_reload_result(value),
        Err(SupervisorError::Transport(SupervisorTransportError::MalformedResponse(_)))
    ));
}

#[parameterized(
    bad_name = { FAULT_BAD_NAME, SupervisorFault::NotFound("m".into()) },
    already_started = { FAULT_ALREADY_STARTED, SupervisorFault::AlreadyStarted("m".into()) },
    abnormal_termination = { FAULT_ABNORMAL_TERMINATION, SupervisorFault::AbnormalTermination("m".into()) },
    not_running = { FAULT_NOT_RUNNING, SupervisorFault::NotRunning("m".into()) },
    failed = { FAULT_FAILED, SupervisorFault::Failed("m".into()) },
    still_running = { FAULT_STILL_RUNNING, SupervisorFault::StillRunning("m".into()) },
)]
fn fault_codes_map_to_the_matching_variant(code: i32, expected: SupervisorFault) {
    let fault = Fault { code, message: "detail".to_string() };
    let mapped = fault_to_error("m", fault);
    match (&mapped, &expected) {
        (SupervisorFault::SpawnError(g, _), SupervisorFault::SpawnError(eg, _)) => assert_eq!(g, eg),
        _ => assert_eq!(mapped, expected),
    }
}

#[test]
fn spawn_error_carries_the_fault_message() {
    let fault = Fault { code: FAULT_SPAWN_ERROR, message: "binary missing".to_string() };
    let mapped = fault_to_error("instance-3001", fault);
    assert!(matches!(mapped, SupervisorFault::SpawnError(ref g, ref msg) if g == "instance-3001" && msg == "binary missing"));
}

#[test]
fn unrecognized_fault_code_falls_back_to_failed() {
    let fault = Fault { code: 12345, message: "mystery".to_string() };
    let mapped = fault_to_error("m", fault);
    assert!(matches!(mapped, SupervisorFault::Failed(_)));
}
