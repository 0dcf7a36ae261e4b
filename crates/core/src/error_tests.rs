// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    invalid_port = { ErrorKind::InvalidPort, 400 },
    invalid_body = { ErrorKind::InvalidBody, 400 },
    unauthenticated = { ErrorKind::Unauthenticated, 401 },
    not_found = { ErrorKind::NotFound, 404 },
    already_exists = { ErrorKind::AlreadyExists, 409 },
    conflict = { ErrorKind::Conflict, 409 },
    start_failed = { ErrorKind::StartFailed, 500 },
    stop_failed = { ErrorKind::StopFailed, 500 },
    restore_failed = { ErrorKind::RestoreFailed, 500 },
    internal = { ErrorKind::Internal, 500 },
    unavailable = { ErrorKind::Unavailable, 503 },
)]
fn maps_to_spec_status_code(kind: ErrorKind, status: u16) {
    assert_eq!(kind.http_status(), status);
}

#[test]
fn serializes_as_screaming_snake_case() {
    let json = serde_json::to_string(&ErrorKind::AlreadyExists).unwrap();
    assert_eq!(json, "\"ALREADY_EXISTS\"");
}
