// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    min_valid = { 1024, true },
    max_valid = { 65535, true },
    mid_valid = { 3001, true },
    below_min = { 1023, false },
    above_max = { 65536, false },
    negative = { -1, false },
    zero = { 0, false },
)]
fn validates_range(value: i64, expect_ok: bool) {
    assert_eq!(Port::new(value).is_ok(), expect_ok);
}

#[test]
fn group_name_round_trips() {
    let port = Port::new(3001).unwrap();
    assert_eq!(port.group_name(), "instance-3001");
    assert_eq!(Port::from_group_name("instance-3001"), Some(port));
    assert_eq!(Port::from_group_name("instance-3001.conf"), Some(port));
}

#[test]
fn from_group_name_rejects_garbage() {
    assert_eq!(Port::from_group_name("not-an-instance"), None);
    assert_eq!(Port::from_group_name("instance-99999999"), None);
    assert_eq!(Port::from_group_name("instance-abc"), None);
}

#[test]
fn serde_round_trip() {
    let port = Port::new(8088).unwrap();
    let json = serde_json::to_string(&port).unwrap();
    assert_eq!(json, "8088");
    let back: Port = serde_json::from_str(&json).unwrap();
    assert_eq!(back, port);
}

#[test]
fn serde_rejects_out_of_range() {
    let err = serde_json::from_str::<Port>("70000");
    assert!(err.is_err());
}
