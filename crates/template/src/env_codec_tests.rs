// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn round_trips_simple_pairs() {
    let pairs = [("GOWA_PORT", "3001"), ("GOWA_OS", "Chrome")];
    let encoded = encode(&pairs);
    let decoded = decode(&encoded).unwrap();
    assert_eq!(
        decoded,
        vec![("GOWA_PORT".to_string(), "3001".to_string()), ("GOWA_OS".to_string(), "Chrome".to_string())]
    );
}

#[test]
fn round_trips_value_containing_commas() {
    let pairs = [("GOWA_BASIC_AUTH", "alice:pw1,bob:pw2")];
    let encoded = encode(&pairs);
    let decoded = decode(&encoded).unwrap();
    assert_eq!(decoded, vec![("GOWA_BASIC_AUTH".to_string(), "alice:pw1,bob:pw2".to_string())]);
}

#[test]
fn round_trips_value_containing_quotes_and_backslashes() {
    let pairs = [("GOWA_AUTO_REPLY", "she said \"hi\" \\ ok")];
    let encoded = encode(&pairs);
    let decoded = decode(&encoded).unwrap();
    assert_eq!(decoded[0].1, "she said \"hi\" \\ ok");
}

#[test]
fn round_trips_empty_value() {
    let pairs = [("GOWA_BASE_PATH", "")];
    let encoded = encode(&pairs);
    assert_eq!(decode(&encoded).unwrap(), vec![("GOWA_BASE_PATH".to_string(), "".to_string())]);
}

#[test]
fn decode_rejects_unterminated_quote() {
    assert_eq!(decode("GOWA_PORT=\"3001"), None);
}

#[test]
fn decode_rejects_missing_equals() {
    assert_eq!(decode("GOWA_PORT3001"), None);
}

#[test]
fn decode_empty_line_is_empty_pairs() {
    assert_eq!(decode("").unwrap(), Vec::new());
}
