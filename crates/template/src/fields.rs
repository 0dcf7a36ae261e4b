// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `GOWA_*` environment mapping (§6) for every recognized
//! [`InstanceConfig`] field — the authoritative representation the parser
//! reads back, making `parse` and `render` exact inverses (§6
//! "Program-file format").

use std::collections::HashMap;

use gowa_core::{InstanceConfig, Port};

use crate::error::TemplateError;

/// Ordered `GOWA_*` keys, in the order they're written to the
/// `environment=` line. Order only affects output determinism, not
/// round-trip correctness.
pub fn to_pairs(port: Port, config: &InstanceConfig) -> Vec<(&'static str, String)> {
    vec![
        ("GOWA_PORT", port.to_string()),
        ("GOWA_BASIC_AUTH", config.basic_auth.clone()),
        ("GOWA_DEBUG", bool_str(config.debug)),
        ("GOWA_OS", config.os.clone()),
        ("GOWA_ACCOUNT_VALIDATION", bool_str(config.account_validation)),
        ("GOWA_BASE_PATH", config.base_path.clone()),
        ("GOWA_AUTO_REPLY", config.auto_reply.clone()),
        ("GOWA_AUTO_MARK_READ", bool_str(config.auto_mark_read)),
        ("GOWA_WEBHOOK", config.webhook.clone()),
        ("GOWA_WEBHOOK_SECRET", config.webhook_secret.clone()),
        ("GOWA_CHAT_STORAGE", bool_str(config.chat_storage)),
        ("GOWA_DB_URI", config.db_uri.clone()),
    ]
}

fn bool_str(value: bool) -> String {
    if value { "true" } else { "false" }.to_string()
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, TemplateError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(TemplateError::BadField(key, other.to_string())),
    }
}

/// Reconstruct `(Port, InstanceConfig)` from decoded `GOWA_*` pairs.
///
/// Every key in [`to_pairs`] must be present; this is the inverse contract
/// the renderer promises (§4.2, §9 "Dynamic partial updates").
pub fn from_pairs(pairs: Vec<(String, String)>) -> Result<(Port, InstanceConfig), TemplateError> {
    let map: HashMap<String, String> = pairs.into_iter().collect();
    let get = |key: &'static str| -> Result<&String, TemplateError> {
        map.get(key).ok_or(TemplateError::MissingField(key))
    };

    let port_str = get("GOWA_PORT")?;
    let port_num: i64 =
        port_str.parse().map_err(|_| TemplateError::BadField("GOWA_PORT", port_str.clone()))?;
    let port = Port::new(port_num).map_err(|_| TemplateError::BadField("GOWA_PORT", port_str.clone()))?;

    let config = InstanceConfig {
        basic_auth: get("GOWA_BASIC_AUTH")?.clone(),
        debug: parse_bool("GOWA_DEBUG", get("GOWA_DEBUG")?)?,
        os: get("GOWA_OS")?.clone(),
        account_validation: parse_bool("GOWA_ACCOUNT_VALIDATION", get("GOWA_ACCOUNT_VALIDATION")?)?,
        base_path: get("GOWA_BASE_PATH")?.clone(),
        auto_reply: get("GOWA_AUTO_REPLY")?.clone(),
        auto_mark_read: parse_bool("GOWA_AUTO_MARK_READ", get("GOWA_AUTO_MARK_READ")?)?,
        webhook: get("GOWA_WEBHOOK")?.clone(),
        webhook_secret: get("GOWA_WEBHOOK_SECRET")?.clone(),
        chat_storage: parse_bool("GOWA_CHAT_STORAGE", get("GOWA_CHAT_STORAGE")?)?,
        db_uri: get("GOWA_DB_URI")?.clone(),
    };

    Ok((port, config))
}

#[cfg(test)]
#[path = "fields_tests.rs"]
mod tests;
