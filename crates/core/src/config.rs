// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The instance configuration record (§3 of the spec).
//!
//! [`InstanceConfig`] is always fully defaulted once stored; wire requests
//! carry [`PartialInstanceConfig`], whose unset fields leave the stored value
//! untouched (PATCH semantics).

use serde::{Deserialize, Serialize};

use crate::port::Port;

/// Fully-defaulted, strictly-typed instance configuration.
///
/// Field-for-field match of the §3 table. `Default` gives exactly the
/// defaults named there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceConfig {
    pub basic_auth: String,
    pub debug: bool,
    pub os: String,
    pub account_validation: bool,
    pub base_path: String,
    pub auto_reply: String,
    pub auto_mark_read: bool,
    pub webhook: String,
    pub webhook_secret: String,
    pub chat_storage: bool,
    pub db_uri: String,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        InstanceConfig {
            basic_auth: String::new(),
            debug: false,
            os: "Chrome".to_string(),
            account_validation: true,
            base_path: String::new(),
            auto_reply: String::new(),
            auto_mark_read: false,
            webhook: String::new(),
            webhook_secret: "secret".to_string(),
            chat_storage: true,
            db_uri: String::new(),
        }
    }
}

impl InstanceConfig {
    /// Merge a partial update over `self`, returning the new effective config.
    ///
    /// Only fields present (`Some`) in `partial` overwrite; everything else
    /// is retained from `self`. This is the basis for both create's
    /// "merge over defaults" (§4.5 Create step 4) and update's "merge over
    /// current" (§4.5 Update step 4).
    pub fn merged_with(&self, partial: &PartialInstanceConfig) -> InstanceConfig {
        InstanceConfig {
            basic_auth: partial.basic_auth.clone().unwrap_or_else(|| self.basic_auth.clone()),
            debug: partial.debug.unwrap_or(self.debug),
            os: partial.os.clone().unwrap_or_else(|| self.os.clone()),
            account_validation: partial.account_validation.unwrap_or(self.account_validation),
            base_path: partial.base_path.clone().unwrap_or_else(|| self.base_path.clone()),
            auto_reply: partial.auto_reply.clone().unwrap_or_else(|| self.auto_reply.clone()),
            auto_mark_read: partial.auto_mark_read.unwrap_or(self.auto_mark_read),
            webhook: partial.webhook.clone().unwrap_or_else(|| self.webhook.clone()),
            webhook_secret: partial
                .webhook_secret
                .clone()
                .unwrap_or_else(|| self.webhook_secret.clone()),
            chat_storage: partial.chat_storage.unwrap_or(self.chat_storage),
            db_uri: partial.db_uri.clone().unwrap_or_else(|| self.db_uri.clone()),
        }
    }

    /// Produce the fully-defaulted config for a brand-new instance (§4.5
    /// Create step 4): defaults merged with the caller's partial, then
    /// `db_uri` derived from the port if the caller didn't supply one.
    pub fn new_for_create(port: Port, partial: &PartialInstanceConfig) -> InstanceConfig {
        let mut config = InstanceConfig::default().merged_with(partial);
        if config.db_uri.is_empty() {
            config.db_uri = default_db_uri(port);
        }
        config
    }
}

/// Default `db_uri` derivation when the caller doesn't supply one (§3).
///
/// Chosen form documented in DESIGN.md: `sqlite:///<port>/storages/<port>.db`,
/// relative to `INSTANCES_DIR` at render time.
pub fn default_db_uri(port: Port) -> String {
    format!("file:storages/{port}.db?_foreign_keys=on")
}

/// Wire representation of a partial config update: every field optional,
/// unknown fields ignored (`#[serde(default)]` covers both "field absent"
/// and "field present but unrecognized" when combined with `deny_unknown_fields`
/// being deliberately *not* set — §8 boundary: "PATCH body with unknown
/// fields: ignored, not an error").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialInstanceConfig {
    #[serde(default)]
    pub basic_auth: Option<String>,
    #[serde(default)]
    pub debug: Option<bool>,
    #[serde(default)]
    pub os: Option<String>,
    #[serde(default)]
    pub account_validation: Option<bool>,
    #[serde(default)]
    pub base_path: Option<String>,
    #[serde(default)]
    pub auto_reply: Option<String>,
    #[serde(default)]
    pub auto_mark_read: Option<bool>,
    #[serde(default)]
    pub webhook: Option<String>,
    #[serde(default)]
    pub webhook_secret: Option<String>,
    #[serde(default)]
    pub chat_storage: Option<bool>,
    #[serde(default)]
    pub db_uri: Option<String>,
}

impl PartialInstanceConfig {
    /// True when every field is unset — used by the HTTP layer to detect a
    /// bare `{}` PATCH body, which is still a valid (no-op) request.
    pub fn is_empty(&self) -> bool {
        self == &PartialInstanceConfig::default()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
