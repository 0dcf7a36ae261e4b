// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-wide configuration, loaded from environment once at startup (§6
//! "Configuration inputs"). Mirrors the teacher's `daemon::env` module:
//! free functions / one struct reading `std::env::var` directly, no config
//! crate.

use std::path::PathBuf;
use std::time::Duration;

use gowa_core::PartialInstanceConfig;
use thiserror::Error;

const DEFAULT_ADMIN_PORT: u16 = 8088;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set (set GOWA_DEV_MODE=true to run without it during development)")]
    MissingRequired(&'static str),
    #[error("{0} is not a valid value: {1}")]
    Invalid(&'static str, String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub admin_token: Option<String>,
    pub admin_port: u16,
    pub supervisor_url: String,
    pub supervisor_user: String,
    pub supervisor_pass: String,
    pub supervisor_conf_dir: PathBuf,
    pub supervisor_log_dir: PathBuf,
    pub instances_dir: PathBuf,
    pub gowa_bin: PathBuf,
    pub lock_dir: Option<PathBuf>,
    /// `GOWA_*` field defaults layered under a create request's body (§6).
    pub gowa_defaults: PartialInstanceConfig,
    pub dev_mode: bool,
}

impl Config {
    /// Load and eagerly validate configuration from the process environment.
    ///
    /// Refuses to start without `ADMIN_TOKEN` unless `GOWA_DEV_MODE=true`
    /// (§6: "Required; refuses to start if unset when not in a development
    /// mode").
    pub fn from_env() -> Result<Self, ConfigError> {
        let dev_mode = env_bool("GOWA_DEV_MODE").unwrap_or(false);
        let admin_token = std::env::var("ADMIN_TOKEN").ok().filter(|s| !s.is_empty());
        if admin_token.is_none() && !dev_mode {
            return Err(ConfigError::MissingRequired("ADMIN_TOKEN"));
        }

        let admin_port = match std::env::var("ADMIN_PORT").ok() {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid("ADMIN_PORT", raw))?,
            None => DEFAULT_ADMIN_PORT,
        };

        Ok(Config {
            admin_token,
            admin_port,
            supervisor_url: required_str("SUPERVISOR_URL")?,
            supervisor_user: std::env::var("SUPERVISOR_USER").unwrap_or_default(),
            supervisor_pass: std::env::var("SUPERVISOR_PASS").unwrap_or_default(),
            supervisor_conf_dir: required_path("SUPERVISOR_CONF_DIR")?,
            supervisor_log_dir: required_path("SUPERVISOR_LOG_DIR")?,
            instances_dir: required_path("INSTANCES_DIR")?,
            gowa_bin: required_path("GOWA_BIN")?,
            lock_dir: std::env::var("LOCK_DIR").ok().map(PathBuf::from),
            gowa_defaults: gowa_field_defaults(),
            dev_mode,
        })
    }

    /// Derived from `ADMIN_TOKEN` presence, not `dev_mode` directly: a dev
    /// deployment may still set a token and want auth enforced.
    pub fn auth_enabled(&self) -> bool {
        self.admin_token.is_some()
    }

    pub fn rpc_timeout(&self) -> Duration {
        std::env::var("SUPERVISOR_RPC_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_secs(5))
    }
}

fn required_str(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingRequired(name))
}

fn required_path(name: &'static str) -> Result<PathBuf, ConfigError> {
    required_str(name).map(PathBuf::from)
}

fn env_bool(name: &str) -> Option<bool> {
    std::env::var(name).ok().map(|v| v.eq_ignore_ascii_case("true") || v == "1")
}

/// `GOWA_*` field defaults (§6: "Defaults for the corresponding
/// `InstanceConfig` fields"), layered under (not over) a create request's
/// body by the handler.
fn gowa_field_defaults() -> PartialInstanceConfig {
    PartialInstanceConfig {
        basic_auth: std::env::var("GOWA_BASIC_AUTH").ok(),
        debug: env_bool("GOWA_DEBUG"),
        os: std::env::var("GOWA_OS").ok(),
        account_validation: env_bool("GOWA_ACCOUNT_VALIDATION"),
        base_path: std::env::var("GOWA_BASE_PATH").ok(),
        auto_reply: std::env::var("GOWA_AUTO_REPLY").ok(),
        auto_mark_read: env_bool("GOWA_AUTO_MARK_READ"),
        webhook: std::env::var("GOWA_WEBHOOK").ok(),
        webhook_secret: std::env::var("GOWA_WEBHOOK_SECRET").ok(),
        chat_storage: env_bool("GOWA_CHAT_STORAGE"),
        db_uri: std::env::var("GOWA_DB_URI").ok(),
    }
}

/// Layer `override_` over `base`: a field set in `override_` wins, otherwise
/// `base`'s value (if any) is used (§6 `GOWA_*` defaults under a request body).
pub fn layer_partial(base: &PartialInstanceConfig, override_: &PartialInstanceConfig) -> PartialInstanceConfig {
    PartialInstanceConfig {
        basic_auth: override_.basic_auth.clone().or_else(|| base.basic_auth.clone()),
        debug: override_.debug.or(base.debug),
        os: override_.os.clone().or_else(|| base.os.clone()),
        account_validation: override_.account_validation.or(base.account_validation),
        base_path: override_.base_path.clone().or_else(|| base.base_path.clone()),
        auto_reply: override_.auto_reply.clone().or_else(|| base.auto_reply.clone()),
        auto_mark_read: override_.auto_mark_read.or(base.auto_mark_read),
        webhook: override_.webhook.clone().or_else(|| base.webhook.clone()),
        webhook_secret: override_.webhook_secret.clone().or_else(|| base.webhook_secret.clone()),
        chat_storage: override_.chat_storage.or(base.chat_storage),
        db_uri: override_.db_uri.clone().or_else(|| base.db_uri.clone()),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
