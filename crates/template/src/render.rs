// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The config template renderer (C2, §4.2).
//!
//! Pure function of `(port, config, paths)` — no I/O, no clock, no
//! randomness — so identical inputs yield byte-identical output. That
//! determinism is what lets update (§4.5 step 5) skip the supervisor
//! round-trip entirely when a PATCH doesn't change anything observable.

use gowa_core::{InstanceConfig, Port};

use crate::env_codec;
use crate::fields::to_pairs;
use crate::paths::RenderPaths;

const AUTOSTART: bool = true;
const START_RETRIES: u32 = 3;

/// Render `config` for `port` into a complete supervisor program file.
pub fn render(port: Port, config: &InstanceConfig, paths: &RenderPaths) -> String {
    let pairs = to_pairs(port, config);
    let env_pairs: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (*k, v.as_str())).collect();
    let environment = env_codec::encode(&env_pairs);

    let mut command = format!("{} --port={}", paths.gowa_bin.display(), port);
    append_flag_if_set(&mut command, "basic-auth", &config.basic_auth, &String::new());
    append_bool_flag_if_set(&mut command, "debug", config.debug, false);
    append_flag_if_set(&mut command, "os", &config.os, "Chrome");
    append_bool_flag_if_set(&mut command, "account-validation", config.account_validation, true);
    append_flag_if_set(&mut command, "base-path", &config.base_path, &String::new());
    append_flag_if_set(&mut command, "auto-reply", &config.auto_reply, &String::new());
    append_bool_flag_if_set(&mut command, "auto-mark-read", config.auto_mark_read, false);
    append_flag_if_set(&mut command, "webhook", &config.webhook, &String::new());
    append_bool_flag_if_set(&mut command, "chat-storage", config.chat_storage, true);

    format!(
        "[program:{name}]\n\
         command={command}\n\
         directory={directory}\n\
         autostart={autostart}\n\
         autorestart=true\n\
         startretries={retries}\n\
         stdout_logfile={stdout}\n\
         stderr_logfile={stderr}\n\
         environment={environment}\n",
        name = port.group_name(),
        command = command,
        directory = paths.working_dir(port).display(),
        autostart = AUTOSTART,
        retries = START_RETRIES,
        stdout = paths.stdout_log(port).display(),
        stderr = paths.stderr_log(port).display(),
        environment = environment,
    )
}

fn append_flag_if_set(command: &mut String, flag: &str, value: &str, default: &str) {
    if value != default {
        command.push_str(&format!(" --{flag}={}", shell_quote(value)));
    }
}

fn append_bool_flag_if_set(command: &mut String, flag: &str, value: bool, default: bool) {
    if value != default {
        command.push_str(&format!(" --{flag}={value}"));
    }
}

/// Single-quote a value for a POSIX shell command line, the way a
/// conservative config renderer should: wrap in `'...'`, escaping any
/// embedded single quote as `'\''`.
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
