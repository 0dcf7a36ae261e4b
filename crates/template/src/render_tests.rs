// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use super::*;

fn paths() -> RenderPaths {
    RenderPaths {
        gowa_bin: PathBuf::from("/usr/local/bin/gowa"),
        log_dir: PathBuf::from("/var/log/gowa"),
        instances_dir: PathBuf::from("/var/lib/gowa/instances"),
    }
}

#[test]
fn renders_program_section_named_after_port() {
    let port = Port::new(3001).unwrap();
    let out = render(port, &InstanceConfig::default(), &paths());
    assert!(out.starts_with("[program:instance-3001]\n"));
}

#[test]
fn is_deterministic_for_identical_inputs() {
    let port = Port::new(3001).unwrap();
    let config = InstanceConfig { debug: true, ..InstanceConfig::default() };
    let a = render(port, &config, &paths());
    let b = render(port, &config, &paths());
    assert_eq!(a, b);
}

#[test]
fn default_config_omits_non_default_flags() {
    let port = Port::new(3001).unwrap();
    let out = render(port, &InstanceConfig::default(), &paths());
    let command_line = out.lines().find(|l| l.starts_with("command=")).unwrap();
    assert!(!command_line.contains("--debug"));
    assert!(!command_line.contains("--os="));
}

#[test]
fn non_default_bool_field_appears_as_flag() {
    let port = Port::new(3001).unwrap();
    let config = InstanceConfig { debug: true, ..InstanceConfig::default() };
    let out = render(port, &config, &paths());
    let command_line = out.lines().find(|l| l.starts_with("command=")).unwrap();
    assert!(command_line.contains("--debug=true"));
}

#[test]
fn string_field_is_shell_quoted() {
    let port = Port::new(3001).unwrap();
    let config =
        InstanceConfig { webhook: "https://example.test/hook".into(), ..InstanceConfig::default() };
    let out = render(port, &config, &paths());
    let command_line = out.lines().find(|l| l.starts_with("command=")).unwrap();
    assert!(command_line.contains("--webhook='https://example.test/hook'"));
}

#[test]
fn points_directory_and_logs_inside_instance_tree() {
    let port = Port::new(3001).unwrap();
    let out = render(port, &InstanceConfig::default(), &paths());
    assert!(out.contains("directory=/var/lib/gowa/instances/3001/storages\n"));
    assert!(out.contains("stdout_logfile=/var/log/gowa/instance-3001.out.log\n"));
    assert!(out.contains("stderr_logfile=/var/log/gowa/instance-3001.err.log\n"));
}

#[test]
fn autostart_and_autorestart_defaults() {
    let port = Port::new(3001).unwrap();
    let out = render(port, &InstanceConfig::default(), &paths());
    assert!(out.contains("autostart=true\n"));
    assert!(out.contains("autorestart=true\n"));
    assert!(out.contains("startretries=3\n"));
}

#[test]
fn environment_line_carries_every_recognized_field() {
    let port = Port::new(3001).unwrap();
    let out = render(port, &InstanceConfig::default(), &paths());
    for key in [
        "GOWA_PORT",
        "GOWA_BASIC_AUTH",
        "GOWA_DEBUG",
        "GOWA_OS",
        "GOWA_ACCOUNT_VALIDATION",
        "GOWA_BASE_PATH",
        "GOWA_AUTO_REPLY",
        "GOWA_AUTO_MARK_READ",
        "GOWA_WEBHOOK",
        "GOWA_WEBHOOK_SECRET",
        "GOWA_CHAT_STORAGE",
        "GOWA_DB_URI",
    ] {
        assert!(out.contains(key), "missing {key}");
    }
}
