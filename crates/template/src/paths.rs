// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem locations the renderer points a program file at.
//!
//! Kept separate from the environment so [`render`](crate::render) stays a
//! pure function of `(port, config, paths)` — no env lookups inside it
//! (§4.2 "The renderer is pure (no I/O, no clock, no randomness)").

use std::path::PathBuf;

use gowa_core::Port;

#[derive(Debug, Clone)]
pub struct RenderPaths {
    /// `GOWA_BIN`: absolute path of the worker executable.
    pub gowa_bin: PathBuf,
    /// `SUPERVISOR_LOG_DIR`: parent of the per-port stdout/stderr logs.
    pub log_dir: PathBuf,
    /// `INSTANCES_DIR`: parent of per-instance data directories.
    pub instances_dir: PathBuf,
}

impl RenderPaths {
    pub fn working_dir(&self, port: Port) -> PathBuf {
        self.instances_dir.join(port.to_string()).join("storages")
    }

    pub fn stdout_log(&self, port: Port) -> PathBuf {
        self.log_dir.join(format!("{}.out.log", port.group_name()))
    }

    pub fn stderr_log(&self, port: Port) -> PathBuf {
        self.log_dir.join(format!("{}.err.log", port.group_name()))
    }
}
