// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The atomic config writer (C3, §4.3).
//!
//! Writes go to a temporary sibling, get `fsync`'d, then get renamed into
//! place — a reader of `conf_dir` never observes a truncated or
//! half-written file (I4). No in-memory cache: the filesystem is the
//! source of truth (§4.3).

use std::path::{Path, PathBuf};

use gowa_core::Port;
use tokio::io::AsyncWriteExt;
use tracing::warn;

use crate::error::ConfStoreError;

#[derive(Debug, Clone)]
pub struct ConfigStore {
    conf_dir: PathBuf,
}

impl ConfigStore {
    pub fn new(conf_dir: impl Into<PathBuf>) -> Self {
        ConfigStore { conf_dir: conf_dir.into() }
    }

    pub fn conf_dir(&self) -> &Path {
        &self.conf_dir
    }

    fn final_path(&self, port: Port) -> PathBuf {
        self.conf_dir.join(format!("{}.conf", port.config_stem()))
    }

    fn tmp_path(&self, port: Port) -> PathBuf {
        self.conf_dir.join(format!("{}.conf.tmp", port.config_stem()))
    }

    /// Write `contents` for `port`: tmp write → fsync → rename (I4).
    ///
    /// On any failure after the temporary file exists, best-effort unlinks
    /// it before returning the original error (§4.3).
    pub async fn write(&self, port: Port, contents: &str) -> Result<(), ConfStoreError> {
        let tmp_path = self.tmp_path(port);
        let final_path = self.final_path(port);

        let result = self.write_via_tmp(&tmp_path, &final_path, contents).await;
        if result.is_err() {
            if let Err(cleanup_err) = tokio::fs::remove_file(&tmp_path).await {
                if cleanup_err.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %tmp_path.display(), error = %cleanup_err, "failed to clean up temp file after write failure");
                }
            }
        }
        result
    }

    async fn write_via_tmp(
        &self,
        tmp_path: &Path,
        final_path: &Path,
        contents: &str,
    ) -> Result<(), ConfStoreError> {
        let mut file = tokio::fs::File::create(tmp_path)
            .await
            .map_err(|source| ConfStoreError::Write { path: tmp_path.to_path_buf(), source })?;
        file.write_all(contents.as_bytes())
            .await
            .map_err(|source| ConfStoreError::Write { path: tmp_path.to_path_buf(), source })?;
        file.sync_all()
            .await
            .map_err(|source| ConfStoreError::Write { path: tmp_path.to_path_buf(), source })?;
        drop(file);
        tokio::fs::rename(tmp_path, final_path)
            .await
            .map_err(|source| ConfStoreError::Write { path: final_path.to_path_buf(), source })
    }

    /// Unlink the config file for `port`. Absence is not an error (§4.3).
    pub async fn remove(&self, port: Port) -> Result<(), ConfStoreError> {
        match tokio::fs::remove_file(self.final_path(port)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(ConfStoreError::Remove { path: self.final_path(port), source }),
        }
    }

    pub async fn exists(&self, port: Port) -> Result<bool, ConfStoreError> {
        match tokio::fs::metadata(self.final_path(port)).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(ConfStoreError::Exists { path: self.final_path(port), source }),
        }
    }

    pub async fn read(&self, port: Port) -> Result<Option<String>, ConfStoreError> {
        match tokio::fs::read_to_string(self.final_path(port)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ConfStoreError::Exists { path: self.final_path(port), source }),
        }
    }

    /// Enumerate every port with a config file currently on disk (§4.5 List).
    pub async fn list_ports(&self) -> Result<Vec<Port>, ConfStoreError> {
        let mut entries = tokio::fs::read_dir(&self.conf_dir)
            .await
            .map_err(|source| ConfStoreError::Exists { path: self.conf_dir.clone(), source })?;

        let mut ports = Vec::new();
        loop {
            let entry = entries
                .next_entry()
                .await
                .map_err(|source| ConfStoreError::Exists { path: self.conf_dir.clone(), source })?;
            let Some(entry) = entry else { break };
            if let Some(name) = entry.file_name().to_str() {
                if let Some(port) = Port::from_group_name(name) {
                    ports.push(port);
                }
            }
        }
        ports.sort();
        Ok(ports)
    }
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
