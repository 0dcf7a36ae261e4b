// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The per-port lock manager (C4, §4.4).
//!
//! One [`tokio::sync::Mutex`] per port, held in a [`DashMap`] so acquiring
//! the lock for one port never blocks on another port's acquisition (§5
//! "distinct ports can be mutated fully in parallel") — a single
//! `parking_lot::Mutex<HashMap<Port, ..>>` would serialize unrelated ports
//! against each other during the (cheap) map lookup, which is fine, but
//! would also force every lock's *drop* through the same map mutex; DashMap
//! shards that away.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use gowa_core::{AdminError, Port};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::warn;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct PortLocks {
    locks: Arc<DashMap<Port, Arc<Mutex<()>>>>,
    /// `LOCK_DIR`: informational only, never consulted for exclusion (§4.4).
    lock_dir: Option<PathBuf>,
    timeout: Duration,
}

impl PortLocks {
    pub fn new(lock_dir: Option<PathBuf>) -> Self {
        PortLocks { locks: Arc::new(DashMap::new()), lock_dir, timeout: DEFAULT_TIMEOUT }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Acquire the lock for `port`, non-blocking with a timeout. On timeout
    /// returns `ErrorKind::Conflict` (§4.4, §7).
    pub async fn acquire(&self, port: Port) -> Result<PortGuard, AdminError> {
        let mutex = self.locks.entry(port).or_insert_with(|| Arc::new(Mutex::new(()))).clone();

        let guard = tokio::time::timeout(self.timeout, mutex.lock_owned())
            .await
            .map_err(|_| AdminError::conflict(port))?;

        let lockfile_path = self.lock_dir.as_ref().map(|dir| dir.join(format!("{}.lock", port.group_name())));
        if let Some(path) = &lockfile_path {
            if let Some(parent) = path.parent() {
                let _ = tokio::fs::create_dir_all(parent).await;
            }
            if let Err(e) = tokio::fs::write(path, std::process::id().to_string()).await {
                warn!(path = %path.display(), error = %e, "failed to write informational lockfile");
            }
        }

        Ok(PortGuard { _guard: guard, lockfile_path })
    }
}

/// Held for the lifetime of one mutation (§4.4 "held across the entire
/// RPC+filesystem sequence").
pub struct PortGuard {
    _guard: OwnedMutexGuard<()>,
    lockfile_path: Option<PathBuf>,
}

impl Drop for PortGuard {
    fn drop(&mut self) {
        if let Some(path) = self.lockfile_path.take() {
            // Informational only; removal failure isn't actionable here.
            let _ = std::fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
