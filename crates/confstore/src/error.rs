// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Failures from the atomic config writer (C3, §4.3).
#[derive(Debug, Error)]
pub enum ConfStoreError {
    #[error("io error writing {path}: {source}")]
    Write {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("io error removing {path}: {source}")]
    Remove {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("io error checking {path}: {source}")]
    Exists {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<ConfStoreError> for gowa_core::AdminError {
    fn from(err: ConfStoreError) -> Self {
        gowa_core::AdminError::internal(err.to_string())
    }
}
