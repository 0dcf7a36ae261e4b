// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Failure to parse a rendered program file back into `(Port,
/// InstanceConfig)` (§6 "Program-file format" — this should only ever
/// happen for a file this crate didn't write itself).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TemplateError {
    #[error("malformed environment line: {0}")]
    MalformedEnvironment(String),
    #[error("missing environment= line in program file")]
    MissingEnvironmentLine,
    #[error("missing required field {0}")]
    MissingField(&'static str),
    #[error("invalid value for field {0}: {1}")]
    BadField(&'static str, String),
}

impl From<TemplateError> for gowa_core::AdminError {
    fn from(err: TemplateError) -> Self {
        gowa_core::AdminError::internal(format!("stored program file is corrupt: {err}"))
    }
}
