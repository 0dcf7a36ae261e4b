// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Faults the supervisor itself reports back over the RPC wire (§4.1): a
/// closed set, not a catch-all for transport problems (those are
/// [`SupervisorTransportError`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SupervisorFault {
    #[error("no such process group {0:?}")]
    NotFound(String),
    #[error("process group {0:?} is already started")]
    AlreadyStarted(String),
    #[error("process group {0:?} failed to spawn: {1}")]
    SpawnError(String, String),
    #[error("process group {0:?} terminated abnormally")]
    AbnormalTermination(String),
    #[error("process group {0:?} is not running")]
    NotRunning(String),
    #[error("process group {0:?} is in FATAL state")]
    Failed(String),
    #[error("process group {0:?} did not stop before the deadline")]
    StillRunning(String),
}

/// Failures reaching the supervisor at all, as opposed to a fault it reports
/// (§4.1). The lifecycle controller treats this as `ErrorKind::Unavailable`.
#[derive(Debug, Clone, Error)]
pub enum SupervisorTransportError {
    #[error("supervisor unreachable: {0}")]
    Unreachable(String),
    #[error("supervisor rejected credentials")]
    Unauthenticated,
    #[error("malformed supervisor response: {0}")]
    MalformedResponse(String),
}

/// The union a `SupervisorClient` call returns: either a fault the
/// supervisor reported, or a transport-level failure.
#[derive(Debug, Clone, Error)]
pub enum SupervisorError {
    #[error(transparent)]
    Fault(#[from] SupervisorFault),
    #[error(transparent)]
    Transport(#[from] SupervisorTransportError),
}

impl From<SupervisorError> for gowa_core::AdminError {
    fn from(err: SupervisorError) -> Self {
        match err {
            SupervisorError::Fault(fault) => gowa_core::AdminError::start_failed(fault.to_string()),
            SupervisorError::Transport(SupervisorTransportError::Unreachable(detail)) => {
                gowa_core::AdminError::unavailable(detail)
            }
            SupervisorError::Transport(SupervisorTransportError::Unauthenticated) => {
                gowa_core::AdminError::unavailable("supervisor rejected credentials")
            }
            SupervisorError::Transport(SupervisorTransportError::MalformedResponse(detail)) => {
                gowa_core::AdminError::internal(format!("malformed supervisor response: {detail}"))
            }
        }
    }
}
