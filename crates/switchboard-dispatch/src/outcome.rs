// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serializable result envelope for hosts that emit JSON.

use serde::Serialize;
use serde_json::Value;
use switchboard_core::{ErrorKind, ErrorPhase, SwitchboardError};

/// Error half of an [`Outcome`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeError {
    pub kind: String,
    pub phase: String,
    pub message: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub details: Value,
}

/// Normalized outcome of one invocation.
///
/// Serializes as `{"ok": true, "value": ...}` or
/// `{"ok": false, "error": {"kind", "phase", "message", "details"}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Success { ok: bool, value: Value },
    Failure { ok: bool, error: OutcomeError },
}

impl Outcome {
    pub fn success(value: Value) -> Self {
        Outcome::Success { ok: true, value }
    }

    pub fn failure(err: &SwitchboardError) -> Self {
        Outcome::Failure {
            ok: false,
            error: OutcomeError {
                kind: err.kind().to_string(),
                phase: err.phase().to_string(),
                message: err.to_string(),
                details: err.details(),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// The error tag of a failed outcome.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Outcome::Failure { error, .. } => error.kind.parse().ok(),
            Outcome::Success { .. } => None,
        }
    }

    /// The phase of a failed outcome.
    pub fn error_phase(&self) -> Option<ErrorPhase> {
        match self {
            Outcome::Failure { error, .. } => error.phase.parse().ok(),
            Outcome::Success { .. } => None,
        }
    }
}

impl From<Result<Value, SwitchboardError>> for Outcome {
    fn from(result: Result<Value, SwitchboardError>) -> Self {
        match result {
            Ok(value) => Outcome::success(value),
            Err(err) => Outcome::failure(&err),
        }
    }
}
