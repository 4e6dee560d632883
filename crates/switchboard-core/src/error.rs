// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Switchboard registry and dispatcher.
//!
//! Every registry or dispatcher operation either succeeds or fails with
//! exactly one [`SwitchboardError`]. Each variant carries a stable tag
//! ([`ErrorKind`]) and belongs to one [`ErrorPhase`], so callers can tell a
//! malformed call apart from a failed operation.

use serde_json::{json, Value};
use strum::{Display, EnumString};
use thiserror::Error;

use crate::types::{TypeTag, ValueKind};

/// Stable tag naming each error variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum ErrorKind {
    DuplicateModule,
    SchemaMismatch,
    GlobalCollision,
    UnknownModule,
    UnknownFunction,
    UnknownGlobalFunction,
    MissingArgument,
    TypeMismatch,
    UnexpectedArgument,
    ImplementationError,
}

/// The stage of the call path that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum ErrorPhase {
    Registration,
    Resolution,
    Validation,
    Execution,
}

impl ErrorKind {
    /// Returns the phase this kind of error is raised in.
    pub fn phase(self) -> ErrorPhase {
        match self {
            ErrorKind::DuplicateModule | ErrorKind::SchemaMismatch | ErrorKind::GlobalCollision => {
                ErrorPhase::Registration
            }
            ErrorKind::UnknownModule
            | ErrorKind::UnknownFunction
            | ErrorKind::UnknownGlobalFunction => ErrorPhase::Resolution,
            ErrorKind::MissingArgument | ErrorKind::TypeMismatch | ErrorKind::UnexpectedArgument => {
                ErrorPhase::Validation
            }
            ErrorKind::ImplementationError => ErrorPhase::Execution,
        }
    }
}

/// Failure raised by a module function implementation.
///
/// The payload is implementation-defined: a message, optional structured
/// details, and an optional underlying error. The dispatcher propagates it
/// unchanged.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ImplementationError {
    /// Human-readable failure message.
    pub message: String,
    /// Optional structured payload supplied by the implementation.
    pub details: Option<Value>,
    /// Optional underlying error.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ImplementationError {
    /// Creates an implementation error with only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
            source: None,
        }
    }

    /// Attaches a structured payload.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Attaches the underlying error.
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

/// The primary error type of the registry and dispatcher.
#[derive(Debug, Error)]
pub enum SwitchboardError {
    /// A module with the same name is already registered.
    #[error("module `{name}` is already registered")]
    DuplicateModule { name: String },

    /// The adapter does not satisfy the construction contract.
    #[error("module `{module}` does not match the adapter schema: {reason}")]
    SchemaMismatch { module: String, reason: String },

    /// A global module exposes a function name already owned by another global module.
    #[error("global function `{function}` of module `{module}` is already provided by `{existing}`")]
    GlobalCollision {
        function: String,
        module: String,
        existing: String,
    },

    /// No module is registered under the given name.
    #[error("unknown module `{module}`")]
    UnknownModule { module: String },

    /// The module exists but has no function of that name.
    #[error("module `{module}` has no function `{function}`")]
    UnknownFunction { module: String, function: String },

    /// No global module contributes the requested function.
    #[error("no global function named `{function}`")]
    UnknownGlobalFunction { function: String },

    /// A required parameter was not supplied.
    #[error("missing required argument `{param}`")]
    MissingArgument { param: String },

    /// A supplied argument has the wrong structural kind.
    #[error("argument `{param}` expected {expected}, got {actual}")]
    TypeMismatch {
        param: String,
        expected: TypeTag,
        actual: ValueKind,
    },

    /// An argument was supplied that the descriptor does not declare.
    #[error("unexpected argument `{name}`")]
    UnexpectedArgument { name: String },

    /// The invoked implementation failed.
    #[error("implementation error: {0}")]
    Implementation(#[from] ImplementationError),
}

impl SwitchboardError {
    /// Returns the stable tag of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateModule { .. } => ErrorKind::DuplicateModule,
            Self::SchemaMismatch { .. } => ErrorKind::SchemaMismatch,
            Self::GlobalCollision { .. } => ErrorKind::GlobalCollision,
            Self::UnknownModule { .. } => ErrorKind::UnknownModule,
            Self::UnknownFunction { .. } => ErrorKind::UnknownFunction,
            Self::UnknownGlobalFunction { .. } => ErrorKind::UnknownGlobalFunction,
            Self::MissingArgument { .. } => ErrorKind::MissingArgument,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::UnexpectedArgument { .. } => ErrorKind::UnexpectedArgument,
            Self::Implementation(_) => ErrorKind::ImplementationError,
        }
    }

    /// Returns the phase that raised this error.
    pub fn phase(&self) -> ErrorPhase {
        self.kind().phase()
    }

    /// True when the caller's request was malformed (resolution or validation).
    ///
    /// Repeating such a call unchanged will fail the same way.
    pub fn is_caller_error(&self) -> bool {
        matches!(self.phase(), ErrorPhase::Resolution | ErrorPhase::Validation)
    }

    /// True only for implementation failures; a caller-side retry policy
    /// should consult this before retrying.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::ImplementationError
    }

    /// Returns the variant's fields as a JSON object.
    pub fn details(&self) -> Value {
        match self {
            Self::DuplicateModule { name } => json!({ "module": name }),
            Self::SchemaMismatch { module, reason } => json!({ "module": module, "reason": reason }),
            Self::GlobalCollision {
                function,
                module,
                existing,
            } => json!({ "function": function, "module": module, "existing": existing }),
            Self::UnknownModule { module } => json!({ "module": module }),
            Self::UnknownFunction { module, function } => {
                json!({ "module": module, "function": function })
            }
            Self::UnknownGlobalFunction { function } => json!({ "function": function }),
            Self::MissingArgument { param } => json!({ "param": param }),
            Self::TypeMismatch {
                param,
                expected,
                actual,
            } => json!({
                "param": param,
                "expected": expected.to_string(),
                "actual": actual.to_string(),
            }),
            Self::UnexpectedArgument { name } => json!({ "name": name }),
            Self::Implementation(err) => err.details.clone().unwrap_or(Value::Null),
        }
    }
}
