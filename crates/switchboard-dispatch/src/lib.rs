// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Invocation dispatcher for Switchboard.
//!
//! Resolves a (fully or partially qualified) call through a
//! [`ModuleRegistry`](switchboard_registry::ModuleRegistry), validates the
//! arguments against the function descriptor, invokes the implementation
//! and normalizes the outcome.

pub mod dispatcher;
pub mod outcome;
pub mod validate;

pub use dispatcher::{split_target, Dispatcher};
pub use outcome::{Outcome, OutcomeError};
pub use validate::validate_arguments;
