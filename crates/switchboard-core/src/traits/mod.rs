// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability traits implemented by module packages.

pub mod function;

pub use function::{function_fn, sync_fn, FnFunction, ModuleFunction, SyncFunction};
