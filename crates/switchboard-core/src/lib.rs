// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Switchboard module registry.
//!
//! This crate provides the foundational types shared by the registry, the
//! dispatcher, and every module package: the error taxonomy, structural type
//! tags, function and module descriptors, and the [`ModuleFunction`]
//! capability trait that implementations satisfy.

pub mod args;
pub mod descriptor;
pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use args::ArgumentsExt;
pub use descriptor::{DescriptorError, FunctionDescriptor, ModuleDescriptor, ParamSpec};
pub use error::{ErrorKind, ErrorPhase, ImplementationError, SwitchboardError};
pub use traits::{function_fn, sync_fn, ModuleFunction};
pub use types::{Arguments, TypeTag, ValueKind};
