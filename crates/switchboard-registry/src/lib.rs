// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Module adapter registry for Switchboard.
//!
//! Holds the set of loaded modules, enforces name uniqueness and the global
//! collision rule, resolves qualified and unqualified function names, and
//! offers introspection (`list`, `describe`, catalog search) plus TOML
//! manifest parsing for declaring module schemas.

pub mod adapter;
pub mod catalog;
pub mod manifest;
pub mod registry;

pub use adapter::{ModuleAdapter, ModuleAdapterBuilder};
pub use catalog::search_catalog;
pub use manifest::{parse_module_manifest, ModuleManifest};
pub use registry::{
    ModuleDescription, ModuleNames, ModuleRegistry, RegistryPolicy, ResolvedFunction,
};
