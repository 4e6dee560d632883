// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Module manifest parsing from TOML.
//!
//! A manifest declares a module's metadata and function schemas without any
//! code; [`ModuleAdapter::from_manifest`] then binds implementations to the
//! declared functions by name.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use switchboard_core::{FunctionDescriptor, ModuleDescriptor, ModuleFunction, SwitchboardError};

use crate::adapter::ModuleAdapter;

/// Parsed module manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleManifest {
    pub module: ModuleDescriptor,
    pub global: bool,
    /// Function schemas in declaration order.
    pub functions: Vec<FunctionDescriptor>,
}

/// Intermediate TOML deserialization struct for a manifest file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestFile {
    module: ModuleSection,
    #[serde(default)]
    functions: Vec<FunctionDescriptor>,
}

/// The `[module]` section of a manifest.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModuleSection {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    category: String,
    version: Option<String>,
    #[serde(default)]
    global: bool,
}

/// Parse a module manifest from TOML content.
///
/// Rejects malformed TOML, unknown type tags, empty names, duplicate
/// function names and descriptors that break their own invariants, all as
/// `SchemaMismatch`.
pub fn parse_module_manifest(toml_content: &str) -> Result<ModuleManifest, SwitchboardError> {
    let file: ManifestFile =
        toml::from_str(toml_content).map_err(|e| SwitchboardError::SchemaMismatch {
            module: String::new(),
            reason: format!("invalid module manifest: {e}"),
        })?;

    let section = file.module;
    let mismatch = |reason: String| SwitchboardError::SchemaMismatch {
        module: section.name.clone(),
        reason,
    };

    if section.name.is_empty() {
        return Err(mismatch("module manifest: name must not be empty".to_string()));
    }

    let mut seen = HashSet::with_capacity(file.functions.len());
    for function in &file.functions {
        function.validate().map_err(|e| mismatch(e.to_string()))?;
        if !seen.insert(function.name.as_str()) {
            return Err(mismatch(format!(
                "module manifest: function `{}` declared more than once",
                function.name
            )));
        }
    }

    Ok(ModuleManifest {
        module: ModuleDescriptor {
            name: section.name,
            description: section.description,
            category: section.category,
            version: section.version,
        },
        global: section.global,
        functions: file.functions,
    })
}

impl ModuleAdapter {
    /// Binds implementations to the functions a manifest declares.
    ///
    /// Implementations are matched by function name. A missing or surplus
    /// implementation is not rejected here; `register` reports it as
    /// `SchemaMismatch`.
    pub fn from_manifest<I>(manifest: ModuleManifest, implementations: I) -> Self
    where
        I: IntoIterator<Item = (String, Arc<dyn ModuleFunction>)>,
    {
        let name = manifest.module.name.clone();
        let metadata = manifest
            .functions
            .into_iter()
            .map(|descriptor| (descriptor.name.clone(), descriptor));
        ModuleAdapter::new(
            name,
            implementations,
            metadata,
            manifest.module,
            manifest.global,
        )
    }
}
