// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The module adapter: the unit of registration.
//!
//! A [`ModuleAdapter`] bundles a module name, its function implementations,
//! one [`FunctionDescriptor`] per implementation, the owning
//! [`ModuleDescriptor`], and the `global` visibility flag. Adapters are
//! immutable once constructed; the registry checks their shape with
//! [`ModuleAdapter::check_shape`] before accepting them.

use std::collections::BTreeSet;
use std::sync::Arc;

use indexmap::IndexMap;
use switchboard_core::{FunctionDescriptor, ModuleDescriptor, ModuleFunction, SwitchboardError};

/// A module's functions, their descriptors, and its metadata.
pub struct ModuleAdapter {
    name: String,
    functions: IndexMap<String, Arc<dyn ModuleFunction>>,
    function_metadata: IndexMap<String, Arc<FunctionDescriptor>>,
    module_metadata: ModuleDescriptor,
    global: bool,
}

impl std::fmt::Debug for ModuleAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleAdapter")
            .field("name", &self.name)
            .field("functions", &self.functions.keys().collect::<Vec<_>>())
            .field("function_metadata", &self.function_metadata.keys().collect::<Vec<_>>())
            .field("module_metadata", &self.module_metadata)
            .field("global", &self.global)
            .finish()
    }
}

impl ModuleAdapter {
    /// Constructs an adapter from the three values a module package supplies,
    /// plus its name and visibility.
    ///
    /// No checks happen here; [`ModuleRegistry::register`](crate::ModuleRegistry::register)
    /// rejects a malformed adapter with `SchemaMismatch`.
    pub fn new<F, M>(
        name: impl Into<String>,
        functions: F,
        function_metadata: M,
        module_metadata: ModuleDescriptor,
        global: bool,
    ) -> Self
    where
        F: IntoIterator<Item = (String, Arc<dyn ModuleFunction>)>,
        M: IntoIterator<Item = (String, FunctionDescriptor)>,
    {
        Self {
            name: name.into(),
            functions: functions.into_iter().collect(),
            function_metadata: function_metadata
                .into_iter()
                .map(|(key, desc)| (key, Arc::new(desc)))
                .collect(),
            module_metadata,
            global,
        }
    }

    /// Starts a builder that keeps implementations and descriptors in step.
    pub fn builder(module_metadata: ModuleDescriptor) -> ModuleAdapterBuilder {
        ModuleAdapterBuilder {
            functions: IndexMap::new(),
            function_metadata: IndexMap::new(),
            duplicates: Vec::new(),
            module_metadata,
            global: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_global(&self) -> bool {
        self.global
    }

    pub fn module_metadata(&self) -> &ModuleDescriptor {
        &self.module_metadata
    }

    /// Function descriptors in declaration order.
    pub fn function_metadata(&self) -> impl Iterator<Item = &FunctionDescriptor> {
        self.function_metadata.values().map(Arc::as_ref)
    }

    /// Names of the declared functions, in declaration order.
    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.function_metadata.keys().map(String::as_str)
    }

    pub fn function_count(&self) -> usize {
        self.function_metadata.len()
    }

    /// Looks up the descriptor and implementation of one function.
    pub(crate) fn lookup(
        &self,
        function: &str,
    ) -> Option<(Arc<FunctionDescriptor>, Arc<dyn ModuleFunction>)> {
        let descriptor = self.function_metadata.get(function)?;
        let implementation = self.functions.get(function)?;
        Some((Arc::clone(descriptor), Arc::clone(implementation)))
    }

    /// Verifies the construction contract.
    ///
    /// The module name must be non-empty and equal the descriptor's name, the
    /// implementation and descriptor key sets must be identical, every
    /// descriptor must be stored under its own name, and every descriptor
    /// must satisfy its invariants.
    pub fn check_shape(&self) -> Result<(), SwitchboardError> {
        let mismatch = |reason: String| SwitchboardError::SchemaMismatch {
            module: self.name.clone(),
            reason,
        };

        if self.name.is_empty() {
            return Err(mismatch("module name must not be empty".to_string()));
        }
        if self.name != self.module_metadata.name {
            return Err(mismatch(format!(
                "adapter name `{}` does not match module descriptor name `{}`",
                self.name, self.module_metadata.name
            )));
        }

        let implemented: BTreeSet<&str> = self.functions.keys().map(String::as_str).collect();
        let described: BTreeSet<&str> = self.function_metadata.keys().map(String::as_str).collect();
        let orphan_impls: Vec<&str> = implemented.difference(&described).copied().collect();
        if !orphan_impls.is_empty() {
            return Err(mismatch(format!(
                "implementations without descriptors: {}",
                orphan_impls.join(", ")
            )));
        }
        let orphan_descs: Vec<&str> = described.difference(&implemented).copied().collect();
        if !orphan_descs.is_empty() {
            return Err(mismatch(format!(
                "descriptors without implementations: {}",
                orphan_descs.join(", ")
            )));
        }

        for (key, descriptor) in &self.function_metadata {
            if key != &descriptor.name {
                return Err(mismatch(format!(
                    "descriptor stored under `{key}` is named `{}`",
                    descriptor.name
                )));
            }
            descriptor.validate().map_err(|e| mismatch(e.to_string()))?;
        }

        Ok(())
    }
}

/// Builds a [`ModuleAdapter`] one function at a time.
pub struct ModuleAdapterBuilder {
    functions: IndexMap<String, Arc<dyn ModuleFunction>>,
    function_metadata: IndexMap<String, FunctionDescriptor>,
    duplicates: Vec<String>,
    module_metadata: ModuleDescriptor,
    global: bool,
}

impl ModuleAdapterBuilder {
    /// Marks the module's functions as reachable without qualification.
    pub fn global(mut self, global: bool) -> Self {
        self.global = global;
        self
    }

    /// Adds a function, keyed by its descriptor's name.
    pub fn function(
        mut self,
        descriptor: FunctionDescriptor,
        implementation: Arc<dyn ModuleFunction>,
    ) -> Self {
        let key = descriptor.name.clone();
        if self.function_metadata.contains_key(&key) {
            self.duplicates.push(key);
            return self;
        }
        self.functions.insert(key.clone(), implementation);
        self.function_metadata.insert(key, descriptor);
        self
    }

    /// Finishes the adapter.
    ///
    /// Fails with `SchemaMismatch` if the same function name was added twice.
    pub fn build(self) -> Result<ModuleAdapter, SwitchboardError> {
        let name = self.module_metadata.name.clone();
        if !self.duplicates.is_empty() {
            return Err(SwitchboardError::SchemaMismatch {
                module: name,
                reason: format!("functions declared twice: {}", self.duplicates.join(", ")),
            });
        }
        Ok(ModuleAdapter::new(
            name,
            self.functions,
            self.function_metadata,
            self.module_metadata,
            self.global,
        ))
    }
}
