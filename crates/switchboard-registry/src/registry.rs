// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The module registry.
//!
//! [`ModuleRegistry`] owns the authoritative set of loaded modules and the
//! index of globally reachable functions. Both maps live in one immutable
//! snapshot: writers serialize on a mutex, build the next snapshot, and swap
//! it in atomically, so readers never see a half-applied registration and
//! never block on a writer.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;
use indexmap::IndexMap;
use serde::Serialize;
use switchboard_core::{FunctionDescriptor, ModuleDescriptor, ModuleFunction, SwitchboardError};
use tracing::{debug, info, warn};

use crate::adapter::ModuleAdapter;

/// Write-side policy of a registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryPolicy {
    /// Permits [`ModuleRegistry::register_override`] to replace a module.
    pub allow_override: bool,
}

/// A function located by [`ModuleRegistry::resolve`].
#[derive(Clone)]
pub struct ResolvedFunction {
    module: String,
    descriptor: Arc<FunctionDescriptor>,
    implementation: Arc<dyn ModuleFunction>,
}

impl ResolvedFunction {
    /// Name of the owning module.
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Name of the function.
    pub fn function(&self) -> &str {
        &self.descriptor.name
    }

    pub fn descriptor(&self) -> &FunctionDescriptor {
        &self.descriptor
    }

    pub fn implementation(&self) -> &Arc<dyn ModuleFunction> {
        &self.implementation
    }
}

impl std::fmt::Debug for ResolvedFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedFunction")
            .field("module", &self.module)
            .field("function", &self.descriptor.name)
            .finish()
    }
}

/// Read-only view of one registered module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleDescription {
    pub module: ModuleDescriptor,
    pub global: bool,
    pub functions: Vec<FunctionDescriptor>,
}

impl ModuleDescription {
    fn of(adapter: &ModuleAdapter) -> Self {
        Self {
            module: adapter.module_metadata().clone(),
            global: adapter.is_global(),
            functions: adapter.function_metadata().cloned().collect(),
        }
    }
}

#[derive(Clone, Default)]
struct RegistrySnapshot {
    modules: IndexMap<String, Arc<ModuleAdapter>>,
    /// Function name -> owning global module.
    global_index: HashMap<String, String>,
}

/// Module names captured at one point in time, in registration order.
///
/// Iterating is lazy and may be repeated; registrations made after the
/// listing was taken never appear in it.
#[derive(Clone)]
pub struct ModuleNames {
    snapshot: Arc<RegistrySnapshot>,
}

impl ModuleNames {
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.snapshot.modules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.snapshot.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.modules.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }
}

impl std::fmt::Debug for ModuleNames {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Process-scoped collection of module adapters.
///
/// Construct one explicitly per host (or per test); there is no implicit
/// global instance.
pub struct ModuleRegistry {
    snapshot: ArcSwap<RegistrySnapshot>,
    write_lock: Mutex<()>,
    policy: RegistryPolicy,
}

impl ModuleRegistry {
    /// Creates an empty registry that rejects overrides.
    pub fn new() -> Self {
        Self::with_policy(RegistryPolicy::default())
    }

    /// Creates an empty registry with an explicit write policy.
    pub fn with_policy(policy: RegistryPolicy) -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(RegistrySnapshot::default()),
            write_lock: Mutex::new(()),
            policy,
        }
    }

    pub fn policy(&self) -> RegistryPolicy {
        self.policy
    }

    /// Registers an adapter under its name.
    ///
    /// # Errors
    ///
    /// - `SchemaMismatch` if the adapter violates the construction contract.
    /// - `DuplicateModule` if the name is taken.
    /// - `GlobalCollision` if a global adapter exposes a function name that
    ///   another global module already provides.
    ///
    /// A failed registration leaves the registry unchanged.
    pub fn register(&self, adapter: ModuleAdapter) -> Result<(), SwitchboardError> {
        self.insert(adapter, false)
    }

    /// Registers an adapter, replacing any module of the same name.
    ///
    /// Only honoured when the registry's policy allows overrides; otherwise
    /// behaves exactly like [`register`](Self::register). The replaced
    /// module's global entries are released before collision checking, and
    /// the replacement keeps the original module's enumeration position.
    pub fn register_override(&self, adapter: ModuleAdapter) -> Result<(), SwitchboardError> {
        self.insert(adapter, self.policy.allow_override)
    }

    fn insert(&self, adapter: ModuleAdapter, replace: bool) -> Result<(), SwitchboardError> {
        if let Err(err) = adapter.check_shape() {
            warn!(module = %adapter.name(), error = %err, "module registration rejected");
            return Err(err);
        }

        let meta = adapter.module_metadata();
        if let Some(version) = &meta.version {
            if meta.semver().is_none() {
                warn!(module = %adapter.name(), version = %version, "module version is not valid semver");
            }
        }

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let current = self.snapshot.load_full();
        let name = adapter.name().to_string();
        let mut next = (*current).clone();

        let replaced = next.modules.contains_key(&name);
        if replaced {
            if !replace {
                warn!(module = %name, "module registration rejected: duplicate name");
                return Err(SwitchboardError::DuplicateModule { name });
            }
            next.global_index.retain(|_, owner| owner != &name);
        }

        if adapter.is_global() {
            for function in adapter.function_names() {
                if let Some(existing) = next.global_index.get(function) {
                    warn!(
                        module = %name,
                        function = %function,
                        existing = %existing,
                        "module registration rejected: global function collision"
                    );
                    return Err(SwitchboardError::GlobalCollision {
                        function: function.to_string(),
                        module: name,
                        existing: existing.clone(),
                    });
                }
            }
            for function in adapter.function_names() {
                next.global_index.insert(function.to_string(), name.clone());
            }
        }

        let global = adapter.is_global();
        let functions = adapter.function_count();
        next.modules.insert(name.clone(), Arc::new(adapter));
        self.snapshot.store(Arc::new(next));

        info!(module = %name, global, functions, replaced, "module registered");
        Ok(())
    }

    /// Removes a module and its global index entries.
    ///
    /// # Errors
    ///
    /// Returns `UnknownModule` if no module has this name.
    pub fn unregister(&self, module: &str) -> Result<(), SwitchboardError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let current = self.snapshot.load_full();
        let mut next = (*current).clone();

        let Some(removed) = next.modules.shift_remove(module) else {
            return Err(SwitchboardError::UnknownModule {
                module: module.to_string(),
            });
        };
        if removed.is_global() {
            next.global_index.retain(|_, owner| owner != module);
        }
        self.snapshot.store(Arc::new(next));

        info!(module = %module, "module unregistered");
        Ok(())
    }

    /// Resolves a function, qualified by module or through the global index.
    ///
    /// # Errors
    ///
    /// - qualified: `UnknownModule`, then `UnknownFunction`;
    /// - unqualified: `UnknownGlobalFunction`. Functions of scoped modules
    ///   are never reachable without their module name.
    pub fn resolve(
        &self,
        module: Option<&str>,
        function: &str,
    ) -> Result<ResolvedFunction, SwitchboardError> {
        let snapshot = self.snapshot.load();

        let adapter = match module {
            Some(module) => snapshot.modules.get(module).ok_or_else(|| {
                SwitchboardError::UnknownModule {
                    module: module.to_string(),
                }
            })?,
            None => snapshot
                .global_index
                .get(function)
                .and_then(|owner| snapshot.modules.get(owner))
                .ok_or_else(|| SwitchboardError::UnknownGlobalFunction {
                    function: function.to_string(),
                })?,
        };

        let (descriptor, implementation) =
            adapter
                .lookup(function)
                .ok_or_else(|| SwitchboardError::UnknownFunction {
                    module: adapter.name().to_string(),
                    function: function.to_string(),
                })?;

        debug!(module = %adapter.name(), function = %function, qualified = module.is_some(), "function resolved");
        Ok(ResolvedFunction {
            module: adapter.name().to_string(),
            descriptor,
            implementation,
        })
    }

    /// Module names in registration order, as of now.
    pub fn list(&self) -> ModuleNames {
        ModuleNames {
            snapshot: self.snapshot.load_full(),
        }
    }

    /// Describes one module for tooling.
    ///
    /// # Errors
    ///
    /// Returns `UnknownModule` if no module has this name.
    pub fn describe(&self, module: &str) -> Result<ModuleDescription, SwitchboardError> {
        self.snapshot
            .load()
            .modules
            .get(module)
            .map(|adapter| ModuleDescription::of(adapter))
            .ok_or_else(|| SwitchboardError::UnknownModule {
                module: module.to_string(),
            })
    }

    /// Describes every module, in registration order, from one snapshot.
    pub fn describe_all(&self) -> Vec<ModuleDescription> {
        self.snapshot
            .load()
            .modules
            .values()
            .map(|adapter| ModuleDescription::of(adapter))
            .collect()
    }

    /// `(function, module)` pairs of the global index, sorted by function name.
    pub fn global_functions(&self) -> Vec<(String, String)> {
        let snapshot = self.snapshot.load();
        let mut entries: Vec<(String, String)> = snapshot
            .global_index
            .iter()
            .map(|(function, module)| (function.clone(), module.clone()))
            .collect();
        entries.sort();
        entries
    }

    pub fn contains(&self, module: &str) -> bool {
        self.snapshot.load().modules.contains_key(module)
    }

    /// Returns the number of registered modules.
    pub fn len(&self) -> usize {
        self.snapshot.load().modules.len()
    }

    /// Returns true if no modules are registered.
    pub fn is_empty(&self) -> bool {
        self.snapshot.load().modules.is_empty()
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
