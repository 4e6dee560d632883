// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in reference modules for Switchboard hosts.
//!
//! These modules exercise the adapter contract end to end: a scoped module
//! built in code (`math`), a scoped module declared by a TOML manifest
//! (`text`), and two global modules (`uuid`, `time`).

pub mod clock;
pub mod identifiers;
pub mod math;
pub mod text;

use switchboard_core::SwitchboardError;
use switchboard_registry::{ModuleAdapter, ModuleRegistry};
use tracing::debug;

type AdapterFn = fn() -> Result<ModuleAdapter, SwitchboardError>;

const BUILTINS: [(&str, AdapterFn); 4] = [
    (math::NAME, math::adapter),
    (identifiers::NAME, identifiers::adapter),
    (text::NAME, text::adapter),
    (clock::NAME, clock::adapter),
];

/// Names of all built-in modules, in registration order.
pub const BUILTIN_MODULES: [&str; 4] = [math::NAME, identifiers::NAME, text::NAME, clock::NAME];

/// Registers every built-in module accepted by `enabled`.
///
/// Returns the names registered, in order. Stops at the first registration
/// failure; modules registered before it stay registered.
pub fn register_builtins<F>(
    registry: &ModuleRegistry,
    enabled: F,
) -> Result<Vec<&'static str>, SwitchboardError>
where
    F: Fn(&str) -> bool,
{
    let mut registered = Vec::new();
    for (name, build) in BUILTINS {
        if !enabled(name) {
            debug!(module = name, "built-in module disabled");
            continue;
        }
        registry.register(build()?)?;
        registered.push(name);
    }
    Ok(registered)
}
