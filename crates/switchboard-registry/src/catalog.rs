// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Case-insensitive search over registered modules.

use crate::registry::{ModuleDescription, ModuleRegistry};

/// Returns the modules matching `query`, in registration order.
///
/// A module matches when its name, description or category, or the name or
/// description of any of its functions, contains the query ignoring case.
/// An empty query matches every module.
pub fn search_catalog(registry: &ModuleRegistry, query: &str) -> Vec<ModuleDescription> {
    let needle = query.trim().to_lowercase();
    registry
        .describe_all()
        .into_iter()
        .filter(|description| needle.is_empty() || matches(description, &needle))
        .collect()
}

fn matches(description: &ModuleDescription, needle: &str) -> bool {
    let contains = |haystack: &str| haystack.to_lowercase().contains(needle);
    let module = &description.module;
    contains(&module.name)
        || contains(&module.description)
        || contains(&module.category)
        || description
            .functions
            .iter()
            .any(|f| contains(&f.name) || contains(&f.description))
}
