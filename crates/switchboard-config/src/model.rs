// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `switchboard.toml` schema.
//!
//! Every table denies unknown fields, so a misspelled key fails the load
//! instead of being silently ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root of the configuration. Each section may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SwitchboardConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Registry write policy and built-in loading.
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Per-module toggles for built-in modules, keyed by module name.
    #[serde(default)]
    pub modules: BTreeMap<String, ModuleToggle>,
}

impl SwitchboardConfig {
    /// Whether the built-in module `name` should be loaded.
    ///
    /// Modules without a `[modules.<name>]` section are enabled.
    pub fn module_enabled(&self, name: &str) -> bool {
        self.modules.get(name).is_none_or(|toggle| toggle.enabled)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Registry configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Permit replacing a registered module through `register_override`.
    #[serde(default)]
    pub allow_override: bool,

    /// Register the built-in modules at startup.
    #[serde(default = "default_true")]
    pub load_builtins: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            allow_override: false,
            load_builtins: true,
        }
    }
}

/// Toggle for a single built-in module.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleToggle {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for ModuleToggle {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_true() -> bool {
    true
}
