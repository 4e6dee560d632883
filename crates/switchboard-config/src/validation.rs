// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as the set of accepted log levels and known module names.

use crate::diagnostic::{suggest_key, ConfigError};
use crate::model::SwitchboardConfig;

/// Accepted values of `logging.level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// `known_modules` lists the module names a `[modules.<name>]` section may
/// refer to. Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)`
/// with all collected validation errors (does not fail fast).
pub fn validate_config(
    config: &SwitchboardConfig,
    known_modules: &[&str],
) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.logging.level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` must be one of: {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    for name in config.modules.keys() {
        if !known_modules.contains(&name.as_str()) {
            errors.push(ConfigError::UnknownModule {
                name: name.clone(),
                suggestion: suggest_key(name, known_modules),
                known: known_modules.join(", "),
            });
        }
    }

    if !config.registry.load_builtins && !config.modules.is_empty() {
        tracing::warn!("[modules] toggles have no effect while registry.load_builtins is false");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
