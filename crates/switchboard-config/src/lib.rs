// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the Switchboard host.
//!
//! Settings come from compiled defaults, up to three `switchboard.toml` files
//! and `SWITCHBOARD_*` environment variables. Unknown keys are rejected, and
//! every problem is reported as a [`ConfigError`] that miette can render
//! against the file it came from.
//!
//! ```no_run
//! use switchboard_config::load_and_validate;
//!
//! let config = load_and_validate(&["math", "uuid"]).expect("config errors");
//! assert!(config.registry.load_builtins);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::{Path, PathBuf};

pub use diagnostic::{render_errors, render_errors_to_string, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{LoggingConfig, ModuleToggle, RegistryConfig, SwitchboardConfig};

/// Loads the standard hierarchy, then checks the result against
/// `known_modules`.
pub fn load_and_validate(known_modules: &[&str]) -> Result<SwitchboardConfig, Vec<ConfigError>> {
    checked(loader::load_config(), known_modules, hierarchy_sources)
}

/// Like [`load_and_validate`], but reads `path` instead of the hierarchy.
/// Environment overrides still apply.
pub fn load_and_validate_path(
    path: &Path,
    known_modules: &[&str],
) -> Result<SwitchboardConfig, Vec<ConfigError>> {
    if !path.is_file() {
        return Err(vec![ConfigError::Other(format!(
            "config file `{}` does not exist",
            path.display()
        ))]);
    }
    checked(loader::load_config_from_path(path), known_modules, || {
        read_sources([path.to_path_buf()])
    })
}

/// Validates an in-memory TOML document. Environment variables are ignored.
pub fn load_and_validate_str(
    toml_content: &str,
    known_modules: &[&str],
) -> Result<SwitchboardConfig, Vec<ConfigError>> {
    checked(loader::load_config_from_str(toml_content), known_modules, || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

/// Runs validation on a successful load; otherwise turns the figment error
/// into diagnostics, reading the sources only when they are needed.
fn checked(
    loaded: Result<SwitchboardConfig, figment::Error>,
    known_modules: &[&str],
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<SwitchboardConfig, Vec<ConfigError>> {
    let config = loaded.map_err(|err| diagnostic::figment_to_config_errors(err, &sources()))?;
    validation::validate_config(&config, known_modules)?;
    Ok(config)
}

fn hierarchy_sources() -> Vec<(String, String)> {
    let local = std::env::current_dir()
        .map(|dir| dir.join(loader::LOCAL_CONFIG_PATH))
        .unwrap_or_else(|_| PathBuf::from(loader::LOCAL_CONFIG_PATH));

    let candidates = [
        Some(local),
        loader::user_config_path(),
        Some(PathBuf::from(loader::SYSTEM_CONFIG_PATH)),
    ];
    read_sources(candidates.into_iter().flatten())
}

/// `(display path, content)` for each readable file.
fn read_sources(paths: impl IntoIterator<Item = PathBuf>) -> Vec<(String, String)> {
    paths
        .into_iter()
        .filter_map(|path| {
            let content = std::fs::read_to_string(&path).ok()?;
            Some((path.display().to_string(), content))
        })
        .collect()
}
