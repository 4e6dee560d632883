// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered loading with figment.
//!
//! Later layers win: compiled defaults, `/etc/switchboard/switchboard.toml`,
//! `~/.config/switchboard/switchboard.toml`, `./switchboard.toml`, then any
//! `SWITCHBOARD_*` variable.

#![allow(clippy::result_large_err)] // figment::Error is large and not ours to box

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;

use crate::model::SwitchboardConfig;

pub const SYSTEM_CONFIG_PATH: &str = "/etc/switchboard/switchboard.toml";

/// Looked up relative to the working directory.
pub const LOCAL_CONFIG_PATH: &str = "switchboard.toml";

const ENV_PREFIX: &str = "SWITCHBOARD_";

/// `~/.config/switchboard/switchboard.toml`, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("switchboard").join("switchboard.toml"))
}

fn defaults() -> Figment {
    Figment::from(Serialized::defaults(SwitchboardConfig::default()))
}

/// Every layer of the standard hierarchy, environment last.
pub fn build_figment() -> Figment {
    let mut figment = defaults().merge(Toml::file(SYSTEM_CONFIG_PATH));
    if let Some(user) = user_config_path() {
        figment = figment.merge(Toml::file(user));
    }
    figment.merge(Toml::file(LOCAL_CONFIG_PATH)).merge(environment())
}

pub fn load_config() -> Result<SwitchboardConfig, figment::Error> {
    build_figment().extract()
}

/// Defaults plus `path`, with environment overrides on top.
pub fn load_config_from_path(path: &Path) -> Result<SwitchboardConfig, figment::Error> {
    defaults()
        .merge(Toml::file(path))
        .merge(environment())
        .extract()
}

/// Defaults plus one TOML document. The environment is not consulted.
pub fn load_config_from_str(toml_content: &str) -> Result<SwitchboardConfig, figment::Error> {
    defaults().merge(Toml::string(toml_content)).extract()
}

// `Env::split("_")` would break `allow_override` and module names with
// underscores, so keys are mapped by hand.
fn environment() -> Env {
    Env::prefixed(ENV_PREFIX).map(|key| map_env_key(key.as_str()).into())
}

/// `REGISTRY_ALLOW_OVERRIDE` -> `registry.allow_override`,
/// `MODULES_<NAME>_ENABLED` -> `modules.<name>.enabled`.
///
/// Figment hands the name over before lowercasing it.
pub(crate) fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    match key.split_once('_') {
        Some(("modules", rest)) => match rest.strip_suffix("_enabled") {
            Some(module) => format!("modules.{module}.enabled"),
            None => format!("modules.{rest}"),
        },
        Some((section @ ("logging" | "registry"), field)) => format!("{section}.{field}"),
        _ => key.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(map_env_key("logging_level"), "logging.level");
        assert_eq!(map_env_key("registry_allow_override"), "registry.allow_override");
        assert_eq!(map_env_key("registry_load_builtins"), "registry.load_builtins");
        assert_eq!(map_env_key("modules_text_enabled"), "modules.text.enabled");
        assert_eq!(map_env_key("modules_my_mod_enabled"), "modules.my_mod.enabled");
        assert_eq!(map_env_key("REGISTRY_ALLOW_OVERRIDE"), "registry.allow_override");
        assert_eq!(map_env_key("verbose"), "verbose");
    }

    #[test]
    fn user_config_path_is_under_switchboard_dir() {
        if let Some(path) = user_config_path() {
            assert!(path.ends_with("switchboard/switchboard.toml"));
        }
    }
}
