// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host assembly: configuration to registry and dispatcher.

use std::sync::Arc;

use switchboard_builtins::register_builtins;
use switchboard_config::SwitchboardConfig;
use switchboard_core::SwitchboardError;
use switchboard_dispatch::Dispatcher;
use switchboard_registry::{ModuleRegistry, RegistryPolicy};
use tracing::info;

/// Builds the registry described by `config` and a dispatcher over it.
pub fn build_dispatcher(config: &SwitchboardConfig) -> Result<Dispatcher, SwitchboardError> {
    let registry = ModuleRegistry::with_policy(RegistryPolicy {
        allow_override: config.registry.allow_override,
    });

    if config.registry.load_builtins {
        let loaded = register_builtins(&registry, |name| config.module_enabled(name))?;
        info!(modules = ?loaded, "built-in modules loaded");
    }

    Ok(Dispatcher::new(Arc::new(registry)))
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise Switchboard crates log at `log_level`
/// and everything else at `warn`. Output goes to stderr so command output on
/// stdout stays machine-readable.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("switchboard={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchboard_config::ModuleToggle;

    #[test]
    fn default_config_loads_every_builtin() {
        let dispatcher = build_dispatcher(&SwitchboardConfig::default()).unwrap();
        assert_eq!(
            dispatcher.registry().list().to_vec(),
            vec!["math", "uuid", "text", "time"]
        );
        assert!(!dispatcher.registry().policy().allow_override);
    }

    #[test]
    fn disabled_module_is_skipped() {
        let mut config = SwitchboardConfig::default();
        config
            .modules
            .insert("time".to_string(), ModuleToggle { enabled: false });
        let dispatcher = build_dispatcher(&config).unwrap();
        assert!(!dispatcher.registry().contains("time"));
    }

    #[test]
    fn builtins_can_be_turned_off() {
        let mut config = SwitchboardConfig::default();
        config.registry.load_builtins = false;
        config.registry.allow_override = true;
        let dispatcher = build_dispatcher(&config).unwrap();
        assert!(dispatcher.registry().is_empty());
        assert!(dispatcher.registry().policy().allow_override);
    }
}
