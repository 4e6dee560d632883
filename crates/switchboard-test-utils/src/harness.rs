// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end dispatch tests.
//!
//! `TestHarness` owns a fresh [`ModuleRegistry`] and a [`Dispatcher`] over
//! it. Every harness is independent, so tests can run in parallel.

use std::sync::Arc;

use serde_json::Value;
use switchboard_core::{Arguments, SwitchboardError};
use switchboard_dispatch::{Dispatcher, Outcome};
use switchboard_registry::{ModuleAdapter, ModuleRegistry, RegistryPolicy};

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    policy: RegistryPolicy,
    modules: Vec<Result<ModuleAdapter, SwitchboardError>>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            policy: RegistryPolicy::default(),
            modules: Vec::new(),
        }
    }

    /// Allow `register_override` on the harness registry.
    pub fn allow_override(mut self) -> Self {
        self.policy.allow_override = true;
        self
    }

    /// Register a module when the harness is built.
    ///
    /// Accepts fixture results directly; a fixture error fails `build`.
    pub fn with_module(mut self, adapter: Result<ModuleAdapter, SwitchboardError>) -> Self {
        self.modules.push(adapter);
        self
    }

    /// Build the harness, registering the modules in order.
    pub fn build(self) -> Result<TestHarness, SwitchboardError> {
        let registry = Arc::new(ModuleRegistry::with_policy(self.policy));
        for adapter in self.modules {
            registry.register(adapter?)?;
        }
        Ok(TestHarness {
            dispatcher: Dispatcher::new(Arc::clone(&registry)),
            registry,
        })
    }
}

/// A registry and a dispatcher over it.
pub struct TestHarness {
    /// The registry (shared with the dispatcher).
    pub registry: Arc<ModuleRegistry>,
    /// Dispatcher bound to `registry`.
    pub dispatcher: Dispatcher,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Invoke with arguments given as a JSON object literal.
    ///
    /// A non-object `args` value is treated as no arguments.
    pub async fn invoke(
        &self,
        module: Option<&str>,
        function: &str,
        args: Value,
    ) -> Result<Value, SwitchboardError> {
        self.dispatcher
            .invoke(module, function, into_arguments(args))
            .await
    }

    /// Invoke and wrap the result in its serializable envelope.
    pub async fn outcome(&self, module: Option<&str>, function: &str, args: Value) -> Outcome {
        Outcome::from(self.invoke(module, function, args).await)
    }
}

fn into_arguments(args: Value) -> Arguments {
    match args {
        Value::Object(map) => map,
        _ => Arguments::new(),
    }
}
