// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stub module function implementations for deterministic testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use switchboard_core::{Arguments, ImplementationError, ModuleFunction};
use tokio::sync::Mutex;

/// A function that counts its invocations and records their arguments.
///
/// Returns the configured value on every call. Clones share the counter.
#[derive(Clone)]
pub struct CountingFunction {
    calls: Arc<AtomicUsize>,
    received: Arc<Mutex<Vec<Arguments>>>,
    returns: Value,
}

impl CountingFunction {
    /// Create a counter that returns `null`.
    pub fn new() -> Self {
        Self::returning(Value::Null)
    }

    /// Create a counter that returns `value`.
    pub fn returning(value: Value) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            received: Arc::new(Mutex::new(Vec::new())),
            returns: value,
        }
    }

    /// Number of completed calls.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Arguments of every call so far, oldest first.
    pub async fn received(&self) -> Vec<Arguments> {
        self.received.lock().await.clone()
    }

    /// Shareable handle for use in an adapter.
    pub fn handle(&self) -> Arc<dyn ModuleFunction> {
        Arc::new(self.clone())
    }
}

impl Default for CountingFunction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModuleFunction for CountingFunction {
    async fn call(&self, args: Arguments) -> Result<Value, ImplementationError> {
        self.received.lock().await.push(args);
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.returns.clone())
    }
}

/// A function that always fails.
pub struct FailingFunction {
    message: String,
    details: Option<Value>,
}

impl FailingFunction {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
        }
    }

    /// Attach a structured payload to every failure.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn handle(self) -> Arc<dyn ModuleFunction> {
        Arc::new(self)
    }
}

#[async_trait]
impl ModuleFunction for FailingFunction {
    async fn call(&self, _args: Arguments) -> Result<Value, ImplementationError> {
        let err = ImplementationError::new(self.message.clone());
        Err(match &self.details {
            Some(details) => err.with_details(details.clone()),
            None => err,
        })
    }
}

/// A function that returns the arguments it received, defaults included.
pub struct EchoFunction;

impl EchoFunction {
    pub fn handle() -> Arc<dyn ModuleFunction> {
        Arc::new(EchoFunction)
    }
}

#[async_trait]
impl ModuleFunction for EchoFunction {
    async fn call(&self, args: Arguments) -> Result<Value, ImplementationError> {
        Ok(Value::Object(args))
    }
}
