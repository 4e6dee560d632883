// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The callable capability every module function implements.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ImplementationError;
use crate::types::Arguments;

/// An opaque module function implementation.
///
/// The dispatcher only calls `call` with arguments that already passed
/// validation against the function's descriptor, with defaults applied.
/// Concurrency limits of the wrapped capability (a single connection, a
/// rate limit) are the implementation's own concern.
#[async_trait]
pub trait ModuleFunction: Send + Sync + 'static {
    /// Runs the operation.
    async fn call(&self, args: Arguments) -> Result<Value, ImplementationError>;
}

/// Adapts an async closure into a [`ModuleFunction`].
pub struct FnFunction<F>(F);

#[async_trait]
impl<F, Fut> ModuleFunction for FnFunction<F>
where
    F: Fn(Arguments) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, ImplementationError>> + Send + 'static,
{
    async fn call(&self, args: Arguments) -> Result<Value, ImplementationError> {
        (self.0)(args).await
    }
}

/// Adapts a synchronous closure into a [`ModuleFunction`].
pub struct SyncFunction<F>(F);

#[async_trait]
impl<F> ModuleFunction for SyncFunction<F>
where
    F: Fn(Arguments) -> Result<Value, ImplementationError> + Send + Sync + 'static,
{
    async fn call(&self, args: Arguments) -> Result<Value, ImplementationError> {
        (self.0)(args)
    }
}

/// Wraps an async closure as a shareable implementation.
pub fn function_fn<F, Fut>(f: F) -> Arc<dyn ModuleFunction>
where
    F: Fn(Arguments) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, ImplementationError>> + Send + 'static,
{
    Arc::new(FnFunction(f))
}

/// Wraps a synchronous closure as a shareable implementation.
pub fn sync_fn<F>(f: F) -> Arc<dyn ModuleFunction>
where
    F: Fn(Arguments) -> Result<Value, ImplementationError> + Send + Sync + 'static,
{
    Arc::new(SyncFunction(f))
}
