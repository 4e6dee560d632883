// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The invocation dispatcher.
//!
//! Every call walks the same four steps: resolve through the registry,
//! validate the arguments against the resolved descriptor, invoke the
//! implementation, and normalize its failure into
//! [`SwitchboardError::Implementation`]. A panicking implementation is
//! caught and reported the same way. The dispatcher holds no mutable
//! state, so any number of invocations may run concurrently.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use serde_json::{json, Value};
use switchboard_core::{Arguments, ImplementationError, SwitchboardError};
use switchboard_registry::ModuleRegistry;
use tracing::{debug, error, Instrument};

use crate::outcome::Outcome;
use crate::validate::validate_arguments;

/// Resolves, validates and invokes module functions.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ModuleRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ModuleRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<ModuleRegistry> {
        &self.registry
    }

    /// Invokes `function`, qualified by `module` or resolved through the
    /// global index when `module` is `None`.
    ///
    /// Resolution and validation errors are returned before any
    /// implementation code runs. An implementation failure is returned as
    /// `SwitchboardError::Implementation` with its payload unchanged.
    pub async fn invoke(
        &self,
        module: Option<&str>,
        function: &str,
        args: Arguments,
    ) -> Result<Value, SwitchboardError> {
        let span = tracing::debug_span!(
            "invoke",
            module = module.unwrap_or("<global>"),
            function = %function
        );
        self.invoke_inner(module, function, args)
            .instrument(span)
            .await
    }

    async fn invoke_inner(
        &self,
        module: Option<&str>,
        function: &str,
        args: Arguments,
    ) -> Result<Value, SwitchboardError> {
        let resolved = self.registry.resolve(module, function).inspect_err(|err| {
            debug!(error = %err, "resolution failed");
        })?;

        let args = validate_arguments(resolved.descriptor(), args).inspect_err(|err| {
            debug!(module = %resolved.module(), error = %err, "argument validation failed");
        })?;

        let implementation = resolved.implementation();
        let called = AssertUnwindSafe(async { implementation.call(args).await })
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| {
                let message = panic_message(payload.as_ref());
                error!(
                    module = %resolved.module(),
                    panic = %message,
                    "implementation panicked"
                );
                Err(ImplementationError::new("implementation panicked")
                    .with_details(json!({ "panic": message })))
            });

        match called {
            Ok(value) => {
                debug!(module = %resolved.module(), "invocation succeeded");
                Ok(value)
            }
            Err(err) => {
                debug!(module = %resolved.module(), error = %err, "implementation failed");
                Err(SwitchboardError::Implementation(err))
            }
        }
    }

    /// Invokes a dotted target such as `math.add`.
    ///
    /// The target is split at the first `.`; a target without a dot is
    /// resolved through the global index.
    pub async fn invoke_qualified(
        &self,
        target: &str,
        args: Arguments,
    ) -> Result<Value, SwitchboardError> {
        let (module, function) = split_target(target);
        self.invoke(module, function, args).await
    }

    /// Like [`invoke`](Self::invoke), but returns the serializable envelope.
    pub async fn invoke_outcome(
        &self,
        module: Option<&str>,
        function: &str,
        args: Arguments,
    ) -> Outcome {
        Outcome::from(self.invoke(module, function, args).await)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Splits `module.function` at the first dot.
pub fn split_target(target: &str) -> (Option<&str>, &str) {
    match target.split_once('.') {
        Some((module, function)) => (Some(module), function),
        None => (None, target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;
    use switchboard_core::{
        sync_fn, ErrorKind, FunctionDescriptor, ImplementationError, ModuleDescriptor, ParamSpec,
        TypeTag,
    };
    use switchboard_registry::ModuleAdapter;

    fn args(value: Value) -> Arguments {
        value.as_object().cloned().unwrap_or_default()
    }

    fn dispatcher_with_math(calls: Arc<AtomicUsize>) -> Dispatcher {
        let registry = ModuleRegistry::new();
        let adapter = ModuleAdapter::builder(ModuleDescriptor::new("math"))
            .function(
                FunctionDescriptor::new("add", TypeTag::Number)
                    .param(ParamSpec::required("a", TypeTag::Number))
                    .param(ParamSpec::required("b", TypeTag::Number)),
                sync_fn(move |args| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    let a = args["a"].as_f64().unwrap_or_default();
                    let b = args["b"].as_f64().unwrap_or_default();
                    Ok(json!(a + b))
                }),
            )
            .function(
                FunctionDescriptor::new("divide", TypeTag::Number)
                    .param(ParamSpec::required("a", TypeTag::Number))
                    .param(ParamSpec::required("b", TypeTag::Number)),
                sync_fn(|_| {
                    Err(ImplementationError::new("division by zero")
                        .with_details(json!({ "divisor": 0 })))
                }),
            )
            .build()
            .unwrap();
        registry.register(adapter).unwrap();
        Dispatcher::new(Arc::new(registry))
    }

    #[tokio::test]
    async fn qualified_call_succeeds() {
        let dispatcher = dispatcher_with_math(Arc::default());
        let value = dispatcher
            .invoke(Some("math"), "add", args(json!({ "a": 2, "b": 3 })))
            .await
            .unwrap();
        assert_eq!(value, json!(5.0));
    }

    #[tokio::test]
    async fn validation_failure_never_calls_implementation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let dispatcher = dispatcher_with_math(Arc::clone(&calls));

        let err = dispatcher
            .invoke(Some("math"), "add", args(json!({ "a": 2 })))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingArgument);

        let err = dispatcher
            .invoke(Some("math"), "add", args(json!({ "a": 2, "b": 3, "c": 4 })))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedArgument);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn implementation_failure_is_normalized() {
        let dispatcher = dispatcher_with_math(Arc::default());
        let err = dispatcher
            .invoke(Some("math"), "divide", args(json!({ "a": 1, "b": 0 })))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ImplementationError);
        assert!(err.is_retryable());
        assert_eq!(err.details(), json!({ "divisor": 0 }));
    }

    #[tokio::test]
    async fn panicking_implementation_becomes_implementation_error() {
        let registry = ModuleRegistry::new();
        let adapter = ModuleAdapter::builder(ModuleDescriptor::new("ssh"))
            .function(
                FunctionDescriptor::new("connect", TypeTag::Any),
                sync_fn(|_| panic!("socket table corrupted")),
            )
            .build()
            .unwrap();
        registry.register(adapter).unwrap();
        let dispatcher = Dispatcher::new(Arc::new(registry));

        let err = dispatcher
            .invoke(Some("ssh"), "connect", Arguments::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ImplementationError);
        assert_eq!(err.details(), json!({ "panic": "socket table corrupted" }));

        // The dispatcher stays usable after a caught panic.
        let err = dispatcher
            .invoke(Some("ssh"), "connect", Arguments::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ImplementationError);
    }

    #[tokio::test]
    async fn resolution_errors_propagate_unchanged() {
        let dispatcher = dispatcher_with_math(Arc::default());
        let err = dispatcher.invoke(None, "add", Arguments::new()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownGlobalFunction);

        let err = dispatcher
            .invoke(Some("math"), "pow", Arguments::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownFunction);
    }

    #[tokio::test]
    async fn qualified_target_splits_at_first_dot() {
        let dispatcher = dispatcher_with_math(Arc::default());
        let value = dispatcher
            .invoke_qualified("math.add", args(json!({ "a": 1, "b": 1 })))
            .await
            .unwrap();
        assert_eq!(value, json!(2.0));

        let err = dispatcher
            .invoke_qualified("math.add.extra", Arguments::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SwitchboardError::UnknownFunction { ref function, .. } if function == "add.extra"
        ));
    }

    #[test]
    fn split_target_forms() {
        assert_eq!(split_target("math.add"), (Some("math"), "add"));
        assert_eq!(split_target("generate"), (None, "generate"));
        assert_eq!(split_target("a.b.c"), (Some("a"), "b.c"));
    }

    #[tokio::test]
    async fn outcome_envelope() {
        let dispatcher = dispatcher_with_math(Arc::default());
        let outcome = dispatcher
            .invoke_outcome(Some("math"), "add", args(json!({ "a": "2", "b": 3 })))
            .await;
        assert!(!outcome.is_ok());
        assert_eq!(outcome.error_kind(), Some(ErrorKind::TypeMismatch));
    }
}
