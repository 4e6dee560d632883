// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sample module adapters.

use std::sync::Arc;

use serde_json::{json, Value};
use switchboard_core::{
    sync_fn, ArgumentsExt, FunctionDescriptor, ModuleDescriptor, ModuleFunction, ParamSpec,
    SwitchboardError, TypeTag,
};
use switchboard_registry::ModuleAdapter;

use crate::mock_function::{CountingFunction, EchoFunction};

fn binary(name: &str) -> FunctionDescriptor {
    FunctionDescriptor::new(name, TypeTag::Number)
        .param(ParamSpec::required("a", TypeTag::Number))
        .param(ParamSpec::required("b", TypeTag::Number))
}

/// Scoped `math` module with `add(a, b)` and `subtract(a, b)`.
pub fn math_adapter() -> Result<ModuleAdapter, SwitchboardError> {
    ModuleAdapter::builder(
        ModuleDescriptor::new("math")
            .with_description("Arithmetic on numbers")
            .with_category("numbers")
            .with_version("1.0.0"),
    )
    .function(
        binary("add").with_description("Adds two numbers"),
        sync_fn(|args| Ok(number(args.f64_arg("a")? + args.f64_arg("b")?))),
    )
    .function(
        binary("subtract").with_description("Subtracts b from a"),
        sync_fn(|args| Ok(number(args.f64_arg("a")? - args.f64_arg("b")?))),
    )
    .build()
}

/// Global `uuid` module with `generate() -> string`.
pub fn uuid_adapter() -> Result<ModuleAdapter, SwitchboardError> {
    global_generator("uuid")
}

/// A global module named `name` that also exposes `generate`.
///
/// Registering it next to [`uuid_adapter`] produces a global collision.
pub fn global_generator(name: &str) -> Result<ModuleAdapter, SwitchboardError> {
    ModuleAdapter::builder(ModuleDescriptor::new(name).with_category("ids"))
        .global(true)
        .function(
            FunctionDescriptor::new("generate", TypeTag::String)
                .with_description("Generates a random identifier"),
            sync_fn(|_| Ok(json!(uuid::Uuid::new_v4().to_string()))),
        )
        .build()
}

/// A module whose single function is backed by `counter`.
pub fn counting_adapter(
    module: &str,
    global: bool,
    descriptor: FunctionDescriptor,
    counter: &CountingFunction,
) -> Result<ModuleAdapter, SwitchboardError> {
    single(module, global, descriptor, counter.handle())
}

/// Scoped `echo` module: `echo(value: any, tag?: string = "none")`.
pub fn echo_adapter() -> Result<ModuleAdapter, SwitchboardError> {
    single(
        "echo",
        false,
        FunctionDescriptor::new("echo", TypeTag::Object)
            .param(ParamSpec::required("value", TypeTag::Any))
            .param(ParamSpec::optional("tag", TypeTag::String).with_default(json!("none"))),
        EchoFunction::handle(),
    )
}

/// A module with exactly one function.
pub fn single(
    module: &str,
    global: bool,
    descriptor: FunctionDescriptor,
    implementation: Arc<dyn ModuleFunction>,
) -> Result<ModuleAdapter, SwitchboardError> {
    ModuleAdapter::builder(ModuleDescriptor::new(module))
        .global(global)
        .function(descriptor, implementation)
        .build()
}

/// Integral results stay integers so `2 + 3` renders as `5`.
fn number(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        json!(value as i64)
    } else {
        json!(value)
    }
}
