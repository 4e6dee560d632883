// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Global `uuid` module.

use serde_json::json;
use switchboard_core::{
    sync_fn, ArgumentsExt, FunctionDescriptor, ModuleDescriptor, ParamSpec, SwitchboardError,
    TypeTag,
};
use switchboard_registry::ModuleAdapter;
use uuid::Uuid;

pub const NAME: &str = "uuid";

/// Builds the `uuid` adapter.
pub fn adapter() -> Result<ModuleAdapter, SwitchboardError> {
    ModuleAdapter::builder(
        ModuleDescriptor::new(NAME)
            .with_description("UUID generation and parsing")
            .with_category("ids")
            .with_version(env!("CARGO_PKG_VERSION")),
    )
    .global(true)
    .function(
        FunctionDescriptor::new("generate", TypeTag::String)
            .with_description("Generates a random (version 4) UUID"),
        sync_fn(|_| Ok(json!(Uuid::new_v4().to_string()))),
    )
    .function(
        FunctionDescriptor::new("is_valid", TypeTag::Boolean)
            .param(ParamSpec::required("value", TypeTag::String))
            .with_description("Whether the value parses as a UUID"),
        sync_fn(|args| Ok(json!(Uuid::parse_str(args.str_arg("value")?).is_ok()))),
    )
    .build()
}
