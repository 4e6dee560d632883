// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Global `time` module: the current wall-clock time.

use chrono::{SecondsFormat, Utc};
use serde_json::json;
use switchboard_core::{sync_fn, FunctionDescriptor, ModuleDescriptor, SwitchboardError, TypeTag};
use switchboard_registry::ModuleAdapter;

pub const NAME: &str = "time";

/// Builds the `time` adapter.
pub fn adapter() -> Result<ModuleAdapter, SwitchboardError> {
    ModuleAdapter::builder(
        ModuleDescriptor::new(NAME)
            .with_description("Current wall-clock time")
            .with_category("time")
            .with_version(env!("CARGO_PKG_VERSION")),
    )
    .global(true)
    .function(
        FunctionDescriptor::new("now", TypeTag::String)
            .with_description("Current UTC time as RFC 3339"),
        sync_fn(|_| Ok(json!(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)))),
    )
    .function(
        FunctionDescriptor::new("unix_timestamp", TypeTag::Number)
            .with_description("Seconds since the Unix epoch"),
        sync_fn(|_| Ok(json!(Utc::now().timestamp()))),
    )
    .build()
}
