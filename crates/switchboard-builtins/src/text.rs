// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scoped `text` module, declared by the bundled `text.toml` manifest.

use std::sync::Arc;

use regex::Regex;
use serde_json::{json, Value};
use switchboard_core::{
    sync_fn, Arguments, ArgumentsExt, ImplementationError, ModuleFunction, SwitchboardError,
};
use switchboard_registry::{parse_module_manifest, ModuleAdapter};

pub const NAME: &str = "text";

const MANIFEST: &str = include_str!("text.toml");

fn pattern(args: &Arguments) -> Result<Regex, ImplementationError> {
    let pattern = args.str_arg("pattern")?;
    Regex::new(pattern).map_err(|e| {
        ImplementationError::new(format!("invalid pattern `{pattern}`"))
            .with_details(json!({ "pattern": pattern }))
            .with_source(e)
    })
}

fn matches(args: Arguments) -> Result<Value, ImplementationError> {
    Ok(json!(pattern(&args)?.is_match(args.str_arg("input")?)))
}

fn replace(args: Arguments) -> Result<Value, ImplementationError> {
    let re = pattern(&args)?;
    let limit = args.f64_arg("limit")?;
    if limit < 0.0 || limit.fract() != 0.0 {
        return Err(ImplementationError::new(format!(
            "limit must be a non-negative integer, got {limit}"
        )));
    }
    let replaced = re.replacen(
        args.str_arg("input")?,
        limit as usize,
        args.str_arg("replacement")?,
    );
    Ok(json!(replaced))
}

fn split(args: Arguments) -> Result<Value, ImplementationError> {
    let re = pattern(&args)?;
    let parts: Vec<&str> = re.split(args.str_arg("input")?).collect();
    Ok(json!(parts))
}

/// Builds the `text` adapter from its manifest.
pub fn adapter() -> Result<ModuleAdapter, SwitchboardError> {
    let manifest = parse_module_manifest(MANIFEST)?;
    let implementations: [(&str, Arc<dyn ModuleFunction>); 3] = [
        ("matches", sync_fn(matches)),
        ("replace", sync_fn(replace)),
        ("split", sync_fn(split)),
    ];
    Ok(ModuleAdapter::from_manifest(
        manifest,
        implementations
            .into_iter()
            .map(|(name, f)| (name.to_string(), f)),
    ))
}
