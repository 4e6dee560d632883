// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations.
//!
//! Each command writes its normal output to `out` and returns the process
//! exit code.

use std::io::{self, Write};

use colored::Colorize;
use serde_json::Value;
use switchboard_core::Arguments;
use switchboard_dispatch::{split_target, Dispatcher, Outcome};
use switchboard_registry::{search_catalog, ModuleDescription, ModuleRegistry};

/// Success.
pub const EXIT_OK: u8 = 0;
/// A registry, dispatch or config error.
pub const EXIT_ERROR: u8 = 1;
/// Malformed command-line input.
pub const EXIT_USAGE: u8 = 2;

/// `switchboard list`
///
/// Names and visibility markers come from a single registry snapshot.
pub fn list(registry: &ModuleRegistry, out: &mut impl Write) -> io::Result<u8> {
    for description in registry.describe_all() {
        let name = &description.module.name;
        if description.global {
            writeln!(out, "{name} {}", "(global)".dimmed())?;
        } else {
            writeln!(out, "{name}")?;
        }
    }
    Ok(EXIT_OK)
}

/// `switchboard describe <module> [--json]`
pub fn describe(
    registry: &ModuleRegistry,
    module: &str,
    json: bool,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<u8> {
    let description = match registry.describe(module) {
        Ok(description) => description,
        Err(e) => {
            writeln!(err, "error: {e}")?;
            return Ok(EXIT_ERROR);
        }
    };

    if json {
        let rendered = serde_json::to_string_pretty(&description).map_err(io::Error::other)?;
        writeln!(out, "{rendered}")?;
    } else {
        write_description(&description, out)?;
    }
    Ok(EXIT_OK)
}

fn write_description(description: &ModuleDescription, out: &mut impl Write) -> io::Result<()> {
    let module = &description.module;
    writeln!(out, "{}", module.name.bold())?;
    if !module.description.is_empty() {
        writeln!(out, "  {}", module.description)?;
    }
    if !module.category.is_empty() {
        writeln!(out, "  category: {}", module.category)?;
    }
    if let Some(version) = &module.version {
        writeln!(out, "  version:  {version}")?;
    }
    let visibility = if description.global { "global" } else { "scoped" };
    writeln!(out, "  visibility: {visibility}")?;
    writeln!(out)?;
    for function in &description.functions {
        writeln!(out, "  {}", function.signature())?;
        if !function.description.is_empty() {
            writeln!(out, "      {}", function.description.dimmed())?;
        }
    }
    Ok(())
}

/// `switchboard search <query>`
pub fn search(registry: &ModuleRegistry, query: &str, out: &mut impl Write) -> io::Result<u8> {
    let found = search_catalog(registry, query);
    if found.is_empty() {
        writeln!(out, "no modules match `{query}`")?;
        return Ok(EXIT_OK);
    }
    for description in found {
        let module = &description.module;
        if module.description.is_empty() {
            writeln!(out, "{}", module.name)?;
        } else {
            writeln!(out, "{} - {}", module.name, module.description)?;
        }
    }
    Ok(EXIT_OK)
}

/// Parses `--args`: absent means no arguments, otherwise a JSON object.
pub fn parse_args(raw: Option<&str>) -> Result<Arguments, String> {
    let Some(raw) = raw else {
        return Ok(Arguments::new());
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(format!(
            "--args must be a JSON object, got {}",
            switchboard_core::ValueKind::of(&other)
        )),
        Err(e) => Err(format!("--args is not valid JSON: {e}")),
    }
}

/// `switchboard invoke <target> [--args <json>]`
pub async fn invoke(
    dispatcher: &Dispatcher,
    target: &str,
    raw_args: Option<&str>,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<u8> {
    let args = match parse_args(raw_args) {
        Ok(args) => args,
        Err(message) => {
            writeln!(err, "error: {message}")?;
            return Ok(EXIT_USAGE);
        }
    };

    let (module, function) = split_target(target);
    let outcome: Outcome = dispatcher.invoke_outcome(module, function, args).await;
    let rendered = serde_json::to_string_pretty(&outcome).map_err(io::Error::other)?;
    writeln!(out, "{rendered}")?;

    Ok(if outcome.is_ok() { EXIT_OK } else { EXIT_ERROR })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::build_dispatcher;
    use switchboard_config::SwitchboardConfig;

    fn dispatcher() -> Dispatcher {
        colored::control::set_override(false);
        build_dispatcher(&SwitchboardConfig::default()).unwrap()
    }

    fn text(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn list_marks_global_modules() {
        let d = dispatcher();
        let mut out = Vec::new();
        assert_eq!(list(d.registry(), &mut out).unwrap(), EXIT_OK);
        assert_eq!(text(out), "math\nuuid (global)\ntext\ntime (global)\n");
    }

    #[test]
    fn list_follows_unregister() {
        let d = dispatcher();
        d.registry().unregister("uuid").unwrap();
        let mut out = Vec::new();
        list(d.registry(), &mut out).unwrap();
        assert_eq!(text(out), "math\ntext\ntime (global)\n");
    }

    #[test]
    fn describe_prints_signatures() {
        let d = dispatcher();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        assert_eq!(describe(d.registry(), "text", false, &mut out, &mut err).unwrap(), EXIT_OK);
        let out = text(out);
        assert!(out.contains("visibility: scoped"));
        assert!(out.contains(
            "replace(input: string, pattern: string, replacement: string, limit?: number = 0) -> string"
        ));
    }

    #[test]
    fn describe_json_is_parseable() {
        let d = dispatcher();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        describe(d.registry(), "uuid", true, &mut out, &mut err).unwrap();
        let value: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["global"], Value::Bool(true));
        assert_eq!(value["module"]["name"], "uuid");
        assert_eq!(value["functions"][0]["name"], "generate");
    }

    #[test]
    fn describe_unknown_module_fails() {
        let d = dispatcher();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let code = describe(d.registry(), "ftp", false, &mut out, &mut err).unwrap();
        assert_eq!(code, EXIT_ERROR);
        assert!(text(err).contains("unknown module `ftp`"));
    }

    #[test]
    fn search_lists_matches() {
        let d = dispatcher();
        let mut out = Vec::new();
        search(d.registry(), "REGULAR", &mut out).unwrap();
        assert_eq!(text(out), "text - Regular-expression text utilities\n");

        let mut out = Vec::new();
        search(d.registry(), "kafka", &mut out).unwrap();
        assert_eq!(text(out), "no modules match `kafka`\n");
    }

    #[test]
    fn parse_args_rejects_non_objects() {
        assert!(parse_args(None).unwrap().is_empty());
        assert_eq!(parse_args(Some(r#"{"a":1}"#)).unwrap()["a"], 1);
        assert!(parse_args(Some("[1]")).unwrap_err().contains("got array"));
        assert!(parse_args(Some("{")).unwrap_err().contains("not valid JSON"));
    }

    #[tokio::test]
    async fn invoke_exit_codes() {
        let d = dispatcher();

        let (mut out, mut err) = (Vec::new(), Vec::new());
        let code = invoke(&d, "math.add", Some(r#"{"a":2,"b":3}"#), &mut out, &mut err)
            .await
            .unwrap();
        assert_eq!(code, EXIT_OK);
        let value: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value, serde_json::json!({ "ok": true, "value": 5 }));

        let (mut out, mut err) = (Vec::new(), Vec::new());
        let code = invoke(&d, "add", Some(r#"{"a":2,"b":3}"#), &mut out, &mut err)
            .await
            .unwrap();
        assert_eq!(code, EXIT_ERROR);
        let value: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["error"]["kind"], "UnknownGlobalFunction");

        let (mut out, mut err) = (Vec::new(), Vec::new());
        let code = invoke(&d, "math.add", Some("not json"), &mut out, &mut err)
            .await
            .unwrap();
        assert_eq!(code, EXIT_USAGE);
        assert!(out.is_empty());
    }
}
