// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed accessors for validated arguments.
//!
//! Implementations receive arguments that already match their descriptor,
//! so a failed lookup here means the descriptor and implementation disagree.

use serde_json::Value;

use crate::error::ImplementationError;
use crate::types::Arguments;

/// Typed argument lookups for module function implementations.
pub trait ArgumentsExt {
    fn str_arg(&self, name: &str) -> Result<&str, ImplementationError>;
    fn f64_arg(&self, name: &str) -> Result<f64, ImplementationError>;
}

fn missing(name: &str, expected: &str) -> ImplementationError {
    ImplementationError::new(format!("argument `{name}` is not a {expected}"))
}

impl ArgumentsExt for Arguments {
    fn str_arg(&self, name: &str) -> Result<&str, ImplementationError> {
        self.get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| missing(name, "string"))
    }

    fn f64_arg(&self, name: &str) -> Result<f64, ImplementationError> {
        self.get(name)
            .and_then(Value::as_f64)
            .ok_or_else(|| missing(name, "number"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn typed_lookups() {
        let mut args = Arguments::new();
        args.insert("s".into(), json!("hi"));
        args.insert("n".into(), json!(3));

        assert_eq!(args.str_arg("s").unwrap(), "hi");
        assert_eq!(args.f64_arg("n").unwrap(), 3.0);
    }

    #[test]
    fn wrong_kind_is_an_implementation_error() {
        let mut args = Arguments::new();
        args.insert("n".into(), json!("three"));
        let err = args.f64_arg("n").unwrap_err();
        assert_eq!(err.message, "argument `n` is not a number");
        assert!(args.str_arg("absent").is_err());
    }
}
