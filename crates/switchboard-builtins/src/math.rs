// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scoped `math` module: binary arithmetic on numbers.

use serde_json::{json, Value};
use switchboard_core::{
    sync_fn, Arguments, ArgumentsExt, FunctionDescriptor, ImplementationError, ModuleDescriptor,
    ParamSpec, SwitchboardError, TypeTag,
};
use switchboard_registry::ModuleAdapter;

pub const NAME: &str = "math";

fn binary(name: &str, description: &str) -> FunctionDescriptor {
    FunctionDescriptor::new(name, TypeTag::Number)
        .param(ParamSpec::required("a", TypeTag::Number))
        .param(ParamSpec::required("b", TypeTag::Number))
        .with_description(description)
}

fn operands(args: &Arguments) -> Result<(f64, f64), ImplementationError> {
    Ok((args.f64_arg("a")?, args.f64_arg("b")?))
}

/// Builds the `math` adapter.
pub fn adapter() -> Result<ModuleAdapter, SwitchboardError> {
    ModuleAdapter::builder(
        ModuleDescriptor::new(NAME)
            .with_description("Arithmetic on numbers")
            .with_category("numbers")
            .with_version(env!("CARGO_PKG_VERSION")),
    )
    .function(
        binary("add", "Adds two numbers"),
        sync_fn(|args| {
            let (a, b) = operands(&args)?;
            number(a + b)
        }),
    )
    .function(
        binary("subtract", "Subtracts b from a"),
        sync_fn(|args| {
            let (a, b) = operands(&args)?;
            number(a - b)
        }),
    )
    .function(
        binary("multiply", "Multiplies two numbers"),
        sync_fn(|args| {
            let (a, b) = operands(&args)?;
            number(a * b)
        }),
    )
    .function(
        binary("divide", "Divides a by b"),
        sync_fn(|args| {
            let (a, b) = operands(&args)?;
            if b == 0.0 {
                return Err(ImplementationError::new("division by zero")
                    .with_details(json!({ "dividend": a })));
            }
            number(a / b)
        }),
    )
    .build()
}

/// Converts a result to JSON; integral values stay integers.
fn number(value: f64) -> Result<Value, ImplementationError> {
    if !value.is_finite() {
        return Err(ImplementationError::new("result is not a finite number"));
    }
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Ok(json!(value as i64))
    } else {
        Ok(json!(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_results_stay_integers() {
        assert_eq!(number(5.0).unwrap(), json!(5));
        assert_eq!(number(-2.0).unwrap(), json!(-2));
        assert_eq!(number(2.5).unwrap(), json!(2.5));
    }

    #[test]
    fn results_beyond_i64_stay_floats() {
        let two_pow_63 = 2f64.powi(63);
        assert_eq!(number(two_pow_63).unwrap(), json!(two_pow_63));
        assert_eq!(number(-two_pow_63).unwrap(), json!(-two_pow_63));
        assert_eq!(number(1e15).unwrap(), json!(1_000_000_000_000_000_i64));
    }

    #[test]
    fn non_finite_result_is_an_error() {
        assert!(number(f64::INFINITY).is_err());
        assert!(number(f64::NAN).is_err());
    }

    #[test]
    fn adapter_is_well_formed() {
        let adapter = adapter().unwrap();
        assert!(adapter.check_shape().is_ok());
        assert!(!adapter.is_global());
        assert_eq!(
            adapter.function_names().collect::<Vec<_>>(),
            vec!["add", "subtract", "multiply", "divide"]
        );
    }
}
