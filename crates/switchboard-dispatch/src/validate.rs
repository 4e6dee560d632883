// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Argument validation against a function descriptor.

use switchboard_core::{Arguments, FunctionDescriptor, SwitchboardError, ValueKind};

/// Checks `args` against `descriptor` and fills in defaults.
///
/// Undeclared arguments are reported first, then each declared parameter in
/// declaration order: a missing required parameter before a type mismatch.
/// Only the first failure is returned. Optional parameters without a default
/// stay absent when omitted.
pub fn validate_arguments(
    descriptor: &FunctionDescriptor,
    mut args: Arguments,
) -> Result<Arguments, SwitchboardError> {
    if let Some(name) = args
        .keys()
        .find(|name| descriptor.parameter(name).is_none())
    {
        return Err(SwitchboardError::UnexpectedArgument { name: name.clone() });
    }

    for param in &descriptor.parameters {
        match args.get(&param.name) {
            Some(value) => {
                if !param.type_tag.accepts(value) {
                    return Err(SwitchboardError::TypeMismatch {
                        param: param.name.clone(),
                        expected: param.type_tag,
                        actual: ValueKind::of(value),
                    });
                }
            }
            None if param.required => {
                return Err(SwitchboardError::MissingArgument {
                    param: param.name.clone(),
                });
            }
            None => {
                if let Some(default) = &param.default {
                    args.insert(param.name.clone(), default.clone());
                }
            }
        }
    }

    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::{json, Value};
    use switchboard_core::{ErrorKind, ParamSpec, TypeTag};

    fn args(value: Value) -> Arguments {
        match value {
            Value::Object(map) => map,
            _ => panic!("arguments must be an object"),
        }
    }

    fn add() -> FunctionDescriptor {
        FunctionDescriptor::new("add", TypeTag::Number)
            .param(ParamSpec::required("a", TypeTag::Number))
            .param(ParamSpec::required("b", TypeTag::Number))
    }

    fn replace() -> FunctionDescriptor {
        FunctionDescriptor::new("replace", TypeTag::String)
            .param(ParamSpec::required("input", TypeTag::String))
            .param(ParamSpec::optional("flags", TypeTag::String))
            .param(ParamSpec::optional("limit", TypeTag::Number).with_default(json!(0)))
    }

    #[test]
    fn valid_arguments_pass_unchanged() {
        let validated = validate_arguments(&add(), args(json!({ "a": 2, "b": 3 }))).unwrap();
        assert_eq!(Value::Object(validated), json!({ "a": 2, "b": 3 }));
    }

    #[test]
    fn defaults_applied_only_when_omitted() {
        let validated = validate_arguments(&replace(), args(json!({ "input": "x" }))).unwrap();
        assert_eq!(Value::Object(validated), json!({ "input": "x", "limit": 0 }));

        let validated =
            validate_arguments(&replace(), args(json!({ "input": "x", "limit": 5 }))).unwrap();
        assert_eq!(validated["limit"], json!(5));
    }

    #[test]
    fn missing_required() {
        let err = validate_arguments(&add(), args(json!({ "a": 1 }))).unwrap_err();
        assert!(matches!(err, SwitchboardError::MissingArgument { ref param } if param == "b"));
    }

    #[test]
    fn wrong_kind() {
        let err = validate_arguments(&add(), args(json!({ "a": "2", "b": 3 }))).unwrap_err();
        assert!(matches!(
            err,
            SwitchboardError::TypeMismatch { ref param, expected: TypeTag::Number, actual: ValueKind::String }
                if param == "a"
        ));
    }

    #[test]
    fn null_only_satisfies_any() {
        let err = validate_arguments(&add(), args(json!({ "a": null, "b": 3 }))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);

        let echo = FunctionDescriptor::new("echo", TypeTag::Any)
            .param(ParamSpec::required("value", TypeTag::Any));
        assert!(validate_arguments(&echo, args(json!({ "value": null }))).is_ok());
    }

    #[test]
    fn unexpected_reported_before_missing() {
        let err = validate_arguments(&add(), args(json!({ "c": 1 }))).unwrap_err();
        assert!(matches!(err, SwitchboardError::UnexpectedArgument { ref name } if name == "c"));
    }

    #[test]
    fn declaration_order_decides_between_parameters() {
        // `a` is declared first, so its type error wins over `b` missing.
        let err = validate_arguments(&add(), args(json!({ "a": true }))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);

        let err = validate_arguments(&add(), args(json!({ "b": true }))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingArgument);
    }

    #[test]
    fn object_and_array_contents_not_inspected() {
        let put = FunctionDescriptor::new("put", TypeTag::Boolean)
            .param(ParamSpec::required("headers", TypeTag::Object))
            .param(ParamSpec::required("parts", TypeTag::Array));
        let input = args(json!({ "headers": { "x": [1, null] }, "parts": [{}, "a", 3] }));
        assert!(validate_arguments(&put, input).is_ok());
    }

    #[test]
    fn optional_without_default_stays_absent() {
        let validated = validate_arguments(&replace(), args(json!({ "input": "x" }))).unwrap();
        assert!(!validated.contains_key("flags"));
    }

    fn value_of(tag: TypeTag) -> Value {
        match tag {
            TypeTag::String => json!("s"),
            TypeTag::Number => json!(1.5),
            TypeTag::Boolean => json!(false),
            TypeTag::Object => json!({}),
            TypeTag::Array => json!([]),
            TypeTag::Any => Value::Null,
        }
    }

    proptest! {
        #[test]
        fn well_typed_arguments_always_validate(
            tags in prop::collection::vec(prop::sample::select(TypeTag::ALL.to_vec()), 0..6)
        ) {
            let mut descriptor = FunctionDescriptor::new("f", TypeTag::Any);
            let mut input = Arguments::new();
            for (i, tag) in tags.iter().enumerate() {
                let name = format!("p{i}");
                descriptor = descriptor.param(ParamSpec::required(name.clone(), *tag));
                input.insert(name, value_of(*tag));
            }
            let validated = validate_arguments(&descriptor, input.clone()).unwrap();
            prop_assert_eq!(validated, input);
        }

        #[test]
        fn undeclared_name_always_rejected(extra in "[a-z]{1,8}") {
            prop_assume!(extra != "a" && extra != "b");
            let mut input = args(json!({ "a": 1, "b": 2 }));
            input.insert(extra.clone(), json!(0));
            let err = validate_arguments(&add(), input).unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::UnexpectedArgument);
        }

        #[test]
        fn mismatched_kind_always_rejected(
            declared in prop::sample::select(TypeTag::ALL.to_vec()),
            supplied in prop::sample::select(TypeTag::ALL.to_vec()),
        ) {
            let descriptor = FunctionDescriptor::new("f", TypeTag::Any)
                .param(ParamSpec::required("x", declared));
            let value = value_of(supplied);
            let result = validate_arguments(&descriptor, args(json!({ "x": value.clone() })));
            prop_assert_eq!(result.is_ok(), declared.accepts(&value));
        }
    }
}
