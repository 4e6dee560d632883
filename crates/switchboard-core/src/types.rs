// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structural type tags and argument types shared across the workspace.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

/// Named arguments passed to a module function.
pub type Arguments = serde_json::Map<String, Value>;

/// Declared shape of a parameter or return value.
///
/// The check is structural only: `object` and `array` contents are not
/// inspected.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    String,
    Number,
    Boolean,
    Object,
    Array,
    Any,
}

impl TypeTag {
    /// All declarable type tags.
    pub const ALL: [TypeTag; 6] = [
        TypeTag::String,
        TypeTag::Number,
        TypeTag::Boolean,
        TypeTag::Object,
        TypeTag::Array,
        TypeTag::Any,
    ];

    /// Returns true if `value` has the kind this tag declares.
    ///
    /// `any` accepts every value, including null. No other tag accepts null.
    pub fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, ValueKind::of(value)),
            (TypeTag::Any, _)
                | (TypeTag::String, ValueKind::String)
                | (TypeTag::Number, ValueKind::Number)
                | (TypeTag::Boolean, ValueKind::Boolean)
                | (TypeTag::Object, ValueKind::Object)
                | (TypeTag::Array, ValueKind::Array)
        )
    }
}

/// Observed kind of a runtime value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    String,
    Number,
    Boolean,
    Object,
    Array,
}

impl ValueKind {
    /// Classifies a JSON value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }
}
