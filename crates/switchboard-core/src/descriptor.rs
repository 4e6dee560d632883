// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Function and module descriptors.
//!
//! A [`FunctionDescriptor`] declares the parameter and return schema of one
//! callable; a [`ModuleDescriptor`] carries module-level metadata. Neither
//! has any effect on dispatch beyond the parameter schema.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::types::TypeTag;

/// A violated descriptor invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("function name must not be empty")]
    EmptyFunctionName,

    #[error("function `{function}` has a parameter with an empty name")]
    EmptyParameterName { function: String },

    #[error("function `{function}` declares parameter `{param}` more than once")]
    DuplicateParameter { function: String, param: String },

    #[error("function `{function}` marks parameter `{param}` required but gives it a default")]
    RequiredWithDefault { function: String, param: String },

    #[error("function `{function}` parameter `{param}` has a default that is not a {expected}")]
    DefaultTypeMismatch {
        function: String,
        param: String,
        expected: TypeTag,
    },
}

fn default_required() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

/// Declaration of a single named parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamSpec {
    /// Parameter name, unique within its function.
    pub name: String,
    /// Declared structural type.
    #[serde(rename = "type")]
    pub type_tag: TypeTag,
    /// Whether the caller must supply this parameter.
    #[serde(default = "default_required", skip_serializing_if = "is_true")]
    pub required: bool,
    /// Value applied when an optional parameter is omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl ParamSpec {
    /// A parameter the caller must supply.
    pub fn required(name: impl Into<String>, type_tag: TypeTag) -> Self {
        Self {
            name: name.into(),
            type_tag,
            required: true,
            default: None,
            description: String::new(),
        }
    }

    /// A parameter the caller may omit.
    pub fn optional(name: impl Into<String>, type_tag: TypeTag) -> Self {
        Self {
            required: false,
            ..Self::required(name, type_tag)
        }
    }

    /// Sets a default value, which also makes the parameter optional.
    pub fn with_default(mut self, value: Value) -> Self {
        self.required = false;
        self.default = Some(value);
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Declared schema of one callable operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FunctionDescriptor {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParamSpec>,
    pub returns: TypeTag,
    #[serde(default)]
    pub description: String,
}

impl FunctionDescriptor {
    /// Creates a descriptor with no parameters.
    pub fn new(name: impl Into<String>, returns: TypeTag) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            returns,
            description: String::new(),
        }
    }

    /// Appends a parameter.
    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.parameters.push(spec);
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Looks up a declared parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&ParamSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Checks the descriptor invariants.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        if self.name.is_empty() {
            return Err(DescriptorError::EmptyFunctionName);
        }

        let mut seen = HashSet::with_capacity(self.parameters.len());
        for param in &self.parameters {
            if param.name.is_empty() {
                return Err(DescriptorError::EmptyParameterName {
                    function: self.name.clone(),
                });
            }
            if !seen.insert(param.name.as_str()) {
                return Err(DescriptorError::DuplicateParameter {
                    function: self.name.clone(),
                    param: param.name.clone(),
                });
            }
            if let Some(default) = &param.default {
                if param.required {
                    return Err(DescriptorError::RequiredWithDefault {
                        function: self.name.clone(),
                        param: param.name.clone(),
                    });
                }
                if !param.type_tag.accepts(default) {
                    return Err(DescriptorError::DefaultTypeMismatch {
                        function: self.name.clone(),
                        param: param.name.clone(),
                        expected: param.type_tag,
                    });
                }
            }
        }
        Ok(())
    }

    /// Renders a one-line signature, e.g. `replace(input: string, limit?: number = 0) -> string`.
    pub fn signature(&self) -> String {
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|p| {
                let marker = if p.required { "" } else { "?" };
                match &p.default {
                    Some(default) => format!("{}{marker}: {} = {default}", p.name, p.type_tag),
                    None => format!("{}{marker}: {}", p.name, p.type_tag),
                }
            })
            .collect();
        format!("{}({}) -> {}", self.name, params.join(", "), self.returns)
    }
}

/// Module-level metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    /// Registry-unique, case-sensitive module name.
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    /// Advisory semantic version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ModuleDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            category: String::new(),
            version: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Parses the advisory version, if present and well-formed.
    pub fn semver(&self) -> Option<semver::Version> {
        self.version
            .as_deref()
            .and_then(|v| semver::Version::parse(v).ok())
    }
}
