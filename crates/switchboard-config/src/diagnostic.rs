// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration diagnostics.
//!
//! Figment extraction errors and validation failures both end up as
//! [`ConfigError`] values, which miette renders with the offending line of
//! the TOML file and a "did you mean" hint where one is close enough.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use std::fmt::Write as _;

use figment::error::Kind;
use miette::{Diagnostic, GraphicalReportHandler, NamedSource, SourceSpan};
use thiserror::Error;

/// Jaro-Winkler similarity a candidate needs before it is suggested.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration problem, renderable as a miette report.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("unknown key `{key}` in {section}")]
    #[diagnostic(
        code(switchboard::config::unknown_key),
        help("{}", did_you_mean(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        /// `[registry]`, `[modules.text]` or `the top level`.
        section: String,
        suggestion: Option<String>,
        valid_keys: String,
        #[label("not a recognized key")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A `[modules.<name>]` section names no built-in module.
    #[error("unknown module `{name}` in [modules]")]
    #[diagnostic(
        code(switchboard::config::unknown_module),
        help("{}", did_you_mean(suggestion.as_deref(), known))
    )]
    UnknownModule {
        name: String,
        suggestion: Option<String>,
        known: String,
    },

    #[error("`{key}` has the wrong type: found {found}")]
    #[diagnostic(code(switchboard::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        found: String,
        expected: String,
        #[label("expected {expected}")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("validation error: {message}")]
    #[diagnostic(code(switchboard::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(switchboard::config::other))]
    Other(String),
}

fn did_you_mean(suggestion: Option<&str>, candidates: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Expected one of: {candidates}"),
        None => format!("expected one of: {candidates}"),
    }
}

/// Where a key sits in one of the loaded TOML files.
struct Located {
    span: Option<SourceSpan>,
    src: Option<NamedSource<String>>,
}

impl Located {
    fn nowhere() -> Self {
        Self {
            span: None,
            src: None,
        }
    }
}

/// Looks keys up in the `(path, content)` pairs that were merged.
struct SourceIndex<'a> {
    sources: &'a [(String, String)],
}

impl SourceIndex<'_> {
    fn locate(&self, error: &figment::Error, section: &[String], key: &str) -> Located {
        let origin = error
            .metadata
            .as_ref()
            .and_then(|m| m.source.as_ref())
            .and_then(|source| match source {
                figment::Source::File(path) => Some(path.display().to_string()),
                _ => None,
            });

        // Inline strings carry no file; a single source is unambiguous.
        let found = match origin {
            Some(path) => self.sources.iter().find(|(p, _)| *p == path),
            None if self.sources.len() == 1 => self.sources.first(),
            None => None,
        };
        let Some((path, content)) = found else {
            return Located::nowhere();
        };

        match find_key_offset(content, section, key) {
            Some(offset) => Located {
                span: Some(SourceSpan::new(offset.into(), key.len())),
                src: Some(NamedSource::new(path, content.clone())),
            },
            None => Located::nowhere(),
        }
    }
}

fn section_label(section: &[String]) -> String {
    if section.is_empty() {
        "the top level".to_string()
    } else {
        format!("[{}]", section.join("."))
    }
}

/// Converts every error carried by a figment error into a [`ConfigError`].
///
/// `toml_sources` holds the `(path, content)` of each TOML file that took
/// part in the merge; it is only used to attach source spans.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    let index = SourceIndex {
        sources: toml_sources,
    };

    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(field, expected) => {
                let located = index.locate(&error, &error.path, field);
                ConfigError::UnknownKey {
                    key: field.clone(),
                    section: section_label(&error.path),
                    suggestion: suggest_key(field, expected),
                    valid_keys: expected.join(", "),
                    span: located.span,
                    src: located.src,
                }
            }
            Kind::InvalidType(actual, expected) => {
                let (key, section) = match error.path.split_last() {
                    Some((key, section)) => (key.clone(), section),
                    None => (String::new(), &[][..]),
                };
                let located = index.locate(&error, section, &key);
                ConfigError::InvalidType {
                    key: error.path.join("."),
                    found: actual.to_string(),
                    expected: expected.clone(),
                    span: located.span,
                    src: located.src,
                }
            }
            _ => ConfigError::Other(error.to_string()),
        })
        .collect()
}

/// Byte offset of `key` inside the `section` table of `content`.
///
/// An empty `section` means the top level, where a key may also appear as a
/// table header (`[server]`). Scanning stops at the next table header.
pub fn find_key_offset(content: &str, section: &[String], key: &str) -> Option<usize> {
    let body = if section.is_empty() {
        0
    } else {
        let header = format!("[{}]", section.join("."));
        content.find(&header)? + header.len()
    };

    let mut offset = body;
    for line in content[body..].split_inclusive('\n') {
        let indent = line.len() - line.trim_start().len();
        let text = &line[indent..];

        if let Some(header) = text.strip_prefix('[') {
            let names_key = header
                .strip_prefix(key)
                .is_some_and(|rest| rest.starts_with(']') || rest.starts_with('.'));
            if section.is_empty() && names_key {
                return Some(offset + indent + 1);
            }
            if !section.is_empty() {
                return None;
            }
        } else if let Some(rest) = text.strip_prefix(key) {
            if rest.trim_start().starts_with('=') {
                return Some(offset + indent);
            }
        }
        offset += line.len();
    }
    None
}

/// The closest of `candidates` to `unknown`, if it is similar enough.
pub fn suggest_key(unknown: &str, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .map(|candidate| (strsim::jaro_winkler(unknown, candidate), *candidate))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, candidate)| candidate.to_string())
}

/// Renders every error with miette's graphical handler.
pub fn render_errors_to_string(errors: &[ConfigError]) -> String {
    let handler = GraphicalReportHandler::new();
    errors.iter().fold(String::new(), |mut out, error| {
        let mut report = String::new();
        match handler.render_report(&mut report, error) {
            Ok(()) => out.push_str(&report),
            Err(_) => {
                let _ = writeln!(out, "error: {error}");
            }
        }
        out
    })
}

/// Renders every error to stderr.
pub fn render_errors(errors: &[ConfigError]) {
    eprint!("{}", render_errors_to_string(errors));
}
