// SPDX-FileCopyrightText: 2026 Tokenmeter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge with fuzzy match suggestions.
//!
//! Converts Figment deserialization errors and validation failures into
//! miette diagnostics carrying source spans, valid key listings, and
//! "did you mean?" suggestions based on Jaro-Winkler similarity.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration error with rich diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// An unknown key was found in the configuration.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(tokenmeter::config::unknown_key),
        help("{}", format_suggestion_help(suggestion.as_deref(), "valid keys", valid_keys))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        valid_keys: String,
        #[label("this key is not recognized")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A configuration value has the wrong type.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(tokenmeter::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
    },

    /// A required configuration key is missing.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(tokenmeter::config::missing_key),
        help("add `{key} = <value>` to your tokenmeter.toml")
    )]
    MissingKey { key: String },

    /// A string value outside a closed set (encoding name, default model).
    #[error("unknown value `{value}` for `{key}`")]
    #[diagnostic(
        code(tokenmeter::config::unknown_value),
        help("{}", format_suggestion_help(suggestion.as_deref(), "valid values", valid_values))
    )]
    UnknownValue {
        key: String,
        value: String,
        suggestion: Option<String>,
        valid_values: String,
    },

    /// A semantic validation error for a config value.
    #[error("validation error: {message}")]
    #[diagnostic(code(tokenmeter::config::validation))]
    Validation { message: String },

    /// Catch-all for other configuration errors.
    #[error("configuration error: {0}")]
    #[diagnostic(code(tokenmeter::config::other))]
    Other(String),
}

impl ConfigError {
    /// Build an [`ConfigError::UnknownValue`] with a suggestion drawn from `valid`.
    pub fn unknown_value(key: &str, value: &str, valid: &[&str]) -> Self {
        ConfigError::UnknownValue {
            key: key.to_string(),
            value: value.to_string(),
            suggestion: suggest_key(value, valid),
            valid_values: valid.join(", "),
        }
    }
}

fn format_suggestion_help(suggestion: Option<&str>, noun: &str, valid: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? {noun}: {valid}"),
        None => format!("{noun}: {valid}"),
    }
}

/// Convert a `figment::Error` into a list of `ConfigError` diagnostics.
///
/// A figment error may carry several underlying errors; each one becomes its
/// own diagnostic.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(field, expected) => {
                let valid_keys: Vec<&str> = expected.to_vec();
                let (span, src) = find_source_span(&error, field, toml_sources);
                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion: suggest_key(field, &valid_keys),
                    valid_keys: valid_keys.join(", "),
                    span,
                    src,
                }
            }
            Kind::MissingField(field) => ConfigError::MissingKey {
                key: dotted(&error.path, field),
            },
            Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                key: error.path.join("."),
                detail: format!("found {actual}, expected {expected}"),
                expected: expected.to_string(),
            },
            _ => ConfigError::Other(format!("{error}")),
        })
        .collect()
}

fn dotted(path: &[String], field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{}.{field}", path.join("."))
    }
}

/// Find source span for an error in the TOML source files.
fn find_source_span(
    error: &figment::error::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let source_path = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|s| match s {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });

    // Inline strings have no file path; fall back to the only source given.
    let source = match source_path {
        Some(path) => toml_sources.iter().find(|(p, _)| *p == path),
        None if toml_sources.len() == 1 => toml_sources.first(),
        None => None,
    };

    if let Some((path, content)) = source
        && let Some(offset) = find_key_offset(content, section_path(&error.path, field), field)
    {
        let span = SourceSpan::new(offset.into(), field.len());
        let named = NamedSource::new(path, content.clone());
        return (Some(span), Some(named));
    }

    (None, None)
}

/// The table path containing `field`.
///
/// For unknown fields figment's error path already ends with the field name
/// (`["tokenizer", "baseline"]`); that trailing segment is not a table.
fn section_path<'a>(path: &'a [String], field: &str) -> &'a [String] {
    match path.split_last() {
        Some((last, rest)) if last == field => rest,
        _ => path,
    }
}

/// Find the byte offset of a key in TOML content, relative to a section path.
///
/// For `path = ["server"]` and `field = "prot"`, finds the `[server]` header
/// then searches for `prot` after it. Numeric path segments (array indices)
/// are skipped, so `["pricing", "models", "0"]` matches `[[pricing.models]]`.
/// For top-level fields, searches from the start.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let section: Vec<&str> = path
        .iter()
        .map(String::as_str)
        .filter(|seg| seg.parse::<usize>().is_err())
        .collect();

    let search_start = if section.is_empty() {
        0
    } else {
        let name = section.join(".");
        let table = format!("[{name}]");
        let array = format!("[[{name}]]");
        content
            .find(&array)
            .map(|pos| pos + array.len())
            .or_else(|| content.find(&table).map(|pos| pos + table.len()))?
    };

    let remaining = &content[search_start..];
    let mut byte_offset = 0;
    for line in remaining.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(after) = trimmed.strip_prefix(field)
            && (after.starts_with(' ') || after.starts_with('=') || after.starts_with('\t'))
        {
            let field_start_in_line = line.len() - trimmed.len();
            return Some(search_start + byte_offset + field_start_in_line);
        }
        byte_offset += line.len();
    }

    None
}

/// Suggest a similar key name using Jaro-Winkler string similarity.
///
/// Returns the best match above the similarity threshold, or `None` if
/// nothing is close enough.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|&key| (key, strsim::jaro_winkler(unknown, key)))
        .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(key, _)| key.to_string())
}

/// Render a list of `ConfigError`s to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}
