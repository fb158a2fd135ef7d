//! JSON text helpers: numeric-safe serialization and parse-error context
//!
//! Serialization goes through serde_json with the `arbitrary_precision`
//! feature enabled, so integers wider than 64 bits keep their exact decimal
//! digits instead of collapsing to a lossy float.

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::result::Result;

/// Default number of context lines shown around a JSON parse error
pub const DEFAULT_ERROR_CONTEXT: usize = 4;

/// Serialize a tree to JSON text without losing integer precision.
///
/// `indent == 0` produces compact output; any positive value pretty-prints
/// with that many spaces per nesting level.
pub fn to_json_string(tree: &Value, indent: usize) -> Result<String> {
    if indent == 0 {
        return Ok(serde_json::to_string(tree)?);
    }
    let pad = vec![b' '; indent];
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(&pad);
    let mut serializer = Serializer::with_formatter(&mut out, formatter);
    tree.serialize(&mut serializer)?;
    String::from_utf8(out).map_err(|e| crate::ShapeError::internal_error(e.to_string()))
}

/// Round-trip a tree through its textual form.
///
/// Used to normalize numeric representations before structural comparison.
pub fn reparse(tree: &Value) -> Result<Value> {
    Ok(serde_json::from_str(&to_json_string(tree, 0)?)?)
}

/// Context data extracted from a JSON parse failure, suitable for printing
/// alongside the error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonErrorInfo {
    pub lines_before: Option<String>,
    pub error_line: Option<String>,
    pub lines_after: Option<String>,
    pub error_message: String,
}

/// Parse JSON, falling back to `default` plus error context on failure.
///
/// Empty input parses to `Null` with no error.
pub fn parse_or(maybe_json: &str, default: Value) -> (Value, Option<JsonErrorInfo>) {
    parse_or_with_context(
        maybe_json,
        default,
        DEFAULT_ERROR_CONTEXT,
        DEFAULT_ERROR_CONTEXT,
    )
}

/// `parse_or` with an explicit context window (lines before/after the error)
pub fn parse_or_with_context(
    maybe_json: &str,
    default: Value,
    context_before: usize,
    context_after: usize,
) -> (Value, Option<JsonErrorInfo>) {
    if maybe_json.is_empty() {
        return (Value::Null, None);
    }
    match serde_json::from_str(maybe_json) {
        Ok(value) => (value, None),
        Err(err) => {
            let info = json_error_help(
                maybe_json,
                err.line(),
                err.column(),
                &err.to_string(),
                context_before,
                context_after,
            );
            (default, Some(info))
        }
    }
}

/// Turn parse error coordinates plus the input into printable context.
///
/// `line`/`column` are 1-based as reported by serde_json; a zero line means
/// no location was available and only the message is returned. Coordinates
/// past the end of the input clamp to the last line.
pub fn json_error_help(
    input: &str,
    line: usize,
    column: usize,
    message: &str,
    context_before: usize,
    context_after: usize,
) -> JsonErrorInfo {
    if line == 0 {
        return JsonErrorInfo {
            lines_before: None,
            error_line: None,
            lines_after: None,
            error_message: message.to_string(),
        };
    }
    let lines: Vec<&str> = input.split('\n').collect();
    let line = line.min(lines.len());
    let before_start = (line - 1).saturating_sub(context_before);
    let lines_before = lines[before_start..line - 1].join("\n");
    let error_line = lines.get(line - 1).copied().unwrap_or_default().to_string();
    let after_end = line.saturating_add(context_after).min(lines.len());
    let lines_after = if line < after_end {
        lines[line..after_end].join("\n")
    } else {
        String::new()
    };
    let caret = " ".repeat(column.saturating_sub(1)) + "^ " + message;
    JsonErrorInfo {
        lines_before: Some(lines_before),
        error_line: Some(error_line),
        lines_after: Some(lines_after),
        error_message: caret,
    }
}
