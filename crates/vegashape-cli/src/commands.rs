//! CLI command implementations

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, bail};
use colored::Colorize;
use serde_json::Value;
use tracing::debug;
use vegashape_core::{
    ExactDiff, JsonRoundTrip, OutputFormat, apply_rules, default_empties, go_wire_rules, parse_or,
    prune, reconcile, to_json_string,
};

use crate::EmitFormat;

/// Round-trip check command implementation
pub async fn check_command(file: &Path, compact: bool) -> anyhow::Result<ExitCode> {
    let document = load_document(file)?;
    debug!("checking {}", file.display());

    let check = reconcile(&document, &JsonRoundTrip, &ExactDiff).await;
    let indent = if compact { 0 } else { 2 };

    if let Some(left) = &check.left {
        println!("left:  {}", to_json_string(left, indent)?);
    }
    if let Some(right) = &check.right {
        println!("right: {}", to_json_string(right, indent)?);
    }
    if let Some(error) = &check.error {
        eprintln!("{} {error}", "codec error:".red());
        return Ok(ExitCode::from(2));
    }
    match &check.delta {
        None => {
            println!("{}", "round-trip shape matches".green());
            Ok(ExitCode::SUCCESS)
        }
        Some(delta) => {
            println!("delta: {}", to_json_string(delta, indent)?);
            println!("{}", "round-trip shape differs".red());
            Ok(ExitCode::from(1))
        }
    }
}

/// Normalize command implementation
pub fn normalize_command(file: &Path, compact: bool) -> anyhow::Result<ExitCode> {
    let document = load_document(file)?;
    let normalized = apply_rules(&document, &go_wire_rules());
    let pruned = prune(&normalized, &default_empties(), true).unwrap_or(Value::Null);
    let indent = if compact { 0 } else { 2 };
    println!("{}", to_json_string(&pruned, indent)?);
    Ok(ExitCode::SUCCESS)
}

/// Emit command implementation
pub fn emit_command(
    file: &Path,
    wallet: &str,
    pubkey: &str,
    format: EmitFormat,
) -> anyhow::Result<ExitCode> {
    let document = load_document(file)?;
    let format = match format {
        EmitFormat::Json => OutputFormat::Json,
        EmitFormat::JsonPretty => OutputFormat::JsonPretty,
        EmitFormat::Unix => OutputFormat::UnixCmd,
        EmitFormat::Windows => OutputFormat::WindowsCmd,
    };
    println!("{}", format.format(&document, wallet, pubkey)?);
    Ok(ExitCode::SUCCESS)
}

/// Read and parse a JSON document, reporting parse errors with context
fn load_document(file: &Path) -> anyhow::Result<Value> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let (document, parse_error) = parse_or(&text, Value::Null);
    if let Some(info) = parse_error {
        if let Some(before) = info.lines_before.as_deref().filter(|s| !s.is_empty()) {
            eprintln!("{before}");
        }
        if let Some(line) = &info.error_line {
            eprintln!("{line}");
        }
        eprintln!("{}", info.error_message.yellow());
        if let Some(after) = info.lines_after.as_deref().filter(|s| !s.is_empty()) {
            eprintln!("{after}");
        }
        bail!("{} is not valid JSON", file.display());
    }
    Ok(document)
}
