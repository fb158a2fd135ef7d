//! Output formatters for sending a command through various front ends

use serde_json::Value;

use crate::json::to_json_string;
use crate::result::Result;

/// How to render a command for the outside world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
    /// `vega wallet` invocation for Mac/Linux shells
    UnixCmd,
    /// `vegawallet.exe` invocation for Windows shells
    WindowsCmd,
}

impl OutputFormat {
    /// Human-readable name shown in pickers
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Json => "Raw JSON",
            OutputFormat::JsonPretty => "Pretty JSON",
            OutputFormat::UnixCmd => "Mac/Linux Command",
            OutputFormat::WindowsCmd => "Windows Command",
        }
    }

    /// Render `input` for this format
    pub fn format(&self, input: &Value, wallet_name: &str, public_key: &str) -> Result<String> {
        match self {
            OutputFormat::Json => to_json_string(input, 0),
            OutputFormat::JsonPretty => to_json_string(input, 2),
            OutputFormat::UnixCmd => {
                let escaped = to_json_string(input, 0)?.replace('\'', r"'\''");
                Ok(format!(
                    "vega wallet transaction send --wallet '{wallet_name}' --pubkey '{public_key}' --network mainnet1 '{escaped}'"
                ))
            }
            OutputFormat::WindowsCmd => {
                let escaped = to_json_string(input, 0)?
                    .replace('\\', r"\\")
                    .replace('"', "\\\"");
                Ok(format!(
                    "vegawallet.exe transaction send --wallet \"{wallet_name}\" --pubkey \"{public_key}\" --network mainnet1 \"{escaped}\""
                ))
            }
        }
    }
}
