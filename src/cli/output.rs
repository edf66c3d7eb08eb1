//! Output formatting for CLI results.

use serde::Serialize;

/// Format of command results on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text for humans.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Parses a `--format` value; anything unrecognized is text.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    /// Serializes `value` as pretty JSON.
    ///
    /// Falls back to an error object if serialization fails.
    pub fn to_json<T: Serialize>(self, value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|e| {
            serde_json::json!({ "error": format!("JSON serialization failed: {e}") }).to_string()
        })
    }
}
