//! Cleaning up model output before parsing
//!
//! Models asked for JSON sometimes wrap it in a Markdown code fence; that is
//! stripped before parsing.

use serde_json::Value;

/// Why a structured response could not be used
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseError {
    /// Nothing but whitespace came back
    Empty,
    /// The text was not valid JSON
    InvalidJson(String),
    /// Valid JSON, but not an array
    NotArray,
}

/// Remove a surrounding ```json ... ``` fence, if any
pub fn strip_code_fences(text: &str) -> &str {
    let mut text = text.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest.trim_start();
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest.trim_start();
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest.trim_end();
    }
    text
}

/// Parse a model response that should be a JSON array
pub fn parse_json_array(text: &str) -> Result<Vec<Value>, ResponseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ResponseError::Empty);
    }

    let value: Value = serde_json::from_str(strip_code_fences(trimmed))
        .map_err(|e| ResponseError::InvalidJson(e.to_string()))?;

    match value {
        Value::Array(items) => Ok(items),
        _ => Err(ResponseError::NotArray),
    }
}
