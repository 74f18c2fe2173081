//! Find the first `call("...");` wrapper and parse its literal as a JSON array.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::error::PayloadError;
use super::unescape::unescape;

/// Wrapper call used by the bootstrap stream.
pub const DEFAULT_CALL_NAME: &str = "enqueue";

static DEFAULT_EXTRACTOR: Lazy<PayloadExtractor> = Lazy::new(PayloadExtractor::default);

/// Compiled wrapper pattern for one call name.
#[derive(Debug, Clone)]
pub struct PayloadExtractor {
    call_name: String,
    pattern: Regex,
}

impl PayloadExtractor {
    pub fn new(call_name: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(r#"{}\("(.*?)"\);"#, regex::escape(call_name)))?;
        Ok(Self {
            call_name: call_name.to_string(),
            pattern,
        })
    }

    pub fn call_name(&self) -> &str {
        &self.call_name
    }

    /// Raw (still escaped) literal of the first wrapper in `text`.
    ///
    /// Later wrappers are ignored even when the first one fails to decode.
    pub fn find_literal<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Decode and parse the first wrapper in `text` into the raw slot sequence.
    pub fn extract(&self, text: &str) -> Result<Vec<Value>, PayloadError> {
        let literal = self.find_literal(text).ok_or_else(|| PayloadError::NotFound {
            call: self.call_name.clone(),
        })?;
        let decoded = unescape(literal)?;
        match serde_json::from_str(&decoded)? {
            Value::Array(slots) => Ok(slots),
            other => Err(PayloadError::NotArray {
                found: json_kind(&other),
            }),
        }
    }
}

impl Default for PayloadExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_CALL_NAME).expect("default wrapper pattern is valid")
    }
}

/// Extract the raw sequence using the default `enqueue` wrapper.
pub fn extract_root(text: &str) -> Result<Vec<Value>, PayloadError> {
    DEFAULT_EXTRACTOR.extract(text)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
