//! Reasons a document yields no payload.

use thiserror::Error;

use super::unescape::EscapeError;

/// Why the root extractor produced nothing for a document.
///
/// None of these are fatal to a corpus scan; the document simply contributes
/// nothing.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// No `call("...");` wrapper in the text.
    #[error("no {call}(\"...\") wrapper found")]
    NotFound { call: String },
    /// The string literal had a broken escape sequence.
    #[error("decode string literal: {0}")]
    Escape(#[from] EscapeError),
    /// The decoded literal is not valid JSON.
    #[error("parse payload JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The decoded JSON is valid but its top-level value is not an array.
    #[error("payload is a JSON {found}, expected an array")]
    NotArray { found: &'static str },
}
