//! Pick the response body that carries the bootstrap payload.

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;
use thiserror::Error;

use super::parse::{HarContent, HarLog};

#[derive(Debug, Error)]
pub enum HarError {
    #[error("parse HAR JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Returns the first response body (in entry order) containing `marker`.
///
/// Base64 bodies are decoded first; bytes that are not valid UTF-8 are
/// replaced rather than rejected. Bodies that fail base64 decoding are
/// skipped. Later matching bodies are never considered.
pub fn select_bootstrap_body(bytes: &[u8], marker: &str) -> Result<Option<String>, HarError> {
    let text = String::from_utf8_lossy(bytes);
    let har: HarLog = serde_json::from_str(&text)?;

    for (index, entry) in har.log.entries.into_iter().enumerate() {
        let Some(body) = decode_body(entry.response.content, index) else {
            continue;
        };
        if body.contains(marker) {
            tracing::debug!(entry = index, bytes = body.len(), "selected HAR response body");
            return Ok(Some(body));
        }
    }
    Ok(None)
}

/// Read a HAR file and select its bootstrap body.
pub fn read_har_body(path: &Path, marker: &str) -> Result<Option<String>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read HAR file: {}", path.display()))?;
    let body = select_bootstrap_body(&bytes, marker)
        .with_context(|| format!("select body from HAR: {}", path.display()))?;
    Ok(body)
}

fn decode_body(content: HarContent, index: usize) -> Option<String> {
    let text = content.text?;
    if content.encoding.as_deref() != Some("base64") {
        return Some(text);
    }
    match STANDARD.decode(text.trim()) {
        Ok(raw) => Some(String::from_utf8_lossy(&raw).into_owned()),
        Err(err) => {
            tracing::debug!(entry = index, error = %err, "skipping undecodable base64 body");
            None
        }
    }
}
