//! Minimal HAR 1.2 structures: just enough to reach response bodies.

use serde::Deserialize;

/// Root HAR log (top-level wrapper).
#[derive(Debug, Default, Deserialize)]
pub struct HarLog {
    #[serde(default)]
    pub log: HarRoot,
}

#[derive(Debug, Default, Deserialize)]
pub struct HarRoot {
    #[serde(default)]
    pub entries: Vec<HarEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HarEntry {
    #[serde(default)]
    pub response: HarResponse,
}

#[derive(Debug, Default, Deserialize)]
pub struct HarResponse {
    #[serde(default)]
    pub content: HarContent,
}

#[derive(Debug, Default, Deserialize)]
pub struct HarContent {
    #[serde(default)]
    pub text: Option<String>,
    /// Transport encoding of `text`; only `base64` is meaningful.
    #[serde(default)]
    pub encoding: Option<String>,
}
