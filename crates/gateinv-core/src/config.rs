use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::payload::DEFAULT_CALL_NAME;
use crate::resolver::DEFAULT_MAX_DEPTH;

/// Global configuration loaded from `~/.config/gateinv/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GateinvConfig {
    /// Paths scanned by `inventory` when none are given on the command line.
    pub default_paths: Vec<PathBuf>,
    /// File extensions (without dot, case-insensitive) treated as text documents.
    pub text_extensions: Vec<String>,
    /// Suffix-less files larger than this are not read.
    pub max_untyped_file_bytes: u64,
    /// Substring a body must contain before it is parsed.
    pub marker: String,
    /// Name of the wrapper call whose string literal holds the payload.
    pub call_name: String,
    /// Maximum nested reference hops while resolving one document.
    pub max_resolve_depth: usize,
}

impl Default for GateinvConfig {
    fn default() -> Self {
        Self {
            default_paths: vec![PathBuf::from("raw"), PathBuf::from("hars")],
            text_extensions: [
                "html", "htm", "js", "json", "txt", "xml", "log", "resp", "response", "data",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            max_untyped_file_bytes: 5 * 1024 * 1024,
            marker: "feature_gates".to_string(),
            call_name: DEFAULT_CALL_NAME.to_string(),
            max_resolve_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("gateinv")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<GateinvConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = GateinvConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: GateinvConfig = toml::from_str(&data)?;
    Ok(cfg)
}
