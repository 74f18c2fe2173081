//! Classify and process a single document (HAR or text).

use anyhow::{Context, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::config::GateinvConfig;
use crate::har;
use crate::inventory::{extract_entries_with, ConfigEntry};
use crate::payload::PayloadExtractor;
use crate::resolver::{ResolutionContext, ResolveError};

/// How a file on disk is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Har,
    Text,
    /// Binary or oversized; never opened.
    Skip,
}

/// Result of processing one document.
#[derive(Debug)]
pub enum DocumentOutcome {
    /// A payload with at least one named entry.
    Payload(BTreeMap<String, ConfigEntry>),
    /// Readable, but no marker, wrapper, or qualifying entry.
    NoPayload,
    /// Not a document kind we read.
    Ignored,
    /// Unreadable or unresolvable; logged and skipped by the scanner.
    Skipped(anyhow::Error),
}

/// Per-run document reader built from [`GateinvConfig`].
#[derive(Debug, Clone)]
pub struct Scanner {
    extractor: PayloadExtractor,
    text_extensions: BTreeSet<String>,
    max_untyped_file_bytes: u64,
    marker: String,
    max_depth: usize,
}

impl Scanner {
    pub fn from_config(cfg: &GateinvConfig) -> Result<Self> {
        let extractor = PayloadExtractor::new(&cfg.call_name)
            .with_context(|| format!("build wrapper pattern for call {:?}", cfg.call_name))?;
        Ok(Self {
            extractor,
            text_extensions: cfg
                .text_extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            max_untyped_file_bytes: cfg.max_untyped_file_bytes,
            marker: cfg.marker.clone(),
            max_depth: cfg.max_resolve_depth,
        })
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Decide how to read `path` during a corpus walk.
    ///
    /// `.har` files are HAR; known text extensions are text; files without
    /// an extension are text when no larger than the untyped size cap.
    pub fn detect(&self, path: &Path) -> Result<DocumentKind> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase());
        match ext.as_deref() {
            Some("har") => Ok(DocumentKind::Har),
            Some(ext) if self.text_extensions.contains(ext) => Ok(DocumentKind::Text),
            Some(_) => Ok(DocumentKind::Skip),
            None => {
                let len = std::fs::metadata(path)
                    .with_context(|| format!("stat {}", path.display()))?
                    .len();
                if len <= self.max_untyped_file_bytes {
                    Ok(DocumentKind::Text)
                } else {
                    Ok(DocumentKind::Skip)
                }
            }
        }
    }

    /// Process a file found during a corpus walk.
    pub fn read_document(&self, path: &Path) -> DocumentOutcome {
        match self.detect(path) {
            Ok(kind) => self.read_as(path, kind),
            Err(err) => DocumentOutcome::Skipped(err),
        }
    }

    /// Process a file named explicitly by the user: `.har` is HAR, anything
    /// else is read as text regardless of extension or size.
    pub fn read_single(&self, path: &Path) -> DocumentOutcome {
        let is_har = path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("har"));
        let kind = if is_har {
            DocumentKind::Har
        } else {
            DocumentKind::Text
        };
        self.read_as(path, kind)
    }

    fn read_as(&self, path: &Path, kind: DocumentKind) -> DocumentOutcome {
        let body = match kind {
            DocumentKind::Skip => return DocumentOutcome::Ignored,
            DocumentKind::Har => har::read_har_body(path, &self.marker),
            DocumentKind::Text => self.read_text_body(path),
        };
        match body {
            Ok(Some(text)) => self.outcome_for_text(&text),
            Ok(None) => DocumentOutcome::NoPayload,
            Err(err) => DocumentOutcome::Skipped(err),
        }
    }

    fn read_text_body(&self, path: &Path) -> Result<Option<String>> {
        let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
        let text = String::from_utf8_lossy(&bytes);
        if !text.contains(&self.marker) {
            return Ok(None);
        }
        Ok(Some(text.into_owned()))
    }

    fn outcome_for_text(&self, text: &str) -> DocumentOutcome {
        match self.process_text(text) {
            Ok(entries) if entries.is_empty() => DocumentOutcome::NoPayload,
            Ok(entries) => DocumentOutcome::Payload(entries),
            Err(err) => DocumentOutcome::Skipped(err.into()),
        }
    }

    /// Extract, resolve and collect entries from an in-memory document.
    ///
    /// A missing or undecodable payload yields an empty map; only a resolver
    /// failure is an error.
    pub fn process_text(&self, text: &str) -> Result<BTreeMap<String, ConfigEntry>, ResolveError> {
        let root = match self.extractor.extract(text) {
            Ok(root) => root,
            Err(err) => {
                tracing::debug!(error = %err, "no payload in document");
                return Ok(BTreeMap::new());
            }
        };
        let mut ctx = ResolutionContext::with_max_depth(&root, self.max_depth);
        extract_entries_with(&mut ctx)
    }
}
