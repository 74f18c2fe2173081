//! `gateinv resolve <path>` – summarize a single capture.

use anyhow::{bail, Result};
use gateinv_core::inventory::InventorySummary;
use gateinv_core::scan::{DocumentOutcome, Scanner};
use std::io::Write;
use std::path::Path;

use super::output::render_summary;

pub fn run_resolve(scanner: &Scanner, path: &Path) -> Result<()> {
    let summary = summarize_file(scanner, path)?;
    std::io::stdout().write_all(render_summary(&summary)?.as_bytes())?;
    Ok(())
}

/// Summary of one file; an error when it carries no payload.
pub(super) fn summarize_file(scanner: &Scanner, path: &Path) -> Result<InventorySummary> {
    match scanner.read_single(path) {
        DocumentOutcome::Payload(entries) => {
            tracing::info!(path = %path.display(), entries = entries.len(), "resolved payload");
            Ok(InventorySummary::summarize(entries.values()))
        }
        DocumentOutcome::Skipped(err) => {
            Err(err.context(format!("process {}", path.display())))
        }
        DocumentOutcome::NoPayload | DocumentOutcome::Ignored => {
            bail!("no bootstrap payload found in {}", path.display())
        }
    }
}
