//! `gateinv inventory [paths...]` – aggregate a whole corpus of captures.

use anyhow::{bail, Context, Result};
use gateinv_core::scan::Scanner;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::output::render_summary;

pub fn run_inventory(scanner: &Scanner, paths: &[PathBuf], output: Option<&Path>) -> Result<()> {
    let report = scanner.scan(paths);
    if !report.found_payload() {
        bail!(
            "no bootstrap payload found in provided paths ({} document(s) scanned)",
            report.documents
        );
    }
    let text = render_summary(&report.summary)?;
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("write summary: {}", path.display()))?;
            println!(
                "Wrote {} gate(s) and {} config(s) from {} document(s) to {}",
                report.summary.feature_gates.len(),
                report.summary.dynamic_configs.len(),
                report.with_payload,
                path.display()
            );
        }
        None => std::io::stdout().write_all(text.as_bytes())?,
    }
    Ok(())
}
