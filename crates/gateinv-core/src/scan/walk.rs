//! Walk files and directories, folding every payload into one summary.

use std::path::Path;
use walkdir::WalkDir;

use crate::inventory::InventorySummary;

use super::document::{DocumentOutcome, Scanner};

/// Aggregate result of a corpus scan.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    pub summary: InventorySummary,
    /// Files visited.
    pub documents: usize,
    /// Files that contributed at least one entry.
    pub with_payload: usize,
    /// Files that failed to read or resolve.
    pub skipped: usize,
}

impl ScanReport {
    pub fn found_payload(&self) -> bool {
        self.with_payload > 0
    }
}

impl Scanner {
    /// Scan files and directories (recursively, in sorted order).
    ///
    /// Never fails: unreadable documents are logged and counted as skipped.
    pub fn scan<P: AsRef<Path>>(&self, paths: &[P]) -> ScanReport {
        let mut report = ScanReport::default();
        for root in paths {
            let root = root.as_ref();
            if root.is_dir() {
                for entry in WalkDir::new(root).sort_by_file_name() {
                    match entry {
                        Ok(entry) if entry.file_type().is_file() => {
                            self.scan_file(entry.path(), &mut report);
                        }
                        Ok(_) => {}
                        Err(err) => {
                            tracing::warn!(error = %err, "skipping unreadable directory entry");
                            report.skipped += 1;
                        }
                    }
                }
            } else if root.is_file() {
                self.scan_file(root, &mut report);
            } else {
                tracing::warn!(path = %root.display(), "path does not exist, skipping");
            }
        }
        tracing::info!(
            documents = report.documents,
            with_payload = report.with_payload,
            skipped = report.skipped,
            gates = report.summary.feature_gates.len(),
            configs = report.summary.dynamic_configs.len(),
            "scan finished"
        );
        report
    }

    fn scan_file(&self, path: &Path, report: &mut ScanReport) {
        report.documents += 1;
        match self.read_document(path) {
            DocumentOutcome::Payload(entries) => {
                tracing::debug!(path = %path.display(), entries = entries.len(), "payload found");
                report.with_payload += 1;
                report.summary.merge(InventorySummary::summarize(entries.values()));
            }
            DocumentOutcome::NoPayload | DocumentOutcome::Ignored => {}
            DocumentOutcome::Skipped(err) => {
                tracing::warn!(path = %path.display(), error = %format!("{err:#}"), "skipping document");
                report.skipped += 1;
            }
        }
    }
}
