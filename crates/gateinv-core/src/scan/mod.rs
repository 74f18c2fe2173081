//! Corpus scanning: read HAR and text captures, resolve their payloads, and
//! aggregate everything into a single [`InventorySummary`](crate::inventory::InventorySummary).
//!
//! One document failing never stops the scan; it is logged and counted.

mod document;
mod walk;

pub use document::{DocumentKind, DocumentOutcome, Scanner};
pub use walk::ScanReport;
