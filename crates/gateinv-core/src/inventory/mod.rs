//! Entry extraction and corpus aggregation.
//!
//! A resolved payload holds many top-level `{name, value, group, rule_id}`
//! records keyed by hashed numeric names. Boolean-valued records are feature
//! gates; map-valued records are dynamic configs. Only metadata (keys, groups,
//! rule ids, field types) is aggregated, never the config values themselves.

mod entry;
mod summary;

pub use entry::{extract_entries, extract_entries_with, ConfigEntry};
pub use summary::{DynamicConfigSummary, InventorySummary, TypeTag};
