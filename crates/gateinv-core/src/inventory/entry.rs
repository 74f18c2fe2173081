//! Top-level `{name, value, ...}` entries of a resolved payload.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::resolver::{ResolutionContext, ResolveError, ResolvedValue};

/// One named gate or config found at the top level of a payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigEntry {
    /// Hashed identifier, ASCII digits only.
    pub name: String,
    pub value: ResolvedValue,
    pub group: Option<String>,
    pub rule_id: Option<String>,
}

impl ConfigEntry {
    /// Accept a resolved slot shaped like `{name: "<digits>", value: ..}`.
    pub fn from_resolved(resolved: &ResolvedValue) -> Option<Self> {
        let fields = resolved.as_map()?;
        let name = match fields.get("name") {
            Some(ResolvedValue::String(name)) if is_numeric_name(name) => name.clone(),
            _ => return None,
        };
        Some(Self {
            name,
            value: fields.get("value")?.clone(),
            group: string_field(fields, "group"),
            rule_id: string_field(fields, "rule_id"),
        })
    }
}

fn string_field(fields: &BTreeMap<String, ResolvedValue>, key: &str) -> Option<String> {
    fields.get(key).and_then(ResolvedValue::as_str).map(String::from)
}

fn is_numeric_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit())
}

/// Extract all named entries from a raw sequence with a fresh context.
pub fn extract_entries(sequence: &[Value]) -> Result<BTreeMap<String, ConfigEntry>, ResolveError> {
    let mut ctx = ResolutionContext::new(sequence);
    extract_entries_with(&mut ctx)
}

/// Extract all named entries using an existing context (and its cache).
///
/// Only slots whose raw value is a mapping are resolved. When two slots carry
/// the same name the later slot wins.
pub fn extract_entries_with(
    ctx: &mut ResolutionContext<'_>,
) -> Result<BTreeMap<String, ConfigEntry>, ResolveError> {
    let mut entries = BTreeMap::new();
    for (index, raw) in ctx.sequence().iter().enumerate() {
        if !raw.is_object() {
            continue;
        }
        let resolved = ctx.resolve(index as i64)?;
        if let Some(entry) = ConfigEntry::from_resolved(&resolved) {
            entries.insert(entry.name.clone(), entry);
        }
    }
    tracing::debug!(
        slots = ctx.sequence().len(),
        computed = ctx.slots_computed(),
        entries = entries.len(),
        "extracted payload entries"
    );
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn slots(value: Value) -> Vec<Value> {
        match value {
            Value::Array(slots) => slots,
            _ => unreachable!(),
        }
    }

    #[test]
    fn gate_entry_is_extracted() {
        let s = slots(json!([{"name": 1, "value": 2}, "987654321", true]));
        let entries = extract_entries(&s).unwrap();
        assert_eq!(entries.len(), 1);
        let entry = &entries["987654321"];
        assert_eq!(entry.name, "987654321");
        assert_eq!(entry.value.as_bool(), Some(true));
        assert!(entry.group.is_none());
        assert!(entry.rule_id.is_none());
    }

    #[test]
    fn group_and_rule_id_are_captured() {
        let s = slots(json!([
            {"name": "123", "value": {"limit": 1}, "group": "g1", "rule_id": "r1", "extra": true},
            "text"
        ]));
        let entry = &extract_entries(&s).unwrap()["123"];
        assert_eq!(entry.group.as_deref(), Some("g1"));
        assert_eq!(entry.rule_id.as_deref(), Some("r1"));
        assert_eq!(entry.value.get("limit").and_then(|v| v.as_str()), Some("text"));
    }

    #[test]
    fn non_string_group_is_dropped() {
        let s = slots(json!([{"name": "5", "value": true, "group": 1, "rule_id": -5}, false]));
        let entry = &extract_entries(&s).unwrap()["5"];
        assert_eq!(entry.group, None);
        assert_eq!(entry.rule_id, None);
    }

    #[test]
    fn non_numeric_or_missing_fields_are_skipped() {
        let s = slots(json!([
            {"name": "abc", "value": true},
            {"name": "12a", "value": true},
            {"name": "", "value": true},
            {"name": "77"},
            {"value": true},
            {"name": 7, "value": true},
            ["not", "a", "map"]
        ]));
        assert!(extract_entries(&s).unwrap().is_empty());
    }

    #[test]
    fn null_value_still_counts() {
        let s = slots(json!([{"name": "9", "value": -5}]));
        let entries = extract_entries(&s).unwrap();
        assert_eq!(entries["9"].value, ResolvedValue::Null);
    }

    #[test]
    fn later_slot_wins_on_duplicate_name() {
        let s = slots(json!([
            {"name": "42", "value": true},
            {"name": "42", "value": false}
        ]));
        let entries = extract_entries(&s).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries["42"].value.as_bool(), Some(false));
    }

    #[test]
    fn non_map_slots_are_not_resolved() {
        // Slot 0 is a list; it must not be resolved (and thus not cached).
        let s = slots(json!([[1], {"name": "1", "value": true}]));
        let mut ctx = ResolutionContext::new(&s);
        let entries = extract_entries_with(&mut ctx).unwrap();
        assert!(!ctx.is_cached(0));
        assert!(ctx.is_cached(1));
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn nested_map_referenced_from_entry_is_resolved_once() {
        let s = slots(json!([
            {"name": "1", "value": 2},
            {"name": "2", "value": 2},
            {"k": "v"}
        ]));
        let mut ctx = ResolutionContext::new(&s);
        let entries = extract_entries_with(&mut ctx).unwrap();
        // Slot 2 also qualifies as a map slot but has no name/value.
        assert_eq!(entries.len(), 2);
        assert_eq!(ctx.slots_computed(), 3);
    }

    #[test]
    fn depth_error_propagates() {
        let s = slots(json!([{"name": 1, "value": 2}, 2, 3, "1"]));
        let mut ctx = ResolutionContext::with_max_depth(&s, 2);
        assert!(matches!(
            extract_entries_with(&mut ctx),
            Err(ResolveError::DepthLimitExceeded { limit: 2, .. })
        ));
    }
}
