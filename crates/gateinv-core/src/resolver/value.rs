//! Materialized values produced by the resolver.

use std::collections::BTreeMap;
use std::sync::Arc;

/// A fully resolved slot.
///
/// Resolver outcomes that are not plain JSON (resource references, cycles,
/// the unset sentinel, unresolvable integers) have their own variants so they
/// can never be confused with captured strings.
///
/// Lists and maps are reference counted: a slot referenced from many places
/// is materialized once and every occurrence shares that storage, so cloning
/// a resolved value never copies its subtree.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedValue {
    Null,
    Bool(bool),
    /// Non-integer number, kept as written.
    Number(serde_json::Number),
    String(String),
    List(Arc<[ResolvedValue]>),
    Map(Arc<BTreeMap<String, ResolvedValue>>),
    /// `["P", index]`: external resource, never inlined.
    ResourceRef { index: i64 },
    /// Re-entry into a slot already on the active resolution chain.
    Cycle,
    /// The unset sentinel.
    Unset,
    /// Integer that is neither a sentinel nor a valid slot, including
    /// integers too large for a slot index at all.
    RawPassthrough(serde_json::Number),
}

impl ResolvedValue {
    pub fn list(items: Vec<ResolvedValue>) -> Self {
        ResolvedValue::List(items.into())
    }

    pub fn map(fields: BTreeMap<String, ResolvedValue>) -> Self {
        ResolvedValue::Map(Arc::new(fields))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ResolvedValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ResolvedValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ResolvedValue]> {
        match self {
            ResolvedValue::List(items) => Some(items.as_ref()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, ResolvedValue>> {
        match self {
            ResolvedValue::Map(map) => Some(map.as_ref()),
            _ => None,
        }
    }

    /// Field lookup on a `Map`; `None` for every other variant.
    pub fn get(&self, key: &str) -> Option<&ResolvedValue> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// True when both values are the same list or map allocation.
    pub fn shares_storage(&self, other: &ResolvedValue) -> bool {
        match (self, other) {
            (ResolvedValue::List(a), ResolvedValue::List(b)) => Arc::ptr_eq(a, b),
            (ResolvedValue::Map(a), ResolvedValue::Map(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for ResolvedValue {
    fn from(s: &str) -> Self {
        ResolvedValue::String(s.to_string())
    }
}

impl From<bool> for ResolvedValue {
    fn from(b: bool) -> Self {
        ResolvedValue::Bool(b)
    }
}
