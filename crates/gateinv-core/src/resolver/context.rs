//! Per-document resolution state: memo cache plus the active visit chain.

use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value};

use super::error::ResolveError;
use super::key::MapKey;
use super::value::ResolvedValue;

/// Reference that always resolves to `Null`.
pub const NULL_SENTINEL: i64 = -5;
/// Reference that always resolves to `Unset`.
pub const UNSET_SENTINEL: i64 = -7;
/// Tag of a two-element `[tag, index]` external resource list.
pub const RESOURCE_TAG: &str = "P";
/// Default bound on nesting levels: index hops plus list and map levels.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Resolves slots of one raw sequence.
///
/// A context borrows a single document's sequence and owns its cache; create
/// a fresh one per document. Each slot is computed at most once, later
/// requests are served from the cache and share its storage. Slots currently
/// being resolved form the visit chain: a reference back into the chain
/// yields [`ResolvedValue::Cycle`] at the point of re-entry while the outer
/// slot is still cached with whatever wraps that marker.
///
/// Every index hop and every list or map level counts against `max_depth`,
/// which bounds the native recursion for any input.
#[derive(Debug)]
pub struct ResolutionContext<'a> {
    sequence: &'a [Value],
    cache: HashMap<usize, ResolvedValue>,
    on_chain: Vec<bool>,
    chain: Vec<usize>,
    depth: usize,
    max_depth: usize,
    computed: usize,
}

impl<'a> ResolutionContext<'a> {
    pub fn new(sequence: &'a [Value]) -> Self {
        Self::with_max_depth(sequence, DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(sequence: &'a [Value], max_depth: usize) -> Self {
        Self {
            sequence,
            cache: HashMap::new(),
            on_chain: vec![false; sequence.len()],
            chain: Vec::new(),
            depth: 0,
            max_depth,
            computed: 0,
        }
    }

    pub fn sequence(&self) -> &'a [Value] {
        self.sequence
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Number of slots actually computed (cache misses) so far.
    pub fn slots_computed(&self) -> usize {
        self.computed
    }

    pub fn is_cached(&self, index: usize) -> bool {
        self.cache.contains_key(&index)
    }

    /// Resolve an integer reference: a sentinel, a slot index, or anything
    /// else (passed through verbatim).
    pub fn resolve(&mut self, reference: i64) -> Result<ResolvedValue, ResolveError> {
        match reference {
            NULL_SENTINEL => return Ok(ResolvedValue::Null),
            UNSET_SENTINEL => return Ok(ResolvedValue::Unset),
            _ => {}
        }
        let index = match usize::try_from(reference) {
            Ok(index) if index < self.sequence.len() => index,
            _ => return Ok(ResolvedValue::RawPassthrough(reference.into())),
        };
        if self.on_chain[index] {
            return Ok(ResolvedValue::Cycle);
        }
        if let Some(hit) = self.cache.get(&index) {
            return Ok(hit.clone());
        }
        self.descend(Some(index))?;

        let sequence = self.sequence;
        self.on_chain[index] = true;
        self.chain.push(index);
        let result = self.resolve_value(&sequence[index]);
        self.chain.pop();
        self.on_chain[index] = false;
        self.depth -= 1;

        let value = result?;
        self.computed += 1;
        self.cache.insert(index, value.clone());
        Ok(value)
    }

    /// Resolve a raw value found inline (a slot's content, a list element,
    /// a map value).
    pub fn resolve_value(&mut self, raw: &Value) -> Result<ResolvedValue, ResolveError> {
        match raw {
            Value::Null => Ok(ResolvedValue::Null),
            Value::Bool(b) => Ok(ResolvedValue::Bool(*b)),
            Value::String(s) => Ok(ResolvedValue::String(s.clone())),
            Value::Number(n) => match n.as_i64() {
                Some(reference) => self.resolve(reference),
                None if n.is_u64() => Ok(ResolvedValue::RawPassthrough(n.clone())),
                None => Ok(ResolvedValue::Number(n.clone())),
            },
            Value::Array(items) => self.resolve_list(items),
            Value::Object(map) => self.resolve_map(map),
        }
    }

    /// Enter one nesting level, or fail when the limit is reached. Callers
    /// decrement `depth` once the level is done, error or not.
    fn descend(&mut self, index: Option<usize>) -> Result<(), ResolveError> {
        if self.depth >= self.max_depth {
            return Err(ResolveError::DepthLimitExceeded {
                index,
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn resolve_list(&mut self, items: &[Value]) -> Result<ResolvedValue, ResolveError> {
        if let Some(index) = resource_ref(items) {
            return Ok(ResolvedValue::ResourceRef { index });
        }
        self.descend(self.chain.last().copied())?;
        let result = self.resolve_items(items);
        self.depth -= 1;
        result.map(ResolvedValue::list)
    }

    fn resolve_items(&mut self, items: &[Value]) -> Result<Vec<ResolvedValue>, ResolveError> {
        let mut resolved = Vec::with_capacity(items.len());
        for item in items {
            resolved.push(self.resolve_value(item)?);
        }
        Ok(resolved)
    }

    fn resolve_map(&mut self, map: &Map<String, Value>) -> Result<ResolvedValue, ResolveError> {
        self.descend(self.chain.last().copied())?;
        let result = self.resolve_fields(map);
        self.depth -= 1;
        result.map(ResolvedValue::map)
    }

    fn resolve_fields(
        &mut self,
        map: &Map<String, Value>,
    ) -> Result<BTreeMap<String, ResolvedValue>, ResolveError> {
        let mut resolved = BTreeMap::new();
        for (raw_key, raw_value) in map {
            let key = self.resolve_key(raw_key)?;
            let value = self.resolve_value(raw_value)?;
            resolved.insert(key, value);
        }
        Ok(resolved)
    }

    /// `_N` keys take the string stored at slot `N`; anything else, or an
    /// indirection that does not land on a string, keeps the literal key.
    fn resolve_key(&mut self, raw_key: &str) -> Result<String, ResolveError> {
        match MapKey::classify(raw_key) {
            MapKey::Literal(key) => Ok(key.to_string()),
            MapKey::Index(reference) => match self.resolve(reference)? {
                ResolvedValue::String(name) => Ok(name),
                _ => Ok(raw_key.to_string()),
            },
        }
    }
}

fn resource_ref(items: &[Value]) -> Option<i64> {
    match items {
        [Value::String(tag), Value::Number(index)] if tag == RESOURCE_TAG => index.as_i64(),
        _ => None,
    }
}
