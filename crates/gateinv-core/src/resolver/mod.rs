//! Graph resolver for index-addressed payloads.
//!
//! The payload is a flat array of slots. Integers inside it are references to
//! other slots (with `-5` meaning null and `-7` meaning unset), `["P", k]`
//! marks an external resource, and map keys of the form `_N` name another
//! slot holding the real key string. [`ResolutionContext`] turns a slot into a
//! fully nested [`ResolvedValue`], memoizing finished slots and cutting cycles.

mod context;
mod error;
mod key;
mod value;

pub use context::{
    ResolutionContext, DEFAULT_MAX_DEPTH, NULL_SENTINEL, RESOURCE_TAG, UNSET_SENTINEL,
};
pub use error::ResolveError;
pub use key::MapKey;
pub use value::ResolvedValue;

use serde_json::Value;

/// Resolve one slot of `sequence` with a throwaway context.
pub fn resolve(sequence: &[Value], index: i64) -> Result<ResolvedValue, ResolveError> {
    ResolutionContext::new(sequence).resolve(index)
}
