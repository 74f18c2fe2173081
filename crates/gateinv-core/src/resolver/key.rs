//! Mapping keys: literal names or `_N` indirections to a string slot.

/// A raw mapping key, classified once before the map is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapKey<'k> {
    Literal(&'k str),
    /// `_` followed by ASCII digits.
    Index(i64),
}

impl<'k> MapKey<'k> {
    pub fn classify(raw: &'k str) -> Self {
        raw.strip_prefix('_')
            .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|digits| digits.parse().ok())
            .map_or(MapKey::Literal(raw), MapKey::Index)
    }
}
