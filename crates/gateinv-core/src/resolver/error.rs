use thiserror::Error;

/// Failure that aborts resolution of one document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Index hops plus list and map levels nested deeper than the context
    /// allows. `index` is the slot being entered or, for a list or map
    /// level, the innermost slot under resolution (`None` for inline values
    /// outside any slot).
    #[error("payload nested deeper than {limit} levels (slot {index:?})")]
    DepthLimitExceeded { index: Option<usize>, limit: usize },
}
