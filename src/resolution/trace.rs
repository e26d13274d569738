//! Trace sink for observing resolution decisions.
//!
//! The resolver reports candidate churn through an injected sink instead of
//! any process-wide debug state, which keeps runs independently testable.
//! All methods default to no-ops and must stay cheap and non-blocking;
//! they may be called from multiple threads when assemblies are resolved in
//! parallel.

use crate::core::{MethodRef, Owner, ResolutionResult};

/// Receives resolution events. Implement only the hooks you care about.
pub trait ResolutionTrace: Send + Sync {
    /// A raw owner candidate was recorded for `method` during evidence
    /// collection or by the constructor heuristic.
    fn candidate_added(&self, _method: &MethodRef, _owner: &Owner) {}

    /// Chain climbing replaced `from` with `to` in `method`'s candidate
    /// set.
    fn candidate_replaced(&self, _method: &MethodRef, _from: &Owner, _to: &Owner) {}

    /// A result row was emitted for `method`.
    fn method_finalized(&self, _method: &MethodRef, _row: &ResolutionResult) {}
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTrace;

impl ResolutionTrace for NoopTrace {}
