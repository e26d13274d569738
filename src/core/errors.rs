//! Shared error types for ownership resolution.
//!
//! Diagnostics (`NoCallers`, `MultipleCallers`, `Insignificant`) are data
//! on the result rows, never errors. This enum covers the faults that make
//! continuing pointless: input inconsistencies that would silently produce
//! wrong ownership data, and owner lookups the table refuses to guess at.

use thiserror::Error;

use crate::core::types::{Diagnostic, MethodRef};

/// Fatal faults during ownership resolution. Each aborts the whole
/// assembly's run and identifies the offending method or edge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A call edge targets a method the classification marks as
    /// synthesized, but the assembly's method roster has no entry for it.
    /// The classification and call-edge inputs disagree.
    #[error("call edge {from} -> {to} targets a synthesized method with no roster entry")]
    MissingEntry { from: MethodRef, to: MethodRef },

    /// An edge endpoint belongs to a different assembly than the one being
    /// resolved. Edge sets are same-assembly by contract; this indicates an
    /// upstream extraction bug.
    #[error("edge {from} -> {to} crosses assembly boundaries while resolving '{assembly}'")]
    CrossAssemblyEdge {
        assembly: String,
        from: MethodRef,
        to: MethodRef,
    },

    /// Chain climbing failed to converge within the pass cap. Real closure
    /// nesting is shallow; this indicates cyclic evidence in malformed
    /// input.
    #[error("ownership resolution did not converge within {passes} passes for '{assembly}'")]
    FixpointDiverged { assembly: String, passes: usize },

    /// An owner was requested for a method whose resolution carries a
    /// diagnostic.
    #[error("method {method} has no resolved owner ({diagnostic:?})")]
    UnresolvedOwner {
        method: MethodRef,
        diagnostic: Diagnostic,
    },

    /// An owner was requested for a method that resolved as an
    /// insignificant orphan; it has no owner to report.
    #[error("method {method} is an insignificant orphan with no owner")]
    InsignificantMethod { method: MethodRef },

    /// An owner was requested for a method that is not synthesized at all.
    #[error("method {method} is not a synthesized method")]
    NotSynthesized { method: MethodRef },
}
