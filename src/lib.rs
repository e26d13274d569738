//! Compiler-generated method ownership resolution for .NET assemblies.
//!
//! Reflection data extracted from an assembly contains methods the user
//! never wrote: closure classes for lambdas, iterator blocks, async state
//! machines. Given the assembly's call edges, local-variable-type records,
//! and an external classification of what is compiler-generated, `synthmap`
//! infers which user-written method each synthesized method conceptually
//! belongs to, so call graphs can be displayed without compiler noise and
//! unresolved cases surfaced as diagnostics.
//!
//! The entry points are [`resolve_assembly`] for one assembly,
//! [`resolve_assemblies`] for a parallel batch, and [`OwnershipTable`] for
//! querying the results from a call-graph rewriter.

pub mod call_graph;
pub mod classify;
pub mod core;
pub mod ownership;
pub mod resolution;

// Re-export commonly used types
pub use crate::call_graph::AssemblyCallGraph;
pub use crate::classify::{Classification, SetClassification};
pub use crate::core::{
    CallEdge, Diagnostic, LocalsRecord, MethodRecord, MethodRef, Note, Owner, ResolutionResult,
    ResolveError,
};
pub use crate::ownership::OwnershipTable;
pub use crate::resolution::{
    resolve_assemblies, resolve_assembly, AssemblyInput, AssemblyResolution, CompilerMethodEntry,
    NoopTrace, OwnerSet, ResolutionTrace,
};
