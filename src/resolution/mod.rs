//! Ownership resolution for compiler-synthesized methods.
//!
//! Compilers emit methods the user never wrote: closure classes for
//! lambdas, iterator blocks, async state machines. Given one assembly's
//! call edges, locals records, and a classification of what is
//! compiler-generated, this module infers which user-written method each
//! synthesized method conceptually belongs to.
//!
//! The pipeline runs once per assembly, synchronously, as pure data
//! transformation:
//!
//! 1. [`evidence`] seeds a candidate set per synthesized method from call
//!    edges and locals records.
//! 2. [`fixpoint`] climbs ownership chains through synthesized
//!    intermediaries until nothing changes.
//! 3. [`sibling`] borrows the constructor's owner for methods the runtime
//!    invokes without any visible user call.
//! 4. [`finalize`] projects each candidate set into a result row.
//!
//! Assemblies are independent of each other; [`resolve_assemblies`] fans
//! the same pipeline out across assemblies in parallel.

pub mod evidence;
pub mod finalize;
pub mod fixpoint;
pub mod owner_set;
pub mod sibling;
pub mod trace;

use std::collections::BTreeMap;

use anyhow::Context;
use rayon::prelude::*;

use crate::call_graph::AssemblyCallGraph;
use crate::classify::Classification;
use crate::core::{
    CallEdge, LocalsRecord, MethodRecord, MethodRef, Owner, ResolutionResult, ResolveError,
};

pub use owner_set::OwnerSet;
pub use trace::{NoopTrace, ResolutionTrace};

/// Immutable per-assembly snapshot the resolver runs over. Nothing in it
/// changes mid-run; duplicates in `call_edges` are expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyInput {
    pub assembly_name: String,
    /// Roster of methods observed in the assembly, synthesized or not.
    pub methods: Vec<MethodRecord>,
    pub call_edges: Vec<CallEdge>,
    pub locals: Vec<LocalsRecord>,
}

/// Per-method scratch state for one assembly's resolution run, keyed by
/// method id. Created fresh at the start of a run, projected into rows at
/// the end, then discarded.
#[derive(Debug, Clone)]
pub struct CompilerMethodEntry {
    pub type_id: u32,
    pub method_id: u32,
    /// Whether the declaring type itself is compiler-generated, as opposed
    /// to a compiler-marked method sitting in a user-authored type.
    pub is_own_compiler_type: bool,
    pub owners: OwnerSet,
}

impl CompilerMethodEntry {
    pub fn method_ref(&self, assembly_name: &str) -> MethodRef {
        MethodRef::new(assembly_name, self.type_id, self.method_id)
    }
}

/// Entry table for one assembly. A `BTreeMap` so every stage walks sorted
/// method ids; combined with snapshot-based passes this makes results
/// independent of input ordering.
pub type EntryTable = BTreeMap<u32, CompilerMethodEntry>;

/// Eligibility of a candidate as a true external caller of `method_id`:
/// its type must not be synthesized, and it must not be the method itself
/// (a state machine calling its own continuation is not its owner).
///
/// Applied wherever candidate sets are read, never when they are
/// collected, so chain climbing can walk through ineligible candidates.
pub(crate) fn eligibility<'a>(
    classification: &'a dyn Classification,
    assembly_name: &'a str,
    method_id: u32,
) -> impl Fn(&Owner) -> bool + 'a {
    move |owner| {
        !classification.is_compiler_type(owner.type_id)
            && !owner.is_method(assembly_name, method_id)
    }
}

/// Outcome of one assembly's resolution run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyResolution {
    pub assembly_name: String,
    /// One row per synthesized method, in method-id order.
    pub rows: Vec<ResolutionResult>,
    /// All eligible candidates of rows diagnosed `MultipleCallers`, keyed
    /// by method id and retained for diagnostic display.
    pub ambiguous: BTreeMap<u32, Vec<Owner>>,
}

/// Resolve ownership for every synthesized method of one assembly.
///
/// Fails hard on internally inconsistent input (cross-assembly edges,
/// edges targeting synthesized methods the roster never listed, cyclic
/// evidence); diagnostics for individual methods are recorded on their
/// rows instead.
pub fn resolve_assembly(
    input: &AssemblyInput,
    classification: &dyn Classification,
    trace: Option<&dyn ResolutionTrace>,
) -> Result<AssemblyResolution, ResolveError> {
    let trace: &dyn ResolutionTrace = trace.unwrap_or(&NoopTrace);

    let graph = AssemblyCallGraph::from_edges(&input.assembly_name, &input.call_edges)?;
    let mut entries = evidence::collect(input, classification, trace)?;
    fixpoint::run(&mut entries, classification, &input.assembly_name, trace)?;
    sibling::apply(&mut entries, classification, &input.assembly_name, trace);

    Ok(finalize::project(
        &entries,
        &graph,
        classification,
        &input.assembly_name,
        trace,
    ))
}

/// Resolve a batch of assemblies, fanning out in parallel.
///
/// Inputs are already partitioned by assembly and each run is independent,
/// so the fan-out is trivially safe. The first fatal fault aborts the
/// whole batch.
pub fn resolve_assemblies<C>(
    inputs: &[AssemblyInput],
    classification: &C,
    trace: Option<&dyn ResolutionTrace>,
) -> anyhow::Result<Vec<AssemblyResolution>>
where
    C: Classification + Sync,
{
    let resolutions: Vec<AssemblyResolution> = inputs
        .par_iter()
        .map(|input| {
            resolve_assembly(input, classification, trace)
                .with_context(|| format!("resolving assembly '{}'", input.assembly_name))
        })
        .collect::<anyhow::Result<_>>()?;

    let total_rows: usize = resolutions.iter().map(|r| r.rows.len()).sum();
    log::info!(
        "resolved {} assemblies, {} synthesized methods",
        resolutions.len(),
        total_rows
    );

    Ok(resolutions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::SetClassification;
    use crate::core::Diagnostic;
    use pretty_assertions::assert_eq;

    fn edge(from: (u32, u32), to: (u32, u32)) -> CallEdge {
        CallEdge {
            from: MethodRef::new("App", from.0, from.1),
            to: MethodRef::new("App", to.0, to.1),
            from_namespace: "App.Core".to_string(),
            to_namespace: "App.Gen".to_string(),
        }
    }

    #[test]
    fn direct_call_resolves_to_the_caller() {
        let input = AssemblyInput {
            assembly_name: "App".to_string(),
            methods: vec![MethodRecord::new(2, 20)],
            call_edges: vec![edge((1, 10), (2, 20))],
            locals: vec![],
        };
        let classification = SetClassification::new().with_compiler_types([2]);

        let resolution = resolve_assembly(&input, &classification, None).unwrap();
        assert_eq!(resolution.rows.len(), 1);
        let row = &resolution.rows[0];
        assert_eq!(row.diagnostic, None);
        assert_eq!((row.owner_type, row.owner_method), (1, 10));
    }

    #[test]
    fn batch_driver_preserves_per_assembly_results() {
        let inputs: Vec<AssemblyInput> = (0..4)
            .map(|i| AssemblyInput {
                assembly_name: format!("App{}", i),
                methods: vec![MethodRecord::new(2, 20)],
                call_edges: vec![CallEdge {
                    from: MethodRef::new(format!("App{}", i), 1, 10),
                    to: MethodRef::new(format!("App{}", i), 2, 20),
                    from_namespace: String::new(),
                    to_namespace: String::new(),
                }],
                locals: vec![],
            })
            .collect();
        let classification = SetClassification::new().with_compiler_types([2]);

        let resolutions = resolve_assemblies(&inputs, &classification, None).unwrap();
        assert_eq!(resolutions.len(), 4);
        for (i, resolution) in resolutions.iter().enumerate() {
            assert_eq!(resolution.assembly_name, format!("App{}", i));
            assert_eq!(resolution.rows[0].owner_method, 10);
        }
    }

    #[test]
    fn batch_driver_aborts_on_the_first_fatal_fault() {
        let good = AssemblyInput {
            assembly_name: "App".to_string(),
            methods: vec![MethodRecord::new(2, 20)],
            call_edges: vec![edge((1, 10), (2, 20))],
            locals: vec![],
        };
        let bad = AssemblyInput {
            assembly_name: "Broken".to_string(),
            methods: vec![],
            // classification says synthesized, roster disagrees
            call_edges: vec![CallEdge {
                from: MethodRef::new("Broken", 1, 10),
                to: MethodRef::new("Broken", 2, 20),
                from_namespace: String::new(),
                to_namespace: String::new(),
            }],
            locals: vec![],
        };
        let classification = SetClassification::new().with_compiler_types([2]);

        let err = resolve_assemblies(&[good, bad], &classification, None).unwrap_err();
        assert!(err.to_string().contains("Broken"));
    }

    #[test]
    fn self_recursive_calls_never_own_their_method() {
        // a state machine invoking its own continuation
        let input = AssemblyInput {
            assembly_name: "App".to_string(),
            methods: vec![MethodRecord::new(2, 20)],
            call_edges: vec![edge((2, 20), (2, 20))],
            locals: vec![],
        };
        let classification = SetClassification::new().with_compiler_types([2]);

        let resolution = resolve_assembly(&input, &classification, None).unwrap();
        let row = &resolution.rows[0];
        assert_ne!(row.diagnostic, Some(Diagnostic::MultipleCallers));
        assert_eq!(row.owner_method, 0);
    }
}
