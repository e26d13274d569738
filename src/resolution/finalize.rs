//! Projects converged candidate sets into result rows.

use std::collections::BTreeMap;

use super::{eligibility, AssemblyResolution, EntryTable};
use crate::call_graph::AssemblyCallGraph;
use crate::classify::Classification;
use crate::core::{Diagnostic, Note, ResolutionResult};
use crate::resolution::trace::ResolutionTrace;

/// Turn each entry's eligible candidate set into a definite owner, an
/// ambiguity diagnostic, or a no-callers diagnostic.
///
/// `NoCallers` is downgraded to a non-diagnostic `Insignificant` note when
/// the method's outgoing edges never leave its own declaring type: such
/// methods are trivial plumbing (auto-generated accessors and the like)
/// whose missing caller tells the user nothing.
pub fn project(
    entries: &EntryTable,
    graph: &AssemblyCallGraph,
    classification: &dyn Classification,
    assembly_name: &str,
    trace: &dyn ResolutionTrace,
) -> AssemblyResolution {
    let mut rows = Vec::with_capacity(entries.len());
    let mut ambiguous = BTreeMap::new();

    for entry in entries.values() {
        let method = entry.method_ref(assembly_name);
        let is_eligible = eligibility(classification, assembly_name, entry.method_id);
        let candidates = entry.owners.filtered(&is_eligible);

        let mut row = ResolutionResult {
            assembly_name: assembly_name.to_string(),
            compiler_type: entry.type_id,
            compiler_method: entry.method_id,
            owner_type: 0,
            owner_method: 0,
            owner_namespace: String::new(),
            diagnostic: None,
            note: None,
        };

        match candidates.as_slice() {
            [owner] => {
                row.owner_type = owner.type_id;
                row.owner_method = owner.method_id;
                row.owner_namespace = owner.namespace.clone();
            }
            [] => {
                if graph.calls_only_type(&method, entry.type_id) {
                    row.note = Some(Note::Insignificant);
                } else {
                    row.diagnostic = Some(Diagnostic::NoCallers);
                }
            }
            _ => {
                row.diagnostic = Some(Diagnostic::MultipleCallers);
                // sorted so the retained list is independent of evidence order
                let mut retained: Vec<_> = candidates.iter().map(|o| (*o).clone()).collect();
                retained.sort_by(|a, b| {
                    (&a.assembly_name, a.method_id).cmp(&(&b.assembly_name, b.method_id))
                });
                ambiguous.insert(entry.method_id, retained);
            }
        }

        trace.method_finalized(&method, &row);
        rows.push(row);
    }

    let unresolved = rows.iter().filter(|r| r.diagnostic.is_some()).count();
    log::debug!(
        "{}: finalized {} synthesized methods ({} unresolved)",
        assembly_name,
        rows.len(),
        unresolved
    );

    AssemblyResolution {
        assembly_name: assembly_name.to_string(),
        rows,
        ambiguous,
    }
}
