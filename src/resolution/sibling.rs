//! Constructor-based ownership inference for runtime-invoked methods.
//!
//! Methods implementing well-known runtime interfaces (state-machine
//! continuations above all) are never called from user code in the
//! observed graph; the runtime invokes them after the synthesized object is
//! constructed and handed off. The constructor call *is* visible, so an
//! unresolved method borrows its declaring type's constructor owner,
//! provided no sibling evidence points elsewhere.
//!
//! This is a best-effort inference, not a sound analysis: it assumes the
//! whole synthesized type serves one user method, which the contradiction
//! check can only partially verify.

use super::{eligibility, EntryTable};
use crate::classify::Classification;
use crate::resolution::trace::ResolutionTrace;

/// Apply the constructor heuristic once, after fixpoint convergence.
///
/// Assignments are computed against a snapshot of the table and applied
/// afterwards, so sibling checks never observe a partially updated pass.
pub fn apply(
    entries: &mut EntryTable,
    classification: &dyn Classification,
    assembly_name: &str,
    trace: &dyn ResolutionTrace,
) {
    let snapshot = entries.clone();
    let mut assignments = Vec::new();

    for entry in snapshot.values() {
        // a compiler method in a user-authored type has no synthesized
        // constructor to consult
        if !entry.is_own_compiler_type {
            continue;
        }
        let is_eligible = eligibility(classification, assembly_name, entry.method_id);
        if !entry.owners.filtered(&is_eligible).is_empty() {
            continue;
        }

        let siblings: Vec<_> = snapshot
            .values()
            .filter(|s| s.type_id == entry.type_id)
            .collect();
        let Some(ctor) = siblings
            .iter()
            .find(|s| classification.is_constructor(s.method_id))
        else {
            continue;
        };

        let ctor_eligible = eligibility(classification, assembly_name, ctor.method_id);
        let candidate = match ctor.owners.filtered(&ctor_eligible).as_slice() {
            [single] => (*single).clone(),
            _ => continue,
        };

        let contradicted = siblings.iter().any(|s| {
            let sibling_eligible = eligibility(classification, assembly_name, s.method_id);
            s.owners.contradicts(&candidate, &sibling_eligible)
        });
        if contradicted {
            continue;
        }

        assignments.push((entry.method_id, candidate));
    }

    let assigned = assignments.len();
    for (method_id, owner) in assignments {
        if let Some(entry) = entries.get_mut(&method_id) {
            let method = entry.method_ref(assembly_name);
            if entry.owners.add(owner.clone()) {
                trace.candidate_added(&method, &owner);
            }
        }
    }

    if assigned > 0 {
        log::debug!(
            "{}: constructor heuristic assigned {} owners",
            assembly_name,
            assigned
        );
    }
}
