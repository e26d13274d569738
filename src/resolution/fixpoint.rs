//! Fixpoint resolution of ownership chains.
//!
//! A synthesized method may be called only by another synthesized method,
//! as when an outer lambda's generated class invokes an inner nested
//! lambda.
//! Each pass replaces such intermediate candidates with the intermediate's
//! own resolved external caller, until a full pass changes nothing. After
//! convergence every candidate set contains only eligible, user-written
//! callers (or stays empty/ambiguous for the later stages to report).
//!
//! Every pass reads a snapshot of the entry table taken at pass start and
//! swaps replacements in afterwards, so the result does not depend on the
//! order entries are visited in. Convergence is bounded by closure nesting
//! depth, which is shallow in practice; the pass cap only exists to turn
//! cyclic evidence from malformed input into a hard error instead of an
//! endless loop.

use super::{eligibility, EntryTable};
use crate::classify::Classification;
use crate::core::ResolveError;
use crate::resolution::trace::ResolutionTrace;

/// Upper bound on fixpoint passes, far above any real nesting depth.
pub const MAX_PASSES: usize = 64;

/// Run chain climbing to a fixpoint. Returns the number of passes taken
/// (including the final no-change pass).
pub fn run(
    entries: &mut EntryTable,
    classification: &dyn Classification,
    assembly_name: &str,
    trace: &dyn ResolutionTrace,
) -> Result<usize, ResolveError> {
    for pass in 1..=MAX_PASSES {
        let snapshot = entries.clone();
        let mut changed = false;

        for entry in entries.values_mut() {
            let method = entry.method_ref(assembly_name);
            let is_eligible = eligibility(classification, assembly_name, entry.method_id);
            let stepped = entry.owners.resolve_one_step(
                |owner| {
                    if owner.assembly_name != assembly_name {
                        return None;
                    }
                    snapshot.get(&owner.method_id).map(|e| &e.owners)
                },
                &is_eligible,
                |from, to| trace.candidate_replaced(&method, from, to),
            );
            changed = changed || stepped;
        }

        if !changed {
            log::debug!("{}: fixpoint converged after {} passes", assembly_name, pass);
            return Ok(pass);
        }
    }

    Err(ResolveError::FixpointDiverged {
        assembly: assembly_name.to_string(),
        passes: MAX_PASSES,
    })
}
