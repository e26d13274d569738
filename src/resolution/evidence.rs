//! Seeds each synthesized method's candidate set from observed evidence.
//!
//! Two evidence sources exist: call edges whose target is synthesized, and
//! locals records showing a user method declaring a local of a synthesized
//! type (covering instances that are constructed and handed to runtime
//! infrastructure rather than called). Collection is deliberately
//! unfiltered: synthesized and self-referential callers are recorded too,
//! so the fixpoint resolver can climb through them later.

use super::{AssemblyInput, CompilerMethodEntry, EntryTable};
use crate::classify::Classification;
use crate::core::{Owner, ResolveError};
use crate::resolution::owner_set::OwnerSet;
use crate::resolution::trace::ResolutionTrace;

/// Build the entry table for one assembly and seed it with raw candidates.
///
/// Fails with [`ResolveError::MissingEntry`] when a call edge targets a
/// method the classification marks synthesized but the roster never listed;
/// that disagreement would otherwise surface as silently wrong ownership.
pub fn collect(
    input: &AssemblyInput,
    classification: &dyn Classification,
    trace: &dyn ResolutionTrace,
) -> Result<EntryTable, ResolveError> {
    let mut entries = EntryTable::new();

    for record in &input.methods {
        if classification.is_resolvable(record.type_id, record.method_id) {
            entries.insert(
                record.method_id,
                CompilerMethodEntry {
                    type_id: record.type_id,
                    method_id: record.method_id,
                    is_own_compiler_type: classification.is_compiler_type(record.type_id),
                    owners: OwnerSet::new(),
                },
            );
        }
    }

    for edge in &input.call_edges {
        if !classification.is_resolvable(edge.to.type_id, edge.to.method_id) {
            continue;
        }
        let entry = entries
            .get_mut(&edge.to.method_id)
            .ok_or_else(|| ResolveError::MissingEntry {
                from: edge.from.clone(),
                to: edge.to.clone(),
            })?;
        let owner = Owner::new(
            edge.from.method_id,
            edge.from.type_id,
            edge.from.assembly_name.clone(),
            edge.from_namespace.clone(),
        );
        if entry.owners.add(owner.clone()) {
            trace.candidate_added(&edge.to, &owner);
        }
    }

    for record in &input.locals {
        for entry in entries.values_mut() {
            if entry.type_id != record.compiler_type {
                continue;
            }
            let method = entry.method_ref(&input.assembly_name);
            let owner = Owner::new(
                record.owner_method,
                record.owner_type,
                input.assembly_name.clone(),
                record.owner_namespace.clone(),
            );
            if entry.owners.add(owner.clone()) {
                trace.candidate_added(&method, &owner);
            }
        }
    }

    log::debug!(
        "{}: collected evidence for {} synthesized methods from {} edges and {} locals records",
        input.assembly_name,
        entries.len(),
        input.call_edges.len(),
        input.locals.len()
    );

    Ok(entries)
}
