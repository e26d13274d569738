//! Queryable ownership table for call-graph rewriting.

use std::collections::HashMap;

use crate::core::{MethodRef, Owner, ResolutionResult, ResolveError};
use crate::resolution::AssemblyResolution;

/// Owner lookup over one or more resolved assemblies.
///
/// The call-graph rewriter uses this to redirect edges so displayed graphs
/// contain only user-written methods. It must never guess: asking for the
/// owner of an unresolved or insignificant method is a hard error, as is
/// asking about a method that was never classified as synthesized.
#[derive(Debug, Clone, Default)]
pub struct OwnershipTable {
    rows: Vec<ResolutionResult>,
    assemblies: HashMap<String, AssemblyIndex>,
}

#[derive(Debug, Clone, Default)]
struct AssemblyIndex {
    row_by_method: HashMap<u32, usize>,
    owner_by_method: HashMap<u32, Owner>,
    ambiguous_by_method: HashMap<u32, Vec<Owner>>,
}

impl OwnershipTable {
    pub fn build(resolutions: &[AssemblyResolution]) -> Self {
        let mut table = Self::default();

        for resolution in resolutions {
            let index = table
                .assemblies
                .entry(resolution.assembly_name.clone())
                .or_default();

            for row in &resolution.rows {
                if let Some(owner) = row.owner() {
                    index.owner_by_method.insert(row.compiler_method, owner);
                }
                index
                    .row_by_method
                    .insert(row.compiler_method, table.rows.len());
                table.rows.push(row.clone());
            }

            for (method_id, candidates) in &resolution.ambiguous {
                index
                    .ambiguous_by_method
                    .insert(*method_id, candidates.clone());
            }
        }

        table
    }

    /// Every row, grouped by assembly in build order.
    pub fn rows(&self) -> &[ResolutionResult] {
        &self.rows
    }

    /// Was this method classified as synthesized?
    pub fn is_synthesized(&self, method: &MethodRef) -> bool {
        self.assemblies
            .get(&method.assembly_name)
            .is_some_and(|index| index.row_by_method.contains_key(&method.method_id))
    }

    /// The resolved owner of a synthesized method.
    ///
    /// Errors instead of guessing: [`ResolveError::UnresolvedOwner`] when
    /// the row carries a diagnostic, [`ResolveError::InsignificantMethod`]
    /// when the row was downgraded without an owner, and
    /// [`ResolveError::NotSynthesized`] when the method is not in the
    /// table at all.
    pub fn owner_of(&self, method: &MethodRef) -> Result<&Owner, ResolveError> {
        let index = self
            .assemblies
            .get(&method.assembly_name)
            .ok_or_else(|| ResolveError::NotSynthesized {
                method: method.clone(),
            })?;

        if let Some(owner) = index.owner_by_method.get(&method.method_id) {
            return Ok(owner);
        }

        let row_idx =
            index
                .row_by_method
                .get(&method.method_id)
                .ok_or_else(|| ResolveError::NotSynthesized {
                    method: method.clone(),
                })?;

        match self.rows[*row_idx].diagnostic {
            Some(diagnostic) => Err(ResolveError::UnresolvedOwner {
                method: method.clone(),
                diagnostic,
            }),
            None => Err(ResolveError::InsignificantMethod {
                method: method.clone(),
            }),
        }
    }

    /// The retained candidates of a `MultipleCallers` row, for diagnostic
    /// display.
    pub fn ambiguous_candidates(&self, method: &MethodRef) -> Option<&[Owner]> {
        self.assemblies
            .get(&method.assembly_name)?
            .ambiguous_by_method
            .get(&method.method_id)
            .map(|candidates| candidates.as_slice())
    }
}
