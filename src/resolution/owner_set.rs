//! Deduplicating candidate-owner set for one synthesized method.

use crate::core::Owner;

/// Unordered, deduplicating collection of owner candidates.
///
/// Invariant: no two elements share `(method_id, assembly_name)`. Identity
/// is always that value pair, never reference identity, so the same logical
/// caller recorded by evidence collection and again by chain climbing
/// collapses into one candidate.
///
/// Collection is permissive: synthesized and self-referential candidates
/// are stored too. Eligibility filtering happens lazily at read time, via
/// the predicate passed to [`filtered`](OwnerSet::filtered), so chain
/// climbing can still see and walk through ineligible candidates.
#[derive(Debug, Clone, Default)]
pub struct OwnerSet {
    owners: Vec<Owner>,
}

impl OwnerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Owner> {
        self.owners.iter()
    }

    /// Insert a candidate; no-op when a candidate with the same
    /// `(method_id, assembly_name)` is already held. Returns whether
    /// anything was inserted.
    pub fn add(&mut self, owner: Owner) -> bool {
        if self.owners.iter().any(|held| held.same_candidate(&owner)) {
            return false;
        }
        self.owners.push(owner);
        true
    }

    /// The candidates passing the eligibility predicate. Does not mutate.
    pub fn filtered<F>(&self, is_eligible: F) -> Vec<&Owner>
    where
        F: Fn(&Owner) -> bool,
    {
        self.owners.iter().filter(|o| is_eligible(o)).collect()
    }

    /// True iff the eligible view contains any candidate other than
    /// `candidate`.
    pub fn contradicts<F>(&self, candidate: &Owner, is_eligible: F) -> bool
    where
        F: Fn(&Owner) -> bool,
    {
        self.owners
            .iter()
            .filter(|o| is_eligible(o))
            .any(|held| !held.same_candidate(candidate))
    }

    /// One chain-climbing step.
    ///
    /// Every held candidate that is itself a synthesized method (`lookup`
    /// returns its candidate set) whose eligible view holds exactly one
    /// candidate different from the held one is replaced by that candidate.
    /// Replacements are computed into a fresh collection and swapped in at
    /// the end, never mid-iteration, so the outcome is independent of
    /// element order. Returns whether anything changed.
    ///
    /// `on_replace` is invoked once per replacement with the old and new
    /// candidate.
    pub fn resolve_one_step<'a, L, E, R>(
        &mut self,
        lookup: L,
        is_eligible: E,
        mut on_replace: R,
    ) -> bool
    where
        L: Fn(&Owner) -> Option<&'a OwnerSet>,
        E: Fn(&Owner) -> bool,
        R: FnMut(&Owner, &Owner),
    {
        let mut changed = false;
        let mut next: Vec<Owner> = Vec::with_capacity(self.owners.len());

        for held in &self.owners {
            let replacement = lookup(held).and_then(|owners| {
                match owners.filtered(&is_eligible).as_slice() {
                    [single] if !single.same_candidate(held) => Some((*single).clone()),
                    _ => None,
                }
            });

            let kept = match replacement {
                Some(owner) => {
                    on_replace(held, &owner);
                    changed = true;
                    owner
                }
                None => held.clone(),
            };

            // two chains climbing to the same root collapse here
            if !next.iter().any(|o| o.same_candidate(&kept)) {
                next.push(kept);
            }
        }

        if changed {
            self.owners = next;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner(method_id: u32, type_id: u32) -> Owner {
        Owner::new(method_id, type_id, "App", "App.Core")
    }

    fn any(_: &Owner) -> bool {
        true
    }

    #[test]
    fn add_deduplicates_by_method_and_assembly() {
        let mut set = OwnerSet::new();
        assert!(set.add(owner(10, 1)));
        // same candidate, different type id and namespace
        assert!(!set.add(Owner::new(10, 7, "App", "App.Other")));
        // same method id in a different assembly is a distinct candidate
        assert!(set.add(Owner::new(10, 1, "Lib", "Lib.Core")));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn filtered_applies_predicate_without_mutating() {
        let mut set = OwnerSet::new();
        set.add(owner(10, 1));
        set.add(owner(20, 2));

        let eligible = set.filtered(|o| o.type_id != 2);
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].method_id, 10);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn contradicts_only_on_differing_eligible_candidates() {
        let mut set = OwnerSet::new();
        set.add(owner(10, 1));
        set.add(owner(20, 2));

        // the synthesized candidate is filtered out, so no contradiction
        assert!(!set.contradicts(&owner(10, 1), |o| o.type_id != 2));
        assert!(set.contradicts(&owner(30, 3), |o| o.type_id != 2));
        // empty eligible view contradicts nothing
        assert!(!set.contradicts(&owner(30, 3), |_| false));
    }

    #[test]
    fn resolve_one_step_replaces_through_single_eligible_candidate() {
        // held candidate 61 is synthesized; its own set resolves to 13
        let mut inner = OwnerSet::new();
        inner.add(owner(13, 1));

        let mut set = OwnerSet::new();
        set.add(owner(61, 6));

        let mut replaced = Vec::new();
        let changed = set.resolve_one_step(
            |o| (o.method_id == 61).then_some(&inner),
            any,
            |from, to| replaced.push((from.method_id, to.method_id)),
        );

        assert!(changed);
        assert_eq!(replaced, vec![(61, 13)]);
        assert_eq!(set.iter().map(|o| o.method_id).collect::<Vec<_>>(), [13]);
    }

    #[test]
    fn resolve_one_step_leaves_ambiguous_chains_alone() {
        let mut inner = OwnerSet::new();
        inner.add(owner(13, 1));
        inner.add(owner(14, 1));

        let mut set = OwnerSet::new();
        set.add(owner(61, 6));

        let changed = set.resolve_one_step(|_| Some(&inner), any, |_, _| {});
        assert!(!changed);
        assert_eq!(set.iter().map(|o| o.method_id).collect::<Vec<_>>(), [61]);
    }

    #[test]
    fn resolve_one_step_collapses_chains_reaching_the_same_root() {
        let mut inner = OwnerSet::new();
        inner.add(owner(13, 1));

        let mut set = OwnerSet::new();
        set.add(owner(61, 6));
        set.add(owner(62, 6));

        let changed = set.resolve_one_step(
            |o| (o.type_id == 6).then_some(&inner),
            any,
            |_, _| {},
        );

        assert!(changed);
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().next().unwrap().method_id, 13);
    }

    #[test]
    fn resolve_one_step_does_not_replace_with_the_held_candidate_itself() {
        // the looked-up set's only eligible element IS the held candidate
        let mut inner = OwnerSet::new();
        inner.add(owner(61, 6));

        let mut set = OwnerSet::new();
        set.add(owner(61, 6));

        let changed = set.resolve_one_step(|_| Some(&inner), any, |_, _| {});
        assert!(!changed);
    }
}
