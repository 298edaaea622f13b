//! Staging area bookkeeping
//!
//! Two name sets: files to add (or update) in the next commit and files to
//! remove from it. A name is never in both. The content staged for addition
//! lives in the [`SnapshotStore`](crate::areas::snapshots::SnapshotStore);
//! this type only tracks names.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingArea {
    additions: BTreeSet<String>,
    removals: BTreeSet<String>,
}

impl StagingArea {
    pub fn additions(&self) -> &BTreeSet<String> {
        &self.additions
    }

    pub fn removals(&self) -> &BTreeSet<String> {
        &self.removals
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn is_staged_for_addition(&self, name: &str) -> bool {
        self.additions.contains(name)
    }

    pub fn is_staged_for_removal(&self, name: &str) -> bool {
        self.removals.contains(name)
    }

    pub fn stage_addition(&mut self, name: &str) {
        self.removals.remove(name);
        self.additions.insert(name.to_string());
    }

    pub fn stage_removal(&mut self, name: &str) {
        self.additions.remove(name);
        self.removals.insert(name.to_string());
    }

    /// Returns whether the name was staged for addition
    pub fn cancel_addition(&mut self, name: &str) -> bool {
        self.additions.remove(name)
    }

    /// Returns whether the name was staged for removal
    pub fn cancel_removal(&mut self, name: &str) -> bool {
        self.removals.remove(name)
    }

    pub fn clear_additions(&mut self) {
        self.additions.clear();
    }

    pub fn clear_removals(&mut self) {
        self.removals.clear();
    }

    pub fn clear(&mut self) {
        self.clear_additions();
        self.clear_removals();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum StagingOp {
        Add(String),
        Remove(String),
        CancelAddition(String),
        CancelRemoval(String),
        ClearAdditions,
        ClearRemovals,
    }

    fn staging_op() -> impl Strategy<Value = StagingOp> {
        let name = prop::sample::select(vec!["a.txt", "b.txt", "c.txt", "d.txt"])
            .prop_map(String::from);

        prop_oneof![
            name.clone().prop_map(StagingOp::Add),
            name.clone().prop_map(StagingOp::Remove),
            name.clone().prop_map(StagingOp::CancelAddition),
            name.prop_map(StagingOp::CancelRemoval),
            Just(StagingOp::ClearAdditions),
            Just(StagingOp::ClearRemovals),
        ]
    }

    proptest! {
        #[test]
        fn additions_and_removals_stay_disjoint(ops in prop::collection::vec(staging_op(), 0..64)) {
            let mut staging = StagingArea::default();

            for op in ops {
                match op {
                    StagingOp::Add(name) => staging.stage_addition(&name),
                    StagingOp::Remove(name) => staging.stage_removal(&name),
                    StagingOp::CancelAddition(name) => { staging.cancel_addition(&name); }
                    StagingOp::CancelRemoval(name) => { staging.cancel_removal(&name); }
                    StagingOp::ClearAdditions => staging.clear_additions(),
                    StagingOp::ClearRemovals => staging.clear_removals(),
                }

                prop_assert!(staging.additions().is_disjoint(staging.removals()));
            }
        }
    }

    #[test]
    fn staging_a_removal_cancels_the_addition() {
        let mut staging = StagingArea::default();

        staging.stage_addition("f.txt");
        staging.stage_removal("f.txt");

        assert!(!staging.is_staged_for_addition("f.txt"));
        assert!(staging.is_staged_for_removal("f.txt"));

        staging.stage_addition("f.txt");
        assert!(staging.is_staged_for_addition("f.txt"));
        assert!(!staging.is_staged_for_removal("f.txt"));
    }

    #[test]
    fn clear_empties_both_sets() {
        let mut staging = StagingArea::default();
        staging.stage_addition("a.txt");
        staging.stage_removal("b.txt");

        staging.clear();

        assert!(staging.is_empty());
    }
}
