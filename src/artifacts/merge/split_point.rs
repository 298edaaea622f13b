//! Split point discovery
//!
//! The split point of the current head and a branch head is found in two
//! steps:
//!
//! 1. Collect every ancestor of the branch head (all parent edges).
//! 2. Walk back from the current head with a LIFO stack: pop a commit; if it
//!    is an ancestor of the branch head it is the split point, otherwise push
//!    its parents in parent order.
//!
//! The stack order decides which common ancestor wins when there are several
//! (criss-cross histories), so it must not be replaced by a BFS or a
//! timestamp-ordered walk: merges would pick a different base.

use crate::artifacts::graph::ancestors::all_ancestors;
use crate::artifacts::objects::object_id::ObjectId;
use tracing::debug;

macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            tracing::trace!(target: "twig::merge", $($arg)*);
        }
    };
}

/// Finds split points over any commit graph
///
/// # Type Parameters
///
/// * `ParentsLoaderFn` - loads the ordered parent ids of a commit; a root
///   commit has none
#[derive(Debug, Clone)]
pub struct SplitPointFinder<ParentsLoaderFn>
where
    ParentsLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    parents_loader: ParentsLoaderFn,
}

impl<ParentsLoaderFn> SplitPointFinder<ParentsLoaderFn>
where
    ParentsLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    pub fn new(parents_loader: ParentsLoaderFn) -> Self {
        Self { parents_loader }
    }

    pub fn find(&self, head: &ObjectId, branch_head: &ObjectId) -> anyhow::Result<ObjectId> {
        let branch_ancestors = all_ancestors(branch_head, &self.parents_loader)?;
        let mut stack = vec![head.clone()];

        while let Some(commit_oid) = stack.pop() {
            debug_log!("popped {}", commit_oid.to_short_oid());

            if branch_ancestors.contains(&commit_oid) {
                debug!(
                    head = %head.to_short_oid(),
                    branch_head = %branch_head.to_short_oid(),
                    split_point = %commit_oid.to_short_oid(),
                    "found split point"
                );
                return Ok(commit_oid);
            }

            stack.extend((self.parents_loader)(&commit_oid)?);
        }

        anyhow::bail!(
            "commits {} and {} share no history",
            head.to_short_oid(),
            branch_head.to_short_oid()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use std::collections::HashMap;

    /// In-memory commit graph for testing
    #[derive(Debug, Clone, Default)]
    struct InMemoryCommitStore {
        parents: HashMap<ObjectId, Vec<ObjectId>>,
    }

    impl InMemoryCommitStore {
        fn add_commit(&mut self, commit: &str, parents: &[&str]) {
            self.parents.insert(
                create_oid(commit),
                parents.iter().map(|parent| create_oid(parent)).collect(),
            );
        }

        fn get_parents(&self, commit_oid: &ObjectId) -> anyhow::Result<Vec<ObjectId>> {
            self.parents
                .get(commit_oid)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("commit {commit_oid} not in test store"))
        }

        fn find(&self, head: &str, branch_head: &str) -> ObjectId {
            SplitPointFinder::new(|oid: &ObjectId| self.get_parents(oid))
                .find(&create_oid(head), &create_oid(branch_head))
                .unwrap()
        }
    }

    fn create_oid(id: &str) -> ObjectId {
        // Create a deterministic 40-character hex ObjectId from string for testing
        let hex_string = id
            .as_bytes()
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect::<String>();

        ObjectId::try_parse(format!("{hex_string:0<40}")).unwrap()
    }

    #[fixture]
    fn linear_history() -> InMemoryCommitStore {
        // A - B - C - D
        let mut store = InMemoryCommitStore::default();
        store.add_commit("A", &[]);
        store.add_commit("B", &["A"]);
        store.add_commit("C", &["B"]);
        store.add_commit("D", &["C"]);
        store
    }

    #[fixture]
    fn forked_history() -> InMemoryCommitStore {
        // A - B - C - D   (head)
        //      \
        //       E - F     (branch)
        let mut store = linear_history();
        store.add_commit("E", &["B"]);
        store.add_commit("F", &["E"]);
        store
    }

    #[rstest]
    fn ancestor_branch_is_its_own_split_point(linear_history: InMemoryCommitStore) {
        assert_eq!(linear_history.find("D", "B"), create_oid("B"));
    }

    #[rstest]
    fn descendant_branch_splits_at_head(linear_history: InMemoryCommitStore) {
        assert_eq!(linear_history.find("B", "D"), create_oid("B"));
    }

    #[rstest]
    fn merging_a_commit_into_itself_splits_there(linear_history: InMemoryCommitStore) {
        assert_eq!(linear_history.find("C", "C"), create_oid("C"));
    }

    #[rstest]
    fn forks_split_at_the_fork(forked_history: InMemoryCommitStore) {
        assert_eq!(forked_history.find("D", "F"), create_oid("B"));
        assert_eq!(forked_history.find("F", "D"), create_oid("B"));
    }

    #[rstest]
    fn earlier_merges_move_the_split_point(mut forked_history: InMemoryCommitStore) {
        // F was merged into head as M; new work G on the branch
        forked_history.add_commit("M", &["D", "F"]);
        forked_history.add_commit("G", &["F"]);

        assert_eq!(forked_history.find("M", "G"), create_oid("F"));
    }

    #[test]
    fn criss_cross_takes_the_last_pushed_parent_first() {
        //   A - B ---- X (head, parents [B, C])
        //    \     \ /
        //     \     /\
        //      C ---- Y (branch, parents [C, B])
        let mut store = InMemoryCommitStore::default();
        store.add_commit("A", &[]);
        store.add_commit("B", &["A"]);
        store.add_commit("C", &["A"]);
        store.add_commit("X", &["B", "C"]);
        store.add_commit("Y", &["C", "B"]);

        // both B and C are common ancestors; the stack pops C (pushed last)
        assert_eq!(store.find("X", "Y"), create_oid("C"));
        assert_eq!(store.find("Y", "X"), create_oid("B"));
    }

    #[test]
    fn unrelated_histories_have_no_split_point() {
        let mut store = InMemoryCommitStore::default();
        store.add_commit("A", &[]);
        store.add_commit("Z", &[]);

        let result = SplitPointFinder::new(|oid: &ObjectId| store.get_parents(oid))
            .find(&create_oid("A"), &create_oid("Z"));

        assert!(result.is_err());
    }
}
