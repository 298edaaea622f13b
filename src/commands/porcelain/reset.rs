use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::resolve_commit_id;
use tracing::info;

impl Repository {
    /// Check out every file of a commit and move the current branch to it
    ///
    /// Files tracked by the old head but not by the target are deleted;
    /// commits that become unreachable stay in the object store.
    pub fn reset(&self, commit_id: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;

        let target_oid = resolve_commit_id(self.database(), commit_id)?;
        let current = self.head_commit(&state)?;
        let target = self.database().get_commit(&target_oid)?;

        self.migrate_working_tree(&mut state, &current, &target)?;
        state.advance_head(target_oid.clone());

        info!(branch = state.current_branch(), head = %target_oid, "reset branch");

        self.store_state(&state)
    }
}
