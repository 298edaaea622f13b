use crate::areas::repository::Repository;
use crate::areas::state::RepositoryState;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::revision::resolve_commit_id;
use crate::artifacts::checkout::conflict::ensure_no_untracked_conflict;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::commit::Commit;
use crate::errors::TwigError;
use tracing::info;

impl Repository {
    /// Restore `name` from a commit (the head when `commit_id` is `None`)
    ///
    /// The file is not staged; a pending addition of it is dropped.
    pub fn checkout_file(&self, commit_id: Option<&str>, name: &str) -> anyhow::Result<()> {
        Workspace::check_name(name)?;
        let mut state = self.load_state()?;

        let commit_oid = match commit_id {
            Some(commit_id) => resolve_commit_id(self.database(), commit_id)?,
            None => state.head().clone(),
        };
        let commit = self.database().get_commit(&commit_oid)?;

        let file = commit
            .tracked_file(name)
            .ok_or(TwigError::FileNotInCommit)?;
        let content = self.database().get_blob(file.oid())?;

        self.workspace().write(name, &content)?;
        self.cancel_addition(&mut state, name)?;

        self.store_state(&state)
    }

    pub fn checkout_branch(&self, name: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;

        let target_oid = state
            .branch_head(name)
            .ok_or(TwigError::BranchNotFound)?
            .clone();
        if name == state.current_branch() {
            return Err(TwigError::AlreadyOnBranch.into());
        }

        let current = self.head_commit(&state)?;
        let target = self.database().get_commit(&target_oid)?;

        self.migrate_working_tree(&mut state, &current, &target)?;
        state.switch_branch(name)?;

        info!(branch = name, head = %target_oid, "switched branch");

        self.store_state(&state)
    }

    /// Replace the files of `current` with those of `target` and empty the
    /// staging area
    ///
    /// Fails with [`TwigError::UntrackedFileConflict`] before touching the
    /// working directory.
    pub(crate) fn migrate_working_tree(
        &self,
        state: &mut RepositoryState,
        current: &Commit,
        target: &Commit,
    ) -> anyhow::Result<()> {
        ensure_no_untracked_conflict(self.workspace(), current, target)?;

        let migration = Migration::plan(self.database(), current, target)?;
        migration.apply(self.workspace())?;

        self.clear_staging(state)
    }
}
