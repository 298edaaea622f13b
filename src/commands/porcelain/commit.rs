use crate::areas::repository::Repository;
use crate::areas::state::RepositoryState;
use crate::artifacts::objects::commit::CommitBuilder;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;
use tracing::info;

impl Repository {
    pub fn commit(&self, message: &str) -> anyhow::Result<ObjectId> {
        if message.trim().is_empty() {
            return Err(TwigError::EmptyMessage.into());
        }

        let mut state = self.load_state()?;
        if state.staging().is_empty() {
            return Err(TwigError::NothingToCommit.into());
        }

        let parent = state.head().clone();
        let commit_oid = self.commit_staged(&mut state, message.to_string(), vec![parent])?;

        self.store_state(&state)?;

        Ok(commit_oid)
    }

    /// Record the head's files with the staged changes applied
    ///
    /// Staged snapshots become blobs and both staging sets are consumed.
    /// Every object is stored before the current branch moves.
    pub(crate) fn commit_staged(
        &self,
        state: &mut RepositoryState,
        message: String,
        parents: Vec<ObjectId>,
    ) -> anyhow::Result<ObjectId> {
        let head = self.head_commit(state)?;
        let mut builder = parents
            .into_iter()
            .fold(CommitBuilder::from_base(&head), CommitBuilder::parent);

        for name in state.staging().additions() {
            let content = self.snapshots().load(name)?;
            let blob_oid = self.database().put_blob(content)?;
            builder.track(name, blob_oid);
        }

        for name in state.staging().removals() {
            builder.untrack(name);
        }

        let commit = builder.build(message, self.config().commit_timestamp());
        let commit_oid = self.database().put_commit(&commit)?;

        self.clear_staging(state)?;
        state.advance_head(commit_oid.clone());

        info!(
            commit = %commit_oid,
            branch = state.current_branch(),
            files = commit.tracked_files().len(),
            "created commit"
        );

        Ok(commit_oid)
    }
}
