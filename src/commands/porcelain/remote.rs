use crate::areas::remote::RemoteRepository;
use crate::areas::repository::Repository;
use crate::areas::state::RepositoryState;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::graph::ancestors::{all_ancestors, database_parents, reachable_objects};
use crate::commands::porcelain::merge::MergeOutcome;
use crate::errors::TwigError;
use tracing::info;

impl Repository {
    /// Register the `.twig` directory of another repository as `name`
    pub fn add_remote(&self, name: &str, location: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;

        state.add_remote(name, RemoteRepository::normalize_location(location))?;

        self.store_state(&state)
    }

    pub fn rm_remote(&self, name: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;

        state.remove_remote(name)?;

        self.store_state(&state)
    }

    /// Copy the head's history to the remote and point `branch` there at it
    ///
    /// Only fast-forwards are allowed: the remote branch head must already be
    /// in the local history.
    pub fn push(&self, remote: &str, branch: &str) -> anyhow::Result<()> {
        let state = self.load_state()?;
        let remote_repository = RemoteRepository::open(self.path(), state.remote(remote)?)?;
        let mut remote_state = remote_repository.state_file().load()?;

        let head = state.head().clone();

        if let Some(remote_head) = remote_state.branch_head(branch) {
            let history = all_ancestors(&head, database_parents(self.database()))?;
            if !history.contains(remote_head) {
                return Err(TwigError::PushRejected.into());
            }
        }

        let objects = reachable_objects(self.database(), &head)?;
        let copied = self
            .database()
            .copy_objects_to(remote_repository.database(), &objects)?;

        remote_state.set_branch(branch, head.clone());
        remote_repository.state_file().store(&remote_state)?;

        info!(remote, branch, %head, copied, "pushed");

        Ok(())
    }

    /// Copy the history of the remote's `branch` into `<remote>/<branch>`
    pub fn fetch(&self, remote: &str, branch: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;

        self.fetch_into(&mut state, remote, branch)?;

        self.store_state(&state)
    }

    /// Fetch `branch` from `remote`, then merge it into the current branch
    ///
    /// The fetched branch is stored before merging and survives a failed
    /// merge.
    pub fn pull(&self, remote: &str, branch: &str) -> anyhow::Result<MergeOutcome> {
        let mut state = self.load_state()?;

        let tracking_branch = self.fetch_into(&mut state, remote, branch)?;
        self.store_state(&state)?;

        let outcome = self.merge_into_current(&mut state, tracking_branch.as_ref())?;

        self.store_state(&state)?;
        self.report_merge(&outcome)?;

        Ok(outcome)
    }

    fn fetch_into(
        &self,
        state: &mut RepositoryState,
        remote: &str,
        branch: &str,
    ) -> anyhow::Result<BranchName> {
        let remote_repository = RemoteRepository::open(self.path(), state.remote(remote)?)?;
        let remote_state = remote_repository.state_file().load()?;

        let remote_head = remote_state
            .branch_head(branch)
            .ok_or(TwigError::RemoteBranchNotFound)?
            .clone();

        let objects = reachable_objects(remote_repository.database(), &remote_head)?;
        let copied = remote_repository
            .database()
            .copy_objects_to(self.database(), &objects)?;

        let tracking_branch = BranchName::remote_tracking(remote, branch)?;
        state.set_branch(tracking_branch.as_ref(), remote_head.clone());

        info!(remote, branch, head = %remote_head, copied, "fetched");

        Ok(tracking_branch)
    }
}
