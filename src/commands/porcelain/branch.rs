use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::TwigError;

impl Repository {
    /// Create a branch pointing at the head; the current branch is unchanged
    pub fn branch(&self, name: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;

        let branch_name = BranchName::try_parse(name.to_string())?;
        if state.has_branch(branch_name.as_ref()) {
            return Err(TwigError::BranchAlreadyExists.into());
        }

        let head = state.head().clone();
        state.set_branch(branch_name.as_ref(), head);

        self.store_state(&state)
    }

    /// Delete a branch pointer; its commits stay in the object store
    pub fn rm_branch(&self, name: &str) -> anyhow::Result<()> {
        let mut state = self.load_state()?;

        state.remove_branch(name)?;

        self.store_state(&state)
    }
}
