use crate::areas::repository::Repository;
use crate::artifacts::graph::first_parent::FirstParentChain;
use crate::artifacts::log::write_log_entry;

impl Repository {
    /// History of the head, following first parents
    pub fn log(&self) -> anyhow::Result<()> {
        let state = self.load_state()?;

        for entry in FirstParentChain::new(self.database(), state.head().clone()) {
            let (commit_oid, commit) = entry?;
            write_log_entry(&mut **self.writer(), &commit_oid, &commit)?;
        }

        Ok(())
    }

    /// Every commit ever made, in no particular order
    pub fn global_log(&self) -> anyhow::Result<()> {
        self.load_state()?;

        for commit_oid in self.database().list_commits()? {
            let commit = self.database().get_commit(&commit_oid)?;
            write_log_entry(&mut **self.writer(), &commit_oid, &commit)?;
        }

        Ok(())
    }
}
