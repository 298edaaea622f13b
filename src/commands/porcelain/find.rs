use crate::areas::repository::Repository;
use crate::errors::TwigError;
use std::io::Write;

impl Repository {
    /// Print the ids of all commits whose message is exactly `message`
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        self.load_state()?;

        let mut found = Vec::new();
        for commit_oid in self.database().list_commits()? {
            if self.database().get_commit(&commit_oid)?.message() == message {
                found.push(commit_oid);
            }
        }

        if found.is_empty() {
            return Err(TwigError::NoCommitWithMessage.into());
        }

        for commit_oid in found {
            writeln!(self.writer(), "{commit_oid}")?;
        }

        Ok(())
    }
}
