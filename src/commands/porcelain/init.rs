use crate::areas::repository::{Repository, STAGING_DIR};
use crate::areas::state::RepositoryState;
use crate::artifacts::objects::commit::Commit;
use crate::errors::TwigError;
use anyhow::Context;
use std::fs;
use std::io::Write;
use tracing::info;

impl Repository {
    pub fn init(&self) -> anyhow::Result<()> {
        if self.twig_path().exists() {
            return Err(TwigError::AlreadyInitialized.into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .twig/objects directory")?;
        fs::create_dir_all(self.twig_path().join(STAGING_DIR))
            .context("Failed to create .twig/staging directory")?;

        let root = self
            .database()
            .put_commit(&Commit::initial())
            .context("Failed to store the initial commit")?;

        self.store_state(&RepositoryState::new(root.clone()))
            .context("Failed to create .twig/state.json")?;

        info!(%root, "initialized repository");

        writeln!(
            self.writer(),
            "Initialized empty Twig repository in {}",
            self.path().display()
        )?;

        Ok(())
    }
}
