use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Commit;
use bytes::Bytes;
use tracing::debug;

/// Working directory changes that turn one commit's files into another's
///
/// Every blob is loaded while planning, so a missing object fails the
/// checkout before any file is deleted.
#[derive(Debug)]
pub struct Migration {
    deletions: Vec<String>,
    writes: Vec<(String, Bytes)>,
}

impl Migration {
    pub fn plan(database: &Database, current: &Commit, target: &Commit) -> anyhow::Result<Self> {
        let deletions = current
            .tracked_names()
            .filter(|name| !target.tracks(name))
            .map(String::from)
            .collect();

        let writes = target
            .tracked_files()
            .iter()
            .map(|file| Ok((file.name().to_string(), database.get_blob(file.oid())?)))
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Migration { deletions, writes })
    }

    pub fn deletions(&self) -> &[String] {
        &self.deletions
    }

    pub fn apply(&self, workspace: &Workspace) -> anyhow::Result<()> {
        for name in &self.deletions {
            workspace.delete(name)?;
        }

        for (name, content) in &self.writes {
            workspace.write(name, content)?;
        }

        debug!(
            deleted = self.deletions.len(),
            written = self.writes.len(),
            "applied checkout migration"
        );

        Ok(())
    }
}
