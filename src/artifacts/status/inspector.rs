use crate::areas::repository::Repository;
use crate::areas::state::RepositoryState;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{frame, hash_content};
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use derive_new::new;
use std::collections::BTreeMap;

#[derive(new)]
pub struct Inspector<'r> {
    repository: &'r Repository,
}

impl Inspector<'_> {
    /// Tracked or staged files whose working copy differs from what would
    /// be committed
    ///
    /// A tracked file counts when it is gone without being staged for
    /// removal, or changed without being staged at all. A staged file counts
    /// when its working copy is gone or differs from the staged snapshot.
    pub fn unstaged_changes(
        &self,
        state: &RepositoryState,
        head: &Commit,
    ) -> anyhow::Result<BTreeMap<String, WorkspaceChangeType>> {
        let workspace = self.repository.workspace();
        let staging = state.staging();
        let mut changes = BTreeMap::new();

        for file in head.tracked_files() {
            let name = file.name();

            if !workspace.exists(name) {
                if !staging.is_staged_for_removal(name) {
                    changes.insert(name.to_string(), WorkspaceChangeType::Deleted);
                }
            } else if !staging.is_staged_for_addition(name)
                && !staging.is_staged_for_removal(name)
                && &self.repository.working_file_oid(name)? != file.oid()
            {
                changes.insert(name.to_string(), WorkspaceChangeType::Modified);
            }
        }

        for name in staging.additions() {
            if !workspace.exists(name) {
                changes.insert(name.clone(), WorkspaceChangeType::Deleted);
                continue;
            }

            let snapshot = self.repository.snapshots().load(name)?;
            let snapshot_oid = hash_content(&frame(ObjectType::Blob, &snapshot))?;
            if self.repository.working_file_oid(name)? != snapshot_oid {
                changes.insert(name.clone(), WorkspaceChangeType::Modified);
            }
        }

        Ok(changes)
    }

    /// Working files that are neither tracked by the head nor staged
    pub fn untracked_files(
        &self,
        state: &RepositoryState,
        head: &Commit,
    ) -> anyhow::Result<Vec<String>> {
        Ok(self
            .repository
            .workspace()
            .list_files()?
            .into_iter()
            .filter(|name| !head.tracks(name) && !state.staging().is_staged_for_addition(name))
            .collect())
    }
}
