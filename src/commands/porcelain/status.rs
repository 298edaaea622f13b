use crate::areas::repository::Repository;
use crate::artifacts::status::inspector::Inspector;
use crate::artifacts::status::status_info::StatusInfo;

impl Repository {
    pub fn status(&self) -> anyhow::Result<()> {
        let state = self.load_state()?;
        let head = self.head_commit(&state)?;
        let inspector = Inspector::new(self);

        let status = StatusInfo {
            current_branch: state.current_branch().to_string(),
            branches: state.branches().keys().cloned().collect(),
            staged_files: state.staging().additions().iter().cloned().collect(),
            removed_files: state.staging().removals().iter().cloned().collect(),
            unstaged_changes: inspector.unstaged_changes(&state, &head)?,
            untracked_files: inspector.untracked_files(&state, &head)?,
        };

        status.write_to(&mut **self.writer())
    }
}
