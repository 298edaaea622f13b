use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;

impl Repository {
    /// Stage the working content of `name` for the next commit
    ///
    /// Content identical to the head's version cancels a pending addition
    /// instead. Either way a pending removal of `name` is cancelled.
    pub fn add(&self, name: &str) -> anyhow::Result<()> {
        Workspace::check_name(name)?;
        let mut state = self.load_state()?;

        let content = self.workspace().read(name)?;
        let blob_oid = Blob::new(content.clone()).object_id()?;
        let head = self.head_commit(&state)?;

        let unchanged = head
            .tracked_file(name)
            .is_some_and(|file| file.oid() == &blob_oid);

        if unchanged {
            self.cancel_addition(&mut state, name)?;
        } else {
            self.stage_addition(&mut state, name, &content)?;
        }
        state.staging_mut().cancel_removal(name);

        self.store_state(&state)
    }
}
