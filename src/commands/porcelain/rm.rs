use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::errors::TwigError;

impl Repository {
    /// Unstage `name`; if the head tracks it, also stage its removal and
    /// delete the working copy
    pub fn rm(&self, name: &str) -> anyhow::Result<()> {
        Workspace::check_name(name)?;
        let mut state = self.load_state()?;
        let head = self.head_commit(&state)?;

        let staged = state.staging().is_staged_for_addition(name);
        let tracked = head.tracks(name);

        if !staged && !tracked {
            return Err(TwigError::NoReasonToRemove.into());
        }

        self.cancel_addition(&mut state, name)?;

        if tracked {
            self.stage_removal(&mut state, name)?;
            self.workspace().delete(name)?;
        }

        self.store_state(&state)
    }
}
