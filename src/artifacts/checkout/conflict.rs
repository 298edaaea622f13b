use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Commit;
use crate::errors::TwigError;

/// Working files the switch from `current` to `target` would clobber
///
/// A file is in the way when it exists in the working directory, the current
/// head does not track it and the target commit does.
pub fn untracked_files_in_the_way(
    workspace: &Workspace,
    current: &Commit,
    target: &Commit,
) -> Vec<String> {
    target
        .tracked_names()
        .filter(|name| !current.tracks(name) && workspace.exists(name))
        .map(String::from)
        .collect()
}

pub fn ensure_no_untracked_conflict(
    workspace: &Workspace,
    current: &Commit,
    target: &Commit,
) -> anyhow::Result<()> {
    let in_the_way = untracked_files_in_the_way(workspace, current, target);

    if in_the_way.is_empty() {
        Ok(())
    } else {
        Err(TwigError::UntrackedFileConflict(in_the_way).into())
    }
}
