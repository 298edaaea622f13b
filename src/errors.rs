//! Error types for twig operations
//!
//! Commands return `anyhow::Result` and attach context to I/O failures.
//! Failures a user can act on are raised as [`TwigError`] variants so callers
//! (and tests) can tell them apart with `downcast_ref`.

use crate::artifacts::objects::object_id::ObjectId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TwigError {
    #[error("Not in an initialized Twig directory.")]
    NotInitialized,

    #[error("A Twig version-control system already exists in the current directory.")]
    AlreadyInitialized,

    #[error("object {0} not found")]
    ObjectNotFound(ObjectId),

    #[error("object {oid} is corrupt: {detail}")]
    CorruptObject { oid: String, detail: String },

    #[error("No commit with that id exists.")]
    CommitNotFound,

    /// An abbreviated commit id matched more than one commit.
    #[error("short commit id {prefix} is ambiguous; candidates are: {}", candidates.join(", "))]
    AmbiguousCommitId {
        prefix: String,
        candidates: Vec<String>,
    },

    #[error("File does not exist.")]
    FileNotFound,

    #[error("File does not exist in that commit.")]
    FileNotInCommit,

    #[error("No reason to remove the file.")]
    NoReasonToRemove,

    #[error("A branch with that name does not exist.")]
    BranchNotFound,

    #[error("A branch with that name already exists.")]
    BranchAlreadyExists,

    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    /// A file name that is not a single plain entry of the working directory
    #[error("invalid file name: {0}")]
    InvalidFileName(String),

    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,

    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrentBranch,

    #[error("Cannot merge a branch with itself.")]
    CannotMergeWithSelf,

    #[error("Please enter a commit message.")]
    EmptyMessage,

    #[error("No changes added to the commit.")]
    NothingToCommit,

    #[error("Found no commit with that message.")]
    NoCommitWithMessage,

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    /// Files in the working directory that the operation would overwrite
    /// without them being tracked by the current head.
    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileConflict(Vec<String>),

    #[error("A remote with that name already exists.")]
    RemoteAlreadyExists,

    #[error("A remote with that name does not exist.")]
    RemoteNotFound,

    #[error("Remote directory not found.")]
    RemoteDirectoryNotFound,

    #[error("That remote does not have that branch.")]
    RemoteBranchNotFound,

    #[error("Please pull down remote changes before pushing.")]
    PushRejected,
}

/// Look up the [`TwigError`] carried by an `anyhow::Error`, if any
pub fn twig_error(error: &anyhow::Error) -> Option<&TwigError> {
    error.downcast_ref::<TwigError>()
}
