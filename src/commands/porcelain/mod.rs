//! Porcelain commands (user-facing operations)
//!
//! Each command is an `impl Repository` block. Commands load the repository
//! state once, validate everything they can before touching the working
//! directory, and store the state once on success.
//!
//! ## Commands
//!
//! - `init`: create a repository with its root commit
//! - `add`, `rm`: stage files
//! - `commit`: record the staged changes
//! - `log`, `global_log`, `find`: inspect history
//! - `status`: show branches, staging and working tree changes
//! - `checkout`: restore files or switch branches
//! - `branch`, `rm_branch`: manage branch pointers
//! - `reset`: move the current branch to any commit
//! - `merge`: three-way merge of another branch into the current one
//! - `remote`: add/remove remotes and push, fetch, pull

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod find;
pub mod init;
pub mod log;
pub mod merge;
pub mod remote;
pub mod reset;
pub mod rm;
pub mod status;
