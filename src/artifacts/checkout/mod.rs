//! Switching the working directory between commits
//!
//! Checking out a branch, resetting and fast-forwarding all replace the
//! files tracked by one commit with the files tracked by another. The
//! untracked-file check runs first and rejects the switch before anything
//! in the working directory is touched.

pub mod conflict;
pub mod migration;
