//! Persistent repository components
//!
//! - `database`: content-addressed object store for blobs and commits
//! - `remote`: another repository's store and state, opened by location
//! - `repository`: ties the components of one working directory together
//! - `snapshots`: copies of content staged for addition
//! - `staging`: the staging area's name sets
//! - `state`: branches, head, staging and remotes, persisted as JSON
//! - `workspace`: plain files of the working directory

pub mod database;
pub mod remote;
pub mod repository;
pub mod snapshots;
pub mod staging;
pub mod state;
pub mod workspace;
