//! Working tree status
//!
//! - `file_change`: how a working file differs from what the next commit
//!   would record
//! - `inspector`: compares the working directory with the head commit and
//!   the staging area
//! - `status_info`: the collected report and its rendering

pub mod file_change;
pub mod inspector;
pub mod status_info;
