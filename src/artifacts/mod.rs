//! Repository data structures and algorithms
//!
//! - `branch`: branch names and commit id resolution
//! - `checkout`: switching the working directory between commits
//! - `core`: shared utilities (pager wrapper)
//! - `graph`: commit graph traversals
//! - `log`: commit history display
//! - `merge`: split points, per-file decisions and conflict markers
//! - `objects`: blobs, commits and their encodings
//! - `status`: working tree status inspection

pub mod branch;
pub mod checkout;
pub mod core;
pub mod graph;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;
