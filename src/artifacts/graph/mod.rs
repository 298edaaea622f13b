//! Commit graph traversals
//!
//! Commits name their parents by id; the object database is the only
//! arena. Traversals load commits on demand through the database or through
//! a parents-loader closure, so the algorithms can run against an in-memory
//! graph in tests.
//!
//! - `first_parent`: the chain `log` walks
//! - `ancestors`: every commit reachable over all parent edges, and every
//!   object a set of commits needs

pub mod ancestors;
pub mod first_parent;
