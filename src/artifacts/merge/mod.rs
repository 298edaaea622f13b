//! Three-way merge
//!
//! - `split_point`: the common ancestor a merge compares both sides against
//! - `decision`: what happens to each file, given its split/head/other state
//! - `conflict`: the content written for a conflicting file
//!
//! ## Debug Logging
//!
//! Split point discovery traces every commit it pops when built with the
//! `debug_merge` feature flag (`cargo build --features debug_merge`), at the
//! `trace` level of the `twig::merge` target.

pub mod conflict;
pub mod decision;
pub mod split_point;
