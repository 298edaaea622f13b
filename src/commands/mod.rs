//! Command implementations
//!
//! Every user-facing operation lives in `porcelain`, one `impl Repository`
//! block per command.

pub mod porcelain;
