//! Object types and operations
//!
//! Everything stored in the object database is identified by the SHA-1 hash
//! of its canonical encoding. There are two object types:
//!
//! - **Blob**: File content (raw bytes)
//! - **Commit**: Snapshot with metadata (message, timestamp, parents, tracked files)
//!
//! All objects share the framing `<type> <size>\0<content>`.

pub mod blob;
pub mod commit;
pub mod file_reference;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
