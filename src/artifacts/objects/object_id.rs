//! Object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character hexadecimal strings representing SHA-1 hashes
//! of an object's canonical encoding. They identify blobs and commits alike.
//!
//! ## Format
//!
//! - Full: 40 hex characters (e.g., "abc123...def")
//! - Short: First 7 characters (e.g., "abc1234")
//!
//! ## Storage
//!
//! Objects are stored in `.twig/objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Object identifier (SHA-1 hash)
///
/// A 40-character lowercase hexadecimal string. Serialized as a plain string
/// inside the repository state file.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// # Returns
    ///
    /// Validated ObjectId or error if invalid length/characters
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", id));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Convert to file system path for object storage
    ///
    /// Splits the hash as `XX/YYYYYY...` where XX is the first 2 chars.
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters of the hash
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl TryFrom<String> for ObjectId {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_parse(value)
    }
}

impl From<ObjectId> for String {
    fn from(value: ObjectId) -> Self {
        value.0
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
