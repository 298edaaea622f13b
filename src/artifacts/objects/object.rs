use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::BufRead;
use std::path::PathBuf;

pub trait Packable {
    /// Canonical encoding, including the `<type> <size>\0` header
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    /// Decode from a reader positioned just after the header
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn object_id(&self) -> Result<ObjectId> {
        let content = self.serialize()?;
        hash_content(&content)
    }

    fn object_path(&self) -> Result<PathBuf> {
        Ok(self.object_id()?.to_path())
    }
}

/// SHA-1 of an already framed object encoding
pub fn hash_content(content: &[u8]) -> Result<ObjectId> {
    let mut hasher = Sha1::new();
    hasher.update(content);

    let oid = hasher.finalize();
    ObjectId::try_parse(format!("{oid:x}"))
}

/// Prefix `content` with the `<type> <size>\0` header
pub fn frame(object_type: ObjectType, content: &[u8]) -> Bytes {
    let header = format!("{} {}\0", object_type.as_str(), content.len());

    let mut framed = Vec::with_capacity(header.len() + content.len());
    framed.extend_from_slice(header.as_bytes());
    framed.extend_from_slice(content);

    Bytes::from(framed)
}
