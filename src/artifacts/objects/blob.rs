//! Blob object
//!
//! Blobs store file content. They contain only the raw bytes, without the
//! file name (that lives in the commit's tracked-file list).
//!
//! ## Format
//!
//! On disk: `blob <size>\0<content>`

use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;

/// Immutable file content, identified by the hash of its framed encoding
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn into_content(self) -> Bytes {
        self.content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        Ok(frame(self.object_type(), &self.content))
    }
}

impl Unpackable for Blob {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        // the header has already been read
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        Ok(Self::new(content.into()))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }
}
