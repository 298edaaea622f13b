//! Commit object
//!
//! Commits are immutable snapshots of the tracked files at a point in time.
//! They contain:
//! - A timestamp (seconds since the Unix epoch)
//! - Parent commit ID(s), in order (first parent follows the current branch)
//! - The tracked files, sorted by name, at most one entry per name
//! - Commit message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! timestamp <unix-seconds>
//! parent <parent-sha>
//! file <version> <blob-sha> <name>
//!
//! <commit message>
//! ```
//!
//! The encoding is fixed field by field so that any implementation produces
//! the same hash for the same logical commit.

use crate::artifacts::objects::file_reference::FileReference;
use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, Local, Utc};
use std::collections::BTreeMap;
use std::io::BufRead;

/// Message of the root commit every repository starts with
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    timestamp: DateTime<Utc>,
    /// Parent commit IDs (empty for the root commit, two for merge commits)
    parents: Vec<ObjectId>,
    /// Tracked files, sorted by name
    files: Vec<FileReference>,
    message: String,
}

impl Commit {
    /// The root commit: no parents, no files, dated at the Unix epoch
    pub fn initial() -> Self {
        Commit {
            timestamp: DateTime::<Utc>::UNIX_EPOCH,
            parents: Vec::new(),
            files: Vec::new(),
            message: INITIAL_COMMIT_MESSAGE.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Timestamp in local time, e.g. "Thu Jan 1 00:00:00 1970 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn tracked_files(&self) -> &[FileReference] {
        &self.files
    }

    pub fn tracked_file(&self, name: &str) -> Option<&FileReference> {
        self.files
            .binary_search_by(|file| file.name().cmp(name))
            .ok()
            .map(|index| &self.files[index])
    }

    pub fn tracks(&self, name: &str) -> bool {
        self.tracked_file(name).is_some()
    }

    pub fn tracked_names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(FileReference::name)
    }
}

/// Assembles a new commit from a base commit's tracked files
///
/// Commits are immutable, so every change to the tracked-file list happens
/// here before the commit is hashed and stored.
#[derive(Debug, Clone, Default)]
pub struct CommitBuilder {
    parents: Vec<ObjectId>,
    files: BTreeMap<String, FileReference>,
}

impl CommitBuilder {
    pub fn from_base(base: &Commit) -> Self {
        CommitBuilder {
            parents: Vec::new(),
            files: base
                .files
                .iter()
                .map(|file| (file.name().to_string(), file.clone()))
                .collect(),
        }
    }

    pub fn parent(mut self, oid: ObjectId) -> Self {
        self.parents.push(oid);
        self
    }

    /// Insert `name` or point its existing reference at `oid`
    pub fn track(&mut self, name: &str, oid: ObjectId) {
        let reference = match self.files.get(name) {
            Some(existing) => existing.reassign(oid),
            None => FileReference::new(name.to_string(), oid),
        };

        self.files.insert(name.to_string(), reference);
    }

    pub fn untrack(&mut self, name: &str) {
        self.files.remove(name);
    }

    pub fn build(self, message: String, timestamp: DateTime<Utc>) -> Commit {
        Commit {
            timestamp,
            parents: self.parents,
            files: self.files.into_values().collect(),
            message,
        }
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut lines = vec![format!("timestamp {}", self.timestamp.timestamp())];
        for parent in &self.parents {
            lines.push(format!("parent {}", parent));
        }
        for file in &self.files {
            lines.push(file.to_line());
        }
        lines.push(String::new());
        lines.push(self.message.clone());

        Ok(frame(self.object_type(), lines.join("\n").as_bytes()))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)?;

        let (header, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;
        let mut lines = header.lines();

        let timestamp = lines
            .next()
            .and_then(|line| line.strip_prefix("timestamp "))
            .context("Invalid commit object: missing timestamp line")?
            .parse::<i64>()
            .context("Invalid commit object: bad timestamp")?;
        let timestamp = DateTime::<Utc>::from_timestamp(timestamp, 0)
            .context("Invalid commit object: timestamp out of range")?;

        let mut parents = Vec::new();
        let mut files = Vec::new();
        for line in lines {
            if let Some(parent) = line.strip_prefix("parent ") {
                anyhow::ensure!(
                    files.is_empty(),
                    "Invalid commit object: parent line after file lines"
                );
                parents.push(ObjectId::try_parse(parent.to_string())?);
            } else {
                files.push(FileReference::try_from(line)?);
            }
        }

        anyhow::ensure!(
            files.windows(2).all(|pair| pair[0].name() < pair[1].name()),
            "Invalid commit object: tracked files are not sorted and unique"
        );

        Ok(Commit {
            timestamp,
            parents,
            files,
            message: message.to_string(),
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
