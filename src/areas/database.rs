//! Content-addressed object database
//!
//! Objects live under `.twig/objects/<2 hex>/<38 hex>`, zlib-compressed. The
//! key is the SHA-1 of the uncompressed framed encoding, so storing the same
//! content twice is a no-op and two stores agree on every id.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable, hash_content};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::TwigError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn put_blob(&self, content: Bytes) -> anyhow::Result<ObjectId> {
        self.store(Blob::new(content))
    }

    pub fn get_blob(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Blob => Ok(Blob::deserialize(object_reader)?.into_content()),
            other => Err(TwigError::CorruptObject {
                oid: object_id.to_string(),
                detail: format!("expected a blob, found a {other}"),
            }
            .into()),
        }
    }

    pub fn put_commit(&self, commit: &Commit) -> anyhow::Result<ObjectId> {
        self.store(commit.clone())
    }

    pub fn get_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Commit => Commit::deserialize(object_reader)
                .with_context(|| format!("Unable to parse commit {object_id}")),
            other => Err(TwigError::CorruptObject {
                oid: object_id.to_string(),
                detail: format!("expected a commit, found a {other}"),
            }
            .into()),
        }
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    pub fn get_object_type(&self, object_id: &ObjectId) -> anyhow::Result<ObjectType> {
        let (object_type, _) = self.parse_object_as_bytes(object_id)?;
        Ok(object_type)
    }

    /// Store an object unless it already exists and return its id
    pub fn store(&self, object: impl Object) -> anyhow::Result<ObjectId> {
        let object_content = object.serialize()?;
        let object_id = hash_content(&object_content)?;

        self.store_raw(&object_id, object_content)?;

        Ok(object_id)
    }

    /// Copy `object_ids` into `destination`, skipping objects it already has
    ///
    /// The destination re-hashes every copied object, so a copy can never
    /// store bytes under an id they do not hash to.
    pub fn copy_objects_to<'o>(
        &self,
        destination: &Database,
        object_ids: impl IntoIterator<Item = &'o ObjectId>,
    ) -> anyhow::Result<usize> {
        let mut copied = 0;

        for object_id in object_ids {
            if destination.contains(object_id) {
                continue;
            }

            let content = self.load(object_id)?;
            let actual_id = hash_content(&content)?;
            if &actual_id != object_id {
                return Err(TwigError::CorruptObject {
                    oid: object_id.to_string(),
                    detail: format!("content hashes to {actual_id}"),
                }
                .into());
            }

            destination.store_raw(object_id, content)?;
            copied += 1;
        }

        debug!(copied, from = %self.path.display(), to = %destination.path.display(), "copied objects");

        Ok(copied)
    }

    /// Raw framed bytes of an object
    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());

        if !object_path.is_file() {
            return Err(TwigError::ObjectNotFound(object_id.clone()).into());
        }

        self.read_object(object_path)
    }

    fn store_raw(&self, object_id: &ObjectId, object_content: Bytes) -> anyhow::Result<()> {
        let object_path = self.path.join(object_id.to_path());

        // write the object to disk unless it already exists
        if object_path.exists() {
            trace!(%object_id, "object already stored");
            return Ok(());
        }

        std::fs::create_dir_all(
            object_path
                .parent()
                .context(format!("Invalid object path {}", object_path.display()))?,
        )
        .context(format!(
            "Unable to create object directory {}",
            object_path.display()
        ))?;

        self.write_object(object_path, object_content)?;
        debug!(%object_id, "stored object");

        Ok(())
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> anyhow::Result<(ObjectType, impl BufRead)> {
        let object_content = self.load(object_id)?;
        let mut object_reader = Cursor::new(object_content);

        let object_type = ObjectType::parse_object_type(&mut object_reader)?;

        Ok((object_type, object_reader))
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }

    /// Every object id in the database, in no particular order
    pub fn list_objects(&self) -> anyhow::Result<Vec<ObjectId>> {
        let mut object_ids = Vec::new();

        if !self.path.is_dir() {
            return Ok(object_ids);
        }

        for dir_entry in std::fs::read_dir(&self.path)? {
            let dir_entry = dir_entry?;
            let dir_name = dir_entry.file_name().to_string_lossy().to_string();

            if dir_name.len() != 2 || !dir_entry.path().is_dir() {
                continue;
            }

            for entry in std::fs::read_dir(dir_entry.path())? {
                let file_name = entry?.file_name().to_string_lossy().to_string();

                // skip leftovers of interrupted writes
                if let Ok(oid) = ObjectId::try_parse(format!("{dir_name}{file_name}")) {
                    object_ids.push(oid);
                }
            }
        }

        Ok(object_ids)
    }

    /// Every commit id in the database, sorted
    pub fn list_commits(&self) -> anyhow::Result<Vec<ObjectId>> {
        let mut commits = self
            .list_objects()?
            .into_iter()
            .map(|oid| Ok((self.get_object_type(&oid)?, oid)))
            .filter_map(|entry: anyhow::Result<(ObjectType, ObjectId)>| match entry {
                Ok((ObjectType::Commit, oid)) => Some(Ok(oid)),
                Ok(_) => None,
                Err(e) => Some(Err(e)),
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        commits.sort();
        Ok(commits)
    }

    /// Find all commits whose OID starts with the given prefix.
    ///
    /// Used to resolve abbreviated commit ids. More than one match means the
    /// prefix is ambiguous; no match means there is no such commit.
    ///
    /// # Performance
    ///
    /// - For prefixes of 2+ characters, only searches the specific directory
    /// - For prefixes of 0-1 characters, must search all directories (slower)
    pub fn find_commits_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();
        let mut matches = Vec::new();

        if prefix.len() >= 2 {
            let dir_name = &prefix[..2];
            let file_prefix = &prefix[2..];
            let dir_path = self.path.join(dir_name);

            if dir_path.is_dir() {
                for entry in std::fs::read_dir(&dir_path)? {
                    let file_name = entry?.file_name().to_string_lossy().to_string();

                    if file_name.starts_with(file_prefix)
                        && let Ok(oid) = ObjectId::try_parse(format!("{dir_name}{file_name}"))
                    {
                        matches.push(oid);
                    }
                }
            }
        } else {
            matches = self
                .list_objects()?
                .into_iter()
                .filter(|oid| oid.as_ref().starts_with(&prefix))
                .collect();
        }

        let mut commits = Vec::new();
        for oid in matches {
            if self.get_object_type(&oid)? == ObjectType::Commit {
                commits.push(oid);
            }
        }

        commits.sort();
        Ok(commits)
    }
}
