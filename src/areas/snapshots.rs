use anyhow::Context;
use bytes::Bytes;
use std::path::Path;

/// Copies of file content staged for addition, kept in `.twig/staging/`
///
/// A snapshot is taken at `add` time so that later edits to the working
/// file do not change what the next commit records.
#[derive(Debug)]
pub struct SnapshotStore {
    path: Box<Path>,
}

impl SnapshotStore {
    pub fn new(path: Box<Path>) -> Self {
        SnapshotStore { path }
    }

    pub fn save(&self, name: &str, content: &[u8]) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.path)
            .with_context(|| format!("Unable to create {}", self.path.display()))?;

        let snapshot_path = self.path.join(name);
        std::fs::write(&snapshot_path, content)
            .with_context(|| format!("Unable to write snapshot {}", snapshot_path.display()))
    }

    pub fn load(&self, name: &str) -> anyhow::Result<Bytes> {
        let snapshot_path = self.path.join(name);

        std::fs::read(&snapshot_path)
            .map(Bytes::from)
            .with_context(|| format!("Missing staged snapshot for {name}"))
    }

    pub fn remove(&self, name: &str) -> anyhow::Result<()> {
        let snapshot_path = self.path.join(name);

        if snapshot_path.is_file() {
            std::fs::remove_file(&snapshot_path).with_context(|| {
                format!("Unable to remove snapshot {}", snapshot_path.display())
            })?;
        }

        Ok(())
    }

    pub fn clear(&self) -> anyhow::Result<()> {
        if !self.path.is_dir() {
            return Ok(());
        }

        for entry in std::fs::read_dir(&self.path)? {
            let entry_path = entry?.path();
            if entry_path.is_file() {
                std::fs::remove_file(&entry_path).with_context(|| {
                    format!("Unable to remove snapshot {}", entry_path.display())
                })?;
            }
        }

        Ok(())
    }
}
