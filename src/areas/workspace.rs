use crate::errors::TwigError;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::{Component, Path};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [".twig", ".", ".."];

/// The working directory: plain files directly under the repository root
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Accept only names of plain files directly under the root
    pub fn check_name(name: &str) -> anyhow::Result<()> {
        let mut components = Path::new(name).components();

        match (components.next(), components.next()) {
            (Some(Component::Normal(entry)), None)
                if *entry == *name && !IGNORED_PATHS.contains(&name) =>
            {
                Ok(())
            }
            _ => Err(TwigError::InvalidFileName(name.to_string()).into()),
        }
    }

    pub fn exists(&self, name: &str) -> bool {
        Self::check_name(name).is_ok() && self.path.join(name).is_file()
    }

    pub fn read(&self, name: &str) -> anyhow::Result<Bytes> {
        Self::check_name(name)?;
        let file_path = self.path.join(name);

        if !file_path.is_file() {
            return Err(TwigError::FileNotFound.into());
        }

        let content = std::fs::read(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))?;

        Ok(content.into())
    }

    pub fn write(&self, name: &str, content: &[u8]) -> anyhow::Result<()> {
        Self::check_name(name)?;
        let file_path = self.path.join(name);

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&file_path)
            .with_context(|| format!("Failed to open file: {}", file_path.display()))?;

        file.write_all(content)
            .with_context(|| format!("Failed to write to file: {}", file_path.display()))?;

        Ok(())
    }

    /// Remove a file; a file that is already gone is not an error
    pub fn delete(&self, name: &str) -> anyhow::Result<()> {
        Self::check_name(name)?;
        let file_path = self.path.join(name);

        if file_path.is_file() {
            std::fs::remove_file(&file_path)
                .with_context(|| format!("Failed to remove file: {}", file_path.display()))?;
        }

        Ok(())
    }

    /// Names of the plain files in the working directory, sorted
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in WalkDir::new(&self.path).min_depth(1).max_depth(1) {
            let entry = entry
                .with_context(|| format!("Failed to list directory: {}", self.path.display()))?;

            if !entry.file_type().is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            if !IGNORED_PATHS.contains(&name.as_str()) {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }
}
