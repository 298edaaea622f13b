//! Mutable repository state
//!
//! Everything about a repository that is not an immutable object: the
//! current branch and head, the branch table, the staging area and the
//! remote registry. Commands load it once through [`StateFile::load`], thread
//! it by `&mut` through their steps and persist it once on success.
//!
//! ## File Format
//!
//! `.twig/state.json`, written to a temp file and renamed into place.

use crate::areas::staging::StagingArea;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;
use anyhow::Context;
use fake::rand;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_BRANCH: &str = "master";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryState {
    current_branch: String,
    head: ObjectId,
    branches: BTreeMap<String, ObjectId>,
    #[serde(default)]
    staging: StagingArea,
    #[serde(default)]
    remotes: BTreeMap<String, String>,
}

impl RepositoryState {
    /// State of a fresh repository: `master` pointing at the root commit
    pub fn new(root: ObjectId) -> Self {
        RepositoryState {
            current_branch: DEFAULT_BRANCH.to_string(),
            head: root.clone(),
            branches: BTreeMap::from([(DEFAULT_BRANCH.to_string(), root)]),
            staging: StagingArea::default(),
            remotes: BTreeMap::new(),
        }
    }

    pub fn current_branch(&self) -> &str {
        &self.current_branch
    }

    pub fn head(&self) -> &ObjectId {
        &self.head
    }

    pub fn branches(&self) -> &BTreeMap<String, ObjectId> {
        &self.branches
    }

    pub fn branch_head(&self, name: &str) -> Option<&ObjectId> {
        self.branches.get(name)
    }

    pub fn has_branch(&self, name: &str) -> bool {
        self.branches.contains_key(name)
    }

    /// Create or move a branch pointer
    ///
    /// Moving the current branch also moves the head.
    pub fn set_branch(&mut self, name: &str, oid: ObjectId) {
        if name == self.current_branch {
            self.head = oid.clone();
        }

        self.branches.insert(name.to_string(), oid);
    }

    pub fn remove_branch(&mut self, name: &str) -> anyhow::Result<ObjectId> {
        if name == self.current_branch {
            return Err(TwigError::CannotRemoveCurrentBranch.into());
        }

        self.branches
            .remove(name)
            .ok_or_else(|| TwigError::BranchNotFound.into())
    }

    /// Move the current branch and the head to `oid`
    pub fn advance_head(&mut self, oid: ObjectId) {
        let current_branch = self.current_branch.clone();
        self.set_branch(&current_branch, oid);
    }

    /// Make `name` the current branch; the head follows its pointer
    pub fn switch_branch(&mut self, name: &str) -> anyhow::Result<()> {
        let branch_head = self
            .branches
            .get(name)
            .ok_or(TwigError::BranchNotFound)?
            .clone();

        self.current_branch = name.to_string();
        self.head = branch_head;

        Ok(())
    }

    pub fn staging(&self) -> &StagingArea {
        &self.staging
    }

    pub fn staging_mut(&mut self) -> &mut StagingArea {
        &mut self.staging
    }

    pub fn remotes(&self) -> &BTreeMap<String, String> {
        &self.remotes
    }

    pub fn remote(&self, name: &str) -> anyhow::Result<&str> {
        self.remotes
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| TwigError::RemoteNotFound.into())
    }

    pub fn add_remote(&mut self, name: &str, location: String) -> anyhow::Result<()> {
        if self.remotes.contains_key(name) {
            return Err(TwigError::RemoteAlreadyExists.into());
        }

        self.remotes.insert(name.to_string(), location);
        Ok(())
    }

    pub fn remove_remote(&mut self, name: &str) -> anyhow::Result<()> {
        self.remotes
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| TwigError::RemoteNotFound.into())
    }
}

/// The on-disk home of a [`RepositoryState`]
#[derive(Debug)]
pub struct StateFile {
    path: Box<Path>,
}

impl StateFile {
    pub fn new(path: Box<Path>) -> Self {
        StateFile { path }
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn load(&self) -> anyhow::Result<RepositoryState> {
        if !self.exists() {
            return Err(TwigError::NotInitialized.into());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Unable to read {}", self.path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Unable to parse {}", self.path.display()))
    }

    pub fn store(&self, state: &RepositoryState) -> anyhow::Result<()> {
        let state_dir = self
            .path
            .parent()
            .context(format!("Invalid state path {}", self.path.display()))?;
        let temp_path = state_dir.join(format!("tmp-state-{}", rand::random::<u32>()));

        let content = serde_json::to_string_pretty(state).context("Unable to encode state")?;

        std::fs::write(&temp_path, content)
            .with_context(|| format!("Unable to write {}", temp_path.display()))?;
        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Unable to replace {}", self.path.display()))?;

        debug!(head = %state.head, branch = %state.current_branch, "stored repository state");

        Ok(())
    }
}
