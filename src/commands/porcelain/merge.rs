use crate::areas::repository::Repository;
use crate::areas::state::RepositoryState;
use crate::artifacts::checkout::conflict::ensure_no_untracked_conflict;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::graph::ancestors::database_parents;
use crate::artifacts::merge::conflict::conflict_content;
use crate::artifacts::merge::decision::{MergeAction, plan_merge};
use crate::artifacts::merge::split_point::SplitPointFinder;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TwigError;
use bytes::Bytes;
use colored::Colorize;
use std::io::Write;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The branch head is already in the current history
    AlreadyMerged,
    /// The current branch moved to the branch head without a new commit
    FastForward(ObjectId),
    /// A merge commit was created; `conflicts` lists files with markers
    Merged {
        commit: ObjectId,
        conflicts: Vec<String>,
    },
}

/// A merge action with the blob contents it needs already loaded
enum ResolvedAction {
    Write(Bytes),
    Remove,
    Conflict(Bytes),
}

impl Repository {
    pub fn merge(&self, branch: &str) -> anyhow::Result<MergeOutcome> {
        let mut state = self.load_state()?;

        let outcome = self.merge_into_current(&mut state, branch)?;
        self.store_state(&state)?;

        self.report_merge(&outcome)?;

        Ok(outcome)
    }

    pub(crate) fn report_merge(&self, outcome: &MergeOutcome) -> anyhow::Result<()> {
        match outcome {
            MergeOutcome::AlreadyMerged => writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?,
            MergeOutcome::FastForward(_) => {
                writeln!(self.writer(), "Current branch fast-forwarded.")?
            }
            MergeOutcome::Merged { conflicts, .. } if !conflicts.is_empty() => {
                writeln!(self.writer(), "{}", "Encountered a merge conflict.".red())?;
                for name in conflicts {
                    writeln!(self.writer(), "  conflict: {name}")?;
                }
            }
            MergeOutcome::Merged { .. } => {}
        }

        Ok(())
    }

    /// Merge `branch` into the current branch of `state`
    ///
    /// All checks, including the untracked-file check, run before the
    /// working directory is modified.
    pub(crate) fn merge_into_current(
        &self,
        state: &mut RepositoryState,
        branch: &str,
    ) -> anyhow::Result<MergeOutcome> {
        let branch_head = state
            .branch_head(branch)
            .ok_or(TwigError::BranchNotFound)?
            .clone();
        if branch == state.current_branch() {
            return Err(TwigError::CannotMergeWithSelf.into());
        }
        if !state.staging().is_empty() {
            return Err(TwigError::UncommittedChanges.into());
        }

        let head_oid = state.head().clone();
        let split_point = SplitPointFinder::new(database_parents(self.database()))
            .find(&head_oid, &branch_head)?;

        if split_point == branch_head {
            return Ok(MergeOutcome::AlreadyMerged);
        }

        let head = self.database().get_commit(&head_oid)?;
        let other = self.database().get_commit(&branch_head)?;
        ensure_no_untracked_conflict(self.workspace(), &head, &other)?;

        if split_point == head_oid {
            Migration::plan(self.database(), &head, &other)?.apply(self.workspace())?;
            state.advance_head(branch_head.clone());

            info!(branch, head = %branch_head, "fast-forwarded");
            return Ok(MergeOutcome::FastForward(branch_head));
        }

        let split = self.database().get_commit(&split_point)?;
        let actions = plan_merge(&split, &head, &other);

        let mut resolved = Vec::with_capacity(actions.len());
        for (name, action) in actions {
            let action = match action {
                MergeAction::Checkout(oid) => {
                    ResolvedAction::Write(self.database().get_blob(&oid)?)
                }
                MergeAction::Remove => ResolvedAction::Remove,
                MergeAction::Conflict { head, other } => {
                    let head = head.map(|oid| self.database().get_blob(&oid)).transpose()?;
                    let other = other.map(|oid| self.database().get_blob(&oid)).transpose()?;
                    ResolvedAction::Conflict(conflict_content(head.as_deref(), other.as_deref()))
                }
            };
            resolved.push((name, action));
        }

        let mut conflicts = Vec::new();
        for (name, action) in resolved {
            match action {
                ResolvedAction::Write(content) => {
                    self.workspace().write(&name, &content)?;
                    self.stage_addition(state, &name, &content)?;
                }
                ResolvedAction::Remove => {
                    self.stage_removal(state, &name)?;
                    self.workspace().delete(&name)?;
                }
                ResolvedAction::Conflict(content) => {
                    self.workspace().write(&name, &content)?;
                    self.stage_addition(state, &name, &content)?;
                    conflicts.push(name);
                }
            }
        }

        let message = format!("Merged {branch} into {}.", state.current_branch());
        let commit = self.commit_staged(state, message, vec![head_oid, branch_head])?;

        info!(branch, %commit, conflicts = conflicts.len(), "merged");

        Ok(MergeOutcome::Merged { commit, conflicts })
    }
}
