use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

/// Lazy walk from a commit along first parents down to the root
///
/// The walk ends at the commit with no parents. A commit that cannot be
/// loaded is yielded as an error and ends the walk.
#[derive(Debug)]
pub struct FirstParentChain<'d> {
    database: &'d Database,
    next_commit_oid: Option<ObjectId>,
}

impl<'d> FirstParentChain<'d> {
    pub fn new(database: &'d Database, start: ObjectId) -> Self {
        FirstParentChain {
            database,
            next_commit_oid: Some(start),
        }
    }
}

impl Iterator for FirstParentChain<'_> {
    type Item = anyhow::Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.next_commit_oid.take()?;

        match self.database.get_commit(&commit_oid) {
            Ok(commit) => {
                self.next_commit_oid = commit.parent().cloned();
                Some(Ok((commit_oid, commit)))
            }
            Err(error) => Some(Err(error)),
        }
    }
}
