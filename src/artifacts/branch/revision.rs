use crate::areas::database::Database;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::TwigError;

/// Resolve a full or abbreviated commit id
///
/// Any non-empty hex prefix is accepted. A prefix matching no commit is
/// [`TwigError::CommitNotFound`]; one matching several is
/// [`TwigError::AmbiguousCommitId`]. Blobs never match.
pub fn resolve_commit_id(database: &Database, commit_id: &str) -> anyhow::Result<ObjectId> {
    if commit_id.is_empty()
        || commit_id.len() > OBJECT_ID_LENGTH
        || !commit_id.chars().all(|c| c.is_ascii_hexdigit())
    {
        return Err(TwigError::CommitNotFound.into());
    }

    if commit_id.len() == OBJECT_ID_LENGTH {
        let oid = ObjectId::try_parse(commit_id.to_string())?;

        return if database.contains(&oid)
            && database.get_object_type(&oid)? == ObjectType::Commit
        {
            Ok(oid)
        } else {
            Err(TwigError::CommitNotFound.into())
        };
    }

    let mut matches = database.find_commits_by_prefix(commit_id)?;

    match matches.len() {
        0 => Err(TwigError::CommitNotFound.into()),
        1 => Ok(matches.remove(0)),
        _ => Err(TwigError::AmbiguousCommitId {
            prefix: commit_id.to_string(),
            candidates: matches.iter().map(ObjectId::to_short_oid).collect(),
        }
        .into()),
    }
}
