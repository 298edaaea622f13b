use crate::areas::database::Database;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeSet, HashSet, VecDeque};

/// Every commit reachable from `start` over any parent edge, `start` included
pub fn all_ancestors<ParentsLoaderFn>(
    start: &ObjectId,
    parents_loader: ParentsLoaderFn,
) -> anyhow::Result<HashSet<ObjectId>>
where
    ParentsLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    let mut visited = HashSet::from([start.clone()]);
    let mut queue = VecDeque::from([start.clone()]);

    while let Some(commit_oid) = queue.pop_front() {
        for parent in parents_loader(&commit_oid)? {
            if visited.insert(parent.clone()) {
                queue.push_back(parent);
            }
        }
    }

    Ok(visited)
}

/// Parents loader backed by the object database
pub fn database_parents(
    database: &Database,
) -> impl Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>> {
    move |commit_oid| Ok(database.get_commit(commit_oid)?.parents().to_vec())
}

/// Every object `start` depends on: its ancestors and the blobs they track
pub fn reachable_objects(
    database: &Database,
    start: &ObjectId,
) -> anyhow::Result<BTreeSet<ObjectId>> {
    let commits = all_ancestors(start, database_parents(database))?;
    let mut objects = BTreeSet::new();

    for commit_oid in commits {
        let commit = database.get_commit(&commit_oid)?;
        objects.extend(commit.tracked_files().iter().map(|file| file.oid().clone()));
        objects.insert(commit_oid);
    }

    Ok(objects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn oid(id: u8) -> ObjectId {
        ObjectId::try_parse(format!("{id:040x}")).unwrap()
    }

    fn loader(
        graph: &HashMap<ObjectId, Vec<ObjectId>>,
    ) -> impl Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>> + '_ {
        move |commit_oid| Ok(graph.get(commit_oid).cloned().unwrap_or_default())
    }

    #[test]
    fn collects_ancestors_over_every_parent() {
        //   1 - 2 - 4
        //    \     /
        //     3 --
        //   5 (unrelated)
        let graph = HashMap::from([
            (oid(2), vec![oid(1)]),
            (oid(3), vec![oid(1)]),
            (oid(4), vec![oid(2), oid(3)]),
            (oid(5), vec![]),
        ]);

        let ancestors = all_ancestors(&oid(4), loader(&graph)).unwrap();

        assert_eq!(ancestors, HashSet::from([oid(1), oid(2), oid(3), oid(4)]));
    }

    #[test]
    fn a_root_is_its_own_only_ancestor() {
        let graph = HashMap::new();

        assert_eq!(
            all_ancestors(&oid(1), loader(&graph)).unwrap(),
            HashSet::from([oid(1)])
        );
    }

    #[test]
    fn loader_errors_propagate() {
        let failing = |_: &ObjectId| -> anyhow::Result<Vec<ObjectId>> { anyhow::bail!("boom") };

        assert!(all_ancestors(&oid(1), failing).is_err());
    }
}
