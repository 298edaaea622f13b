//! Per-file merge decisions
//!
//! Every file name tracked by the split point, the current head or the other
//! branch head is classified exactly once. Equality means equal content
//! hash; file versions play no part.
//!
//! | split | head | other | condition                   | action   |
//! |-------|------|-------|-----------------------------|----------|
//! | y     | y    | y     | S == H, S != O              | take O   |
//! | y     | y    | y     | S != H, S == O              | keep H   |
//! | y     | y    | y     | S == H == O                 | keep H   |
//! | y     | y    | y     | S != H, S != O, H == O      | keep H   |
//! | y     | y    | y     | S != H, S != O, H != O      | conflict |
//! | y     | y    | n     | S == H                      | remove   |
//! | y     | y    | n     | S != H                      | conflict |
//! | y     | n    | y     | S == O                      | keep     |
//! | y     | n    | y     | S != O                      | conflict |
//! | y     | n    | n     |                             | keep     |
//! | n     | y    | y     | H == O                      | keep H   |
//! | n     | y    | y     | H != O                      | conflict |
//! | n     | y    | n     |                             | keep H   |
//! | n     | n    | y     |                             | take O   |

use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// What a merge does to one file of the working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeAction {
    /// Write the other branch's version and stage it
    Checkout(ObjectId),
    /// Delete the file and stage its removal
    Remove,
    /// Write conflict markers around both versions and stage the result;
    /// a side that deleted the file contributes empty content
    Conflict {
        head: Option<ObjectId>,
        other: Option<ObjectId>,
    },
}

/// Decide the fate of one file; `None` leaves the head's state as it is
pub fn classify(
    split: Option<&ObjectId>,
    head: Option<&ObjectId>,
    other: Option<&ObjectId>,
) -> Option<MergeAction> {
    let conflict = || MergeAction::Conflict {
        head: head.cloned(),
        other: other.cloned(),
    };

    match (split, head, other) {
        (Some(s), Some(h), Some(o)) => {
            if s == h && s != o {
                Some(MergeAction::Checkout(o.clone()))
            } else if s == h || s == o || h == o {
                None
            } else {
                Some(conflict())
            }
        }
        (Some(s), Some(h), None) => {
            if s == h {
                Some(MergeAction::Remove)
            } else {
                Some(conflict())
            }
        }
        (Some(s), None, Some(o)) => {
            if s == o {
                None
            } else {
                Some(conflict())
            }
        }
        (None, Some(h), Some(o)) => {
            if h == o {
                None
            } else {
                Some(conflict())
            }
        }
        (None, None, Some(o)) => Some(MergeAction::Checkout(o.clone())),
        (Some(_), None, None) | (None, Some(_), None) | (None, None, None) => None,
    }
}

/// Actions for every file the three commits know about, keyed by name
pub fn plan_merge(
    split: &Commit,
    head: &Commit,
    other: &Commit,
) -> BTreeMap<String, MergeAction> {
    let mut classified = BTreeSet::new();
    let mut actions = BTreeMap::new();

    let names = split
        .tracked_names()
        .chain(head.tracked_names())
        .chain(other.tracked_names());

    for name in names {
        if !classified.insert(name) {
            continue;
        }

        let action = classify(
            split.tracked_file(name).map(|file| file.oid()),
            head.tracked_file(name).map(|file| file.oid()),
            other.tracked_file(name).map(|file| file.oid()),
        );

        if let Some(action) = action {
            debug!(name, ?action, "merge decision");
            actions.insert(name.to_string(), action);
        }
    }

    actions
}
