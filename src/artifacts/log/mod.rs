//! Commit history display
//!
//! `log` walks the first-parent chain from the head; `global-log` prints
//! every stored commit. Both use the same entry layout:
//!
//! ```text
//! ===
//! commit <sha>
//! Merge: <short parent 1> <short parent 2>
//! Date: <weekday> <month> <day> <hh:mm:ss> <year> <offset>
//! <message>
//!
//! ```
//!
//! The `Merge:` line only appears for merge commits.

use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use std::io::Write;

pub fn write_log_entry(
    writer: &mut dyn Write,
    commit_oid: &ObjectId,
    commit: &Commit,
) -> anyhow::Result<()> {
    writeln!(writer, "===")?;
    writeln!(writer, "commit {}", commit_oid.as_ref().yellow())?;

    if commit.is_merge() {
        let parents = commit
            .parents()
            .iter()
            .map(ObjectId::to_short_oid)
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(writer, "Merge: {parents}")?;
    }

    writeln!(writer, "Date: {}", commit.readable_timestamp())?;
    writeln!(writer, "{}", commit.message())?;
    writeln!(writer)?;

    Ok(())
}
