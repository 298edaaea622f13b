use crate::artifacts::status::file_change::WorkspaceChangeType;
use colored::Colorize;
use std::collections::BTreeMap;
use std::io::Write;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusInfo {
    pub(crate) current_branch: String,
    pub(crate) branches: Vec<String>,
    pub(crate) staged_files: Vec<String>,
    pub(crate) removed_files: Vec<String>,
    pub(crate) unstaged_changes: BTreeMap<String, WorkspaceChangeType>,
    pub(crate) untracked_files: Vec<String>,
}

impl StatusInfo {
    /// Render the report, one `=== <title> ===` section per category
    pub fn write_to(&self, writer: &mut dyn Write) -> anyhow::Result<()> {
        writeln!(writer, "=== Branches ===")?;
        for branch in &self.branches {
            if branch == &self.current_branch {
                writeln!(writer, "*{}", branch.green())?;
            } else {
                writeln!(writer, "{branch}")?;
            }
        }
        writeln!(writer)?;

        Self::write_section(writer, "Staged Files", &self.staged_files)?;
        Self::write_section(writer, "Removed Files", &self.removed_files)?;

        let unstaged_changes = self
            .unstaged_changes
            .iter()
            .map(|(name, change)| format!("{name} {change}"))
            .collect::<Vec<_>>();
        Self::write_section(
            writer,
            "Modifications Not Staged For Commit",
            &unstaged_changes,
        )?;

        writeln!(writer, "=== Untracked Files ===")?;
        for name in &self.untracked_files {
            writeln!(writer, "{name}")?;
        }

        Ok(())
    }

    fn write_section(
        writer: &mut dyn Write,
        title: &str,
        entries: &[String],
    ) -> anyhow::Result<()> {
        writeln!(writer, "=== {title} ===")?;
        for entry in entries {
            writeln!(writer, "{entry}")?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
