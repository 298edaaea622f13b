use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;

/// One tracked file inside a commit
///
/// Identity for merge purposes is the pair `(name, oid)`; `version` only
/// counts how many times the name was pointed at new content.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FileReference {
    name: String,
    oid: ObjectId,
    version: u32,
}

impl FileReference {
    pub fn new(name: String, oid: ObjectId) -> Self {
        FileReference {
            name,
            oid,
            version: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Point this reference at `oid`, bumping the version when the content changes
    pub fn reassign(&self, oid: ObjectId) -> Self {
        if self.oid == oid {
            return self.clone();
        }

        FileReference {
            name: self.name.clone(),
            oid,
            version: self.version + 1,
        }
    }

    pub fn same_content(&self, other: &FileReference) -> bool {
        self.oid == other.oid
    }

    /// `file <version> <oid> <name>`
    pub fn to_line(&self) -> String {
        format!("file {} {} {}", self.version, self.oid, self.name)
    }
}

impl TryFrom<&str> for FileReference {
    type Error = anyhow::Error;

    fn try_from(line: &str) -> Result<Self, Self::Error> {
        let rest = line
            .strip_prefix("file ")
            .context("Invalid file reference: missing 'file' prefix")?;

        // the name comes last so it may contain spaces
        let mut parts = rest.splitn(3, ' ');
        let version = parts
            .next()
            .context("Invalid file reference: missing version")?
            .parse::<u32>()
            .context("Invalid file reference: bad version")?;
        let oid = parts
            .next()
            .context("Invalid file reference: missing object id")?;
        let name = parts
            .next()
            .filter(|name| !name.is_empty())
            .context("Invalid file reference: missing name")?;

        Ok(FileReference {
            name: name.to_string(),
            oid: ObjectId::try_parse(oid.to_string())?,
            version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oid(c: char) -> ObjectId {
        ObjectId::try_parse(c.to_string().repeat(40)).unwrap()
    }

    #[test]
    fn reassigning_new_content_bumps_version() {
        let reference = FileReference::new("f.txt".into(), oid('a'));

        let changed = reference.reassign(oid('b'));
        assert_eq!(changed.version(), 1);
        assert_eq!(changed.oid(), &oid('b'));

        let unchanged = changed.reassign(oid('b'));
        assert_eq!(unchanged.version(), 1);
    }

    #[test]
    fn parses_names_with_spaces() {
        let reference = FileReference::new("my notes.txt".into(), oid('c')).reassign(oid('d'));

        let parsed = FileReference::try_from(reference.to_line().as_str()).unwrap();
        assert_eq!(parsed, reference);
    }

    #[test]
    fn rejects_truncated_lines() {
        assert!(FileReference::try_from("file 0").is_err());
        assert!(FileReference::try_from(format!("file 0 {}", oid('a')).as_str()).is_err());
    }
}
