use crate::artifacts::branch::INVALID_BRANCH_NAME_REGEX;
use crate::errors::TwigError;
use anyhow::Context;

/// A validated branch name
///
/// Remote-tracking branches are ordinary branches named `<remote>/<branch>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        if name.is_empty() {
            return Err(TwigError::InvalidBranchName(name).into());
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .with_context(|| format!("invalid branch name regex: {INVALID_BRANCH_NAME_REGEX}"))?;

        if re.is_match(&name) {
            Err(TwigError::InvalidBranchName(name).into())
        } else {
            Ok(Self(name))
        }
    }

    /// Name of the local branch that mirrors `branch` of `remote`
    pub fn remote_tracking(remote: &str, branch: &str) -> anyhow::Result<Self> {
        Self::try_parse(format!("{remote}/{branch}"))
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
