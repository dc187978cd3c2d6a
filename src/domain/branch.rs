/// Branch names accepted without confirmation when no configuration says otherwise
pub const DEFAULT_RELEASE_BRANCHES: [&str; 2] = ["main", "master"];

/// Represents the checked-out branch with release context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
    pub is_release: bool,
}

impl BranchContext {
    /// Create a branch context against the default release branches
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_release_branches(name, &DEFAULT_RELEASE_BRANCHES)
    }

    /// Create a branch context against an explicit list of release branches
    pub fn with_release_branches<S: AsRef<str>>(name: impl Into<String>, release: &[S]) -> Self {
        let name_str = name.into();
        let is_release = release.iter().any(|b| b.as_ref() == name_str);

        BranchContext {
            name: name_str,
            is_release,
        }
    }

    /// Check if this is a release branch (main/master by default)
    pub fn is_release_branch(&self) -> bool {
        self.is_release
    }

    /// HEAD is not on any branch
    pub fn is_detached(&self) -> bool {
        self.name == "HEAD"
    }
}
