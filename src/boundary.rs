use std::fmt;

/// Warnings raised while preparing a release.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Releasing from a branch that is not configured as a release branch
    NotReleaseBranch {
        branch: String,
        release_branches: Vec<String>,
    },
    /// HEAD is not attached to any branch
    DetachedHead,
    /// Requested version does not move the manifest version forward
    VersionNotIncreasing { current: String, requested: String },
    /// The dependency check left no lock file behind
    MissingLockFile { path: String },
    /// The lock file is ignored and not committed, so it stays out of the release commit
    IgnoredLockFile { path: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NotReleaseBranch {
                branch,
                release_branches,
            } => {
                write!(
                    f,
                    "You are on branch '{}', not {}",
                    branch,
                    release_branches
                        .iter()
                        .map(|b| format!("'{}'", b))
                        .collect::<Vec<_>>()
                        .join(" or ")
                )
            }
            BoundaryWarning::DetachedHead => {
                write!(f, "HEAD is detached; the release commit will not be on a branch")
            }
            BoundaryWarning::VersionNotIncreasing { current, requested } => {
                write!(
                    f,
                    "Requested version {} is not greater than current version {}",
                    requested, current
                )
            }
            BoundaryWarning::MissingLockFile { path } => {
                write!(f, "Lock file '{}' does not exist; only the manifest will be committed", path)
            }
            BoundaryWarning::IgnoredLockFile { path } => {
                write!(f, "Lock file '{}' is ignored; only the manifest will be committed", path)
            }
        }
    }
}
