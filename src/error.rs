use thiserror::Error;

/// Unified error type for release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Release cancelled on branch '{branch}'")]
    BranchDeclined { branch: String },

    #[error("Working tree has uncommitted changes ({} path(s))", .paths.len())]
    DirtyWorkingTree { paths: Vec<String> },

    #[error("Tag already exists: {0}")]
    TagExists(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Dependency check failed: {0}")]
    DependencyCheck(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-bump
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    pub fn usage(msg: impl Into<String>) -> Self {
        ReleaseError::Usage(msg.into())
    }

    pub fn invalid_version(msg: impl Into<String>) -> Self {
        ReleaseError::InvalidVersion(msg.into())
    }

    pub fn manifest(msg: impl Into<String>) -> Self {
        ReleaseError::Manifest(msg.into())
    }

    pub fn dependency_check(msg: impl Into<String>) -> Self {
        ReleaseError::DependencyCheck(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Process exit status for this error.
    ///
    /// Every failure path exits with 1; success and a declined commit exit with 0.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
