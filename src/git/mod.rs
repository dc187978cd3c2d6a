//! Version-control abstraction layer
//!
//! This module provides a trait-based abstraction over the handful of git
//! operations a release needs, so the release workflow can run against a real
//! repository or against an in-memory mock in tests.
//!
//! # Overview
//!
//! The primary abstraction is the [VersionControl] trait. The concrete
//! implementations are:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! All paths handed to the trait are relative to the repository's working
//! directory.
//!
//! # Usage
//!
//! ```rust
//! # use release_bump::git::VersionControl;
//! # fn example<V: VersionControl>(vcs: &V) -> release_bump::Result<()> {
//! if vcs.is_clean()? {
//!     println!("releasing from {}", vcs.current_branch()?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Git operations used by the release workflow
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// underlying failures (like `git2::Error`) to
/// [crate::error::ReleaseError] variants.
///
/// ## Implementations
///
/// - [Git2Repository](repository::Git2Repository): Real Git implementation using the `git2` crate
/// - [MockRepository](mock::MockRepository): Test implementation recording every mutation
pub trait VersionControl {
    /// Absolute path of the working directory
    fn root(&self) -> &Path;

    /// Name of the checked-out branch
    ///
    /// Returns `"HEAD"` when HEAD is detached.
    fn current_branch(&self) -> Result<String>;

    /// Paths with uncommitted changes
    ///
    /// Includes modified, staged, deleted and untracked (non-ignored) files,
    /// the same set `git status --porcelain` reports.
    fn changed_paths(&self) -> Result<Vec<String>>;

    /// Whether the working tree has no uncommitted changes
    fn is_clean(&self) -> Result<bool> {
        Ok(self.changed_paths()?.is_empty())
    }

    /// Restore paths to their content at HEAD
    ///
    /// Both the index and the working tree are reset. A path that does not
    /// exist at HEAD is removed from disk.
    fn restore(&self, paths: &[PathBuf]) -> Result<()>;

    /// Whether the path exists in the HEAD commit
    fn is_tracked(&self, path: &Path) -> Result<bool>;

    /// Whether the path matches an ignore rule
    ///
    /// Ignored paths are never staged for the release commit.
    fn is_ignored(&self, path: &Path) -> Result<bool>;

    /// Add paths to the index
    fn stage(&self, paths: &[PathBuf]) -> Result<()>;

    /// Commit the index on top of HEAD
    ///
    /// # Returns
    /// * `Ok(String)` - The new commit id
    fn commit(&self, message: &str) -> Result<String>;

    /// Tag HEAD
    ///
    /// Creates an annotated tag when `message` is given, a lightweight tag
    /// otherwise. Fails if the tag already exists.
    fn tag(&self, name: &str, message: Option<&str>) -> Result<()>;

    /// Whether a tag with this name exists
    fn tag_exists(&self, name: &str) -> Result<bool>;
}
