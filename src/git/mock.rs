use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReleaseError, Result};
use crate::git::VersionControl;

/// A commit recorded by [MockRepository]
#[derive(Debug, Clone, PartialEq)]
pub struct MockCommit {
    pub id: String,
    pub message: String,
    pub paths: Vec<PathBuf>,
}

/// Mock repository for testing without actual git operations
///
/// Files registered with [MockRepository::track_file] are treated as
/// committed: `restore` writes their recorded content back under `root`.
pub struct MockRepository {
    root: PathBuf,
    branch: String,
    changed: Vec<String>,
    head_files: HashMap<PathBuf, String>,
    ignored: BTreeSet<PathBuf>,
    fail_commit: bool,
    staged: RefCell<Vec<PathBuf>>,
    commits: RefCell<Vec<MockCommit>>,
    tags: RefCell<HashMap<String, Option<String>>>,
    restored: RefCell<Vec<PathBuf>>,
    calls: RefCell<Vec<String>>,
}

impl MockRepository {
    /// Create a clean mock repository on `main`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        MockRepository {
            root: root.into(),
            branch: "main".to_string(),
            changed: Vec::new(),
            head_files: HashMap::new(),
            ignored: BTreeSet::new(),
            fail_commit: false,
            staged: RefCell::new(Vec::new()),
            commits: RefCell::new(Vec::new()),
            tags: RefCell::new(HashMap::new()),
            restored: RefCell::new(Vec::new()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Set the checked-out branch
    pub fn set_branch(&mut self, branch: impl Into<String>) {
        self.branch = branch.into();
    }

    /// Report these paths as uncommitted changes
    pub fn set_changed_paths(&mut self, paths: &[&str]) {
        self.changed = paths.iter().map(|p| p.to_string()).collect();
    }

    /// Record the committed content of a file (relative to root)
    pub fn track_file(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.head_files.insert(path.into(), content.into());
    }

    /// Treat a path as matched by an ignore rule
    pub fn ignore_path(&mut self, path: impl Into<PathBuf>) {
        self.ignored.insert(path.into());
    }

    /// Add an existing tag
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.get_mut().insert(name.into(), None);
    }

    /// Make `commit` fail
    pub fn fail_commits(&mut self) {
        self.fail_commit = true;
    }

    pub fn commits(&self) -> Vec<MockCommit> {
        self.commits.borrow().clone()
    }

    /// Tag names mapped to their annotation message, if any
    pub fn tags(&self) -> HashMap<String, Option<String>> {
        self.tags.borrow().clone()
    }

    pub fn restored_paths(&self) -> Vec<PathBuf> {
        self.restored.borrow().clone()
    }

    /// Names of the trait methods called, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: &str) {
        self.calls.borrow_mut().push(call.to_string());
    }
}

impl VersionControl for MockRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn current_branch(&self) -> Result<String> {
        self.record("current_branch");
        Ok(self.branch.clone())
    }

    fn changed_paths(&self) -> Result<Vec<String>> {
        self.record("changed_paths");
        Ok(self.changed.clone())
    }

    fn restore(&self, paths: &[PathBuf]) -> Result<()> {
        self.record("restore");
        for path in paths {
            let absolute = self.root.join(path);
            match self.head_files.get(path) {
                Some(content) => fs::write(&absolute, content)?,
                None if absolute.exists() => fs::remove_file(&absolute)?,
                None => {}
            }
            self.staged.borrow_mut().retain(|p| p != path);
            self.restored.borrow_mut().push(path.clone());
        }
        Ok(())
    }

    fn is_tracked(&self, path: &Path) -> Result<bool> {
        Ok(self.head_files.contains_key(path))
    }

    fn is_ignored(&self, path: &Path) -> Result<bool> {
        Ok(self.ignored.contains(path))
    }

    fn stage(&self, paths: &[PathBuf]) -> Result<()> {
        self.record("stage");
        self.staged.borrow_mut().extend(paths.iter().cloned());
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<String> {
        self.record("commit");
        if self.fail_commit {
            return Err(ReleaseError::Git(git2::Error::from_str("commit rejected")));
        }

        let mut commits = self.commits.borrow_mut();
        let id = format!("{:040x}", commits.len() + 1);
        let paths = self.staged.borrow_mut().drain(..).collect::<BTreeSet<_>>();
        commits.push(MockCommit {
            id: id.clone(),
            message: message.to_string(),
            paths: paths.into_iter().collect(),
        });
        Ok(id)
    }

    fn tag(&self, name: &str, message: Option<&str>) -> Result<()> {
        self.record("tag");
        let mut tags = self.tags.borrow_mut();
        if tags.contains_key(name) {
            return Err(ReleaseError::TagExists(name.to_string()));
        }
        tags.insert(name.to_string(), message.map(str::to_string));
        Ok(())
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        self.record("tag_exists");
        Ok(self.tags.borrow().contains_key(name))
    }
}
