use std::fs;
use std::path::{Path, PathBuf};

use git2::{build::CheckoutBuilder, ErrorCode, Repository as Git2Repo, Status, StatusOptions};

use crate::error::{ReleaseError, Result};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
    root: PathBuf,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        Self::from_git2(repo)
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Result<Self> {
        let root = repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| ReleaseError::Git(git2::Error::from_str("bare repository")))?;

        Ok(Git2Repository { repo, root })
    }

    fn head_commit(&self) -> Result<Option<git2::Commit<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?)),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn exists_at_head(&self, path: &Path) -> Result<bool> {
        match self.head_commit()? {
            Some(commit) => Ok(commit.tree()?.get_path(path).is_ok()),
            None => Ok(false),
        }
    }
}

impl super::VersionControl for Git2Repository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn current_branch(&self) -> Result<String> {
        match self.repo.head() {
            Ok(head) if head.is_branch() => Ok(head.shorthand().unwrap_or("HEAD").to_string()),
            Ok(_) => Ok("HEAD".to_string()),
            // Fresh repository: HEAD points at a branch with no commits yet
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                let head = self.repo.find_reference("HEAD")?;
                let target = head.symbolic_target().unwrap_or("HEAD");
                Ok(target.trim_start_matches("refs/heads/").to_string())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn changed_paths(&self) -> Result<Vec<String>> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false)
            .exclude_submodules(true);

        let statuses = self.repo.statuses(Some(&mut options))?;
        let paths = statuses
            .iter()
            .filter(|entry| entry.status() != Status::CURRENT)
            .filter(|entry| !entry.status().contains(Status::IGNORED))
            .filter_map(|entry| entry.path().map(str::to_string))
            .collect();

        Ok(paths)
    }

    fn restore(&self, paths: &[PathBuf]) -> Result<()> {
        if paths.is_empty() {
            return Ok(());
        }
        log::debug!("restoring {:?} from HEAD", paths);

        let head = match self.head_commit()? {
            Some(commit) => commit,
            None => {
                for path in paths {
                    let absolute = self.root.join(path);
                    if absolute.exists() {
                        fs::remove_file(absolute)?;
                    }
                }
                return Ok(());
            }
        };

        self.repo
            .reset_default(Some(head.as_object()), paths.iter().map(PathBuf::as_path))?;

        let mut tracked = Vec::new();
        for path in paths {
            if self.exists_at_head(path)? {
                tracked.push(path);
            } else {
                let absolute = self.root.join(path);
                if absolute.exists() {
                    fs::remove_file(absolute)?;
                }
            }
        }

        if !tracked.is_empty() {
            let mut checkout = CheckoutBuilder::new();
            checkout.force();
            for path in tracked {
                checkout.path(path.as_path());
            }
            self.repo.checkout_head(Some(&mut checkout))?;
        }

        Ok(())
    }

    fn is_tracked(&self, path: &Path) -> Result<bool> {
        self.exists_at_head(path)
    }

    fn is_ignored(&self, path: &Path) -> Result<bool> {
        Ok(self.repo.is_path_ignored(path)?)
    }

    fn stage(&self, paths: &[PathBuf]) -> Result<()> {
        let mut index = self.repo.index()?;
        for path in paths {
            log::debug!("staging {}", path.display());
            index.add_path(path)?;
        }
        index.write()?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<String> {
        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.repo.signature()?;

        let parent = self.head_commit()?;
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;
        log::debug!("created commit {}", oid);

        Ok(oid.to_string())
    }

    fn tag(&self, name: &str, message: Option<&str>) -> Result<()> {
        let head = self
            .head_commit()?
            .ok_or_else(|| ReleaseError::Git(git2::Error::from_str("nothing to tag")))?;

        match message {
            Some(message) => {
                let signature = self.repo.signature()?;
                self.repo
                    .tag(name, head.as_object(), &signature, message, false)?;
            }
            None => {
                self.repo.tag_lightweight(name, head.as_object(), false)?;
            }
        }
        log::debug!("tagged {} as {}", head.id(), name);

        Ok(())
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        match self.repo.find_reference(&format!("refs/tags/{}", name)) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
