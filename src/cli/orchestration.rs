//! Release workflow orchestration
//!
//! Runs the release as a strictly linear sequence of stages (see
//! [ReleaseStage]). Nothing is written before the manifest bump; from the
//! bump onward every failure, and a declined commit, restores the manifest and
//! lock file from version control before returning.

use std::fs;
use std::path::PathBuf;

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::deps::DependencyCheck;
use crate::domain::tag::render_template;
use crate::domain::{BranchContext, ReleaseRequest, ReleaseStage, ReleaseVersion};
use crate::error::{ReleaseError, Result};
use crate::git::VersionControl;
use crate::manifest::Manifest;
use crate::ui::{self, Confirm};

/// Options for one release run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseOptions {
    /// Run the checks and preview only
    pub dry_run: bool,
}

/// How a release run ended
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseOutcome {
    /// Committed and tagged
    Released {
        version: String,
        tag: String,
        commit: String,
    },
    /// Commit declined; manifest and lock file restored
    RolledBack { version: String },
    /// Nothing written
    DryRun {
        version: String,
        version_line: String,
    },
}

/// State of a file the release rewrites, taken before the bump
#[derive(Debug, Clone, PartialEq)]
enum FileSnapshot {
    /// Committed at HEAD; restored through version control
    Tracked(PathBuf),
    /// Present but not committed, usually because it is ignored
    Untracked { path: PathBuf, content: Vec<u8> },
    /// Did not exist before the run
    Absent(PathBuf),
}

impl FileSnapshot {
    fn path(&self) -> &PathBuf {
        match self {
            FileSnapshot::Tracked(path) | FileSnapshot::Absent(path) => path,
            FileSnapshot::Untracked { path, .. } => path,
        }
    }
}

/// The release workflow over injected collaborators
pub struct ReleaseWorkflow<'a, V, D, P> {
    vcs: &'a V,
    deps: &'a D,
    prompt: &'a P,
    config: &'a Config,
}

impl<'a, V, D, P> ReleaseWorkflow<'a, V, D, P>
where
    V: VersionControl,
    D: DependencyCheck,
    P: Confirm,
{
    pub fn new(vcs: &'a V, deps: &'a D, prompt: &'a P, config: &'a Config) -> Self {
        ReleaseWorkflow {
            vcs,
            deps,
            prompt,
            config,
        }
    }

    /// Run a release of `raw_version`
    ///
    /// # Returns
    /// * `Ok(ReleaseOutcome)` - Released, rolled back on user request, or previewed
    /// * `Err` - Any failed check; touched files have been restored
    pub fn run(&self, raw_version: &str, options: &ReleaseOptions) -> Result<ReleaseOutcome> {
        let version = ReleaseVersion::parse(raw_version)?;

        let branch = BranchContext::with_release_branches(
            self.vcs.current_branch()?,
            &self.config.branches.release,
        );
        let mut request = ReleaseRequest::new(version, branch);

        self.check_branch(&mut request)?;
        self.check_clean_working_tree(&mut request)?;

        let tag = self.config.tag_pattern().format(request.version.as_str());
        if self.vcs.tag_exists(&tag)? {
            return Err(ReleaseError::TagExists(tag));
        }

        let manifest = Manifest::new(self.vcs.root().join(&self.config.files.manifest));
        let current_line = manifest.version_line()?;
        self.warn_on_regression(&manifest, &request.version)?;

        let new_line = manifest.preview(&request.version)?;
        ui::display_proposed_version(
            &self.manifest_name(),
            Some(current_line.as_str()),
            &new_line,
        );

        if options.dry_run {
            ui::display_status(&format!(
                "Dry run: would run '{}', commit and tag {}",
                self.config.dependency_check.command.join(" "),
                tag
            ));
            return Ok(ReleaseOutcome::DryRun {
                version: request.version.to_string(),
                version_line: new_line,
            });
        }

        let snapshots = self.snapshot_touched_paths()?;
        manifest.bump(&request.version)?;
        request.advance(ReleaseStage::ManifestBumped);

        self.regenerate_lock_file()
            .or_else(|e| self.fail_with_rollback(&snapshots, e))?;
        request.advance(ReleaseStage::LockRegenerated);

        let written = manifest
            .version_line()
            .or_else(|e| self.fail_with_rollback(&snapshots, e))?;
        ui::display_version_line(&self.manifest_name(), &written);
        request.advance(ReleaseStage::Displayed);

        self.confirm_and_commit_or_rollback(&mut request, &tag, &snapshots)
    }

    fn check_branch(&self, request: &mut ReleaseRequest) -> Result<()> {
        let branch = request.current_branch.clone();

        if !branch.is_release_branch() {
            if branch.is_detached() {
                ui::display_boundary_warning(&BoundaryWarning::DetachedHead);
            }
            ui::display_boundary_warning(&BoundaryWarning::NotReleaseBranch {
                branch: branch.name.clone(),
                release_branches: self.config.branches.release.clone(),
            });

            let confirmed = self.prompt.confirm("Continue anyway?")?;
            request.user_confirmed_branch = Some(confirmed);
            if !confirmed {
                return Err(ReleaseError::BranchDeclined {
                    branch: branch.name,
                });
            }
        }

        request.advance(ReleaseStage::BranchChecked);
        Ok(())
    }

    fn check_clean_working_tree(&self, request: &mut ReleaseRequest) -> Result<()> {
        let changed = self.vcs.changed_paths()?;
        request.is_working_tree_clean = changed.is_empty();

        if !request.is_working_tree_clean {
            ui::display_changed_paths(&changed);
            return Err(ReleaseError::DirtyWorkingTree { paths: changed });
        }

        request.advance(ReleaseStage::CleanChecked);
        Ok(())
    }

    fn warn_on_regression(&self, manifest: &Manifest, version: &ReleaseVersion) -> Result<()> {
        if let (Some(current), Some(requested)) = (manifest.current_version()?, version.semver()) {
            if requested <= current {
                ui::display_boundary_warning(&BoundaryWarning::VersionNotIncreasing {
                    current: current.to_string(),
                    requested: version.to_string(),
                });
            }
        }
        Ok(())
    }

    fn regenerate_lock_file(&self) -> Result<()> {
        ui::display_status(&format!(
            "Running '{}' to update {}",
            self.config.dependency_check.command.join(" "),
            self.config.files.lock.display()
        ));
        self.deps.run_check(self.vcs.root())
    }

    fn confirm_and_commit_or_rollback(
        &self,
        request: &mut ReleaseRequest,
        tag: &str,
        snapshots: &[FileSnapshot],
    ) -> Result<ReleaseOutcome> {
        let prompt = format!("Commit and tag {}?", tag);
        request.user_confirmed_commit = self.prompt.confirm(&prompt)?;

        if !request.user_confirmed_commit {
            self.rollback(snapshots)?;
            request.advance(ReleaseStage::RolledBack);
            ui::display_status("Release cancelled; no commit or tag created");
            return Ok(ReleaseOutcome::RolledBack {
                version: request.version.to_string(),
            });
        }

        let commit = self
            .commit_release(&request.version)
            .or_else(|e| self.fail_with_rollback(snapshots, e))?;
        ui::display_success(&format!("Committed {}", short_id(&commit)));

        let annotation = self
            .config
            .tag
            .annotated
            .then(|| format!("Release {}", request.version));
        self.vcs.tag(tag, annotation.as_deref())?;
        request.advance(ReleaseStage::Committed);
        ui::display_success(&format!("Created tag {}", tag));

        ui::display_push_guidance(
            &self.config.publish.remote,
            &request.current_branch.name,
            tag,
            &self.config.publish.workflow,
            request.version.as_str(),
        );

        Ok(ReleaseOutcome::Released {
            version: request.version.to_string(),
            tag: tag.to_string(),
            commit,
        })
    }

    fn commit_release(&self, version: &ReleaseVersion) -> Result<String> {
        let mut paths = vec![self.config.files.manifest.clone()];
        let lock = &self.config.files.lock;
        if !self.vcs.root().join(lock).exists() {
            ui::display_boundary_warning(&BoundaryWarning::MissingLockFile {
                path: lock.display().to_string(),
            });
        } else if self.vcs.is_ignored(lock)? && !self.vcs.is_tracked(lock)? {
            ui::display_boundary_warning(&BoundaryWarning::IgnoredLockFile {
                path: lock.display().to_string(),
            });
        } else {
            paths.push(lock.clone());
        }

        self.vcs.stage(&paths)?;
        let message = render_template(&self.config.commit.message, version.as_str());
        self.vcs.commit(&message)
    }

    fn touched_paths(&self) -> Vec<PathBuf> {
        vec![
            self.config.files.manifest.clone(),
            self.config.files.lock.clone(),
        ]
    }

    /// Record how to put each touched file back the way it is now
    fn snapshot_touched_paths(&self) -> Result<Vec<FileSnapshot>> {
        let mut snapshots = Vec::new();
        for path in self.touched_paths() {
            let absolute = self.vcs.root().join(&path);
            let snapshot = if self.vcs.is_tracked(&path)? {
                FileSnapshot::Tracked(path)
            } else if absolute.exists() {
                let content = fs::read(&absolute)?;
                FileSnapshot::Untracked { path, content }
            } else {
                FileSnapshot::Absent(path)
            };
            snapshots.push(snapshot);
        }
        log::debug!(
            "snapshot before bump: {:?}",
            snapshots.iter().map(FileSnapshot::path).collect::<Vec<_>>()
        );
        Ok(snapshots)
    }

    fn rollback(&self, snapshots: &[FileSnapshot]) -> Result<()> {
        let tracked: Vec<PathBuf> = snapshots
            .iter()
            .filter_map(|s| match s {
                FileSnapshot::Tracked(path) => Some(path.clone()),
                _ => None,
            })
            .collect();
        self.vcs.restore(&tracked)?;

        for snapshot in snapshots {
            let absolute = self.vcs.root().join(snapshot.path());
            match snapshot {
                FileSnapshot::Tracked(_) => {}
                FileSnapshot::Untracked { content, .. } => fs::write(&absolute, content)?,
                FileSnapshot::Absent(_) if absolute.exists() => fs::remove_file(&absolute)?,
                FileSnapshot::Absent(_) => {}
            }
        }

        ui::display_rollback(
            &snapshots
                .iter()
                .map(|s| s.path().display().to_string())
                .collect::<Vec<_>>(),
        );
        Ok(())
    }

    /// Restore touched files, then hand back the original error
    fn fail_with_rollback<T>(&self, snapshots: &[FileSnapshot], error: ReleaseError) -> Result<T> {
        if let Err(rollback_error) = self.rollback(snapshots) {
            log::warn!("rollback failed: {}", rollback_error);
            ui::display_error(&format!(
                "Could not restore {}: {}",
                self.manifest_name(),
                rollback_error
            ));
        }
        Err(error)
    }

    fn manifest_name(&self) -> String {
        self.config.files.manifest.display().to_string()
    }
}

fn short_id(id: &str) -> &str {
    id.get(..7).unwrap_or(id)
}
