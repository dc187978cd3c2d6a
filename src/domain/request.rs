use std::fmt;

use super::{BranchContext, ReleaseVersion};

/// Progress of a single release run.
///
/// Stages only move forward. Everything before `ManifestBumped` has touched
/// nothing on disk; from there on a failure has to restore the manifest and
/// lock file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReleaseStage {
    Start,
    ArgsChecked,
    VersionFormatChecked,
    BranchChecked,
    CleanChecked,
    ManifestBumped,
    LockRegenerated,
    Displayed,
    Committed,
    RolledBack,
}

impl ReleaseStage {
    pub fn is_mutating(&self) -> bool {
        *self >= ReleaseStage::ManifestBumped
    }

    pub fn name(&self) -> &'static str {
        match self {
            ReleaseStage::Start => "start",
            ReleaseStage::ArgsChecked => "args-checked",
            ReleaseStage::VersionFormatChecked => "version-format-checked",
            ReleaseStage::BranchChecked => "branch-checked",
            ReleaseStage::CleanChecked => "clean-checked",
            ReleaseStage::ManifestBumped => "manifest-bumped",
            ReleaseStage::LockRegenerated => "lock-regenerated",
            ReleaseStage::Displayed => "displayed",
            ReleaseStage::Committed => "committed",
            ReleaseStage::RolledBack => "rolled-back",
        }
    }
}

impl fmt::Display for ReleaseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything learned about one release while it runs
#[derive(Debug, Clone)]
pub struct ReleaseRequest {
    pub version: ReleaseVersion,
    pub current_branch: BranchContext,
    pub is_working_tree_clean: bool,
    /// Only asked when the branch is not a release branch
    pub user_confirmed_branch: Option<bool>,
    pub user_confirmed_commit: bool,
    pub stage: ReleaseStage,
}

impl ReleaseRequest {
    pub fn new(version: ReleaseVersion, current_branch: BranchContext) -> Self {
        ReleaseRequest {
            version,
            current_branch,
            is_working_tree_clean: false,
            user_confirmed_branch: None,
            user_confirmed_commit: false,
            stage: ReleaseStage::VersionFormatChecked,
        }
    }

    /// Move to the next stage, logging the transition
    pub fn advance(&mut self, next: ReleaseStage) {
        log::debug!("release {}: {} -> {}", self.version, self.stage, next);
        self.stage = next;
    }
}
