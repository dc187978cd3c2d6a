use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::branch::DEFAULT_RELEASE_BRANCHES;
use crate::domain::TagPattern;
use crate::error::{ReleaseError, Result};

/// File name looked up in the repository root
pub const CONFIG_FILE_NAME: &str = "release.toml";

/// Represents the complete configuration for a release.
///
/// Every section has defaults, so an absent or empty file describes a plain
/// Cargo project released from `main` or `master`.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub files: FilesConfig,

    #[serde(default)]
    pub branches: BranchesConfig,

    #[serde(default)]
    pub tag: TagConfig,

    #[serde(default)]
    pub commit: CommitConfig,

    #[serde(default)]
    pub dependency_check: DependencyCheckConfig,

    #[serde(default)]
    pub publish: PublishConfig,
}

fn default_manifest() -> PathBuf {
    PathBuf::from("Cargo.toml")
}

fn default_lock() -> PathBuf {
    PathBuf::from("Cargo.lock")
}

/// Manifest and lock file, relative to the repository root
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FilesConfig {
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,

    #[serde(default = "default_lock")]
    pub lock: PathBuf,
}

impl Default for FilesConfig {
    fn default() -> Self {
        FilesConfig {
            manifest: default_manifest(),
            lock: default_lock(),
        }
    }
}

fn default_release_branches() -> Vec<String> {
    DEFAULT_RELEASE_BRANCHES
        .iter()
        .map(|b| b.to_string())
        .collect()
}

/// Branches a release may be cut from without confirmation
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BranchesConfig {
    #[serde(default = "default_release_branches")]
    pub release: Vec<String>,
}

impl Default for BranchesConfig {
    fn default() -> Self {
        BranchesConfig {
            release: default_release_branches(),
        }
    }
}

fn default_tag_pattern() -> String {
    "v{version}".to_string()
}

/// Tag naming. `annotated` switches from lightweight to annotated tags.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TagConfig {
    #[serde(default = "default_tag_pattern")]
    pub pattern: String,

    #[serde(default)]
    pub annotated: bool,
}

impl Default for TagConfig {
    fn default() -> Self {
        TagConfig {
            pattern: default_tag_pattern(),
            annotated: false,
        }
    }
}

fn default_commit_message() -> String {
    "chore: bump version to {version}".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CommitConfig {
    #[serde(default = "default_commit_message")]
    pub message: String,
}

impl Default for CommitConfig {
    fn default() -> Self {
        CommitConfig {
            message: default_commit_message(),
        }
    }
}

fn default_check_command() -> Vec<String> {
    vec!["cargo".to_string(), "check".to_string()]
}

/// Command whose side effect refreshes the lock file
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DependencyCheckConfig {
    #[serde(default = "default_check_command")]
    pub command: Vec<String>,
}

impl Default for DependencyCheckConfig {
    fn default() -> Self {
        DependencyCheckConfig {
            command: default_check_command(),
        }
    }
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_workflow() -> String {
    "release.yml".to_string()
}

/// Used only to print push guidance; nothing is pushed
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PublishConfig {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_workflow")]
    pub workflow: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        PublishConfig {
            remote: default_remote(),
            workflow: default_workflow(),
        }
    }
}

impl Config {
    pub fn tag_pattern(&self) -> TagPattern {
        TagPattern::new(self.tag.pattern.clone())
    }

    /// Reject settings the release cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.dependency_check.command.is_empty() {
            return Err(ReleaseError::config("dependency_check.command is empty"));
        }
        if self.files.manifest.as_os_str().is_empty() {
            return Err(ReleaseError::config("files.manifest is empty"));
        }
        self.tag_pattern().validate()
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release.toml` in the repository root
/// 3. `.release.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `root` - Repository working directory
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration, validated
/// * `Err` - If a file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&Path>, root: &Path) -> Result<Config> {
    let candidate = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let local = root.join(CONFIG_FILE_NAME);
            if local.exists() {
                Some(local)
            } else {
                dirs::config_dir()
                    .map(|dir| dir.join(format!(".{}", CONFIG_FILE_NAME)))
                    .filter(|path| path.exists())
            }
        }
    };

    let config = match candidate {
        Some(path) => {
            log::debug!("loading configuration from {}", path.display());
            let content = fs::read_to_string(&path).map_err(|e| {
                ReleaseError::config(format!("cannot read {}: {}", path.display(), e))
            })?;
            parse_config(&content)?
        }
        None => Config::default(),
    };

    config.validate()?;
    Ok(config)
}

/// Parse configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| ReleaseError::config(e.to_string()))
}
