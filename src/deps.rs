//! Dependency-manager check invocation.
//!
//! Running the check (`cargo check` by default) rewrites the lock file so it
//! agrees with the freshly bumped manifest. Only the exit status matters.

use std::path::Path;
use std::process::Command;

use crate::error::{ReleaseError, Result};

/// Runs the dependency manager's check in a project root
pub trait DependencyCheck {
    fn run_check(&self, root: &Path) -> Result<()>;
}

/// Executes an external check command
#[derive(Debug, Clone)]
pub struct CommandCheck {
    program: String,
    args: Vec<String>,
}

impl CommandCheck {
    /// Build from a command line split into words, e.g. `["cargo", "check"]`
    pub fn from_command(command: &[String]) -> Result<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| ReleaseError::config("dependency check command is empty"))?;

        Ok(CommandCheck {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// The command as it would be typed
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl DependencyCheck for CommandCheck {
    /// Run the command with `root` as working directory
    ///
    /// Output is streamed to the terminal. A spawn failure or non-zero exit
    /// is a [ReleaseError::DependencyCheck].
    fn run_check(&self, root: &Path) -> Result<()> {
        log::debug!("running '{}' in {}", self.display(), root.display());

        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(root)
            .status()
            .map_err(|e| {
                ReleaseError::dependency_check(format!(
                    "failed to execute '{}': {}",
                    self.display(),
                    e
                ))
            })?;

        if !status.success() {
            let code = status
                .code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string());
            return Err(ReleaseError::dependency_check(format!(
                "'{}' exited with {}",
                self.display(),
                code
            )));
        }

        Ok(())
    }
}
