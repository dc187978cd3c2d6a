//! Command-line surface: argument definitions and validation.

pub mod orchestration;

use std::path::PathBuf;

use crate::error::{ReleaseError, Result};

pub const USAGE: &str = "Usage: release <VERSION>";
pub const EXAMPLE: &str = "Example: release 1.2.3";

#[derive(clap::Parser, Debug)]
#[command(
    name = "release",
    version = env!("BUILD_VERSION"),
    about = "Bump the manifest version, refresh the lock file, then commit and tag the release",
    after_help = EXAMPLE
)]
pub struct Args {
    #[arg(value_name = "VERSION", help = "Version to release, in X.Y.Z format")]
    pub new_version: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Run every check and show the change without writing anything")]
    pub dry_run: bool,

    #[arg(short = 'y', long, help = "Answer yes to every confirmation prompt")]
    pub yes: bool,

    #[arg(short, long, help = "Print debug logging")]
    pub verbose: bool,
}

/// Exactly one version argument is required
pub fn validate_arguments(args: &Args) -> Result<&str> {
    args.new_version
        .as_deref()
        .ok_or_else(|| ReleaseError::usage("missing required <VERSION> argument"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_single_version_argument() {
        let args = Args::try_parse_from(["release", "2.3.1"]).unwrap();
        assert_eq!(validate_arguments(&args).unwrap(), "2.3.1");
        assert!(!args.dry_run);
        assert!(!args.yes);
    }

    #[test]
    fn test_missing_version_is_usage_error() {
        let args = Args::try_parse_from(["release"]).unwrap();
        let err = validate_arguments(&args).unwrap_err();
        assert!(matches!(err, ReleaseError::Usage(_)));
    }

    #[test]
    fn test_extra_positional_is_rejected() {
        assert!(Args::try_parse_from(["release", "1.0.0", "2.0.0"]).is_err());
    }

    #[test]
    fn test_flags() {
        let args =
            Args::try_parse_from(["release", "--dry-run", "-y", "-c", "x.toml", "1.0.0"]).unwrap();
        assert!(args.dry_run);
        assert!(args.yes);
        assert_eq!(args.config, Some(PathBuf::from("x.toml")));
    }
}
