use crate::error::{ReleaseError, Result};
use regex::Regex;
use std::fmt;

const VERSION_PATTERN: &str = r"^\d+\.\d+\.\d+$";

/// A release version exactly as typed on the command line.
///
/// Only plain `X.Y.Z` is accepted: three dot-separated runs of ASCII digits,
/// no pre-release or build suffix. The text is kept verbatim so the manifest
/// receives precisely what the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion {
    raw: String,
}

impl ReleaseVersion {
    /// Validate and wrap a version string
    pub fn parse(input: &str) -> Result<Self> {
        let re = Regex::new(VERSION_PATTERN)
            .map_err(|e| ReleaseError::invalid_version(format!("bad pattern: {}", e)))?;

        if !re.is_match(input) {
            return Err(ReleaseError::invalid_version(format!(
                "'{}' is not in X.Y.Z format (e.g. 1.2.3)",
                input
            )));
        }

        Ok(ReleaseVersion {
            raw: input.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Numeric view of the version for ordering.
    ///
    /// Returns `None` when a component does not fit in a `u64`.
    pub fn semver(&self) -> Option<semver::Version> {
        let mut parts = self.raw.split('.').map(|p| p.parse::<u64>());
        let major = parts.next()?.ok()?;
        let minor = parts.next()?.ok()?;
        let patch = parts.next()?.ok()?;
        Some(semver::Version::new(major, minor, patch))
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Parse the value of a manifest version line (e.g. `"0.4.1"`) for comparison.
///
/// Pre-release and build metadata are accepted here since the manifest may
/// already carry them.
pub fn parse_manifest_version(value: &str) -> Option<semver::Version> {
    let trimmed = value.trim().trim_matches('"').trim_matches('\'');
    semver::Version::parse(trimmed).ok()
}
