//! Reading and rewriting the `version = ` line of a manifest file.
//!
//! Only the first line that starts with `version = ` is touched. The quoted
//! value on that line is replaced; any trailing comment, the line ending and
//! every other byte of the file are left exactly as they were.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::domain::version::parse_manifest_version;
use crate::domain::ReleaseVersion;
use crate::error::{ReleaseError, Result};

const LINE_PATTERN: &str = r"(?m)^version = [^\r\n]*";
const VALUE_PATTERN: &str = r#"^version = (?:"[^"]*"|'[^']*'|[^\s#"'{\[]+)"#;
const PREFIX: &str = "version = ";

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| ReleaseError::manifest(format!("bad pattern: {}", e)))
}

/// First `version = ` line in `content`, without its line ending
pub fn find_version_line(content: &str) -> Result<Option<&str>> {
    Ok(compile(LINE_PATTERN)?.find(content).map(|m| m.as_str()))
}

/// Return `content` with the first version value replaced by `"<version>"`
///
/// Fails when that value is not a plain string, such as an inline table
/// `{ workspace = true }`.
pub fn replace_version(content: &str, version: &str) -> Result<String> {
    let line = compile(LINE_PATTERN)?
        .find(content)
        .ok_or_else(|| ReleaseError::manifest("no line starting with 'version = '"))?;
    let value = compile(VALUE_PATTERN)?
        .find(line.as_str())
        .ok_or_else(|| {
            ReleaseError::manifest(format!(
                "version value is not a plain string: {}",
                line.as_str()
            ))
        })?;
    let end = line.start() + value.end();

    let mut updated = String::with_capacity(content.len() + version.len());
    updated.push_str(&content[..line.start()]);
    updated.push_str(&format!("{}\"{}\"", PREFIX, version));
    updated.push_str(&content[end..]);
    Ok(updated)
}

/// A manifest file on disk
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
}

impl Manifest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Manifest { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|e| {
            ReleaseError::manifest(format!("cannot read {}: {}", self.path.display(), e))
        })
    }

    /// The version line as currently written in the file
    pub fn version_line(&self) -> Result<String> {
        let content = self.read()?;
        find_version_line(&content)?
            .map(str::to_string)
            .ok_or_else(|| {
                ReleaseError::manifest(format!(
                    "no line starting with 'version = ' in {}",
                    self.path.display()
                ))
            })
    }

    /// Parsed current version, if the value is a plain semver string
    pub fn current_version(&self) -> Result<Option<semver::Version>> {
        let line = self.version_line()?;
        let value = line.strip_prefix(PREFIX).unwrap_or(&line);
        let value = value.split('#').next().unwrap_or(value);
        Ok(parse_manifest_version(value))
    }

    /// Version line that `bump` would write, without touching the file
    pub fn preview(&self, version: &ReleaseVersion) -> Result<String> {
        let updated = replace_version(&self.read()?, version.as_str())?;
        find_version_line(&updated)?
            .map(str::to_string)
            .ok_or_else(|| ReleaseError::manifest("version line vanished after rewrite"))
    }

    /// Rewrite the version line in place
    pub fn bump(&self, version: &ReleaseVersion) -> Result<()> {
        let updated = replace_version(&self.read()?, version.as_str())?;
        fs::write(&self.path, updated)?;
        log::debug!("wrote version {} to {}", version, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CARGO_TOML: &str = "[package]\nname = \"demo\"\nversion = \"0.1.0\"\nedition = \"2021\"\n\n[dependencies]\nserde = { version = \"1.0\" }\n";

    #[test]
    fn test_find_version_line() {
        assert_eq!(
            find_version_line(CARGO_TOML).unwrap(),
            Some("version = \"0.1.0\"")
        );
        assert_eq!(find_version_line("[package]\nname = \"x\"\n").unwrap(), None);
    }

    #[test]
    fn test_indented_version_is_not_matched() {
        let content = "[package]\n  version = \"0.1.0\"\n";
        assert!(find_version_line(content).unwrap().is_none());
        assert!(replace_version(content, "1.0.0").is_err());
    }

    #[test]
    fn test_replace_only_touches_version_line() {
        let updated = replace_version(CARGO_TOML, "2.3.1").unwrap();
        assert_eq!(updated, CARGO_TOML.replace("0.1.0", "2.3.1"));
        assert!(updated.contains("serde = { version = \"1.0\" }"));
    }

    #[test]
    fn test_replace_first_match_only() {
        let content = "version = \"1.0.0\"\n[other]\nversion = \"9.9.9\"\n";
        let updated = replace_version(content, "1.1.0").unwrap();
        assert_eq!(
            updated,
            "version = \"1.1.0\"\n[other]\nversion = \"9.9.9\"\n"
        );
    }

    #[test]
    fn test_replace_keeps_crlf_and_comment() {
        let content = "[package]\r\nversion = \"0.1.0\" # bumped by release\r\nname = \"x\"\r\n";
        let updated = replace_version(content, "0.2.0").unwrap();
        assert_eq!(
            updated,
            "[package]\r\nversion = \"0.2.0\" # bumped by release\r\nname = \"x\"\r\n"
        );
    }

    #[test]
    fn test_replace_unquoted_value() {
        let updated = replace_version("version = 0.1.0\n", "0.2.0").unwrap();
        assert_eq!(updated, "version = \"0.2.0\"\n");
    }

    #[test]
    fn test_non_scalar_value_is_rejected() {
        for line in [
            "version = { workspace = true }",
            "version = [\"1\"]",
            "version = ",
        ] {
            let content = format!("[package]\n{}\nname = \"x\"\n", line);
            let err = replace_version(&content, "2.3.1").unwrap_err();
            assert!(matches!(err, ReleaseError::Manifest(_)), "{}", line);
        }
    }

    #[test]
    fn test_workspace_version_is_left_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Cargo.toml");
        let content = "[package]\nname = \"x\"\nversion = { workspace = true }\n";
        fs::write(&path, content).unwrap();

        let manifest = Manifest::new(&path);
        let version = ReleaseVersion::parse("2.3.1").unwrap();
        assert!(manifest.preview(&version).is_err());
        assert!(manifest.bump(&version).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn test_round_trip_restores_exact_text() {
        let there = replace_version(CARGO_TOML, "3.0.0").unwrap();
        let back = replace_version(&there, "0.1.0").unwrap();
        assert_eq!(back, CARGO_TOML);
    }

    #[test]
    fn test_manifest_bump_and_read_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Cargo.toml");
        fs::write(&path, CARGO_TOML).unwrap();

        let manifest = Manifest::new(&path);
        assert_eq!(
            manifest.current_version().unwrap(),
            Some(semver::Version::new(0, 1, 0))
        );

        let version = ReleaseVersion::parse("2.3.1").unwrap();
        assert_eq!(manifest.preview(&version).unwrap(), "version = \"2.3.1\"");
        assert_eq!(fs::read_to_string(&path).unwrap(), CARGO_TOML);

        manifest.bump(&version).unwrap();
        assert_eq!(manifest.version_line().unwrap(), "version = \"2.3.1\"");

        let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1, "no backup file should remain");
    }

    #[test]
    fn test_missing_manifest_is_manifest_error() {
        let manifest = Manifest::new("/nonexistent/Cargo.toml");
        let err = manifest.version_line().unwrap_err();
        assert!(err.to_string().starts_with("Manifest error"));
    }
}
