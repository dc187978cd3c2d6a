// tests/integration_test.rs
mod common;

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use common::{commit_release_config, head_message, read, setup_project, MANIFEST};

fn release(dir: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_release"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute release binary");

    // The binary may exit before reading stdin
    if let Some(mut pipe) = child.stdin.take() {
        let _ = pipe.write_all(stdin.as_bytes());
    }
    child.wait_with_output().unwrap()
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).to_string()
}

#[test]
fn test_release_help() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = release(dir.path(), &["--help"], "");

    assert!(output.status.success());
    let stdout = text(&output.stdout);
    assert!(stdout.contains("release"));
    assert!(stdout.contains("Example: release 1.2.3"));
}

#[test]
fn test_release_version_flag() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = release(dir.path(), &["--version"], "");

    assert!(output.status.success());
    assert!(text(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_arguments_prints_usage() {
    // Not a repository: proves usage is checked before git is touched
    let dir = tempfile::TempDir::new().unwrap();
    let output = release(dir.path(), &[], "");

    assert_eq!(output.status.code(), Some(1));
    let stderr = text(&output.stderr);
    assert!(stderr.contains("Usage: release <VERSION>"));
    assert!(stderr.contains("Example: release 1.2.3"));
}

#[test]
fn test_extra_arguments_exit_with_one() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = release(dir.path(), &["1.0.0", "2.0.0"], "");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_invalid_version_leaves_files_untouched() {
    let (dir, _git) = setup_project();

    for bad in ["1.2", "v1.2.3", "1.2.3-rc.1", "latest"] {
        let output = release(dir.path(), &[bad], "y\ny\n");
        assert_eq!(output.status.code(), Some(1), "version {}", bad);
        assert!(text(&output.stderr).contains("Invalid version"));
        assert_eq!(read(dir.path(), "Cargo.toml"), MANIFEST);
    }
}

#[test]
fn test_outside_repository_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = release(dir.path(), &["1.0.0"], "");

    assert_eq!(output.status.code(), Some(1));
    assert!(text(&output.stderr).contains("Not in a git repository"));
}

#[cfg(unix)]
#[test]
fn test_dirty_tree_exits_with_one() {
    let (dir, git) = setup_project();
    commit_release_config(&git, dir.path(), "");
    std::fs::write(dir.path().join("scratch.txt"), "wip").unwrap();

    let output = release(dir.path(), &["2.3.1"], "y\n");

    assert_eq!(output.status.code(), Some(1));
    assert!(text(&output.stderr).contains("scratch.txt"));
    assert_eq!(read(dir.path(), "Cargo.toml"), MANIFEST);
}

#[cfg(unix)]
#[test]
fn test_confirmed_release_from_piped_stdin() {
    let (dir, git) = setup_project();
    commit_release_config(&git, dir.path(), "");

    let output = release(dir.path(), &["2.3.1"], "y\n");

    assert!(output.status.success(), "stderr: {}", text(&output.stderr));
    assert_eq!(head_message(&git), "chore: bump version to 2.3.1");
    assert!(git.find_reference("refs/tags/v2.3.1").is_ok());

    let stdout = text(&output.stdout);
    assert!(stdout.contains("git push origin v2.3.1"));
    assert!(stdout.contains("gh workflow run release.yml -f version=2.3.1"));
}

#[cfg(unix)]
#[test]
fn test_declined_release_exits_zero_and_restores() {
    let (dir, git) = setup_project();
    commit_release_config(&git, dir.path(), "");

    let output = release(dir.path(), &["2.3.1"], "n\n");

    assert!(output.status.success(), "stderr: {}", text(&output.stderr));
    assert_eq!(read(dir.path(), "Cargo.toml"), MANIFEST);
    assert_eq!(head_message(&git), "Add release config");
    assert!(git.find_reference("refs/tags/v2.3.1").is_err());
}

#[cfg(unix)]
#[test]
fn test_yes_flag_skips_prompts() {
    let (dir, git) = setup_project();
    commit_release_config(&git, dir.path(), "");
    common::switch_branch(&git, "hotfix");

    let output = release(dir.path(), &["--yes", "0.1.1"], "");

    assert!(output.status.success(), "stderr: {}", text(&output.stderr));
    assert_eq!(head_message(&git), "chore: bump version to 0.1.1");
    assert!(text(&output.stdout).contains("git push origin hotfix"));
}

#[cfg(unix)]
#[test]
fn test_dry_run_changes_nothing() {
    let (dir, git) = setup_project();
    commit_release_config(&git, dir.path(), "");

    let output = release(dir.path(), &["--dry-run", "2.3.1"], "");

    assert!(output.status.success(), "stderr: {}", text(&output.stderr));
    assert!(text(&output.stdout).contains("version = \"2.3.1\""));
    assert_eq!(read(dir.path(), "Cargo.toml"), MANIFEST);
    assert_eq!(head_message(&git), "Add release config");
}
