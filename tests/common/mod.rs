#![allow(dead_code)]

use git2::{Repository, Signature};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const MANIFEST: &str = "[package]\nname = \"demo\"\nversion = \"0.1.0\"\nedition = \"2021\"\n\n[dependencies]\nlog = { version = \"0.4\" }\n";
pub const LOCK: &str = "# generated\n[[package]]\nname = \"demo\"\nversion = \"0.1.0\"\n";

/// Temporary repository with Cargo.toml and Cargo.lock committed on `main`
pub fn setup_project() -> (TempDir, Repository) {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");

    {
        let mut config = repo.config().expect("Could not get config");
        config
            .set_str("user.name", "Test User")
            .expect("Could not set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Could not set user.email");
    }
    repo.set_head("refs/heads/main")
        .expect("Could not point HEAD at main");

    fs::write(temp_dir.path().join("Cargo.toml"), MANIFEST).unwrap();
    fs::write(temp_dir.path().join("Cargo.lock"), LOCK).unwrap();
    commit_all(&repo, &["Cargo.toml", "Cargo.lock"], "Initial commit");

    (temp_dir, repo)
}

/// Stage `paths` and commit them on HEAD
pub fn commit_all(repo: &Repository, paths: &[&str], message: &str) {
    let mut index = repo.index().expect("Could not get index");
    for path in paths {
        index
            .add_path(Path::new(path))
            .expect("Could not add file to index");
    }
    index.write().expect("Could not write index");

    let tree_id = index.write_tree().expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");
    let sig = Signature::now("Test User", "test@example.com").unwrap();

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .expect("Could not create commit");
}

/// Write a release.toml whose dependency check appends to Cargo.lock, and commit it
pub fn commit_release_config(repo: &Repository, dir: &Path, extra: &str) {
    let content = format!(
        "[dependency_check]\ncommand = [\"sh\", \"-c\", \"echo '# refreshed' >> Cargo.lock\"]\n{}",
        extra
    );
    fs::write(dir.join("release.toml"), content).unwrap();
    commit_all(repo, &["release.toml"], "Add release config");
}

/// Create `name` at HEAD and check it out
pub fn switch_branch(repo: &Repository, name: &str) {
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    repo.branch(name, &head, false).unwrap();
    repo.set_head(&format!("refs/heads/{}", name)).unwrap();
}

pub fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

pub fn head_message(repo: &Repository) -> String {
    repo.head()
        .unwrap()
        .peel_to_commit()
        .unwrap()
        .message()
        .unwrap_or("")
        .to_string()
}

/// Temporary repository where Cargo.lock is gitignored and exists only on disk
pub fn setup_project_with_ignored_lock(lock: &str) -> (TempDir, Repository) {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");

    {
        let mut config = repo.config().expect("Could not get config");
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
    }
    repo.set_head("refs/heads/main")
        .expect("Could not point HEAD at main");

    fs::write(temp_dir.path().join(".gitignore"), "Cargo.lock\n").unwrap();
    fs::write(temp_dir.path().join("Cargo.toml"), MANIFEST).unwrap();
    commit_all(&repo, &[".gitignore", "Cargo.toml"], "Initial commit");
    fs::write(temp_dir.path().join("Cargo.lock"), lock).unwrap();

    (temp_dir, repo)
}

/// Paths in the tree of the HEAD commit
pub fn head_paths(repo: &Repository) -> Vec<String> {
    let tree = repo.head().unwrap().peel_to_tree().unwrap();
    tree.iter()
        .filter_map(|entry| entry.name().map(str::to_string))
        .collect()
}
