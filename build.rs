use std::process::Command;

fn git_output(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }

    let value = String::from_utf8(output.stdout).ok()?.trim().to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn main() {
    let pkg_version = std::env::var("CARGO_PKG_VERSION").unwrap_or_default();
    let hash = git_output(&["rev-parse", "--short", "HEAD"]);
    let tag = git_output(&["describe", "--tags", "--exact-match"]);

    // "0.1.0 (v0.1.0 abc1234)" on a tag, "0.1.0 (abc1234)" otherwise
    let build_version = match (tag, hash) {
        (Some(tag), Some(hash)) => format!("{} ({} {})", pkg_version, tag, hash),
        (None, Some(hash)) => format!("{} ({})", pkg_version, hash),
        _ => pkg_version,
    };

    println!("cargo:rustc-env=BUILD_VERSION={}", build_version);
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");
}
