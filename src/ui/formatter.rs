//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.
//! Styling goes through `console`, which drops colors when output is not a terminal.

use console::style;

use crate::boundary::BoundaryWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow().bold(), warning);
}

/// List the paths that keep the working tree from being clean.
pub fn display_changed_paths(paths: &[String]) {
    eprintln!(
        "{} Working tree has uncommitted changes. Commit or stash them first:",
        style("ERROR:").red().bold()
    );
    for path in paths {
        eprintln!("  {}", style(path).red());
    }
}

/// Display the version change about to be written.
///
/// # Arguments
/// * `current` - Version line currently in the manifest (None if unreadable)
/// * `new_line` - Version line that will replace it
pub fn display_proposed_version(manifest: &str, current: Option<&str>, new_line: &str) {
    println!("\n{}", style(format!("Updating {}:", manifest)).bold());
    if let Some(current) = current {
        println!("  From: {}", style(current).red());
    }
    println!("  To:   {}", style(new_line).green());
}

/// Show the version line as read back from the manifest after the bump.
pub fn display_version_line(manifest: &str, line: &str) {
    println!(
        "\n{}",
        style(format!("Version line in {}:", manifest)).bold()
    );
    println!("  {}", style(line).cyan());
}

/// Show how to publish the release once it is committed and tagged.
///
/// # Arguments
/// * `remote` - Remote to push to (e.g., "origin")
/// * `branch` - Branch holding the release commit
/// * `tag` - The release tag
/// * `workflow` - Workflow file for the dispatch alternative
/// * `version` - The released version
pub fn display_push_guidance(remote: &str, branch: &str, tag: &str, workflow: &str, version: &str) {
    println!("{}", format_push_guidance(remote, branch, tag, workflow, version));
}

/// Build the text shown by [display_push_guidance].
pub fn format_push_guidance(
    remote: &str,
    branch: &str,
    tag: &str,
    workflow: &str,
    version: &str,
) -> String {
    let lines = vec![
        format!("\n{} To publish this release, run:", style("→").yellow()),
        format!("  {}", style(format!("git push {} {}", remote, branch)).cyan()),
        format!("  {}", style(format!("git push {} {}", remote, tag)).cyan()),
        format!("\n{} Or trigger the release workflow:", style("→").yellow()),
        format!(
            "  {}",
            style(format!("gh workflow run {} -f version={}", workflow, version)).cyan()
        ),
    ];
    lines.join("\n")
}

/// Report which files were put back to their state before the release.
pub fn display_rollback(paths: &[String]) {
    println!(
        "{} Restored {} to their state before the release",
        style("↺").yellow(),
        paths.join(", ")
    );
}
