use crate::error::{ReleaseError, Result};

const PLACEHOLDER: &str = "{version}";

/// Tag naming pattern (e.g., "v{version}", "release-{version}")
#[derive(Debug, Clone)]
pub struct TagPattern {
    pub pattern: String,
}

impl TagPattern {
    /// Create a new tag pattern
    pub fn new(pattern: impl Into<String>) -> Self {
        TagPattern {
            pattern: pattern.into(),
        }
    }

    /// Ensure the pattern carries exactly one {version} placeholder
    pub fn validate(&self) -> Result<()> {
        match self.pattern.matches(PLACEHOLDER).count() {
            1 => Ok(()),
            0 => Err(ReleaseError::config(format!(
                "tag pattern '{}' must contain {{version}}",
                self.pattern
            ))),
            _ => Err(ReleaseError::config(format!(
                "tag pattern '{}' should have exactly one {{version}} placeholder",
                self.pattern
            ))),
        }
    }

    /// Format a version according to pattern
    /// Example: pattern="v{version}", version="1.2.3" -> "v1.2.3"
    pub fn format(&self, version: &str) -> String {
        self.pattern.replace(PLACEHOLDER, version)
    }
}

impl Default for TagPattern {
    fn default() -> Self {
        TagPattern::new("v{version}")
    }
}

/// Render a message template such as "chore: bump version to {version}"
pub fn render_template(template: &str, version: &str) -> String {
    template.replace(PLACEHOLDER, version)
}
