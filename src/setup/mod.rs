//! Project setup: framework detection and idempotent wiring

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

pub mod assets;
pub mod detect;
pub mod next;
pub mod vite;

// Re-exports for library consumers
#[allow(unused_imports)]
pub use detect::{detect_framework, Framework};
#[allow(unused_imports)]
pub use next::NextRouter;

/// What a setup run changed, skipped, and left for the user to finish
#[derive(Debug, Default)]
pub struct SetupReport {
    pub changes: Vec<String>,
    pub skipped: Vec<String>,
    pub manual: Vec<String>,
}

/// Append an entry to the project's .gitignore unless a line already
/// matches it. Creates the file when missing. Returns whether the file
/// changed.
pub fn add_to_gitignore(root: &Path, entry: &str) -> Result<bool> {
    let path = root.join(".gitignore");
    let current = fs::read_to_string(&path).unwrap_or_default();

    if current.lines().any(|line| line.trim() == entry) {
        return Ok(false);
    }

    let mut updated = current;
    if !updated.is_empty() && !updated.ends_with('\n') {
        updated.push('\n');
    }
    updated.push_str(entry);
    updated.push('\n');

    fs::write(&path, updated).with_context(|| format!("Could not write {}", path.display()))?;
    Ok(true)
}
