//! Framework detection for the installer

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

/// Config files that mark a Vite project, in match order
pub const VITE_CONFIGS: &[&str] = &["vite.config.ts", "vite.config.js", "vite.config.mjs"];

/// Config files that mark a Next.js project
pub const NEXT_CONFIGS: &[&str] = &["next.config.js", "next.config.mjs", "next.config.ts"];

/// Dev-server framework the installer knows how to wire up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framework {
    Vite,
    Next,
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Framework::Vite => write!(f, "Vite"),
            Framework::Next => write!(f, "Next.js"),
        }
    }
}

/// Detect the project's framework from marker config files or
/// package.json dependencies. Vite wins when both are present.
pub fn detect_framework(root: &Path) -> Option<Framework> {
    let is_vite =
        VITE_CONFIGS.iter().any(|f| root.join(f).exists()) || has_dependency(root, "vite");
    if is_vite {
        return Some(Framework::Vite);
    }

    let is_next =
        NEXT_CONFIGS.iter().any(|f| root.join(f).exists()) || has_dependency(root, "next");
    if is_next {
        return Some(Framework::Next);
    }

    None
}

/// First Vite config file present in the project
pub fn vite_config_path(root: &Path) -> Option<PathBuf> {
    VITE_CONFIGS
        .iter()
        .map(|f| root.join(f))
        .find(|p| p.exists())
}

fn has_dependency(root: &Path, name: &str) -> bool {
    let Ok(raw) = fs::read_to_string(root.join("package.json")) else {
        return false;
    };
    let Ok(pkg) = serde_json::from_str::<Value>(&raw) else {
        return false;
    };
    ["dependencies", "devDependencies"]
        .iter()
        .any(|section| pkg[*section].get(name).is_some())
}
