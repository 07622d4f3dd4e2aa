//! Wires the sync endpoint into a Vite project
//!
//! Every config edit is a guarded text insertion: if the marker string
//! is already present the edit is skipped, so running setup twice leaves
//! the project exactly as one run does.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config;
use crate::setup::{assets, detect, SetupReport};

/// Script tag injected into index.html; Vite serves public/ at the root
const SCRIPT_TAG: &str = "<script src=\"/grabby.js\"></script>";

/// Outcome of patching one Vite config in memory
#[derive(Debug)]
pub struct PatchedConfig {
    pub content: String,
    pub changes: Vec<&'static str>,
    pub manual: Vec<&'static str>,
}

fn splice(content: &str, at: usize, insertion: &str) -> String {
    let mut out = String::with_capacity(content.len() + insertion.len());
    out.push_str(&content[..at]);
    out.push_str(insertion);
    out.push_str(&content[at..]);
    out
}

/// Insert right after the `[` that follows `key`, tolerating whitespace
/// between the key and the bracket
fn insert_into_array(content: &str, key: &str, insertion: &str) -> Option<String> {
    let at = content.find(key)?;
    let rest = &content[at + key.len()..];
    let offset = rest.find(|c: char| !c.is_whitespace())?;
    if rest.as_bytes()[offset] != b'[' {
        return None;
    }
    Some(splice(content, at + key.len() + offset + 1, insertion))
}

fn insert_after(content: &str, marker: &str, insertion: &str) -> Option<String> {
    let at = content.find(marker)? + marker.len();
    Some(splice(content, at, insertion))
}

/// Apply the three guarded edits to a Vite config: plugin import, plugin
/// registration, and a watcher ignore for the grab file
pub fn patch_vite_config(content: &str) -> PatchedConfig {
    let mut content = content.to_string();
    let mut changes = Vec::new();
    let mut manual = Vec::new();

    if !content.contains("grabbySyncPlugin") {
        content = format!(
            "import {{ grabbySyncPlugin }} from './{}';\n{content}",
            assets::VITE_PLUGIN_FILE
        );
        changes.push("Added grabbySyncPlugin import");
    }

    if !content.contains("grabbySyncPlugin()") {
        match insert_into_array(&content, "plugins:", "grabbySyncPlugin(), ") {
            Some(updated) => {
                content = updated;
                changes.push("Registered grabbySyncPlugin()");
            }
            None => manual.push("Add grabbySyncPlugin() to the plugins array"),
        }
    }

    if !content.contains(config::GRAB_FILE_NAME) {
        let updated = insert_into_array(&content, "ignored:", "\".grabbed_element\", ")
            .or_else(|| {
                insert_after(
                    &content,
                    "watch: {",
                    "\n      ignored: [\".grabbed_element\"],",
                )
            })
            .or_else(|| {
                insert_after(
                    &content,
                    "server: {",
                    "\n    watch: {\n      ignored: [\".grabbed_element\"],\n    },",
                )
            })
            .or_else(|| {
                insert_after(
                    &content,
                    "export default defineConfig({",
                    "\n  server: {\n    watch: {\n      ignored: [\".grabbed_element\"],\n    },\n  },",
                )
            });
        match updated {
            Some(u) => {
                content = u;
                changes.push("Ignored .grabbed_element in the file watcher");
            }
            None => {
                manual.push("Add \".grabbed_element\" to server.watch.ignored so grabs don't trigger reloads")
            }
        }
    }

    PatchedConfig {
        content,
        changes,
        manual,
    }
}

/// Add the inspector script tag before `</head>`.
/// Returns `None` when the page already loads it.
pub fn patch_index_html(content: &str) -> Option<String> {
    if content.contains("grabby.js") {
        return None;
    }
    let at = content.find("</head>")?;
    Some(splice(content, at, &format!("    {SCRIPT_TAG}\n  ")))
}

/// Run the full Vite setup against a project directory
pub fn apply(root: &Path) -> Result<SetupReport> {
    let mut report = SetupReport::default();

    // Endpoint plugin lives next to the config; created once, never overwritten
    let plugin_path = root.join(assets::VITE_PLUGIN_FILE);
    if plugin_path.exists() {
        report
            .skipped
            .push(format!("{} already exists", assets::VITE_PLUGIN_FILE));
    } else {
        fs::write(&plugin_path, assets::VITE_PLUGIN)
            .with_context(|| format!("Could not write {}", plugin_path.display()))?;
        report
            .changes
            .push(format!("Created {}", assets::VITE_PLUGIN_FILE));
    }

    match detect::vite_config_path(root) {
        Some(config_path) => {
            let name = config_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "vite config".to_string());
            let original = fs::read_to_string(&config_path)
                .with_context(|| format!("Could not read {}", config_path.display()))?;
            let patched = patch_vite_config(&original);

            if patched.content != original {
                fs::write(&config_path, &patched.content)
                    .with_context(|| format!("Could not write {}", config_path.display()))?;
            }
            if patched.changes.is_empty() && patched.manual.is_empty() {
                report.skipped.push(format!("{name} already configured"));
            }
            for change in patched.changes {
                report.changes.push(format!("{change} in {name}"));
            }
            for step in patched.manual {
                report.manual.push(step.to_string());
            }
        }
        None => {
            report.manual.push(format!(
                "No Vite config found; register grabbySyncPlugin() from {} yourself",
                assets::VITE_PLUGIN_FILE
            ));
        }
    }

    let index_path = root.join("index.html");
    if index_path.exists() {
        let original = fs::read_to_string(&index_path)
            .with_context(|| format!("Could not read {}", index_path.display()))?;
        match patch_index_html(&original) {
            Some(content) => {
                fs::write(&index_path, content)
                    .with_context(|| format!("Could not write {}", index_path.display()))?;
                report
                    .changes
                    .push("Added inspector script tag to index.html".to_string());
            }
            None => {
                report
                    .skipped
                    .push("index.html already loads the inspector".to_string());
            }
        }
    } else {
        report
            .manual
            .push(format!("No index.html found; load the inspector with {SCRIPT_TAG}"));
    }

    install_client(root, &mut report)?;

    Ok(report)
}

/// Copy the inspector script into public/ so Vite serves it at /grabby.js
fn install_client(root: &Path, report: &mut SetupReport) -> Result<()> {
    let public = root.join("public");
    fs::create_dir_all(&public)
        .with_context(|| format!("Could not create {}", public.display()))?;

    let client_path = public.join(assets::VITE_CLIENT_FILE);
    let up_to_date = fs::read_to_string(&client_path)
        .map(|current| current == assets::CLIENT_SCRIPT)
        .unwrap_or(false);

    if up_to_date {
        report
            .skipped
            .push("public/grabby.js is up to date".to_string());
    } else {
        fs::write(&client_path, assets::CLIENT_SCRIPT)
            .with_context(|| format!("Could not write {}", client_path.display()))?;
        report
            .changes
            .push("Installed inspector script at public/grabby.js".to_string());
    }
    Ok(())
}
