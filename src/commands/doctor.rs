//! Diagnostic checks for the environment and project wiring

use std::fs;
use std::net::TcpListener;
use std::path::{Path, PathBuf};

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};

use super::utils::command_exists;
use crate::config;
use crate::setup::{assets, detect, detect_framework, next, Framework};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// The result of a single diagnostic check
pub struct CheckResult {
    pub name: &'static str,
    pub status: CheckStatus,
    pub detail: String,
}

impl CheckResult {
    fn pass(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            status: CheckStatus::Pass,
            detail: detail.into(),
        }
    }

    fn warn(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            status: CheckStatus::Warn,
            detail: detail.into(),
        }
    }

    fn fail(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            status: CheckStatus::Fail,
            detail: detail.into(),
        }
    }
}

/// Run every check against a project directory
pub fn run_checks(root: &Path) -> Vec<CheckResult> {
    let framework = detect_framework(root);
    vec![
        check_tool("Homebrew", "brew", "install from https://brew.sh/"),
        check_tool("mgrep", "mgrep", "npm install -g @mixedbread-ai/mgrep"),
        check_tool("comby", "comby", "brew install comby"),
        check_framework(framework),
        check_sync_endpoint(root, framework),
        check_client_script(root, framework),
        check_grab_file(root),
        check_port(),
    ]
}

fn check_tool(name: &'static str, binary: &str, hint: &str) -> CheckResult {
    if command_exists(binary) {
        CheckResult::pass(name, "found on PATH")
    } else {
        CheckResult::warn(name, format!("not found ({hint})"))
    }
}

fn check_framework(framework: Option<Framework>) -> CheckResult {
    match framework {
        Some(fw) => CheckResult::pass("Framework", fw.to_string()),
        None => CheckResult::warn("Framework", "no Vite or Next.js project found"),
    }
}

fn check_sync_endpoint(root: &Path, framework: Option<Framework>) -> CheckResult {
    const NAME: &str = "Sync endpoint";
    match framework {
        Some(Framework::Vite) => {
            let wired = detect::vite_config_path(root)
                .and_then(|path| fs::read_to_string(path).ok())
                .map(|content| content.contains("grabbySyncPlugin()"))
                .unwrap_or(false);
            if wired && root.join(assets::VITE_PLUGIN_FILE).exists() {
                CheckResult::pass(NAME, "grabbySyncPlugin wired into the Vite config")
            } else {
                CheckResult::warn(NAME, "not wired (run grabby init)")
            }
        }
        Some(Framework::Next) => match next::detect_router(root) {
            Some(router) if next::route_file(root, router).exists() => {
                CheckResult::pass(NAME, format!("{router} route file present"))
            }
            Some(_) => CheckResult::warn(NAME, "route file missing (run grabby init)"),
            None => CheckResult::warn(NAME, "no app/ or pages/ directory found"),
        },
        None => CheckResult::warn(NAME, "no framework; grabby serve hosts the endpoint itself"),
    }
}

fn check_client_script(root: &Path, framework: Option<Framework>) -> CheckResult {
    const NAME: &str = "Client script";
    let expected: Option<PathBuf> = match framework {
        Some(Framework::Vite) => Some(root.join("public").join(assets::VITE_CLIENT_FILE)),
        Some(Framework::Next) => Some(root.join("public").join(assets::NEXT_CLIENT_FILE)),
        None => None,
    };
    match expected {
        Some(path) if path.exists() => {
            CheckResult::pass(NAME, format!("public/{} present", file_name(&path)))
        }
        Some(path) => CheckResult::warn(
            NAME,
            format!("public/{} missing (run grabby init)", file_name(&path)),
        ),
        None => CheckResult::warn(NAME, "grabby serve serves the script at /grabby.js"),
    }
}

fn check_grab_file(root: &Path) -> CheckResult {
    const NAME: &str = "Output file";
    let path = config::grab_file_path(root);
    if !path.exists() {
        return CheckResult::warn(NAME, ".grabbed_element not created yet (run grabby init)");
    }
    match fs::read_to_string(&path) {
        Ok(content) if serde_json::from_str::<serde_json::Value>(&content).is_ok() => {
            CheckResult::pass(NAME, ".grabbed_element holds valid JSON")
        }
        Ok(_) => CheckResult::fail(NAME, ".grabbed_element exists but is not valid JSON"),
        Err(err) => CheckResult::fail(NAME, format!(".grabbed_element is unreadable: {err}")),
    }
}

fn check_port() -> CheckResult {
    const NAME: &str = "Serve port";
    let addr = format!("{}:{}", config::DEFAULT_HOST, config::DEFAULT_PORT);
    if TcpListener::bind(&addr).is_ok() {
        CheckResult::pass(NAME, format!("port {} is free", config::DEFAULT_PORT))
    } else {
        CheckResult::warn(
            NAME,
            format!(
                "port {} is in use (grabby serve already running?)",
                config::DEFAULT_PORT
            ),
        )
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Render the check results as a table
pub fn render(results: &[CheckResult]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Check"),
        Cell::new("Status"),
        Cell::new("Detail"),
    ]);

    for result in results {
        let status = match result.status {
            CheckStatus::Pass => Cell::new("pass").fg(Color::Green),
            CheckStatus::Warn => Cell::new("warn").fg(Color::Yellow),
            CheckStatus::Fail => Cell::new("fail").fg(Color::Red),
        };
        table.add_row(vec![Cell::new(result.name), status, Cell::new(&result.detail)]);
    }

    let passed = results
        .iter()
        .filter(|r| r.status == CheckStatus::Pass)
        .count();
    let warned = results
        .iter()
        .filter(|r| r.status == CheckStatus::Warn)
        .count();
    let failed = results
        .iter()
        .filter(|r| r.status == CheckStatus::Fail)
        .count();

    let mut output = table.to_string();
    output.push_str(&format!(
        "\n\n{passed} passed, {warned} warnings, {failed} failed"
    ));
    output
}

/// Checks are informational; the command succeeds even with failures
pub fn execute(dir: Option<PathBuf>) -> Result<String> {
    let root = config::project_root(dir.as_deref())?;
    let results = run_checks(&root);
    Ok(render(&results))
}
