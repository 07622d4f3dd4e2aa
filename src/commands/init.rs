//! Interactive project setup

use std::path::PathBuf;

use anyhow::Result;
use owo_colors::OwoColorize;

use super::utils;
use crate::config;
use crate::setup::{self, detect_framework, next, vite, Framework, SetupReport};
use crate::sync::GrabStore;

const BANNER: &str = r"
   ██████╗ ██████╗  █████╗ ██████╗ ██████╗ ██╗   ██╗
  ██╔════╝ ██╔══██╗██╔══██╗██╔══██╗██╔══██╗╚██╗ ██╔╝
  ██║  ███╗██████╔╝███████║██████╔╝██████╔╝ ╚████╔╝
  ██║   ██║██╔══██╗██╔══██║██╔══██╗██╔══██╗  ╚██╔╝
  ╚██████╔╝██║  ██║██║  ██║██████╔╝██████╔╝   ██║
   ╚═════╝ ╚═╝  ╚═╝╚═╝  ╚═╝╚═════╝ ╚═════╝    ╚═╝
";

/// Options for the init command
#[derive(Debug, Default)]
pub struct InitOptions {
    /// Simulate the run: report tools as missing, write nothing
    pub demo: bool,
    /// Accept install prompts without asking
    pub yes: bool,
    /// Project directory (defaults to the current directory)
    pub dir: Option<PathBuf>,
}

/// Execute the init command
pub fn execute(options: InitOptions) -> Result<()> {
    let root = config::project_root(options.dir.as_deref())?;

    println!("{}", BANNER.cyan());
    println!("  Interactive element inspector for AI frontend development\n");

    if options.demo {
        println!("{}\n", "(DEMO MODE - no changes will be made)".blue());
    }

    check_environment(&options)?;
    println!();

    let spinner = utils::spinner("Detecting framework");
    let framework = detect_framework(&root);
    match framework {
        Some(fw) => utils::finish_ok(&spinner, &format!("{fw} detected")),
        None => utils::finish_warn(&spinner, "No supported framework detected"),
    }

    match framework {
        Some(fw) if options.demo => {
            println!(
                "  {}",
                format!("(demo) Skipping {fw} setup - no files were changed.").blue()
            );
        }
        Some(fw) => {
            let result = match fw {
                Framework::Vite => vite::apply(&root),
                Framework::Next => next::apply(&root),
            };
            match result {
                Ok(report) => {
                    print_report(&report);
                    if fw == Framework::Next {
                        if let Some(router) = next::detect_router(&root) {
                            println!("\n{}", next::script_snippet(router).dimmed());
                        }
                    }
                }
                Err(err) => {
                    println!("{} {err:#}", "✗".red());
                    println!(
                        "  {}",
                        "Finish the framework setup by hand, then re-run grabby init.".dimmed()
                    );
                }
            }
        }
        None => {
            println!(
                "  {}",
                "Manual setup required; see the standalone server notes below.".dimmed()
            );
        }
    }

    if options.demo {
        println!(
            "  {}",
            format!(
                "(demo) Skipped writing {} and .gitignore.",
                config::GRAB_FILE_NAME
            )
            .blue()
        );
    } else {
        let store = GrabStore::new(&root);
        if store.write_placeholder()? {
            println!("{} Created {}", "✓".green(), config::GRAB_FILE_NAME);
        }
        if setup::add_to_gitignore(&root, config::GRAB_FILE_NAME)? {
            println!(
                "{} Added {} to .gitignore",
                "✓".green(),
                config::GRAB_FILE_NAME
            );
        }
    }

    print_summary(framework);
    Ok(())
}

/// Check for optional tooling, offering to install what is missing.
/// Every outcome is non-fatal; the setup continues either way.
fn check_environment(options: &InitOptions) -> Result<()> {
    let spinner = utils::spinner("Checking Homebrew");
    let has_brew = !options.demo && utils::command_exists("brew");
    if has_brew {
        utils::finish_ok(&spinner, "Homebrew ready");
    } else {
        utils::finish_warn(&spinner, "Homebrew missing (optional but recommended)");
        println!("  {}", "Install from: https://brew.sh/".dimmed());
    }

    let spinner = utils::spinner("Checking mgrep");
    let has_mgrep = !options.demo && utils::command_exists("mgrep");
    if has_mgrep {
        utils::finish_ok(&spinner, "mgrep ready");
    } else {
        utils::finish_warn(&spinner, "mgrep not installed");
        if options.yes || utils::confirm("Install @mixedbread-ai/mgrep globally?")? {
            let installed = if options.demo {
                utils::simulate_progress("Installing mgrep");
                true
            } else {
                utils::run_with_progress(
                    "Installing mgrep",
                    "npm",
                    &["install", "-g", "@mixedbread-ai/mgrep"],
                )?
            };
            if installed {
                println!("{} mgrep installed", "✓".green());
            } else {
                println!("{} mgrep installation failed", "✗".red());
                println!(
                    "  {}",
                    "Install manually: npm install -g @mixedbread-ai/mgrep".dimmed()
                );
            }
        } else {
            println!(
                "  {}",
                "Skipped. Install manually: npm install -g @mixedbread-ai/mgrep".dimmed()
            );
        }
    }

    let spinner = utils::spinner("Checking comby");
    let has_comby = !options.demo && utils::command_exists("comby");
    if has_comby {
        utils::finish_ok(&spinner, "comby ready");
    } else {
        utils::finish_warn(&spinner, "comby not installed");
        if options.yes || utils::confirm("Install comby via Homebrew?")? {
            if options.demo {
                utils::simulate_progress("Installing comby");
                println!("{} comby installed", "✓".green());
            } else if has_brew {
                if utils::run_with_progress("Installing comby", "brew", &["install", "comby"])? {
                    println!("{} comby installed", "✓".green());
                } else {
                    println!("{} comby installation failed", "✗".red());
                    println!("  {}", "Install manually: brew install comby".dimmed());
                }
            } else {
                println!("  {}", "Cannot install comby without Homebrew".red());
                println!("  {}", "Install manually: brew install comby".dimmed());
            }
        } else {
            println!("  {}", "Skipped. Install manually: brew install comby".dimmed());
        }
    }

    Ok(())
}

fn print_report(report: &SetupReport) {
    for change in &report.changes {
        println!("{} {change}", "✓".green());
    }
    for skipped in &report.skipped {
        println!("  {}", skipped.dimmed());
    }
    for manual in &report.manual {
        println!("{} {manual}", "⚠".yellow());
    }
}

fn print_summary(framework: Option<Framework>) {
    println!("\n{}", "Setup complete".green().bold());
    println!("\n{}", "Next steps:".bold());
    println!("  1. Start your dev server: {}", "npm run dev".cyan());
    println!("  2. Append {} to your browser URL", "?grab=true".blue());
    println!("  3. Hold {} and click any element", "Cmd/Ctrl".bold());

    if framework.is_none() {
        let port = config::DEFAULT_PORT;
        println!("\nNo framework detected. Run the standalone sync server instead:");
        println!("  {}", "grabby serve".cyan());
        println!("then load the inspector from your page:");
        println!(
            "  <script src=\"http://127.0.0.1:{port}{}\"",
            config::CLIENT_ROUTE
        );
        println!(
            "          data-grabby-endpoint=\"http://127.0.0.1:{port}{}\"></script>",
            config::SYNC_ROUTE
        );
    }
}
