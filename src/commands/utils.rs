//! Shared utilities for commands

use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

/// Ask a yes/no question on stdin, defaulting to no
pub fn confirm(question: &str) -> Result<bool> {
    print!("{question} (y/N) ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Spinner shown while a step runs
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn finish_ok(pb: &ProgressBar, message: &str) {
    pb.finish_and_clear();
    println!("{} {message}", "✓".green());
}

pub fn finish_warn(pb: &ProgressBar, message: &str) {
    pb.finish_and_clear();
    println!("{} {message}", "⚠".yellow());
}

/// Whether an executable on PATH responds to `--version`
pub fn command_exists(name: &str) -> bool {
    Command::new(name)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

fn progress_bar(label: &str) -> ProgressBar {
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("  {msg} [{bar:30.cyan/blue}] {percent}%")
            .unwrap()
            .progress_chars("=> "),
    );
    bar.set_message(label.to_string());
    bar
}

/// Run an installer while animating a progress bar. The bar creeps toward
/// 90% until the child exits, then jumps to done.
///
/// Returns whether the command exited successfully.
pub fn run_with_progress(label: &str, program: &str, args: &[&str]) -> Result<bool> {
    let bar = progress_bar(label);
    let mut child = Command::new(program)
        .args(args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Could not start {program}"))?;

    loop {
        match child.try_wait()? {
            Some(status) => {
                bar.set_position(100);
                bar.finish_and_clear();
                return Ok(status.success());
            }
            None => {
                let pos = bar.position();
                if pos < 90 {
                    bar.set_position(pos + 3);
                }
                std::thread::sleep(Duration::from_millis(150));
            }
        }
    }
}

/// Animate a fake install for demo mode; runs nothing
pub fn simulate_progress(label: &str) {
    let bar = progress_bar(label);
    let mut pos = 0;
    while pos < 100 {
        pos = (pos + 7).min(100);
        bar.set_position(pos);
        std::thread::sleep(Duration::from_millis(40));
    }
    bar.finish_and_clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_command_reports_false() {
        assert!(!command_exists("grabby-command-that-cannot-exist"));
    }
}
