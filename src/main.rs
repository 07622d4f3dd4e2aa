//! grabby: click an element in your running app, get its metadata on disk
//!
//! Grabby wires a small inspector into a Vite or Next.js dev setup. Holding
//! Cmd/Ctrl highlights elements in the browser; clicking one POSTs its
//! metadata to a sync endpoint that writes `.grabbed_element` at the project
//! root, where an AI coding agent can pick it up.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod setup;
mod sync;

#[derive(Parser)]
#[command(name = "grabby")]
#[command(about = "Element inspector bridging running web apps and AI coding agents", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Set up Grabby in a Vite or Next.js project
    Init {
        /// Simulate the run without touching the project
        #[arg(long)]
        demo: bool,

        /// Accept install prompts without asking
        #[arg(short, long)]
        yes: bool,

        /// Project directory (defaults to the current directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Shortcut for init --demo
    Demo {
        /// Project directory (defaults to the current directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Run the standalone sync server with a built-in playground page
    Serve {
        /// Address to bind
        #[arg(long, default_value = config::DEFAULT_HOST)]
        host: String,

        /// Port to bind
        #[arg(short, long, default_value_t = config::DEFAULT_PORT)]
        port: u16,

        /// Project directory the grab file is written to
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Check the environment and project wiring
    Doctor {
        /// Project directory (defaults to the current directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Init { demo, yes, dir } => {
            commands::init::execute(commands::init::InitOptions { demo, yes, dir })?;
        }

        Commands::Demo { dir } => {
            commands::init::execute(commands::init::InitOptions {
                demo: true,
                yes: false,
                dir,
            })?;
        }

        Commands::Serve { host, port, dir } => {
            commands::serve::execute(commands::serve::ServeOptions { host, port, dir })?;
        }

        Commands::Doctor { dir } => {
            let output = commands::doctor::execute(dir)?;
            println!("{}", output);
        }
    }

    Ok(())
}
