//! Run the standalone sync server

use std::path::PathBuf;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

use crate::config;
use crate::sync::{GrabStore, ServerConfig, SyncServer};

/// Options for the serve command
#[derive(Debug)]
pub struct ServeOptions {
    pub host: String,
    pub port: u16,
    pub dir: Option<PathBuf>,
}

/// Execute the serve command. Blocks until ctrl-c.
pub fn execute(options: ServeOptions) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("grabby=info")),
        )
        .init();

    let root = config::project_root(options.dir.as_deref())?;
    let store = GrabStore::new(&root);

    let base = format!("http://{}:{}", options.host, options.port);
    println!("{}", "Grabby sync server".bold());
    println!("  playground  {base}/");
    println!("  inspector   {base}{}", config::CLIENT_ROUTE);
    println!("  sync route  {base}{}", config::SYNC_ROUTE);
    println!("  output      {}", store.path().display());
    println!("\nPress ctrl-c to stop.\n");

    let server = SyncServer::new(
        ServerConfig {
            host: options.host,
            port: options.port,
        },
        store,
    );

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Could not start the async runtime")?
        .block_on(server.run())
}
