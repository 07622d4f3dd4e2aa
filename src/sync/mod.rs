//! Sync endpoint: receives grabs and persists them for the agent

pub mod server;
pub mod store;

// Re-exports for library consumers
#[allow(unused_imports)]
pub use server::{router, ServerConfig, SyncServer};
#[allow(unused_imports)]
pub use store::{GrabStore, SyncError};
