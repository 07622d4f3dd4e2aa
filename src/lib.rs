//! grabby library
//!
//! Core functionality for the Grabby element inspector: a pure element
//! inspection engine, the sync server that records clicked elements to
//! `.grabbed_element`, and the framework setup used by the CLI.

pub mod config;
pub mod inspector;
pub mod setup;
pub mod sync;
