//! CLI commands

pub mod doctor;
pub mod init;
pub mod serve;
pub mod utils;
