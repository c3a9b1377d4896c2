// ABOUTME: Library root for wocker - resolution, naming and archive batches.
// ABOUTME: The main binary is in main.rs.

pub mod archive;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod fs;
pub mod inventory;
pub mod output;
pub mod resolve;
pub mod runtime;
pub mod types;
