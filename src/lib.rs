#![warn(missing_docs)]
//! Library support for the neobrutal component installer.

/// Ctrl+C handling.
mod cancel;
/// Installable component names.
mod catalog;
/// Command-line interface wiring and dispatch.
mod cli;
/// Command implementations.
mod commands;
/// Configuration loading and validation.
mod config;
/// Warning aggregation and verbose output.
mod diagnostics;
/// Overwrite previews.
mod diff;
/// Error handling for the crate.
mod error;
/// Batch installation.
mod install;
/// Writing component files to disk.
mod materialize;
/// Color palette and styling for CLI output.
mod palette;
/// Path expansion and normalization utilities.
mod paths;
/// Project detection and package managers.
mod project;
/// Registry descriptors and HTTP client.
mod registry;
/// Import path rewriting.
mod rewrite;
/// Per-run installer state.
mod session;
/// Shared support files.
mod support;
/// Test fixtures.
#[cfg(test)]
mod testutil;

pub use crate::error::{Error, Result};

/// Run the CLI, returning a structured error on failure.
pub async fn run() -> Result<()> {
    cli::run().await
}
