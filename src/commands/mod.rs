//! CLI command implementations.

use std::{
    env,
    io::{self, IsTerminal},
    path::PathBuf,
};

use crate::error::{Error, Result};

/// Output color handling selection.
#[derive(Debug, Clone, Copy)]
pub enum ColorChoice {
    /// Colorize only when output is a TTY.
    Auto,
    /// Always colorize output.
    Always,
    /// Never colorize output.
    Never,
}

impl ColorChoice {
    /// Determine whether color output should be enabled.
    pub(crate) fn enabled(self) -> bool {
        match self {
            Self::Auto => io::stdout().is_terminal(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Return the directory the command was run from.
fn current_dir() -> Result<PathBuf> {
    env::current_dir().map_err(|error| Error::CurrentDir { source: error })
}

// Command modules are ordered alphabetically - maintain this order.
/// Add command implementation.
pub mod add;
/// Init command implementation.
pub mod init;
