//! Error types for the neobrutal CLI.

use std::{
    env::VarError,
    io,
    path::PathBuf,
    process::ExitCode,
    result::Result as StdResult,
};

use thiserror::Error;
use toml::{de::Error as TomlError, ser::Error as TomlSerError};

/// Result type for installer operations.
pub type Result<T> = StdResult<T, Error>;

/// Errors that can occur while running the CLI.
#[derive(Debug, Error)]
pub enum Error {
    /// The working directory does not look like a supported project.
    #[error("No {marker} found in {dir}. Run this command from the root of your project.")]
    NotAProject {
        /// Directory that was checked.
        dir: PathBuf,
        /// Marker file that was expected.
        marker: &'static str,
    },
    /// The working directory could not be determined.
    #[error("Failed to resolve the current directory: {source}")]
    CurrentDir {
        /// Underlying IO error.
        source: io::Error,
    },
    /// The configuration file could not be read.
    #[error("Failed to read config at {path}: {source}")]
    ConfigRead {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The configuration file could not be parsed.
    #[error("Failed to parse config at {path}: {source}")]
    ConfigParse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying parse error.
        source: TomlError,
    },
    /// The configuration file could not be serialized.
    #[error("Failed to serialize config: {source}")]
    ConfigSerialize {
        /// Underlying serialization error.
        source: TomlSerError,
    },
    /// The configuration file could not be written.
    #[error("Failed to write config at {path}: {source}")]
    ConfigWrite {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// A configured path could not be expanded.
    #[error("Invalid path: {path}: {source}")]
    PathExpansion {
        /// Input path that failed to expand.
        path: String,
        /// Underlying expansion error.
        source: shellexpand::LookupError<VarError>,
    },
    /// The registry URL could not be parsed.
    #[error("Invalid registry URL: {url}")]
    InvalidUrl {
        /// The invalid URL.
        url: String,
    },
    /// A plain HTTP registry was configured for a non-local host.
    #[error("HTTP registries are only allowed on localhost. Use HTTPS: {url}")]
    HttpNotAllowed {
        /// The HTTP URL.
        url: String,
    },
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {message}")]
    HttpClient {
        /// Error message.
        message: String,
    },
    /// The registry has no component with this name.
    #[error("Component '{name}' not found in registry (HTTP {status})")]
    ComponentNotFound {
        /// Requested component name.
        name: String,
        /// HTTP status returned by the registry.
        status: u16,
    },
    /// The registry answered with something that is not a component descriptor.
    #[error("Malformed registry response for '{name}': {message}")]
    MalformedResponse {
        /// Requested component name.
        name: String,
        /// Parse error message.
        message: String,
    },
    /// The registry request failed before a response arrived.
    #[error("Failed to fetch '{name}' from {url}: {message}")]
    Fetch {
        /// Requested component name.
        name: String,
        /// URL that was requested.
        url: String,
        /// Error message.
        message: String,
    },
    /// A requested name cannot be used as a directory name.
    #[error("Invalid component name: '{name}'")]
    InvalidComponentName {
        /// Requested component name.
        name: String,
    },
    /// A descriptor file has a target with no usable file name.
    #[error("Component '{name}' has a file with an invalid target: '{target}'")]
    InvalidTarget {
        /// Owning component name.
        name: String,
        /// Raw target value from the descriptor.
        target: String,
    },
    /// A file could not be read.
    #[error("Failed to read {path}: {source}")]
    FileRead {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// A file or directory could not be written.
    #[error("Failed to write {path}: {source}")]
    FileWrite {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// An interactive prompt was interrupted or canceled.
    #[error("Prompt canceled.")]
    PromptCanceled,
    /// An interactive prompt failed.
    #[error("Prompt failed: {message}")]
    PromptFailed {
        /// Error message describing the prompt failure.
        message: String,
    },
    /// The run was interrupted with Ctrl+C.
    #[error("Interrupted.")]
    Interrupted,
    /// Some components failed and strict mode was requested.
    #[error("{count} component(s) failed to install.")]
    IncompleteInstall {
        /// Number of failed components.
        count: usize,
    },
}

impl Error {
    /// Map errors to exit codes for CLI termination.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Interrupted | Self::PromptCanceled => ExitCode::from(130),
            _ => ExitCode::from(1),
        }
    }

    /// Whether this error must end the whole run rather than one component.
    pub(crate) fn is_fatal(&self) -> bool {
        matches!(self, Self::Interrupted | Self::PromptCanceled)
    }
}
