//! Configuration loading and validation.

use std::{
    fs,
    io::ErrorKind,
    net::IpAddr,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    error::{Error, Result},
    paths,
};

/// Config file name, looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "neobrutal.toml";
/// Registry used when none is configured.
pub const DEFAULT_REGISTRY: &str = "https://neobrutal.dev/r";
/// Directory that receives component folders.
pub const DEFAULT_COMPONENTS_DIR: &str = "src/components/ui";
/// Location of the shared utilities helper.
pub const DEFAULT_UTILS_PATH: &str = "src/lib/utils.ts";
/// Registry request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Raw config file structure. Every field is optional.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Registry base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,
    /// Components directory, relative to the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<String>,
    /// Utilities helper path, relative to the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utils: Option<String>,
    /// Request timeout in seconds; `0` disables it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl RawConfig {
    /// The values `init` writes to a fresh config file.
    pub(crate) fn defaults() -> Self {
        Self {
            registry: Some(DEFAULT_REGISTRY.to_string()),
            components: Some(DEFAULT_COMPONENTS_DIR.to_string()),
            utils: Some(DEFAULT_UTILS_PATH.to_string()),
            timeout: Some(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Overlay `other` on top of `self`, preferring values set in `other`.
    pub(crate) fn merge(self, other: Self) -> Self {
        Self {
            registry: other.registry.or(self.registry),
            components: other.components.or(self.components),
            utils: other.utils.or(self.utils),
            timeout: other.timeout.or(self.timeout),
        }
    }
}

/// Resolved installer configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Registry base URL.
    registry: Url,
    /// Absolute components directory.
    components_dir: PathBuf,
    /// Absolute utilities helper path.
    utils_path: PathBuf,
    /// Registry request timeout.
    timeout: Option<Duration>,
}

impl Config {
    /// Load `neobrutal.toml` from `project_root` and apply CLI `overrides`.
    pub(crate) fn load(project_root: &Path, overrides: RawConfig) -> Result<Self> {
        let file = Self::read_file(&project_root.join(CONFIG_FILE_NAME))?;
        Self::resolve(project_root, file.merge(overrides))
    }

    /// Read a config file, treating a missing file as empty.
    pub(crate) fn read_file(path: &Path) -> Result<RawConfig> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(RawConfig::default()),
            Err(error) => {
                return Err(Error::ConfigRead {
                    path: path.to_path_buf(),
                    source: error,
                });
            }
        };

        toml::from_str(&contents).map_err(|error| Error::ConfigParse {
            path: path.to_path_buf(),
            source: error,
        })
    }

    /// Write `raw` to `path`.
    pub(crate) fn write_file(path: &Path, raw: &RawConfig) -> Result<()> {
        let contents =
            toml::to_string(raw).map_err(|error| Error::ConfigSerialize { source: error })?;
        fs::write(path, contents).map_err(|error| Error::ConfigWrite {
            path: path.to_path_buf(),
            source: error,
        })
    }

    /// Fill defaults and resolve paths relative to `project_root`.
    pub(crate) fn resolve(project_root: &Path, raw: RawConfig) -> Result<Self> {
        let registry = parse_registry_url(raw.registry.as_deref().unwrap_or(DEFAULT_REGISTRY))?;
        let components_dir = paths::expand_path(
            raw.components.as_deref().unwrap_or(DEFAULT_COMPONENTS_DIR),
            project_root,
        )?;
        let utils_path = paths::expand_path(
            raw.utils.as_deref().unwrap_or(DEFAULT_UTILS_PATH),
            project_root,
        )?;
        let timeout = match raw.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS) {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        Ok(Self {
            registry,
            components_dir,
            utils_path,
            timeout,
        })
    }

    /// Registry base URL.
    pub(crate) fn registry(&self) -> &Url {
        &self.registry
    }

    /// Directory receiving component folders.
    pub(crate) fn components_dir(&self) -> &Path {
        &self.components_dir
    }

    /// Path of the shared utilities helper.
    pub(crate) fn utils_path(&self) -> &Path {
        &self.utils_path
    }

    /// Registry request timeout, if any.
    pub(crate) fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Parse a registry URL, allowing plain HTTP only for loopback hosts.
pub fn parse_registry_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|_| Error::InvalidUrl {
        url: raw.to_string(),
    })?;
    match url.scheme() {
        "https" => Ok(url),
        "http" if is_loopback(&url) => Ok(url),
        "http" => Err(Error::HttpNotAllowed {
            url: raw.to_string(),
        }),
        _ => Err(Error::InvalidUrl {
            url: raw.to_string(),
        }),
    }
}

/// Whether `url` points at the local machine.
pub(crate) fn is_loopback(url: &Url) -> bool {
    match url.host_str() {
        Some("localhost") => true,
        Some(host) => host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .is_ok_and(|ip| ip.is_loopback()),
        None => false,
    }
}
