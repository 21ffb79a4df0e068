//! Project detection and package manager selection.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// File whose presence marks a supported project root.
pub const PROJECT_MARKER: &str = "package.json";

/// Supported JavaScript package managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    /// npm, the fallback when no lockfile is recognized.
    Npm,
    /// pnpm.
    Pnpm,
    /// Yarn.
    Yarn,
    /// Bun.
    Bun,
}

impl PackageManager {
    /// Detect the package manager from lockfiles in `root`.
    pub(crate) fn detect(root: &Path) -> Self {
        let lockfiles: [(&str, Self); 4] = [
            ("pnpm-lock.yaml", Self::Pnpm),
            ("yarn.lock", Self::Yarn),
            ("bun.lockb", Self::Bun),
            ("bun.lock", Self::Bun),
        ];
        lockfiles
            .into_iter()
            .find(|(file, _)| root.join(file).is_file())
            .map_or(Self::Npm, |(_, manager)| manager)
    }

    /// Return the command prefix that adds packages.
    pub(crate) fn add_command(self) -> &'static str {
        match self {
            Self::Npm => "npm install",
            Self::Pnpm => "pnpm add",
            Self::Yarn => "yarn add",
            Self::Bun => "bun add",
        }
    }

    /// Render a single install line for `packages`, or `None` when there is nothing to add.
    pub(crate) fn install_line<S: AsRef<str>>(self, packages: &[S]) -> Option<String> {
        if packages.is_empty() {
            return None;
        }
        let joined = packages
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ");
        Some(format!("{} {joined}", self.add_command()))
    }
}

/// A consumer project the installer writes into.
#[derive(Debug, Clone)]
pub struct Project {
    /// Project root directory.
    pub root: PathBuf,
    /// Package manager inferred from lockfiles.
    pub package_manager: PackageManager,
}

impl Project {
    /// Verify `dir` is a supported project root.
    pub(crate) fn detect(dir: &Path) -> Result<Self> {
        if !dir.join(PROJECT_MARKER).is_file() {
            return Err(Error::NotAProject {
                dir: dir.to_path_buf(),
                marker: PROJECT_MARKER,
            });
        }
        Ok(Self {
            root: dir.to_path_buf(),
            package_manager: PackageManager::detect(dir),
        })
    }
}
