//! Per-run installer state.

use std::collections::BTreeSet;

/// A component that could not be installed, with the reason shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallFailure {
    /// Requested component name.
    pub name: String,
    /// Rendered error message.
    pub reason: String,
}

/// Mutable state shared by every component processed in one batch.
#[derive(Debug, Default)]
pub struct InstallSession {
    /// Support files already materialized during this run.
    added_support_files: BTreeSet<String>,
    /// Union of external packages across installed components.
    dependencies: BTreeSet<String>,
    /// Components that failed, in processing order.
    failures: Vec<InstallFailure>,
    /// Components that installed, in processing order.
    installed: Vec<String>,
}

impl InstallSession {
    /// Create an empty session.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Whether the support file `id` was already materialized this run.
    pub(crate) fn has_support_file(&self, id: &str) -> bool {
        self.added_support_files.contains(id)
    }

    /// Mark the support file `id` as materialized.
    pub(crate) fn mark_support_file(&mut self, id: &str) {
        self.added_support_files.insert(id.to_string());
    }

    /// Record a successfully installed component and merge its dependencies.
    pub(crate) fn record_installed<I, S>(&mut self, name: &str, dependencies: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for dependency in dependencies {
            let dependency = dependency.as_ref().trim();
            if !dependency.is_empty() {
                self.dependencies.insert(dependency.to_string());
            }
        }
        self.installed.push(name.to_string());
    }

    /// Record a failed component.
    pub(crate) fn record_failure(&mut self, name: &str, reason: impl Into<String>) {
        self.failures.push(InstallFailure {
            name: name.to_string(),
            reason: reason.into(),
        });
    }

    /// Consume the session into a report.
    pub(crate) fn into_report(self) -> InstallReport {
        InstallReport {
            installed: self.installed,
            failures: self.failures,
            dependencies: self.dependencies.into_iter().collect(),
        }
    }
}

/// Outcome of a batch install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// Installed component names, in processing order.
    pub installed: Vec<String>,
    /// Failed components, in processing order.
    pub failures: Vec<InstallFailure>,
    /// Deduplicated, sorted external packages to install.
    pub dependencies: Vec<String>,
}

impl InstallReport {
    /// Whether every requested component installed.
    pub(crate) fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
