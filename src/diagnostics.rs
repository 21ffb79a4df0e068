//! Warning aggregation and verbose detail output.

/// Aggregates warnings and verbose detail for a command run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    /// Print detail lines.
    verbose: bool,
    /// Collected warning messages.
    warnings: Vec<String>,
}

impl Diagnostics {
    /// Create a new diagnostics collector.
    pub(crate) fn new(verbose: bool) -> Self {
        Self {
            verbose,
            warnings: Vec::new(),
        }
    }

    /// Record a warning and print it immediately.
    pub(crate) fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        eprintln!("Warning: {message}");
        self.warnings.push(message);
    }

    /// Print a detail line when running with `--verbose`.
    pub(crate) fn detail(&self, message: impl AsRef<str>) {
        if self.verbose {
            eprintln!("  {}", message.as_ref());
        }
    }

    /// Whether verbose output is enabled.
    pub(crate) fn verbose(&self) -> bool {
        self.verbose
    }

    /// Print a warning summary when warnings were emitted.
    pub(crate) fn print_warning_summary(&self) {
        if self.warnings.is_empty() {
            return;
        }

        eprintln!("Completed with {} warning(s).", self.warnings.len());
    }
}
