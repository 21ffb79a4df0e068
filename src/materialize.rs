//! Writing descriptor files into the consumer's project.

use std::{
    fs,
    path::{Path, PathBuf},
};

use inquire::{Confirm, error::InquireError};

use crate::{
    cancel::Interrupt,
    diff::overwrite_preview,
    error::{Error, Result},
    paths::display_path,
    registry::FileDescriptor,
    rewrite::rewrite_imports,
};

/// How to treat a destination file that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwritePolicy {
    /// Ask before replacing each existing file.
    Ask,
    /// Replace existing files without asking.
    Force,
}

impl OverwritePolicy {
    /// Build the policy from the `--yes` and `--overwrite` flags.
    pub(crate) fn from_flags(yes: bool, overwrite: bool) -> Self {
        if yes || overwrite {
            Self::Force
        } else {
            Self::Ask
        }
    }
}

/// What happened to a single destination file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file did not exist and was created.
    Written,
    /// The file existed and was replaced.
    Overwritten,
    /// The file existed and was left untouched.
    Skipped,
}

impl WriteOutcome {
    /// Short label for progress output.
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Written => "created",
            Self::Overwritten => "overwritten",
            Self::Skipped => "skipped",
        }
    }
}

/// Result of materializing one file.
#[derive(Debug, Clone)]
pub struct Materialized {
    /// Destination path.
    pub path: PathBuf,
    /// What happened at the destination.
    pub outcome: WriteOutcome,
    /// Number of import strings rewritten in the content.
    pub rewrites: usize,
}

/// Answers overwrite questions for existing files.
pub trait Prompter {
    /// Return `true` to replace `path`.
    fn confirm_overwrite(&mut self, path: &Path) -> Result<bool>;
}

impl<T: Prompter + ?Sized> Prompter for &mut T {
    fn confirm_overwrite(&mut self, path: &Path) -> Result<bool> {
        (**self).confirm_overwrite(path)
    }
}

/// Interactive prompter backed by the terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm_overwrite(&mut self, path: &Path) -> Result<bool> {
        let message = format!("{} already exists. Overwrite?", display_path(path));
        match Confirm::new(&message).with_default(false).prompt() {
            Ok(value) => Ok(value),
            Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
                Err(Error::PromptCanceled)
            }
            Err(error) => Err(Error::PromptFailed {
                message: error.to_string(),
            }),
        }
    }
}

/// Writes descriptor files under `<target_root>/<component>/`.
#[derive(Debug)]
pub struct FileMaterializer<'a, P> {
    /// Directory that receives one subdirectory per component.
    target_root: PathBuf,
    /// Source of overwrite answers.
    prompter: P,
    /// Interrupt flag checked before prompting.
    interrupt: &'a Interrupt,
    /// Print a diff of the existing file before prompting.
    show_diff: bool,
    /// Colorize diff output.
    use_color: bool,
}

impl<'a, P: Prompter> FileMaterializer<'a, P> {
    /// Create a materializer rooted at `target_root`.
    pub(crate) fn new(target_root: PathBuf, prompter: P, interrupt: &'a Interrupt) -> Self {
        Self {
            target_root,
            prompter,
            interrupt,
            show_diff: false,
            use_color: false,
        }
    }

    /// Show a diff of existing files before each overwrite prompt.
    pub(crate) fn with_diff(mut self, show_diff: bool, use_color: bool) -> Self {
        self.show_diff = show_diff;
        self.use_color = use_color;
        self
    }

    /// Compute the destination path for `file` within `component`.
    pub(crate) fn destination(&self, file: &FileDescriptor, component: &str) -> Result<PathBuf> {
        let name = file.file_name().ok_or_else(|| Error::InvalidTarget {
            name: component.to_string(),
            target: file.target.clone(),
        })?;
        Ok(self.target_root.join(component).join(name))
    }

    /// Write one descriptor file, resolving conflicts with `policy`.
    pub(crate) fn materialize(
        &mut self,
        file: &FileDescriptor,
        component: &str,
        policy: OverwritePolicy,
    ) -> Result<Materialized> {
        let path = self.destination(file, component)?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|error| Error::FileWrite {
                path: dir.to_path_buf(),
                source: error,
            })?;
        }

        let rewritten = rewrite_imports(&file.content);
        let exists = path.try_exists().map_err(|error| Error::FileRead {
            path: path.clone(),
            source: error,
        })?;

        let outcome = match (exists, policy) {
            (false, _) => WriteOutcome::Written,
            (true, OverwritePolicy::Force) => WriteOutcome::Overwritten,
            (true, OverwritePolicy::Ask) => {
                self.interrupt.check()?;
                if self.show_diff {
                    self.print_preview(&path, &rewritten.content)?;
                }
                if self.prompter.confirm_overwrite(&path)? {
                    WriteOutcome::Overwritten
                } else {
                    WriteOutcome::Skipped
                }
            }
        };

        if outcome != WriteOutcome::Skipped {
            fs::write(&path, &rewritten.content).map_err(|error| Error::FileWrite {
                path: path.clone(),
                source: error,
            })?;
        }

        Ok(Materialized {
            path,
            outcome,
            rewrites: rewritten.replacements,
        })
    }

    /// Print what an overwrite of `path` would change.
    fn print_preview(&self, path: &Path, incoming: &str) -> Result<()> {
        let existing = fs::read_to_string(path).map_err(|error| Error::FileRead {
            path: path.to_path_buf(),
            source: error,
        })?;
        match overwrite_preview(&existing, incoming, self.use_color) {
            Some(preview) => print!("{preview}"),
            None => println!("  {} is identical to the registry copy.", display_path(path)),
        }
        Ok(())
    }
}
