//! Batch installation of registry components.

use std::path::PathBuf;

use crate::{
    cancel::Interrupt,
    diagnostics::Diagnostics,
    error::{Error, Result},
    materialize::{FileMaterializer, OverwritePolicy, Prompter, WriteOutcome},
    palette::{fmt_component, fmt_description, fmt_error, fmt_ok, fmt_skipped},
    paths::display_path,
    registry::{ComponentDescriptor, ComponentSource},
    session::InstallSession,
    support::{SupportOutcome, ensure_utils},
};

/// Drives requested components through the registry and onto disk.
pub struct Installer<'a, S, P> {
    /// Where descriptors come from.
    source: &'a S,
    /// Writes descriptor files.
    materializer: FileMaterializer<'a, P>,
    /// Location of the shared utilities helper.
    utils_path: PathBuf,
    /// Interrupt flag checked before each fetch.
    interrupt: &'a Interrupt,
    /// Colorize progress output.
    use_color: bool,
}

impl<'a, S: ComponentSource, P: Prompter> Installer<'a, S, P> {
    /// Create an installer.
    pub(crate) fn new(
        source: &'a S,
        materializer: FileMaterializer<'a, P>,
        utils_path: PathBuf,
        interrupt: &'a Interrupt,
        use_color: bool,
    ) -> Self {
        Self {
            source,
            materializer,
            utils_path,
            interrupt,
            use_color,
        }
    }

    /// Install `names` in order, recording every outcome in `session`.
    ///
    /// Only interrupts end the batch early; every other failure is recorded
    /// against the component it came from.
    pub(crate) async fn run(
        &mut self,
        names: &[String],
        policy: OverwritePolicy,
        session: &mut InstallSession,
        diagnostics: &mut Diagnostics,
    ) -> Result<()> {
        self.ensure_support(session, diagnostics);

        for name in names {
            self.interrupt.check()?;
            println!("Installing {}...", fmt_component(name, self.use_color));
            match self.install_one(name, policy, session, diagnostics).await {
                Ok(descriptor) => {
                    session.record_installed(name, &descriptor.dependencies);
                }
                Err(error) if error.is_fatal() => return Err(error),
                Err(error) => {
                    println!("  {} {error}", fmt_error("failed:", self.use_color));
                    session.record_failure(name, error.to_string());
                }
            }
        }
        Ok(())
    }

    /// Fetch one component and write all of its files.
    async fn install_one(
        &mut self,
        name: &str,
        policy: OverwritePolicy,
        session: &mut InstallSession,
        diagnostics: &mut Diagnostics,
    ) -> Result<ComponentDescriptor> {
        validate_name(name)?;
        diagnostics.detail(format!("fetching {}", self.source.locate(name)));
        let descriptor = self.source.fetch(name).await?;
        if !descriptor.description.is_empty() {
            diagnostics.detail(format!(
                "{} ({}): {}",
                descriptor.name, descriptor.kind, descriptor.description
            ));
        }

        if descriptor.needs_utils() {
            self.ensure_support(session, diagnostics);
        }

        for file in &descriptor.files {
            diagnostics.detail(format!("{} [{}]", file.path, file.kind));
            let written = self.materializer.materialize(file, name, policy)?;
            let label = match written.outcome {
                WriteOutcome::Written | WriteOutcome::Overwritten => {
                    fmt_ok(written.outcome.label(), self.use_color)
                }
                WriteOutcome::Skipped => fmt_skipped(written.outcome.label(), self.use_color),
            };
            println!("  {label} {}", display_path(&written.path));
            if written.rewrites > 0 {
                diagnostics.detail(format!("rewrote {} import(s)", written.rewrites));
            }
        }
        Ok(descriptor)
    }

    /// Materialize the utilities helper unless this session already did.
    fn ensure_support(&self, session: &mut InstallSession, diagnostics: &mut Diagnostics) {
        match ensure_utils(session, &self.utils_path) {
            Ok(SupportOutcome::Written) => {
                println!(
                    "  {} {}",
                    fmt_ok("created", self.use_color),
                    display_path(&self.utils_path)
                );
            }
            Ok(SupportOutcome::Present) => diagnostics.detail(format!(
                "{} {}",
                display_path(&self.utils_path),
                fmt_description("already exists", self.use_color)
            )),
            Ok(SupportOutcome::AlreadyAdded) => {}
            Err(error) => diagnostics.warn(error.to_string()),
        }
    }
}

/// Accept only registry-style names: lowercase ASCII letters, digits, and inner hyphens.
fn validate_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && !name.starts_with('-')
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidComponentName {
            name: name.to_string(),
        })
    }
}
