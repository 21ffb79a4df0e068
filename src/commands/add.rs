//! Implementation of the `neobrutal add` command.

use crate::{
    cancel::Interrupt,
    catalog::available_components,
    commands::{ColorChoice, current_dir},
    config::{Config, RawConfig},
    diagnostics::Diagnostics,
    error::{Error, Result},
    install::Installer,
    materialize::{FileMaterializer, OverwritePolicy, Prompter, TerminalPrompter},
    palette::{fmt_command, fmt_component, fmt_error, fmt_heading},
    project::{PackageManager, Project},
    registry::{ComponentSource, RegistryClient},
    session::{InstallReport, InstallSession},
};

/// Options accepted by `add`.
#[derive(Debug, Clone, Default)]
pub struct AddOptions {
    /// Components to install, in order.
    pub components: Vec<String>,
    /// Answer yes to every overwrite prompt.
    pub yes: bool,
    /// Overwrite existing files without prompting.
    pub overwrite: bool,
    /// Components directory override.
    pub path: Option<String>,
    /// Registry URL override.
    pub registry: Option<String>,
    /// Timeout override in seconds.
    pub timeout: Option<u64>,
    /// Exit non-zero when any component fails.
    pub strict: bool,
}

impl AddOptions {
    /// CLI values that take precedence over the config file.
    fn overrides(&self) -> RawConfig {
        RawConfig {
            registry: self.registry.clone(),
            components: self.path.clone(),
            utils: None,
            timeout: self.timeout,
        }
    }
}

/// Execute the add command.
pub async fn run(color: ColorChoice, verbose: bool, options: &AddOptions) -> Result<()> {
    let use_color = color.enabled();
    if options.components.is_empty() {
        print_available(use_color);
        return Ok(());
    }

    let project = Project::detect(&current_dir()?)?;
    let config = Config::load(&project.root, options.overrides())?;
    let client = RegistryClient::new(config.registry().clone(), config.timeout())?;
    let interrupt = Interrupt::new();
    interrupt.install_handler();
    let mut diagnostics = Diagnostics::new(verbose);

    let report = install_batch(
        &config,
        &client,
        TerminalPrompter,
        options,
        &interrupt,
        &mut diagnostics,
        use_color,
    )
    .await?;

    print!("{}", render_report(&report, project.package_manager, use_color));
    diagnostics.print_warning_summary();
    finish(&report, options.strict)
}

/// Install the requested components and return the batch report.
pub(crate) async fn install_batch<S: ComponentSource, P: Prompter>(
    config: &Config,
    source: &S,
    prompter: P,
    options: &AddOptions,
    interrupt: &Interrupt,
    diagnostics: &mut Diagnostics,
    use_color: bool,
) -> Result<InstallReport> {
    let policy = OverwritePolicy::from_flags(options.yes, options.overwrite);
    let components_dir = config.components_dir().to_path_buf();
    let materializer = FileMaterializer::new(components_dir, prompter, interrupt)
        .with_diff(diagnostics.verbose(), use_color);
    let mut installer = Installer::new(
        source,
        materializer,
        config.utils_path().to_path_buf(),
        interrupt,
        use_color,
    );

    let mut session = InstallSession::new();
    installer
        .run(&options.components, policy, &mut session, diagnostics)
        .await?;
    Ok(session.into_report())
}

/// Render the end-of-run summary.
pub(crate) fn render_report(
    report: &InstallReport,
    manager: PackageManager,
    use_color: bool,
) -> String {
    let mut output = String::new();
    output.push('\n');
    output.push_str(&format!(
        "Installed {} of {} component(s).\n",
        report.installed.len(),
        report.installed.len() + report.failures.len()
    ));

    if let Some(line) = manager.install_line(&report.dependencies) {
        output.push_str(&fmt_heading("Install dependencies:", use_color));
        output.push('\n');
        output.push_str(&format!("  {}\n", fmt_command(&line, use_color)));
    }

    if !report.failures.is_empty() {
        output.push_str(&fmt_heading("Failed components:", use_color));
        output.push('\n');
        for failure in &report.failures {
            output.push_str(&format!(
                "  {} {}\n",
                fmt_error(&failure.name, use_color),
                failure.reason
            ));
        }
    }

    output.push_str("Done.\n");
    output
}

/// Decide the command result once the report has been printed.
pub(crate) fn finish(report: &InstallReport, strict: bool) -> Result<()> {
    if strict && !report.is_complete() {
        return Err(Error::IncompleteInstall {
            count: report.failures.len(),
        });
    }
    Ok(())
}

/// Print the components the registry offers.
fn print_available(use_color: bool) {
    println!("{}", fmt_heading("Available components:", use_color));
    for name in available_components() {
        println!("  {}", fmt_component(name, use_color));
    }
    println!();
    println!("Usage: neobrutal add <component>...");
}

#[cfg(test)]
mod tests {
    use super::{AddOptions, finish, install_batch, render_report};
    use crate::{
        cancel::Interrupt,
        config::{Config, RawConfig},
        diagnostics::Diagnostics,
        error::Error,
        project::PackageManager,
        session::{InstallFailure, InstallReport},
        testutil::{
            DescriptorExt, MemoryRegistry, ScriptedPrompter, TestProject, descriptor, file,
        },
    };

    /// Registry used by the add scenarios.
    fn registry() -> MemoryRegistry {
        MemoryRegistry::new()
            .with(
                descriptor(
                    "button",
                    &["@radix-ui/react-slot"],
                    vec![file(
                        "registry/ui/button.tsx",
                        "import { cn } from '../lib/utils'\n",
                    )],
                )
                .needing_utils(),
            )
            .with(descriptor(
                "real-button",
                &["class-variance-authority"],
                vec![file("registry/ui/real-button.tsx", "real\n")],
            ))
    }

    /// Options requesting `names`.
    fn options(names: &[&str]) -> AddOptions {
        AddOptions {
            components: names.iter().map(ToString::to_string).collect(),
            ..AddOptions::default()
        }
    }

    #[tokio::test]
    async fn add_button_into_fresh_project() {
        let project = TestProject::new();
        let config = Config::load(project.root(), RawConfig::default()).expect("config");
        let interrupt = Interrupt::new();
        let mut diagnostics = Diagnostics::new(false);

        let report = install_batch(
            &config,
            &registry(),
            ScriptedPrompter::default(),
            &options(&["button"]),
            &interrupt,
            &mut diagnostics,
            false,
        )
        .await
        .expect("install");

        assert_eq!(
            project.read_component("button", "button.tsx").as_deref(),
            Some("import { cn } from '../../../lib/utils'\n")
        );
        assert!(project.read("src/lib/utils.ts").is_some());
        let rendered = render_report(&report, PackageManager::Npm, false);
        assert!(rendered.contains("  npm install @radix-ui/react-slot\n"));
        assert!(!rendered.contains("Failed components"));
        assert!(finish(&report, false).is_ok());
    }

    #[tokio::test]
    async fn missing_component_with_yes_still_succeeds() {
        let project =
            TestProject::new().with_component_file("real-button", "real-button.tsx", "old\n");
        let config = Config::load(project.root(), RawConfig::default()).expect("config");
        let interrupt = Interrupt::new();
        let mut diagnostics = Diagnostics::new(false);
        let mut prompter = ScriptedPrompter::default();
        let options = AddOptions {
            yes: true,
            ..options(&["does-not-exist", "real-button"])
        };

        let report = install_batch(
            &config,
            &registry(),
            &mut prompter,
            &options,
            &interrupt,
            &mut diagnostics,
            false,
        )
        .await
        .expect("install");

        assert!(prompter.asked.is_empty());
        assert_eq!(report.installed, vec!["real-button"]);
        assert_eq!(report.failures[0].name, "does-not-exist");
        assert_eq!(
            project
                .read_component("real-button", "real-button.tsx")
                .as_deref(),
            Some("real\n")
        );
        assert!(finish(&report, false).is_ok());
        assert!(matches!(
            finish(&report, true),
            Err(Error::IncompleteInstall { count: 1 })
        ));
    }

    #[tokio::test]
    async fn path_override_changes_destination() {
        let project = TestProject::new();
        let overrides = RawConfig {
            components: Some("app/ui".to_string()),
            ..RawConfig::default()
        };
        let config = Config::load(project.root(), overrides).expect("config");
        let interrupt = Interrupt::new();
        let mut diagnostics = Diagnostics::new(false);

        install_batch(
            &config,
            &registry(),
            ScriptedPrompter::default(),
            &options(&["real-button"]),
            &interrupt,
            &mut diagnostics,
            false,
        )
        .await
        .expect("install");

        assert_eq!(
            project
                .read("app/ui/real-button/real-button.tsx")
                .as_deref(),
            Some("real\n")
        );
    }

    #[test]
    fn report_lists_failures_and_single_install_line() {
        let report = InstallReport {
            installed: vec!["a".to_string(), "b".to_string()],
            failures: vec![InstallFailure {
                name: "ghost".to_string(),
                reason: "Component 'ghost' not found in registry (HTTP 404)".to_string(),
            }],
            dependencies: vec!["x".to_string(), "y".to_string(), "z".to_string()],
        };

        let rendered = render_report(&report, PackageManager::Pnpm, false);
        let install_lines: Vec<_> = rendered
            .lines()
            .filter(|line| line.contains("pnpm add"))
            .collect();
        assert_eq!(install_lines, vec!["  pnpm add x y z"]);
        assert!(rendered.contains("Failed components:"));
        assert!(rendered.contains("ghost"));
        assert!(rendered.ends_with("Done.\n"));
    }

    #[test]
    fn report_without_dependencies_has_no_install_line() {
        let report = InstallReport {
            installed: vec!["a".to_string()],
            failures: Vec::new(),
            dependencies: Vec::new(),
        };
        let rendered = render_report(&report, PackageManager::Npm, false);
        assert!(!rendered.contains("npm install"));
    }
}
