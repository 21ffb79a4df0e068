//! Implementation of the `neobrutal init` command.

use std::path::{Path, PathBuf};

use inquire::{Text, error::InquireError};

use crate::{
    commands::{ColorChoice, current_dir},
    config::{CONFIG_FILE_NAME, Config, DEFAULT_COMPONENTS_DIR, RawConfig},
    diagnostics::Diagnostics,
    error::{Error, Result},
    palette::{fmt_command, fmt_heading},
    paths::display_path,
    project::Project,
    session::InstallSession,
    support::{SupportOutcome, UTILS_DEPENDENCIES, ensure_utils},
};

/// Execute the init command.
pub async fn run(color: ColorChoice, verbose: bool, yes: bool, skip_deps: bool) -> Result<()> {
    let use_color = color.enabled();
    let diagnostics = Diagnostics::new(verbose);
    let project = Project::detect(&current_dir()?)?;

    let components = if yes || config_exists(&project.root) {
        None
    } else {
        Some(ask_components_dir()?)
    };
    let outcome = bootstrap(&project.root, components)?;

    match outcome.config {
        ConfigOutcome::Created => println!(
            "Created config at {}",
            display_path(&project.root.join(CONFIG_FILE_NAME))
        ),
        ConfigOutcome::Kept => println!(
            "Config already exists at {}",
            display_path(&project.root.join(CONFIG_FILE_NAME))
        ),
    }
    match outcome.utils {
        SupportOutcome::Written => println!("Created {}", display_path(&outcome.utils_path)),
        SupportOutcome::Present | SupportOutcome::AlreadyAdded => {
            diagnostics.detail(format!(
                "{} already exists",
                display_path(&outcome.utils_path)
            ));
        }
    }

    if !skip_deps && let Some(line) = project.package_manager.install_line(UTILS_DEPENDENCIES) {
        println!();
        println!("{}", fmt_heading("Install dependencies:", use_color));
        println!("  {}", fmt_command(&line, use_color));
    }
    println!();
    println!("Done. Add components with `neobrutal add <component>`.");
    Ok(())
}

/// Whether the config file was written by this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigOutcome {
    /// A new config file was written.
    Created,
    /// An existing config file was left as is.
    Kept,
}

/// Result of bootstrapping a project.
#[derive(Debug)]
struct Bootstrap {
    /// What happened to the config file.
    config: ConfigOutcome,
    /// What happened to the utilities helper.
    utils: SupportOutcome,
    /// Where the utilities helper lives.
    utils_path: PathBuf,
}

/// Whether `root` already has a config file.
fn config_exists(root: &Path) -> bool {
    root.join(CONFIG_FILE_NAME).is_file()
}

/// Write the config file if needed and ensure the utilities helper exists.
fn bootstrap(root: &Path, components: Option<String>) -> Result<Bootstrap> {
    let config_path = root.join(CONFIG_FILE_NAME);
    let config = if config_exists(root) {
        ConfigOutcome::Kept
    } else {
        let raw = RawConfig {
            components: components.or(Some(DEFAULT_COMPONENTS_DIR.to_string())),
            ..RawConfig::defaults()
        };
        Config::write_file(&config_path, &raw)?;
        ConfigOutcome::Created
    };

    let resolved = Config::load(root, RawConfig::default())?;
    let mut session = InstallSession::new();
    let utils = ensure_utils(&mut session, resolved.utils_path())?;

    Ok(Bootstrap {
        config,
        utils,
        utils_path: resolved.utils_path().to_path_buf(),
    })
}

/// Ask where components should be installed.
fn ask_components_dir() -> Result<String> {
    let response = Text::new("Components directory")
        .with_default(DEFAULT_COMPONENTS_DIR)
        .prompt();
    match response {
        Ok(value) if value.trim().is_empty() => Ok(DEFAULT_COMPONENTS_DIR.to_string()),
        Ok(value) => Ok(value.trim().to_string()),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
            Err(Error::PromptCanceled)
        }
        Err(error) => Err(Error::PromptFailed {
            message: error.to_string(),
        }),
    }
}
