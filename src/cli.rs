//! CLI parsing and command dispatch.

use clap::{Parser, Subcommand, ValueEnum};

use crate::{
    commands::{self, add::AddOptions},
    error::Result,
};

/// Parsed command line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "neobrutal",
    version,
    about = "Add neubrutalism UI components to your project"
)]
struct Cli {
    /// Control colored output.
    #[arg(long, value_enum, default_value = "auto", global = true)]
    color: ColorMode,
    /// Enable verbose output.
    #[arg(long, global = true)]
    verbose: bool,
    /// Command to execute.
    #[command(subcommand)]
    command: Command,
}

/// Supported color output modes.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorMode {
    /// Only colorize when stdout is a TTY.
    Auto,
    /// Always colorize output.
    Always,
    /// Never colorize output.
    Never,
}

// Commands are ordered alphabetically - maintain this order.
/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Add components to your project.
    Add {
        /// Components to add (omit to list what is available).
        components: Vec<String>,
        /// Skip confirmation prompts (implies --overwrite).
        #[arg(long, short = 'y')]
        yes: bool,
        /// Overwrite existing files without prompting.
        #[arg(long, short = 'o')]
        overwrite: bool,
        /// Directory to add components to.
        #[arg(long, short = 'p')]
        path: Option<String>,
        /// Registry base URL.
        #[arg(long)]
        registry: Option<String>,
        /// Registry request timeout in seconds (0 disables it).
        #[arg(long)]
        timeout: Option<u64>,
        /// Exit with an error when any component fails to install.
        #[arg(long)]
        strict: bool,
    },
    /// Prepare your project for adding components.
    Init {
        /// Accept defaults without prompting.
        #[arg(long, short = 'y')]
        yes: bool,
        /// Do not print the dependency install command.
        #[arg(long)]
        skip_deps: bool,
    },
}

/// Run the requested command.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let color = cli.color.into_choice();

    // Match arms are ordered alphabetically - maintain this order.
    match cli.command {
        Command::Add {
            components,
            yes,
            overwrite,
            path,
            registry,
            timeout,
            strict,
        } => {
            let options = AddOptions {
                components,
                yes,
                overwrite,
                path,
                registry,
                timeout,
                strict,
            };
            commands::add::run(color, cli.verbose, &options).await
        }
        Command::Init { yes, skip_deps } => {
            commands::init::run(color, cli.verbose, yes, skip_deps).await
        }
    }
}

impl ColorMode {
    /// Convert a CLI color mode into a color choice.
    fn into_choice(self) -> commands::ColorChoice {
        match self {
            Self::Auto => commands::ColorChoice::Auto,
            Self::Always => commands::ColorChoice::Always,
            Self::Never => commands::ColorChoice::Never,
        }
    }
}
