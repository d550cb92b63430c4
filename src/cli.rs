use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the provisioning tool.
#[derive(Parser, Debug)]
#[command(
    name = "devsetup",
    about = "Sequential developer-environment provisioning for Debian/WSL hosts",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Path to the configuration file (defaults to config.toml beside the executable)
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the provisioning sequence
    Apply,
    /// Load and validate the configuration without provisioning
    Check,
    /// Generate shell completions
    Completions(CompletionsOpts),
    /// Print version information
    Version,
}

/// Options for the `completions` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CompletionsOpts {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
