//! repo-archiver — move dormant GitHub repositories into an archive namespace.
//!
//! # Usage
//!
//! ```text
//! repo-archiver scan    --target <name> [--org] [--threshold <years>] [--json]
//! repo-archiver archive --target <name> [--org] [--threshold <years>] [--dry-run]
//!                       [--namespace <name>] [--force] [--json]
//! repo-archiver config show
//! ```
//!
//! The token comes from `--token` or `GITHUB_TOKEN`.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{archive::ArchiveArgs, config::ConfigCommand, scan::ScanArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "repo-archiver",
    version,
    about = "Find inactive repositories and move them into an archive namespace",
    long_about = None,
)]
struct Cli {
    /// Enable debug logging.
    #[arg(long, short, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Show only warnings and errors.
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List repositories inactive past the threshold. Makes no changes.
    Scan(ScanArgs),

    /// Fork inactive repositories into the archive namespace, delete the
    /// originals and mark the forks archived.
    Archive(ArchiveArgs),

    /// Inspect the effective configuration.
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    match cli.command {
        Commands::Scan(args) => args.run(),
        Commands::Archive(args) => args.run(),
        Commands::Config { command } => commands::config::run(command),
    }
}

/// `RUST_LOG` wins; otherwise `--verbose`/`--quiet` pick the level.
fn init_tracing(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
