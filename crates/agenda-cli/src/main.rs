#![forbid(unsafe_code)]

mod cmd;
mod output;

use agenda_core::config::resolve_config;
use agenda_core::conflict::ParseStrategyError;
use agenda_core::{ErrorCode, Strategy};
use clap::{Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use std::env;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "agenda: event listings with overlap and conflict detection",
    long_about = None
)]
struct Cli {
    /// Enable debug logging (overridden by AGENDA_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Events file (JSON array of {title, start, end}).
    #[arg(long, global = true, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Conflict strategy: eager or tree.
    #[arg(long, global = true, value_name = "STRATEGY")]
    strategy: Option<Strategy>,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Read",
        about = "List events by day",
        long_about = "List events grouped into day sections, marking every event that conflicts with another.",
        after_help = "EXAMPLES:\n    # List the events file in the current directory (or the bundled sample)\n    agenda list\n\n    # Use a specific file and the eager strategy\n    agenda list --file calendar.json --strategy eager\n\n    # Emit machine-readable output\n    agenda list --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show conflicts per event",
        long_about = "Show, for every event in start order, the events it overlaps.",
        after_help = "EXAMPLES:\n    # All events with their conflict counts\n    agenda conflicts\n\n    # Only events that conflict with something\n    agenda conflicts --only-conflicting\n\n    # Emit machine-readable output\n    agenda conflicts --json"
    )]
    Conflicts(cmd::conflicts::ConflictsArgs),

    #[command(
        next_help_heading = "Read",
        about = "Find events overlapping a window",
        long_about = "Query the interval tree for events overlapping a half-open time window.",
        after_help = "EXAMPLES:\n    # Events touching a morning\n    agenda overlaps --from \"November 10, 2018 9:00 AM\" --to \"November 10, 2018 12:00 PM\"\n\n    # Emit machine-readable output\n    agenda overlaps --from \"November 10, 2018 9:00 AM\" --to \"November 10, 2018 12:00 PM\" --json"
    )]
    Overlaps(cmd::overlaps::OverlapsArgs),

    #[command(
        next_help_heading = "Diagnostics",
        about = "Dump the interval tree",
        long_about = "Build the interval tree over the loaded events and print its size, height, and in-order items.",
        after_help = "EXAMPLES:\n    # Dump the tree\n    agenda tree\n\n    # Emit machine-readable output\n    agenda tree --json"
    )]
    Tree(cmd::tree::TreeArgs),

    #[command(
        next_help_heading = "Diagnostics",
        about = "Check strategies agree",
        long_about = "Compute every conflict pair with both the eager and the tree strategy and fail if they differ.",
        after_help = "EXAMPLES:\n    # Verify the events file\n    agenda verify --file calendar.json\n\n    # Emit machine-readable output\n    agenda verify --json"
    )]
    Verify(cmd::verify::VerifyArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("AGENDA_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "agenda=debug,info"
        } else {
            "agenda=info,warn"
        })
    });

    let format = env::var("AGENDA_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Code for a failure while layering config: a bad strategy name anywhere
/// in the chain is reported on its own, everything else is a parse error.
fn config_error_code(err: &anyhow::Error) -> ErrorCode {
    if err.chain().any(|cause| cause.is::<ParseStrategyError>()) {
        ErrorCode::UnknownStrategy
    } else {
        ErrorCode::ConfigParseError
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if cli.verbose {
        debug!("verbose logging enabled");
    }

    let project_root = env::current_dir()?;
    let config = match resolve_config(&project_root, cli.strategy, cli.file.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            let output = resolve_output_mode(cli.format, cli.json, None);
            render_error(output, &CliError::coded(config_error_code(&err), format!("{err:#}")))?;
            return Err(err);
        }
    };
    let output = resolve_output_mode(cli.format, cli.json, config.output.as_deref());

    match cli.command {
        Commands::List(ref args) => cmd::list::run_list(args, output, &config),
        Commands::Conflicts(ref args) => cmd::conflicts::run_conflicts(args, output, &config),
        Commands::Overlaps(ref args) => cmd::overlaps::run_overlaps(args, output, &config),
        Commands::Tree(ref args) => cmd::tree::run_tree(args, output, &config),
        Commands::Verify(ref args) => cmd::verify::run_verify(args, output, &config),
    }
}
