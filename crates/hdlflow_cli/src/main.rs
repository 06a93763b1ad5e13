//! hdlflow CLI — run manifest-driven HDL simulation flows.
//!
//! Provides `hdlflow sim` to compile and run the testbench a manifest
//! describes, `hdlflow check` to validate a manifest and report a summary,
//! `hdlflow files` to list the gathered sources in compile order, and
//! `hdlflow tree` to print the module dependency tree.

#![warn(missing_docs)]

mod check;
mod files;
mod pipeline;
mod sim;
mod tree;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// hdlflow — a manifest-driven HDL simulation runner.
#[derive(Parser, Debug)]
#[command(name = "hdlflow", version, about = "Manifest-driven HDL simulation runner")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output (planned command lines, per-step progress).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a `Manifest.toml` or the directory containing it.
    #[arg(long, global = true)]
    pub manifest: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile the gathered sources and run the simulation.
    Sim(SimArgs),
    /// Load, resolve, and validate a manifest; report a summary.
    Check(CheckArgs),
    /// Print the gathered source files in compile order.
    Files(FilesArgs),
    /// Print the module dependency tree.
    Tree(TreeArgs),
}

/// Arguments for the `hdlflow sim` subcommand.
#[derive(Parser, Debug)]
pub struct SimArgs {
    /// Module directory (or manifest file) to simulate. Defaults to the
    /// nearest manifest above the current directory.
    pub path: Option<String>,

    /// Print the planned command lines without executing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Override the manifest's `sim_tool`.
    #[arg(long)]
    pub tool: Option<String>,
}

/// Arguments for the `hdlflow check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Module directory (or manifest file) to check.
    pub path: Option<String>,

    /// Output format for the report.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `hdlflow files` subcommand.
#[derive(Parser, Debug)]
pub struct FilesArgs {
    /// Module directory (or manifest file) to gather.
    pub path: Option<String>,

    /// Output format for the file list.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `hdlflow tree` subcommand.
#[derive(Parser, Debug)]
pub struct TreeArgs {
    /// Module directory (or manifest file) to walk.
    pub path: Option<String>,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose progress information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a manifest file or directory.
    pub manifest: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => atty_is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        manifest: cli.manifest,
    };

    let result = match cli.command {
        Command::Sim(ref args) => sim::run(args, &global),
        Command::Check(ref args) => check::run(args, &global),
        Command::Files(ref args) => files::run(args, &global),
        Command::Tree(ref args) => tree::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Rough terminal detection — checks if stdout is a terminal.
fn atty_is_terminal() -> bool {
    // A TERM heuristic keeps us dependency-free here; good enough for
    // deciding whether to colorize warnings.
    std::env::var("TERM").is_ok()
}
