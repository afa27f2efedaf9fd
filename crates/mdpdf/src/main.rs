//! mdpdf CLI - Markdown to paginated document converter.
//!
//! Provides commands for:
//! - `convert`: Lay a markdown file out as paginated text
//! - `tokens`: Dump the encoded token stream
//! - `tree`: Dump the decoded document tree
//! - `trace`: List the theme hooks the generator invokes

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ConvertArgs, TokensArgs, TraceArgs, TreeArgs};
use output::Output;

/// mdpdf - Markdown to paginated document converter.
#[derive(Parser)]
#[command(name = "mdpdf", version, about)]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert markdown into paginated text.
    Convert(ConvertArgs),
    /// Print the token stream with printable sentinels.
    Tokens(TokensArgs),
    /// Print the decoded document tree.
    Tree(TreeArgs),
    /// Print every theme hook call, one per line.
    Trace(TraceArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Convert(args) => args.execute(),
        Commands::Tokens(args) => args.execute(),
        Commands::Tree(args) => args.execute(),
        Commands::Trace(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
