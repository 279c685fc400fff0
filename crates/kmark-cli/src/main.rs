//! kmark CLI - render KMark text to HTML.
//!
//! Provides commands for:
//! - `render`: Render files or stdin to HTML
//! - `stages`: List the render pipeline stages

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::RenderArgs;
use output::Output;

/// kmark - markdown subset to safe HTML.
#[derive(Parser)]
#[command(name = "kmark", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render files or stdin to HTML.
    Render(RenderArgs),
    /// List render pipeline stages in execution order.
    Stages,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Render(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => {
            if verbose {
                output.highlight(&format!("kmark {}", env!("CARGO_PKG_VERSION")));
            }
            args.execute()
        }
        Commands::Stages => commands::stages::execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
