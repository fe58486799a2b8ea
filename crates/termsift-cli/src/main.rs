//! termsift CLI - collect negative keywords from search-terms reports.

mod cli;
mod commands;
mod server;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "termsift=debug,termsift_cli=debug"
    } else {
        "termsift=info,termsift_cli=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Inspect {
            file,
            json,
            limit,
            delimiter,
        } => commands::inspect::run(file, json, limit, delimiter, cli.verbose),

        Commands::Export {
            file,
            rows,
            words,
            exact,
            phrase,
            broad,
            row_match,
            word_match,
            output,
            json,
            delimiter,
        } => commands::export::run(
            file,
            commands::export::ExportPlan {
                rows,
                words,
                exact,
                phrase,
                broad,
                row_match,
                word_match,
                delimiter,
            },
            output,
            json,
            cli.verbose,
        ),

        Commands::Review { file, port } => commands::review::run(file, port, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
