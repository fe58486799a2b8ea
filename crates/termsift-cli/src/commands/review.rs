//! Review command - serve the JSON API for interactive negative collection.

use std::path::PathBuf;

use colored::Colorize;
use termsift::Session;

use crate::server::{app, state::AppState};

pub fn run(
    file: Option<PathBuf>,
    port: u16,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::new();

    if let Some(file) = &file {
        if !file.exists() {
            return Err(format!("File not found: {}", file.display()).into());
        }
        session.ingest_file(file)?;
    }

    let summary = session.summary();
    let state = AppState::new(session);

    // Print server info
    let url = format!("http://localhost:{}/api", port);
    println!();
    println!(
        "{} {}",
        "Starting review server at".cyan().bold(),
        url.white().bold()
    );
    println!();
    match &file {
        Some(file) => {
            println!("  File: {}", file.display());
            println!(
                "  Phrase column: {} ({})",
                summary.phrase_column,
                summary.detection.label()
            );
            println!("  Rows: {}", summary.row_count);
        }
        None => println!("  No report loaded, upload one with POST /api/report"),
    }
    if verbose {
        println!("  Columns: {}", summary.column_count);
    }
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(serve(state, port))
}

/// Run the server until it fails or Ctrl+C is pressed.
async fn serve(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    tokio::select! {
        result = app::run_server(state, port) => result,
        _ = tokio::signal::ctrl_c() => {
            println!();
            println!("{}", "Shutting down...".yellow());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_failure_is_an_error() {
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = taken.local_addr().unwrap().port();

        let result = serve(AppState::default(), port).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_report_is_an_error() {
        let result = run(Some(PathBuf::from("/definitely/not/here.csv")), 0, false);
        assert!(result.is_err());
    }
}
