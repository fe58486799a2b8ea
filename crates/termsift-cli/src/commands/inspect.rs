//! Inspect command - show phrase column detection and row tokens.

use std::path::PathBuf;

use colored::Colorize;
use termsift::{DetectionMethod, ParserConfig, Session, SessionConfig};

pub fn run(
    file: PathBuf,
    json_output: bool,
    limit: usize,
    delimiter: Option<u8>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let mut session = Session::with_config(SessionConfig {
        parser: ParserConfig {
            delimiter,
            ..ParserConfig::default()
        },
        ..SessionConfig::default()
    });
    session.ingest_file(&file)?;

    let dataset = session.dataset();
    let rows = session.rows_view();

    if json_output {
        let status = serde_json::json!({
            "source": session.source(),
            "columns": dataset.columns,
            "phrase_column": dataset.phrase_column,
            "detection": dataset.detection,
            "rows": rows.iter().take(limit).collect::<Vec<_>>(),
            "total_rows": rows.len(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Report".cyan().bold(),
        file.display().to_string().white()
    );
    println!();

    if verbose {
        if let Some(source) = session.source() {
            println!("  Format:  {}", source.format);
            println!("  Size:    {} bytes", source.size_bytes);
            println!("  Hash:    {}", source.hash);
        }
        println!("  Columns: {}", dataset.columns.join(", "));
        println!();
    }

    let method = match dataset.detection {
        DetectionMethod::Exact => dataset.detection.label().green(),
        DetectionMethod::EnglishHeuristic | DetectionMethod::CyrillicHeuristic => {
            dataset.detection.label().yellow()
        }
        DetectionMethod::FirstColumn | DetectionMethod::Default => {
            dataset.detection.label().red()
        }
    };
    println!(
        "Phrase column: {} ({})",
        dataset.phrase_column.white().bold(),
        method
    );
    println!(
        "Rows: {}  Columns: {}",
        dataset.row_count().to_string().white().bold(),
        dataset.column_count()
    );
    println!();

    if rows.is_empty() {
        println!("{}", "No rows in report.".yellow());
        return Ok(());
    }

    for row in rows.iter().take(limit) {
        let words: Vec<String> = row.tokens.iter().map(|t| t.text.clone()).collect();
        println!(
            "  {:>5}  {:40} {}",
            row.row_id.to_string().dimmed(),
            row.phrase,
            words.join(" | ").blue()
        );
    }

    if rows.len() > limit {
        println!();
        println!("  ... {} more rows", rows.len() - limit);
    }

    Ok(())
}
