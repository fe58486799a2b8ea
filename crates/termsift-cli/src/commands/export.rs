//! Export command - replay negative selections against a report and print the list.

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use termsift::{Action, MatchType, ParserConfig, Session, SessionConfig};
use tracing::warn;

/// Selections to apply, in the order rows, words, then explicit terms.
#[derive(Debug, Clone, Default)]
pub struct ExportPlan {
    pub rows: Vec<u64>,
    pub words: Vec<String>,
    pub exact: Vec<String>,
    pub phrase: Vec<String>,
    pub broad: Vec<String>,
    pub row_match: MatchType,
    pub word_match: MatchType,
    pub delimiter: Option<u8>,
}

impl ExportPlan {
    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            parser: ParserConfig {
                delimiter: self.delimiter,
                ..ParserConfig::default()
            },
            full_phrase_match: self.row_match,
            word_match: self.word_match,
        }
    }

    /// Turn the plan into session actions. Unknown row ids are skipped.
    fn actions(&self, session: &Session) -> Vec<Action> {
        let mut actions = Vec::new();

        for &row_id in &self.rows {
            match session.dataset().row(row_id) {
                Some(row) => actions.push(Action::AddFullPhrase {
                    text: row.phrase.clone(),
                    row_id,
                }),
                None => warn!(row_id, "Row not found in report, skipping"),
            }
        }

        for word in &self.words {
            actions.push(Action::ToggleWord { text: word.clone() });
        }

        let explicit = [
            (MatchType::Exact, &self.exact),
            (MatchType::Phrase, &self.phrase),
            (MatchType::Broad, &self.broad),
        ];
        for (match_type, texts) in explicit {
            for text in texts {
                actions.push(Action::AddNegative {
                    text: text.clone(),
                    match_type,
                    row_id: None,
                    mark_row: false,
                });
            }
        }

        actions
    }
}

/// Build the session that results from applying `plan` to the report at `file`.
pub fn build_session(file: &Path, plan: &ExportPlan) -> termsift::Result<Session> {
    let mut session = Session::with_config(plan.session_config());
    session.ingest_file(file)?;

    for action in plan.actions(&session) {
        session.dispatch(action);
    }

    Ok(session)
}

pub fn run(
    file: PathBuf,
    plan: ExportPlan,
    output: Option<PathBuf>,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let session = build_session(&file, &plan)?;

    if verbose {
        let summary = session.summary();
        eprintln!(
            "{} {} rows, phrase column {}",
            "Loaded".cyan().bold(),
            summary.row_count,
            summary.phrase_column.white().bold()
        );
        eprintln!(
            "Collected {} negatives, {} rows marked",
            summary.total_negatives.to_string().white().bold(),
            summary.marked_row_count
        );
    }

    let text = if json_output {
        serde_json::to_string_pretty(session.negatives().items())?
    } else {
        session.negatives().clipboard_text()
    };

    match output {
        Some(path) => {
            fs::write(&path, format!("{}\n", text))?;
            eprintln!(
                "{} {}",
                "Saved to".green().bold(),
                path.display().to_string().white()
            );
        }
        None => println!("{}", text),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn report() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"Search term,Clicks\ncheap red shoes,4\nfree shoes,1\n")
            .unwrap();
        file
    }

    #[test]
    fn test_plan_order_and_defaults() {
        let file = report();
        let plan = ExportPlan {
            rows: vec![2, 99],
            words: vec!["cheap".to_string()],
            phrase: vec!["red shoes".to_string()],
            row_match: MatchType::Exact,
            word_match: MatchType::Broad,
            ..ExportPlan::default()
        };

        let session = build_session(file.path(), &plan).unwrap();

        assert_eq!(
            session.negatives().clipboard_text(),
            "[free shoes]\ncheap\n\"red shoes\""
        );
        assert!(session.is_row_marked(2));
    }

    #[test]
    fn test_word_listed_twice_toggles_off() {
        let file = report();
        let plan = ExportPlan {
            words: vec!["cheap".to_string(), "CHEAP".to_string()],
            ..ExportPlan::default()
        };

        let session = build_session(file.path(), &plan).unwrap();
        assert!(session.negatives().is_empty());
    }
}
