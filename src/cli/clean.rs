//! The clean command
//!
//! Reads the buffer, gathers comment spans (scanner or span file), runs
//! the eraser, and writes the result. In stdout mode the mutated buffer
//! is the output, so summaries are suppressed there; `--write` and
//! `--dry-run` report through the normal output channel.

use std::path::Path;

use anyhow::{bail, Result};

use super::output::Output;
use crate::domain::{find_task_comments, remove_task_comments, Document, EraseReport};
use crate::scanner::{self, Language};
use crate::storage::{self, Config, InputSource};

pub fn run(
    output: &Output,
    file: &str,
    write: bool,
    dry_run: bool,
    spans_path: Option<&Path>,
    language: Option<Language>,
    extra_markers: &[String],
) -> Result<()> {
    let input = InputSource::from_arg(file);
    if write && input.is_stdin() {
        bail!("--write requires a file path, not standard input");
    }

    let text = input.read()?;
    let config = Config::for_input(input.path())?;
    if let Some(root) = &config.project_root {
        output.verbose_ctx("clean", &format!("Project config at: {}", root.display()));
    }
    let markers = config.marker_set().with_extra(extra_markers.iter().cloned());

    let comment_spans = match spans_path {
        Some(path) => {
            let spans = storage::read_span_file(path)?;
            output.verbose_ctx("clean", &format!("Loaded {} spans from {}", spans.len(), path.display()));
            spans
        }
        None => {
            let language = config.resolve_language(input.path(), language)?;
            output.verbose_ctx("clean", &format!("Scanning as {}", language));
            scanner::comment_spans(&text, language)
        }
    };

    let mut document = Document::new(text);

    if dry_run {
        let found = find_task_comments(&document, &comment_spans, &markers);
        let mut preview = document.clone();
        let report = remove_task_comments(&mut preview, &comment_spans, &markers)?;

        if output.is_json() {
            output.data(&serde_json::json!({
                "file": input.display_name(),
                "dry_run": true,
                "report": report,
            }));
        } else {
            for comment in &found {
                println!(
                    "{}:{}: {}",
                    input.display_name(),
                    comment.line_number + 1,
                    comment.line_text.trim_end()
                );
            }
            print_summary(&report);
        }
        return Ok(());
    }

    let report = remove_task_comments(&mut document, &comment_spans, &markers)?;
    output.verbose_ctx(
        "clean",
        &format!(
            "{} spans deleted, {} skipped, {} lines removed",
            report.spans_deleted, report.spans_skipped, report.lines_removed
        ),
    );

    match input.path() {
        Some(path) if write => {
            if report.changed() {
                storage::write_in_place(path, document.text())?;
            }
            if output.is_json() {
                output.data(&serde_json::json!({
                    "file": input.display_name(),
                    "report": report,
                    "changed": report.changed(),
                }));
            } else {
                print_summary(&report);
            }
        }
        _ => {
            // The mutated buffer is the output.
            print!("{}", document.text());
        }
    }

    Ok(())
}

fn print_summary(report: &EraseReport) {
    if report.changed() {
        println!(
            "Removed {} task comment(s), deleted {} emptied line(s)",
            report.spans_deleted, report.lines_removed
        );
    } else {
        println!("No task comments found");
    }
}
