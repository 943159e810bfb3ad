//! Query commands (list, check)
//!
//! Read-only scans over one or more files. `list` reports task comments
//! for humans or tooling; `check` turns the same scan into a CI gate.

use anyhow::Result;

use super::output::Output;
use crate::domain::{find_task_comments, Document, TaskComment};
use crate::scanner::{self, Language};
use crate::storage::{Config, InputSource};

/// Show task comments in the given files
pub fn list(
    output: &Output,
    files: &[String],
    language: Option<Language>,
    extra_markers: &[String],
) -> Result<()> {
    let mut items = Vec::new();
    let mut total = 0usize;

    for file in files {
        let (input, found) = scan_file(output, file, language, extra_markers)?;
        total += found.len();

        if output.is_json() {
            for comment in &found {
                items.push(serde_json::json!({
                    "file": input.display_name(),
                    "line": comment.line_number + 1,
                    "text": comment.line_text,
                    "span": comment.span,
                }));
            }
        } else {
            for comment in &found {
                println!(
                    "{}:{}: {}",
                    input.display_name(),
                    comment.line_number + 1,
                    comment.line_text.trim_end()
                );
            }
        }
    }

    if output.is_json() {
        output.data(&items);
    } else if total == 0 {
        println!("No task comments found");
    } else {
        println!();
        println!("Found {} task comment(s)", total);
    }

    Ok(())
}

/// Fail when task comments are present; returns the process exit code
pub fn check(
    output: &Output,
    files: &[String],
    language: Option<Language>,
    extra_markers: &[String],
) -> Result<i32> {
    let mut total = 0usize;

    for file in files {
        let (input, found) = scan_file(output, file, language, extra_markers)?;
        total += found.len();

        if output.is_text() {
            for comment in &found {
                println!(
                    "{}:{}: {}",
                    input.display_name(),
                    comment.line_number + 1,
                    comment.line_text.trim_end()
                );
            }
        }
    }

    if output.is_json() {
        output.data(&serde_json::json!({
            "task_comments": total,
            "clean": total == 0,
        }));
    } else if total > 0 {
        println!();
        println!("Found {} task comment(s)", total);
    }

    Ok(if total > 0 { 1 } else { 0 })
}

/// Scans one file and returns its task comments, deduplicated by line
fn scan_file(
    output: &Output,
    file: &str,
    language: Option<Language>,
    extra_markers: &[String],
) -> Result<(InputSource, Vec<TaskComment>)> {
    let input = InputSource::from_arg(file);
    let text = input.read()?;

    let config = Config::for_input(input.path())?;
    let markers = config.marker_set().with_extra(extra_markers.iter().cloned());
    let language = config.resolve_language(input.path(), language)?;
    output.verbose_ctx("scan", &format!("{}: scanning as {}", input.display_name(), language));

    let comment_spans = scanner::comment_spans(&text, language);
    let document = Document::new(text);
    let mut found = find_task_comments(&document, &comment_spans, &markers);

    // Several spans can land on one line; report the line once.
    found.dedup_by_key(|c| c.line_number);

    output.verbose_ctx(
        "scan",
        &format!("{}: {} task comment line(s)", input.display_name(), found.len()),
    );
    Ok((input, found))
}
