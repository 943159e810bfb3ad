//! Two-pass removal of task comments
//!
//! Pass 1 deletes every comment span whose line carries a task marker,
//! as one atomic batch. Pass 2 re-resolves the affected line numbers
//! against the post-deletion text and deletes the lines that ended up
//! fully empty, terminator included. Whitespace-only lines are left
//! alone: only a zero-length line counts as empty.

use serde::Serialize;

use super::document::{Document, EditBatch, EditError};
use super::marker::MarkerSet;
use super::span::Span;

/// Summary of one removal run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EraseReport {
    /// Comment spans deleted in pass 1
    pub spans_deleted: usize,

    /// Spans that no longer mapped onto the document and were skipped
    pub spans_skipped: usize,

    /// Lines deleted in pass 2 after becoming empty
    pub lines_removed: usize,
}

impl EraseReport {
    /// Returns true if the run changed the document
    pub fn changed(&self) -> bool {
        self.spans_deleted > 0
    }
}

/// A comment span whose line carries a task marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskComment {
    /// The comment span itself
    pub span: Span,

    /// Zero-based number of the line the span resolved to
    pub line_number: usize,

    /// Content of that line, terminator excluded
    pub line_text: String,
}

/// Finds the comment spans whose line carries a task marker
///
/// Read-only counterpart of [`remove_task_comments`], used by preview
/// and reporting flows. Unresolvable spans are skipped.
pub fn find_task_comments(
    document: &Document,
    comment_spans: &[Span],
    markers: &MarkerSet,
) -> Vec<TaskComment> {
    let mut found = Vec::new();
    for &span in comment_spans {
        let Some(line) = document.line_containing(span) else {
            continue;
        };
        if markers.matches_line(line.text()) {
            found.push(TaskComment {
                span,
                line_number: line.number(),
                line_text: line.text().to_string(),
            });
        }
    }
    found
}

/// Deletes task comments from the document, then the lines they empty
///
/// With no input spans this is a no-op: the document is not touched at
/// all, so callers can skip their own write-back. Spans that do not
/// resolve against the current text are skipped, not errored. Each pass
/// is a single atomic batch; a failed batch leaves the document in its
/// pre-pass state.
pub fn remove_task_comments(
    document: &mut Document,
    comment_spans: &[Span],
    markers: &MarkerSet,
) -> Result<EraseReport, EditError> {
    let mut report = EraseReport::default();
    if comment_spans.is_empty() {
        return Ok(report);
    }

    let mut batch = EditBatch::new();
    let mut touched_lines: Vec<usize> = Vec::new();

    for &span in comment_spans {
        let Some(line) = document.line_containing(span) else {
            report.spans_skipped += 1;
            continue;
        };
        if markers.matches_line(line.text()) {
            batch.delete(span);
            report.spans_deleted += 1;
            if !touched_lines.contains(&line.number()) {
                touched_lines.push(line.number());
            }
        }
    }

    if batch.is_empty() {
        return Ok(report);
    }
    document.apply(batch)?;

    let mut cleanup = EditBatch::new();
    for &number in &touched_lines {
        if let Some(line) = document.line(number) {
            if line.is_empty() && line.len_with_terminator() > 0 {
                cleanup.delete(line.extent_with_terminator());
                report.lines_removed += 1;
            }
        }
    }
    document.apply(cleanup)?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn erase(text: &str, spans: &[Span]) -> (String, EraseReport) {
        let mut doc = Document::new(text);
        let report = remove_task_comments(&mut doc, spans, &MarkerSet::default()).unwrap();
        (doc.into_text(), report)
    }

    #[test]
    fn no_spans_is_a_no_op() {
        let (text, report) = erase("// TODO: untouched\n", &[]);
        assert_eq!(text, "// TODO: untouched\n");
        assert_eq!(report, EraseReport::default());
        assert!(!report.changed());
    }

    #[test]
    fn full_line_comment_is_deleted_with_its_line() {
        let text = "fn a() {}\n// TODO: fix this later\nfn b() {}\n";
        let (result, report) = erase(text, &[Span::new(10, 23)]);
        assert_eq!(result, "fn a() {}\nfn b() {}\n");
        assert_eq!(report.spans_deleted, 1);
        assert_eq!(report.lines_removed, 1);
    }

    #[test]
    fn trailing_comment_leaves_code_line_in_place() {
        let text = "int x = 1; // HACK: workaround\nint y = 2;\n";
        // span covers " // HACK: workaround"
        let (result, report) = erase(text, &[Span::new(10, 20)]);
        assert_eq!(result, "int x = 1;\nint y = 2;\n");
        assert_eq!(report.spans_deleted, 1);
        assert_eq!(report.lines_removed, 0);
    }

    #[test]
    fn comment_without_marker_is_left_untouched() {
        let text = "// just a note\nint y = 2;\n";
        let (result, report) = erase(text, &[Span::new(0, 14)]);
        assert_eq!(result, text);
        assert_eq!(report.spans_deleted, 0);
        assert!(!report.changed());
    }

    #[test]
    fn adjacent_task_lines_collapse_without_off_by_one() {
        let text = "a\n// todo: one\n// hack: two\nb\n";
        let spans = [Span::new(2, 12), Span::new(15, 12)];
        let (result, report) = erase(text, &spans);
        assert_eq!(result, "a\nb\n");
        assert_eq!(report.spans_deleted, 2);
        assert_eq!(report.lines_removed, 2);
    }

    #[test]
    fn unresolvable_span_is_skipped() {
        let text = "// todo: keep going\n";
        let spans = [Span::new(500, 10), Span::new(0, 19)];
        let (result, report) = erase(text, &spans);
        assert_eq!(result, "");
        assert_eq!(report.spans_skipped, 1);
        assert_eq!(report.spans_deleted, 1);
        assert_eq!(report.lines_removed, 1);
    }

    #[test]
    fn whitespace_only_line_is_not_removed() {
        // Deleting the comment leaves the indentation behind; a line
        // that is not fully empty stays.
        let text = "    // todo: indented\nnext\n";
        let (result, report) = erase(text, &[Span::new(4, 17)]);
        assert_eq!(result, "    \nnext\n");
        assert_eq!(report.spans_deleted, 1);
        assert_eq!(report.lines_removed, 0);
    }

    #[test]
    fn crlf_line_is_removed_with_its_terminator() {
        let text = "// todo: gone\r\nkeep\r\n";
        let (result, report) = erase(text, &[Span::new(0, 13)]);
        assert_eq!(result, "keep\r\n");
        assert_eq!(report.lines_removed, 1);
    }

    #[test]
    fn last_line_without_terminator_empties_cleanly() {
        let text = "keep\n// todo: last";
        let (result, report) = erase(text, &[Span::new(5, 13)]);
        assert_eq!(result, "keep\n");
        assert_eq!(report.spans_deleted, 1);
        // The emptied final line has no extent left to delete.
        assert_eq!(report.lines_removed, 0);
    }

    #[test]
    fn two_spans_on_one_line_visit_it_once() {
        let text = "/* todo: a */ /* hack: b */\nnext\n";
        let spans = [Span::new(0, 13), Span::new(13, 14)];
        let (result, report) = erase(text, &spans);
        assert_eq!(result, "next\n");
        assert_eq!(report.spans_deleted, 2);
        assert_eq!(report.lines_removed, 1);
    }

    #[test]
    fn second_run_with_refetched_spans_is_a_no_op() {
        let text = "a\n// todo: once\nb\n";
        let (first, report) = erase(text, &[Span::new(2, 13)]);
        assert!(report.changed());
        // Classification re-fetched after the edit finds no comments.
        let (second, report) = erase(&first, &[]);
        assert_eq!(second, first);
        assert!(!report.changed());
    }

    #[test]
    fn find_reports_matching_spans_without_mutating() {
        let doc = Document::new("int x; // todo: later\n// note\n");
        let spans = [Span::new(6, 15), Span::new(22, 7), Span::new(900, 3)];
        let found = find_task_comments(&doc, &spans, &MarkerSet::default());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line_number, 0);
        assert_eq!(found[0].line_text, "int x; // todo: later");
        assert_eq!(doc.text(), "int x; // todo: later\n// note\n");
    }
}
