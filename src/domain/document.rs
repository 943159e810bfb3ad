//! In-memory document with line resolution and batch edits
//!
//! The document is a plain UTF-8 buffer addressed by byte offsets. Lines
//! are borrowed views recomputed from the current text on every lookup;
//! offsets shift after deletions, so nothing line-related is cached
//! across an [`Document::apply`] call.
//!
//! Edits are deletion batches applied atomically against the snapshot
//! they were computed from: every deletion is validated before any byte
//! moves, and a failed batch leaves the document untouched.

use thiserror::Error;

use super::span::Span;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("Deletion {start}..{end} is out of bounds (document length {len})")]
    OutOfBounds {
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("Deletion {start}..{end} does not fall on character boundaries")]
    NotCharBoundary { start: usize, end: usize },
}

/// A line within the current document text
///
/// `text` excludes the terminator. The final line of a document has an
/// empty terminator; a document whose text ends in a line break therefore
/// ends with an empty final line, and an empty document has exactly one
/// empty line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    number: usize,
    start: usize,
    text: &'a str,
    terminator: &'a str,
}

impl<'a> Line<'a> {
    /// Zero-based line number
    pub fn number(&self) -> usize {
        self.number
    }

    /// Byte offset of the first character
    pub fn start(&self) -> usize {
        self.start
    }

    /// Line content without the terminator
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// The line terminator: `""`, `"\n"`, or `"\r\n"`
    pub fn terminator(&self) -> &'a str {
        self.terminator
    }

    /// Length in bytes, terminator excluded
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Length in bytes, terminator included
    pub fn len_with_terminator(&self) -> usize {
        self.text.len() + self.terminator.len()
    }

    /// Returns true if the content (terminator excluded) is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The line's extent, terminator excluded
    pub fn extent(&self) -> Span {
        Span::new(self.start, self.len())
    }

    /// The line's extent, terminator included
    pub fn extent_with_terminator(&self) -> Span {
        Span::new(self.start, self.len_with_terminator())
    }
}

/// A set of deletions applied atomically against one document snapshot
#[derive(Debug, Clone, Default)]
pub struct EditBatch {
    deletions: Vec<Span>,
}

impl EditBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a span for deletion
    pub fn delete(&mut self, span: Span) {
        self.deletions.push(span);
    }

    /// Returns true if no deletions are scheduled
    pub fn is_empty(&self) -> bool {
        self.deletions.is_empty()
    }

    /// Returns the number of scheduled deletions
    pub fn len(&self) -> usize {
        self.deletions.len()
    }
}

/// Mutable text buffer addressed by byte offsets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    text: String,
}

impl Document {
    /// Creates a document from the given text
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The current text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the current text in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns true if the document holds no text
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Consumes the document and returns its text
    pub fn into_text(self) -> String {
        self.text
    }

    /// Iterates over the lines of the current text
    pub fn lines(&self) -> Lines<'_> {
        Lines {
            text: &self.text,
            offset: 0,
            number: 0,
            done: false,
        }
    }

    /// Number of lines in the current text (always at least one)
    pub fn line_count(&self) -> usize {
        self.lines().count()
    }

    /// Resolves a line by its zero-based number against the current text
    pub fn line(&self, number: usize) -> Option<Line<'_>> {
        self.lines().nth(number)
    }

    /// Resolves the first line whose extent intersects the span
    ///
    /// Returns `None` when the span reaches past the end of the current
    /// text, i.e. when it no longer maps cleanly onto this document.
    pub fn line_containing(&self, span: Span) -> Option<Line<'_>> {
        if span.end() > self.text.len() {
            return None;
        }
        self.lines().find(|line| line.extent().intersects(&span))
    }

    /// Applies a deletion batch atomically
    ///
    /// Every deletion is validated against the current text before any
    /// mutation; on error the document is unchanged. Overlapping and
    /// touching deletions are merged, so a batch built from overlapping
    /// classification spans cannot corrupt offsets.
    pub fn apply(&mut self, batch: EditBatch) -> Result<(), EditError> {
        let mut deletions = batch.deletions;
        if deletions.is_empty() {
            return Ok(());
        }

        for span in &deletions {
            if span.end() > self.text.len() {
                return Err(EditError::OutOfBounds {
                    start: span.start,
                    end: span.end(),
                    len: self.text.len(),
                });
            }
            if !self.text.is_char_boundary(span.start) || !self.text.is_char_boundary(span.end()) {
                return Err(EditError::NotCharBoundary {
                    start: span.start,
                    end: span.end(),
                });
            }
        }

        deletions.sort_by_key(|s| (s.start, s.end()));

        let mut merged: Vec<Span> = Vec::with_capacity(deletions.len());
        for span in deletions {
            match merged.last_mut() {
                Some(last) if span.start <= last.end() => {
                    if span.end() > last.end() {
                        last.len = span.end() - last.start;
                    }
                }
                _ => merged.push(span),
            }
        }

        // Back to front so earlier offsets stay valid while deleting.
        for span in merged.iter().rev() {
            self.text.replace_range(span.start..span.end(), "");
        }

        Ok(())
    }
}

/// Iterator over the lines of a document snapshot
pub struct Lines<'a> {
    text: &'a str,
    offset: usize,
    number: usize,
    done: bool,
}

impl<'a> Iterator for Lines<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Line<'a>> {
        if self.done {
            return None;
        }
        let rest = &self.text[self.offset..];
        let line = match rest.find('\n') {
            Some(nl) => {
                let (text, terminator) = if nl > 0 && rest.as_bytes()[nl - 1] == b'\r' {
                    (&rest[..nl - 1], &rest[nl - 1..=nl])
                } else {
                    (&rest[..nl], &rest[nl..=nl])
                };
                let line = Line {
                    number: self.number,
                    start: self.offset,
                    text,
                    terminator,
                };
                self.offset += nl + 1;
                self.number += 1;
                line
            }
            None => {
                self.done = true;
                Line {
                    number: self.number,
                    start: self.offset,
                    text: rest,
                    terminator: "",
                }
            }
        };
        Some(line)
    }
}
