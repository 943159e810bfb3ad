//! Byte spans within a document
//!
//! A span is a `(start, length)` pair addressing a deletable region of a
//! document. Span files and JSON output use the wire shape
//! `{"start": N, "length": N}`.

use serde::{Deserialize, Serialize};

/// A contiguous byte range within a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset of the first position covered
    pub start: usize,

    /// Number of bytes covered
    #[serde(rename = "length")]
    pub len: usize,
}

impl Span {
    /// Creates a span from a start offset and length
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Creates a span from start and end offsets (`end` exclusive)
    ///
    /// Panics if `end < start`.
    pub fn from_bounds(start: usize, end: usize) -> Self {
        assert!(end >= start, "span end {} before start {}", end, start);
        Self {
            start,
            len: end - start,
        }
    }

    /// Returns the offset one past the last position covered
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Returns true if the span covers no positions
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if the spans share a position or touch at a boundary
    ///
    /// Touching counts: a span starting exactly where another ends
    /// intersects it. This matches the span semantics of editor
    /// classification systems, where a span covering only a line
    /// terminator still resolves to the line it terminates.
    pub fn intersects(&self, other: &Span) -> bool {
        self.start <= other.end() && other.start <= self.end()
    }
}
