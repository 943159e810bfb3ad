//! Domain models for Untask
//!
//! Contains the text-editing core without any I/O concerns.

mod span;
mod marker;
mod document;
mod eraser;

pub use span::Span;
pub use marker::MarkerSet;
pub use document::{Document, EditBatch, EditError, Line, Lines};
pub use eraser::{find_task_comments, remove_task_comments, EraseReport, TaskComment};
