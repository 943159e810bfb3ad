//! Untask - remove task comments from source files
//!
//! Untask deletes comments whose line carries a task marker such as
//! `TODO:` or `HACK:`, then removes any line left empty by the deletion.
//! Comment spans come from a built-in language-aware scanner or from a
//! caller-supplied span file.

pub mod domain;
pub mod scanner;
pub mod storage;
pub mod cli;

pub use domain::{Document, EraseReport, MarkerSet, Span};
pub use scanner::Language;
