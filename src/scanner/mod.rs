//! # Comment scanner
//!
//! Produces the comment spans the eraser consumes, for source text in a
//! known language. In an editor this classification would come from the
//! host; a standalone tool has to derive it from the text itself.
//!
//! The scanner is deliberately lexical: it tracks string literals well
//! enough not to mistake their contents for comments, and nothing more.
//! Known approximations are recorded on [`comment_spans`].

mod language;
mod scan;

pub use language::{Language, LanguageError};
pub use scan::comment_spans;
