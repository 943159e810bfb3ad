//! Comment span extraction
//!
//! A single forward pass over the bytes of the text. All delimiters are
//! ASCII, so byte-wise matching is safe in UTF-8 input and every span
//! produced starts and ends on a character boundary.

use crate::domain::Span;

use super::language::Language;

/// Extracts comment spans from source text
///
/// A line-comment span runs from the delimiter to the end of the line,
/// terminator excluded. A block-comment span includes both delimiters;
/// an unterminated block runs to the end of the text. Every span is
/// extended backwards over the spaces and tabs immediately preceding the
/// delimiter, so deleting a full-line comment leaves a fully empty line
/// and deleting a trailing comment leaves no dangling whitespace.
///
/// Approximations: `#` is treated as a comment starter regardless of
/// what precedes it on the line (wrong for interpolation-heavy shell
/// scripts), SQL `''` doubling is read as two adjacent strings (net
/// effect is identical), and Rust character literals are untracked.
pub fn comment_spans(text: &str, language: Language) -> Vec<Span> {
    let syntax = language.syntax();
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        // String literals suppress comment detection.
        if syntax.triple_quote_strings {
            if let Some(quote) = triple_quote_at(bytes, i) {
                i = triple_quote_end(bytes, i, quote);
                continue;
            }
        }
        if bytes[i] == b'"' {
            i = string_end(bytes, i, b'"', true);
            continue;
        }
        if bytes[i] == b'\'' && syntax.single_quote_strings {
            i = string_end(bytes, i, b'\'', syntax.single_quote_escapes);
            continue;
        }

        if let Some(delim) = syntax.line.iter().find(|d| starts_with(bytes, i, d)) {
            let start = leading_whitespace_start(bytes, i);
            let end = line_end(bytes, i + delim.len());
            spans.push(Span::from_bounds(start, end));
            i = end;
            continue;
        }

        if let Some((open, close)) = syntax.block {
            if starts_with(bytes, i, open) {
                let start = leading_whitespace_start(bytes, i);
                let end = block_end(bytes, i, open, close, syntax.nested_blocks);
                spans.push(Span::from_bounds(start, end));
                i = end;
                continue;
            }
        }

        i += 1;
    }

    spans
}

fn starts_with(bytes: &[u8], at: usize, pattern: &str) -> bool {
    bytes[at..].starts_with(pattern.as_bytes())
}

/// Walks back over spaces and tabs preceding a delimiter
fn leading_whitespace_start(bytes: &[u8], delim_at: usize) -> usize {
    let mut start = delim_at;
    while start > 0 && (bytes[start - 1] == b' ' || bytes[start - 1] == b'\t') {
        start -= 1;
    }
    start
}

/// Offset of the end of the current line, terminator excluded
fn line_end(bytes: &[u8], from: usize) -> usize {
    match bytes[from..].iter().position(|&b| b == b'\n') {
        Some(nl) => {
            let end = from + nl;
            if end > from && bytes[end - 1] == b'\r' {
                end - 1
            } else {
                end
            }
        }
        None => bytes.len(),
    }
}

/// Offset just past the close of a block comment opened at `open_at`
fn block_end(bytes: &[u8], open_at: usize, open: &str, close: &str, nested: bool) -> usize {
    let mut depth = 1usize;
    let mut i = open_at + open.len();
    while i < bytes.len() {
        if nested && starts_with(bytes, i, open) {
            depth += 1;
            i += open.len();
        } else if starts_with(bytes, i, close) {
            depth -= 1;
            i += close.len();
            if depth == 0 {
                return i;
            }
        } else {
            i += 1;
        }
    }
    bytes.len()
}

/// Offset just past the closing quote of a string opened at `open_at`
fn string_end(bytes: &[u8], open_at: usize, quote: u8, escapes: bool) -> usize {
    let mut i = open_at + 1;
    while i < bytes.len() {
        if escapes && bytes[i] == b'\\' {
            i += 2;
        } else if bytes[i] == quote {
            return i + 1;
        } else {
            i += 1;
        }
    }
    bytes.len()
}

/// The quote byte when a triple quote opens at `at`
fn triple_quote_at(bytes: &[u8], at: usize) -> Option<u8> {
    for quote in [b'"', b'\''] {
        if bytes[at..].len() >= 3 && bytes[at] == quote && bytes[at + 1] == quote && bytes[at + 2] == quote
        {
            return Some(quote);
        }
    }
    None
}

/// Offset just past the closing triple quote
fn triple_quote_end(bytes: &[u8], open_at: usize, quote: u8) -> usize {
    let mut i = open_at + 3;
    while i < bytes.len() {
        if i + 3 <= bytes.len()
            && bytes[i] == quote
            && bytes[i + 1] == quote
            && bytes[i + 2] == quote
        {
            return i + 3;
        }
        if bytes[i] == b'\\' {
            i += 2;
        } else {
            i += 1;
        }
    }
    bytes.len()
}
