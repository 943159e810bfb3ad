//! Caller-supplied comment span files
//!
//! A span file carries the comment classification a host editor would
//! otherwise provide: a JSON array of `{"start": N, "length": N}`
//! objects, offsets in bytes against the input buffer.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::Span;

/// Reads a span file
pub fn read_span_file(path: &Path) -> Result<Vec<Span>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read span file: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse span file: {}", path.display()))
}
