//! Buffer I/O
//!
//! Reads the source buffer from a file or stdin and writes it back. The
//! in-place path writes a temp file under an exclusive lock and renames
//! it over the original, so a failed write never leaves a half-edited
//! file behind.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

/// Where the source buffer comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// Interprets a CLI file argument; `-` means stdin
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(PathBuf::from(arg))
        }
    }

    /// Returns true for the stdin source
    pub fn is_stdin(&self) -> bool {
        matches!(self, InputSource::Stdin)
    }

    /// The file path, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            InputSource::Stdin => None,
            InputSource::File(path) => Some(path),
        }
    }

    /// A name for diagnostics and listings
    pub fn display_name(&self) -> String {
        match self {
            InputSource::Stdin => "<stdin>".to_string(),
            InputSource::File(path) => path.display().to_string(),
        }
    }

    /// Reads the whole buffer as UTF-8 text
    pub fn read(&self) -> Result<String> {
        match self {
            InputSource::Stdin => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read standard input")?;
                Ok(text)
            }
            InputSource::File(path) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display())),
        }
    }
}

/// Rewrites a file atomically
pub fn write_in_place(path: &Path, contents: &str) -> Result<()> {
    let temp_path = temp_path_for(path);

    {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        // Exclusive lock while the replacement is being written
        file.lock_exclusive()
            .with_context(|| format!("Failed to lock temp file: {}", temp_path.display()))?;

        let mut writer = BufWriter::new(&file);
        writer
            .write_all(contents.as_bytes())
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush {}", temp_path.display()))?;
    }

    fs::rename(&temp_path, path).with_context(|| {
        format!(
            "Failed to replace {} with {}",
            path.display(),
            temp_path.display()
        )
    })?;

    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".untask.tmp");
    path.with_file_name(name)
}
