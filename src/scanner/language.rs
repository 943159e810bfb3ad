//! Language families and their comment syntax
//!
//! Languages are grouped by comment delimiters, not by grammar: for span
//! extraction `cpp` and `java` are the same language. The CLI accepts
//! family names (`rust`, `c`, `python`, `shell`, `ruby`, `sql`, `lua`,
//! `toml`, `yaml`) and infers the family from the file extension.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LanguageError {
    #[error("Unknown language: '{0}'")]
    Unknown(String),
}

/// A comment-syntax family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    /// `//` and nested `/* */`
    Rust,
    /// `//` and `/* */` (C, C++, C#, Java, JavaScript, Go, ...)
    C,
    /// `#`, with triple-quoted strings
    Python,
    /// `#`, single quotes take no escapes
    Shell,
    /// `#`
    Ruby,
    /// `--` and `/* */`
    Sql,
    /// `--`
    Lua,
    /// `#`
    Toml,
    /// `#`
    Yaml,
}

/// Comment delimiters and string-literal rules for one family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSyntax {
    /// Line-comment starters, matched to end of line
    pub line: &'static [&'static str],

    /// Block-comment delimiters, if the family has them
    pub block: Option<(&'static str, &'static str)>,

    /// Whether block comments nest
    pub nested_blocks: bool,

    /// Whether `'...'` is a string/char literal worth tracking
    pub single_quote_strings: bool,

    /// Whether backslash escapes apply inside `'...'`
    pub single_quote_escapes: bool,

    /// Whether `'''` / `"""` triple quotes exist
    pub triple_quote_strings: bool,
}

impl Language {
    /// Infers the language family from a path's extension
    pub fn from_path(path: &Path) -> Option<Language> {
        let ext = path.extension()?.to_str()?;
        Self::from_extension(ext)
    }

    /// Infers the language family from a bare extension
    pub fn from_extension(ext: &str) -> Option<Language> {
        let language = match ext.to_lowercase().as_str() {
            "rs" => Language::Rust,
            "c" | "h" | "cpp" | "cc" | "cxx" | "hpp" | "hh" | "cs" | "java" | "js" | "jsx"
            | "ts" | "tsx" | "go" | "kt" | "swift" | "scala" => Language::C,
            "py" => Language::Python,
            "sh" | "bash" | "zsh" => Language::Shell,
            "rb" => Language::Ruby,
            "sql" => Language::Sql,
            "lua" => Language::Lua,
            "toml" => Language::Toml,
            "yaml" | "yml" => Language::Yaml,
            _ => return None,
        };
        Some(language)
    }

    /// The comment syntax for this family
    pub fn syntax(&self) -> CommentSyntax {
        match self {
            Language::Rust => CommentSyntax {
                line: &["//"],
                block: Some(("/*", "*/")),
                nested_blocks: true,
                // Lifetimes make a bare ' ambiguous; leave it untracked.
                single_quote_strings: false,
                single_quote_escapes: false,
                triple_quote_strings: false,
            },
            Language::C => CommentSyntax {
                line: &["//"],
                block: Some(("/*", "*/")),
                nested_blocks: false,
                single_quote_strings: true,
                single_quote_escapes: true,
                triple_quote_strings: false,
            },
            Language::Python => CommentSyntax {
                line: &["#"],
                block: None,
                nested_blocks: false,
                single_quote_strings: true,
                single_quote_escapes: true,
                triple_quote_strings: true,
            },
            Language::Shell => CommentSyntax {
                line: &["#"],
                block: None,
                nested_blocks: false,
                single_quote_strings: true,
                single_quote_escapes: false,
                triple_quote_strings: false,
            },
            Language::Ruby => CommentSyntax {
                line: &["#"],
                block: None,
                nested_blocks: false,
                single_quote_strings: true,
                single_quote_escapes: true,
                triple_quote_strings: false,
            },
            Language::Sql => CommentSyntax {
                line: &["--"],
                block: Some(("/*", "*/")),
                nested_blocks: false,
                single_quote_strings: true,
                single_quote_escapes: false,
                triple_quote_strings: false,
            },
            Language::Lua => CommentSyntax {
                line: &["--"],
                block: None,
                nested_blocks: false,
                single_quote_strings: true,
                single_quote_escapes: true,
                triple_quote_strings: false,
            },
            Language::Toml | Language::Yaml => CommentSyntax {
                line: &["#"],
                block: None,
                nested_blocks: false,
                single_quote_strings: true,
                single_quote_escapes: false,
                triple_quote_strings: false,
            },
        }
    }

    /// The canonical family name
    pub fn name(&self) -> &'static str {
        match self {
            Language::Rust => "rust",
            Language::C => "c",
            Language::Python => "python",
            Language::Shell => "shell",
            Language::Ruby => "ruby",
            Language::Sql => "sql",
            Language::Lua => "lua",
            Language::Toml => "toml",
            Language::Yaml => "yaml",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let language = match s.trim().to_lowercase().as_str() {
            "rust" => Language::Rust,
            "c" => Language::C,
            "python" => Language::Python,
            "shell" => Language::Shell,
            "ruby" => Language::Ruby,
            "sql" => Language::Sql,
            "lua" => Language::Lua,
            "toml" => Language::Toml,
            "yaml" => Language::Yaml,
            other => return Err(LanguageError::Unknown(other.to_string())),
        };
        Ok(language)
    }
}
