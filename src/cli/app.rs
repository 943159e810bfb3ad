//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{clean, query};
use crate::scanner::Language;

#[derive(Parser)]
#[command(name = "untask")]
#[command(author, version, about = "Remove task comments from source files")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Remove task comments from a file
    Clean {
        /// File to clean ("-" reads standard input)
        file: String,

        /// Rewrite the file in place instead of printing to stdout
        #[arg(long, short)]
        write: bool,

        /// Report what would be removed without changing anything
        #[arg(long)]
        dry_run: bool,

        /// JSON file of precomputed comment spans (bypasses the scanner)
        #[arg(long)]
        spans: Option<PathBuf>,

        /// Language override (inferred from the file extension by default)
        #[arg(long, short)]
        language: Option<Language>,

        /// Additional marker recognized beside the built-in set (repeatable)
        #[arg(long = "marker", value_name = "NAME")]
        markers: Vec<String>,
    },

    /// List task comments without removing them
    List {
        /// Files to inspect
        #[arg(required = true)]
        files: Vec<String>,

        /// Language override (inferred from each file extension by default)
        #[arg(long, short)]
        language: Option<Language>,

        /// Additional marker recognized beside the built-in set (repeatable)
        #[arg(long = "marker", value_name = "NAME")]
        markers: Vec<String>,
    },

    /// Fail when task comments are present (for CI)
    Check {
        /// Files to inspect
        #[arg(required = true)]
        files: Vec<String>,

        /// Language override (inferred from each file extension by default)
        #[arg(long, short)]
        language: Option<Language>,

        /// Additional marker recognized beside the built-in set (repeatable)
        #[arg(long = "marker", value_name = "NAME")]
        markers: Vec<String>,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    match cli.command {
        Commands::Clean {
            file,
            write,
            dry_run,
            spans,
            language,
            markers,
        } => clean::run(
            &output,
            &file,
            write,
            dry_run,
            spans.as_deref(),
            language,
            &markers,
        )?,

        Commands::List {
            files,
            language,
            markers,
        } => query::list(&output, &files, language, &markers)?,

        Commands::Check {
            files,
            language,
            markers,
        } => {
            // The exit code is the result, return it to the shell directly
            let exit_code = query::check(&output, &files, language, &markers)?;
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
