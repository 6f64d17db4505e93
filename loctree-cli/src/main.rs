//! loctree — keep a local translation tree in sync with a remote store.
//!
//! # Usage
//!
//! ```text
//! loctree sync --project-id <id> --api-path <url> [--ver latest]
//!              [--path .] [--reference-language en] [--format json]
//!              [--language-folder-prefix <p>] [--api-key <key>]
//!              [--dry] [--clean] [--skip-empty] [--update-values]
//! loctree languages --project-id <id> --api-path <url> [--api-key <key>]
//! ```

mod commands;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{languages::LanguagesArgs, sync::SyncArgs};
use loctree_core::Format;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "loctree",
    version,
    about = "Synchronize a local translation tree with a remote translation store",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Push reference-language changes and pull the merged language set.
    Sync(SyncArgs),

    /// List the languages the remote store knows for a project.
    Languages(LanguagesArgs),
}

// ---------------------------------------------------------------------------
// Shared Format argument — parsed from CLI strings, converts to core type
// ---------------------------------------------------------------------------

/// Thin wrapper so clap can parse [`Format`] from CLI args.
#[derive(Debug, Clone, Copy)]
pub struct FormatArg(pub Format);

impl FromStr for FormatArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Format::from_str(s).map(Self)
    }
}

impl fmt::Display for FormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<FormatArg> for Format {
    fn from(f: FormatArg) -> Self {
        f.0
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::Languages(args) => args.run(),
    }
}
