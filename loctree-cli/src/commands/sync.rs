//! `loctree sync` — reconcile the local tree with the remote store.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use loctree_core::LanguageCode;
use loctree_remote::HttpRemote;
use loctree_sync::{SyncOptions, SyncReport, WriteResult, DEFAULT_SETTLE_DELAY};

use crate::FormatArg;

/// Arguments for `loctree sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Remote project identifier.
    #[arg(long)]
    pub project_id: String,

    /// Project version to sync against.
    #[arg(long, default_value = "latest")]
    pub ver: String,

    /// Base URL of the translation service API.
    #[arg(long)]
    pub api_path: String,

    /// API key, forwarded as the Authorization header. Required for pushes.
    #[arg(long)]
    pub api_key: Option<String>,

    /// Root of the local translation tree.
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Source-of-truth language for structural changes.
    #[arg(long, default_value = "en")]
    pub reference_language: String,

    /// Local file format: json, flat, yaml or csv.
    #[arg(long, default_value = "json")]
    pub format: FormatArg,

    /// Prefix for language folder names (e.g. `locale-`).
    #[arg(long, default_value = "")]
    pub language_folder_prefix: String,

    /// Show what would be pushed and written without touching anything.
    #[arg(long)]
    pub dry: bool,

    /// Wipe the local tree before syncing.
    #[arg(long)]
    pub clean: bool,

    /// Do not write namespace files that would be empty.
    #[arg(long)]
    pub skip_empty: bool,

    /// Also push changed values, not just added/removed keys.
    #[arg(long)]
    pub update_values: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let options = SyncOptions {
            project_id: self.project_id.clone(),
            version: self.ver.clone(),
            api_path: self.api_path.clone(),
            api_key: self.api_key.clone(),
            path: self.path.clone(),
            reference_language: LanguageCode::from(self.reference_language.as_str()),
            format: self.format.into(),
            language_folder_prefix: self.language_folder_prefix.clone(),
            dry: self.dry,
            clean: self.clean,
            skip_empty: self.skip_empty,
            update_values: self.update_values,
            settle_delay: DEFAULT_SETTLE_DELAY,
        };

        let remote = HttpRemote::new(&self.api_path, &self.project_id, &self.ver, self.api_key)
            .context("could not build HTTP client")?;
        let report = loctree_sync::sync(&options, &remote)
            .with_context(|| format!("sync failed for project '{}'", self.project_id))?;

        print_report(&report, self.dry);
        Ok(())
    }
}

fn print_report(report: &SyncReport, dry: bool) {
    let prefix = if dry { "[dry] " } else { "" };

    for push in &report.pushes {
        let ns = &push.namespace;
        if push.diff.is_empty() {
            println!("{}", format!("{prefix}{ns}: nothing to change").dimmed());
            continue;
        }
        for key in &push.diff.to_remove {
            println!("{}", format!("{prefix}- {ns}/{key}").red());
        }
        for key in &push.diff.to_add {
            println!("{}", format!("{prefix}+ {ns}/{key}").green());
        }
        for key in &push.diff.to_update {
            println!("{}", format!("{prefix}~ {ns}/{key}").yellow());
        }
    }

    let mut written = 0usize;
    let mut skipped = 0usize;
    for write in &report.writes {
        match write {
            WriteResult::Written { path } => {
                written += 1;
                println!("{prefix}✎  {}", path.display());
            }
            WriteResult::WouldWrite { path } => {
                written += 1;
                println!("{prefix}~  {}", path.display());
            }
            WriteResult::SkippedEmpty {
                language,
                namespace,
            } => {
                skipped += 1;
                println!(
                    "{}",
                    format!("{prefix}·  {language}/{namespace} (empty, skipped)").dimmed()
                );
            }
        }
    }

    println!(
        "{prefix}{} ({written} file(s) written, {skipped} skipped)",
        "FINISHED".green()
    );
}
