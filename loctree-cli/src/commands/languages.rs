//! `loctree languages` — list a project's remote languages.

use anyhow::{Context, Result};
use clap::Args;

use loctree_remote::{HttpRemote, RemoteStore};

/// Arguments for `loctree languages`.
#[derive(Args, Debug)]
pub struct LanguagesArgs {
    /// Remote project identifier.
    #[arg(long)]
    pub project_id: String,

    /// Base URL of the translation service API.
    #[arg(long)]
    pub api_path: String,

    /// API key, forwarded as the Authorization header.
    #[arg(long)]
    pub api_key: Option<String>,
}

impl LanguagesArgs {
    pub fn run(self) -> Result<()> {
        let remote = HttpRemote::new(&self.api_path, &self.project_id, "latest", self.api_key)
            .context("could not build HTTP client")?;
        let languages = remote
            .list_languages()
            .with_context(|| format!("could not list languages for '{}'", self.project_id))?;
        for language in languages {
            println!("{language}");
        }
        Ok(())
    }
}
