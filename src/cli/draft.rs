use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use nbt::draft::{Assistant, GenerationError, HttpAssistant};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
pub struct Draft {
    /// Policy id (or unique id prefix)
    policy: String,

    /// What the email should say
    #[arg(long, short)]
    prompt: String,

    /// Write the HTML draft to a file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

impl Draft {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let (config, store) = super::open_store(root);
        let policy = super::find_policy(&store, &self.policy)?;

        let url = config.assistant_url.ok_or(GenerationError::NotConfigured)?;
        let assistant =
            HttpAssistant::new(url, Duration::from_secs(config.assistant_timeout_secs));

        // A failed draft is an inconvenience, not a data problem: the policy
        // itself is never touched here.
        let html = assistant.generate(&policy, &self.prompt)?;

        match self.out {
            Some(path) => {
                std::fs::write(&path, &html)
                    .map_err(|e| anyhow::anyhow!("Failed to write {}: {e}", path.display()))?;
                println!(
                    "{}",
                    format!("✅ Draft written to {}", path.display()).success()
                );
            }
            None => println!("{html}"),
        }
        Ok(())
    }
}
