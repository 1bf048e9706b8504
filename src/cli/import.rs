use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
pub struct Import {
    /// Path to a previously exported backup file
    file: PathBuf,

    /// Skip the confirmation prompt
    #[arg(long, short)]
    yes: bool,
}

impl Import {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let (_config, store) = super::open_store(root);

        let bytes = std::fs::read(&self.file)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", self.file.display()))?;

        if !self.yes {
            let existing = store.load_all()?.len();
            let prompt = format!(
                "Importing replaces the current collection ({existing} policies). Continue?"
            );
            if !super::prompt_to_proceed(&prompt)? {
                println!("Aborted.");
                return Ok(());
            }
        }

        let count = store.import_snapshot(&bytes)?;
        println!(
            "{}",
            format!("✅ Imported {count} policies from {}", self.file.display()).success()
        );
        Ok(())
    }
}
