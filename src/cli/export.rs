use std::path::{Path, PathBuf};

use chrono::Local;
use clap::Parser;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
pub struct Export {
    /// Directory to write the backup into
    #[arg(long, default_value = ".")]
    dir: PathBuf,
}

impl Export {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let (_config, store) = super::open_store(root);

        let target = store.export_snapshot(&self.dir, Local::now().date_naive())?;
        println!(
            "{}",
            format!("✅ Exported backup to {}", target.display()).success()
        );
        Ok(())
    }
}
