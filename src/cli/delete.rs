use std::path::Path;

use clap::Parser;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
pub struct Delete {
    /// Policy id (or unique id prefix)
    policy: String,

    /// Skip the confirmation prompt
    #[arg(long, short)]
    yes: bool,
}

impl Delete {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let (_config, store) = super::open_store(root);
        let policy = super::find_policy(&store, &self.policy)?;

        if !self.yes {
            let prompt = format!(
                "Permanently delete the {} {} policy for {}?",
                policy.carrier, policy.policy_type, policy.client_name
            );
            if !super::prompt_to_proceed(&prompt)? {
                println!("Aborted.");
                return Ok(());
            }
        }

        store.remove(&policy.id)?;
        println!(
            "{}",
            format!("🗑️  Deleted policy for {}", policy.client_name).success()
        );
        Ok(())
    }
}
