use std::path::Path;

use clap::Parser;
use nbt::{Derive, PolicyStatus};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
pub struct Restore {
    /// Policy id (or unique id prefix)
    policy: String,
}

impl Restore {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let (_config, store) = super::open_store(root);
        let mut policy = super::find_policy(&store, &self.policy)?;

        if policy.status != PolicyStatus::Archived {
            anyhow::bail!(
                "Policy for {} is not archived (status: {})",
                policy.client_name,
                policy.status
            );
        }

        // Skip derivation: a still fully met checklist would archive the
        // policy again on save.
        policy.status = PolicyStatus::PendingRequirements;
        let saved = store.update(policy, Derive::Skip)?;

        println!(
            "{}",
            format!("✅ Restored policy for {}", saved.client_name).success()
        );
        println!("  Status: {}", saved.status);
        Ok(())
    }
}
