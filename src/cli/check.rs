use std::path::Path;

use clap::Parser;
use nbt::{Derive, PolicyStatus, RequirementStatus};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Update a requirement's status on a policy")]
pub struct Check {
    /// Policy id (or unique id prefix)
    policy: String,

    /// Requirement id, id prefix, or exact name (case-insensitive)
    requirement: String,

    /// The new status
    #[arg(value_enum)]
    status: RequirementStatus,
}

impl Check {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let (_config, store) = super::open_store(root);
        let mut policy = super::find_policy(&store, &self.policy)?;

        let needle = self.requirement.as_str();
        let mut matches = policy.requirements.iter_mut().filter(|r| {
            r.id == needle || r.id.starts_with(needle) || r.name.eq_ignore_ascii_case(needle)
        });
        let Some(requirement) = matches.next() else {
            anyhow::bail!("No requirement matching '{needle}' on this policy");
        };
        if matches.next().is_some() {
            anyhow::bail!("'{needle}' matches more than one requirement; use the id");
        }

        let name = requirement.name.clone();
        let previous = requirement.status;
        requirement.status = self.status;

        let status_before = policy.status;
        let saved = store.update(policy, Derive::Apply)?;

        println!(
            "{}",
            format!("✅ {name}: {previous} → {}", self.status).success()
        );
        if saved.status != status_before && saved.status == PolicyStatus::Archived {
            println!(
                "{}",
                "All requirements met; policy archived.".success()
            );
        }
        println!("  Policy status: {}", saved.status);
        Ok(())
    }
}
