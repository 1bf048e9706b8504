use std::path::Path;

use clap::Parser;
use nbt::{
    domain::catalog, Carrier, NewPolicy, Policy, PolicyStatus, PolicyType, Requirement,
};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Add a new policy with its requirement checklist")]
pub struct Add {
    /// Client's full name
    #[arg(long)]
    client: String,

    /// Client's email address
    #[arg(long)]
    email: String,

    /// Client's phone number
    #[arg(long)]
    phone: String,

    /// Carrier policy number
    #[arg(long)]
    policy_number: String,

    /// Writing carrier
    #[arg(long, value_enum)]
    carrier: Carrier,

    /// Line of business
    #[arg(long = "type", value_enum)]
    policy_type: PolicyType,

    /// Effective date (YYYY-MM-DD)
    #[arg(long)]
    effective: String,

    /// Optional follow-up date (YYYY-MM-DD)
    #[arg(long)]
    follow_up: Option<String>,

    /// Requirement to add, by catalog name (repeatable). Names not in the
    /// catalog become custom requirements.
    #[arg(long = "requirement", value_name = "NAME")]
    requirements: Vec<String>,

    /// Create the policy with an empty checklist (it archives immediately)
    #[arg(long, conflicts_with = "requirements")]
    no_requirements: bool,
}

impl Add {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let (_config, store) = super::open_store(root);

        let candidates = catalog::selectable(self.carrier, self.policy_type);
        let requirements = if self.no_requirements {
            Vec::new()
        } else if self.requirements.is_empty() {
            Self::pick_interactively(&candidates)?
        } else {
            self.requirements
                .iter()
                .map(|name| {
                    candidates
                        .iter()
                        .find(|c| c.name.eq_ignore_ascii_case(name))
                        .map_or_else(
                            || Requirement::new(name.clone(), String::new()),
                            |c| Requirement::new(c.name, c.description),
                        )
                })
                .collect()
        };

        let policy = Policy::new(
            NewPolicy {
                client_name: self.client,
                client_email: self.email,
                client_phone: self.phone,
                policy_number: self.policy_number,
                carrier: self.carrier,
                policy_type: self.policy_type,
                effective_date: self.effective,
                follow_up_date: self.follow_up,
            },
            requirements,
        )?;

        let saved = store.append(policy)?;

        println!(
            "{}",
            format!(
                "✅ Added {} {} policy for {} ({} requirements)",
                saved.carrier,
                saved.policy_type,
                saved.client_name,
                saved.requirements.len()
            )
            .success()
        );
        println!("  Id:     {}", saved.id);
        println!("  Status: {}", saved.status);
        if saved.status == PolicyStatus::Archived {
            println!(
                "{}",
                "No requirements to collect, so the policy was archived immediately.".dim()
            );
        }
        Ok(())
    }

    fn pick_interactively(
        candidates: &[catalog::CatalogEntry],
    ) -> anyhow::Result<Vec<Requirement>> {
        let labels: Vec<String> = candidates
            .iter()
            .map(|c| format!("{}: {}", c.name, c.description))
            .collect();

        let picked = dialoguer::MultiSelect::new()
            .with_prompt("Select the requirements for this policy (space to toggle)")
            .items(&labels)
            .interact()?;

        Ok(picked
            .into_iter()
            .map(|i| Requirement::new(candidates[i].name, candidates[i].description))
            .collect())
    }
}
