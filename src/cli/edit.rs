use std::path::Path;

use clap::Parser;
use nbt::{Carrier, Derive, PolicyType};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
pub struct Edit {
    /// Policy id (or unique id prefix)
    policy: String,

    /// New client name
    #[arg(long)]
    client: Option<String>,

    /// New client email
    #[arg(long)]
    email: Option<String>,

    /// New client phone
    #[arg(long)]
    phone: Option<String>,

    /// New policy number
    #[arg(long)]
    policy_number: Option<String>,

    /// New carrier
    #[arg(long, value_enum)]
    carrier: Option<Carrier>,

    /// New policy type
    #[arg(long = "type", value_enum)]
    policy_type: Option<PolicyType>,

    /// New effective date (YYYY-MM-DD)
    #[arg(long)]
    effective: Option<String>,

    /// New follow-up date (YYYY-MM-DD)
    #[arg(long, conflicts_with = "clear_follow_up")]
    follow_up: Option<String>,

    /// Remove the follow-up date
    #[arg(long)]
    clear_follow_up: bool,
}

impl Edit {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let (_config, store) = super::open_store(root);
        let mut policy = super::find_policy(&store, &self.policy)?;

        for (value, field) in [
            (&self.client, "client name"),
            (&self.email, "client email"),
            (&self.phone, "client phone"),
            (&self.effective, "effective date"),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                anyhow::bail!("{field} must not be empty");
            }
        }

        let mut changed = false;
        let mut set = |target: &mut String, value: Option<String>| {
            if let Some(value) = value {
                *target = value;
                changed = true;
            }
        };

        set(&mut policy.client_name, self.client);
        set(&mut policy.client_email, self.email);
        set(&mut policy.client_phone, self.phone);
        set(&mut policy.policy_number, self.policy_number);
        set(&mut policy.effective_date, self.effective);

        if let Some(carrier) = self.carrier {
            policy.carrier = carrier;
            changed = true;
        }
        if let Some(policy_type) = self.policy_type {
            policy.policy_type = policy_type;
            changed = true;
        }
        if self.clear_follow_up {
            policy.follow_up_date = None;
            changed = true;
        } else if let Some(date) = self.follow_up {
            policy.follow_up_date = Some(date);
            changed = true;
        }

        if !changed {
            anyhow::bail!("Nothing to change; pass at least one field flag");
        }

        let saved = store.update(policy, Derive::Apply)?;
        println!(
            "{}",
            format!("✅ Updated policy for {}", saved.client_name).success()
        );
        Ok(())
    }
}
