use std::path::Path;

use chrono::Local;
use clap::Parser;
use nbt::domain::dates;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Show detailed information about a policy")]
pub struct Show {
    /// Policy id (or unique id prefix)
    id: String,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl Show {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let (config, store) = super::open_store(root);
        let policy = super::find_policy(&store, &self.id)?;

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&policy)?),
            OutputFormat::Pretty => {
                Self::output_pretty(&policy, config.urgency_window_days());
            }
        }

        Ok(())
    }

    fn output_pretty(policy: &nbt::Policy, window: u64) {
        let today = Local::now().date_naive();

        println!("# {}", policy.client_name);
        println!(
            "{} {} policy {} | {}\n",
            policy.carrier, policy.policy_type, policy.policy_number, policy.status
        );

        println!("{}", "Contact".dim());
        println!("  Email:  {}", policy.client_email);
        println!("  Phone:  {}", policy.client_phone);

        println!("\n{}", "Dates".dim());
        let proximity = dates::DateProximity::of(&policy.effective_date, today);
        println!("  Effective: {} ({proximity})", policy.effective_date);
        if let Some(follow_up) = policy.follow_up_date.as_deref() {
            let proximity = dates::DateProximity::of(follow_up, today);
            println!("  Follow-up: {follow_up} ({proximity})");
        }
        if dates::is_urgent(policy, today, window) {
            println!("  {}", "⚠️  Needs attention this week".urgent());
        }

        println!("\n{}", "Requirements".dim());
        if policy.requirements.is_empty() {
            println!("  (none)");
        } else {
            for req in &policy.requirements {
                let status = req.status.to_string();
                let status = if req.is_met() {
                    status.success()
                } else {
                    status.warning()
                };
                let short_id = req.id.get(..8).unwrap_or(&req.id);
                println!("  [{status}] {} {}", req.name, format!("({short_id})").dim());
                if !req.description.is_empty() {
                    println!("        {}", req.description.dim());
                }
            }
            println!(
                "  {}",
                format!(
                    "{}/{} met",
                    policy.met_count(),
                    policy.requirements.len()
                )
                .dim()
            );
        }

        println!("\n{}", "Communication log".dim());
        if policy.communications.is_empty() {
            println!("  (no notes)");
        } else {
            // Most recent first.
            for note in policy.communications.iter().rev() {
                let short_id = note.id.get(..8).unwrap_or(&note.id);
                println!(
                    "  {} {}",
                    note.timestamp.format("%Y-%m-%d %H:%M").to_string().dim(),
                    format!("({short_id})").dim()
                );
                println!("    {}", note.note);
            }
        }

        println!("\n{}", format!("Id: {}", policy.id).dim());
    }
}
