use std::path::Path;

use chrono::Local;
use clap::{Parser, ValueEnum};
use nbt::{
    domain::{dates, sort},
    Filter, Policy, PolicyStatus, PolicyType,
};
use tracing::instrument;

use super::terminal::{is_narrow, Colorize};

/// Command arguments for `nbt list`.
#[derive(Debug, Parser)]
#[command(about = "List policies with filters, urgency and date ordering")]
pub struct List {
    /// Show the archived view instead of the active one.
    #[arg(long)]
    archived: bool,

    /// Case-insensitive substring match against client, policy # or carrier.
    #[arg(long, short)]
    search: Option<String>,

    /// Filter by line of business.
    #[arg(long = "type", value_enum)]
    policy_type: Option<PolicyType>,

    /// Filter by policy status (active view only).
    #[arg(long, value_enum)]
    status: Option<PolicyStatus>,

    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Suppress headers and format rows for scripting.
    #[arg(long)]
    quiet: bool,
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl List {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let (config, store) = super::open_store(root);
        let today = Local::now().date_naive();

        let filter = Filter {
            search: self.search.clone().unwrap_or_default(),
            policy_type: self.policy_type,
            status: self.status,
            show_archived: self.archived,
        };

        let mut policies = filter.apply(store.load_all()?);
        sort::sort(&mut policies, self.archived, today, config.urgency_window_days());

        match self.output {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&policies)?);
            }
            OutputFormat::Table => {
                if self.quiet {
                    for policy in &policies {
                        println!("{} {}", policy.id, policy.client_name);
                    }
                } else {
                    self.output_table(&policies, today, config.urgency_window_days());
                }
            }
        }

        Ok(())
    }

    fn output_table(&self, policies: &[Policy], today: chrono::NaiveDate, window: u64) {
        let view = if self.archived { "Archived" } else { "Active" };
        println!("{view} policies ({})", policies.len());
        println!("{}", "─".repeat(20).dim());

        if policies.is_empty() {
            if self.archived {
                println!("No archived policies.");
            } else {
                println!("No policies match. Try 'nbt add' or loosen the filters.");
            }
            return;
        }

        let narrow = is_narrow();
        for policy in policies {
            let short_id = policy.id.get(..8).unwrap_or(&policy.id);
            let proximity = dates::DateProximity::of(&policy.effective_date, today);
            let urgent = dates::is_urgent(policy, today, window);
            let marker = if urgent { "⚠️ " } else { "" };

            let effective = format!("Eff: {} ({proximity})", policy.effective_date);
            let effective = if urgent {
                effective.urgent()
            } else {
                effective.dim()
            };

            if narrow {
                println!("{marker}{} ({})", policy.client_name, policy.policy_number);
                println!("  {} {} | {}", policy.carrier, policy.policy_type, policy.status);
                println!("  {effective}");
                println!("  {}", format!("id {short_id}").dim());
            } else {
                println!(
                    "{marker}{:<10} {:<22} {:<18} {:<8} {:<22} {:<3}/{:<3} {}",
                    short_id,
                    truncate(&policy.client_name, 22),
                    policy.carrier.to_string(),
                    policy.policy_type.to_string(),
                    policy.status.to_string(),
                    policy.met_count(),
                    policy.requirements.len(),
                    effective,
                );
            }

            if let Some(follow_up) = policy.follow_up_date.as_deref() {
                let proximity = dates::DateProximity::of(follow_up, today);
                println!("  {}", format!("Follow-up: {follow_up} ({proximity})").warning());
            }
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
