use std::{collections::BTreeMap, path::Path};

use chrono::Local;
use clap::Parser;
use nbt::domain::dates;
use tracing::instrument;

use super::terminal::{is_narrow, Colorize};

#[derive(Debug, Parser, Default)]
#[command(about = "Show policy counts and urgent follow-ups")]
pub struct Status {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Suppress headers and format for scripting
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Status {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let (config, store) = super::open_store(root);
        let policies = store.load_all()?;
        let today = Local::now().date_naive();

        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for policy in &policies {
            *counts.entry(policy.status.to_string()).or_insert(0) += 1;
        }

        let total = policies.len();
        let urgent: Vec<_> = policies
            .iter()
            .filter(|p| dates::is_urgent(p, today, config.urgency_window_days()))
            .collect();

        if total == 0 {
            println!("No policies tracked yet. Create one with 'nbt add'.");
            return Ok(());
        }

        match self.output {
            OutputFormat::Json => {
                Self::output_json(&counts, total, urgent.len())?;
            }
            OutputFormat::Table => {
                if self.quiet {
                    println!("total={total} urgent={}", urgent.len());
                } else {
                    Self::output_table(&counts, total, &urgent);
                }
            }
        }

        Ok(())
    }

    fn output_json(
        counts: &BTreeMap<String, usize>,
        total: usize,
        urgent: usize,
    ) -> anyhow::Result<()> {
        use serde_json::json;

        let statuses: Vec<_> = counts
            .iter()
            .map(|(status, count)| json!({ "status": status, "count": count }))
            .collect();

        let output = json!({
            "statuses": statuses,
            "total": total,
            "urgent": urgent,
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_table(counts: &BTreeMap<String, usize>, total: usize, urgent: &[&nbt::Policy]) {
        const MAX_URGENT_DISPLAY: usize = 5;
        let narrow = is_narrow();

        println!("Policy counts");
        println!("{}", "─────────────".dim());

        if narrow {
            for (status, count) in counts {
                println!("{status}: {count}");
            }
            println!("Total: {total}");
        } else {
            println!("{:<22} {:<6}", "Status", "Count");
            for (status, count) in counts {
                println!("{status:<22} {count:<6}");
            }
            println!("Total                  {total}");
        }

        println!();

        if urgent.is_empty() {
            println!("Urgent this week: {} ✅", "0".success());
        } else {
            println!(
                "Urgent this week: {} ⚠️",
                urgent.len().to_string().warning()
            );
            for policy in urgent.iter().take(MAX_URGENT_DISPLAY) {
                println!(
                    "  - {} ({} eff. {})",
                    policy.client_name, policy.policy_number, policy.effective_date
                );
            }
            if urgent.len() > MAX_URGENT_DISPLAY {
                println!("  - ... and {} more", urgent.len() - MAX_URGENT_DISPLAY);
            }
            println!("{}", "Run 'nbt list' to work the queue.".dim());
        }
    }
}
