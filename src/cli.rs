use std::path::{Path, PathBuf};

mod add;
mod check;
mod delete;
mod draft;
mod edit;
mod export;
mod import;
mod list;
mod note;
mod restore;
mod show;
mod status;
mod terminal;

use clap::ArgAction;
use nbt::{Config, Policy, Store};

/// Build the store described by the root directory's config.
fn open_store(root: &Path) -> (Config, Store) {
    let config = Config::load_or_default(root);
    let store = Store::new(root.join(config.data_file()));
    (config, store)
}

/// Resolve a policy by full id or unique id prefix.
///
/// This is a CLI boundary function: stored ids are opaque UUIDs, and typing
/// all 36 characters would be unkind.
fn find_policy(store: &Store, id: &str) -> anyhow::Result<Policy> {
    let policies = store.load_all()?;

    if let Some(policy) = policies.iter().find(|p| p.id == id) {
        return Ok(policy.clone());
    }

    let mut matches = policies.iter().filter(|p| p.id.starts_with(id));
    match (matches.next(), matches.next()) {
        (Some(policy), None) => Ok(policy.clone()),
        (Some(_), Some(_)) => anyhow::bail!("Policy id prefix '{id}' is ambiguous"),
        _ => anyhow::bail!("Policy '{id}' not found"),
    }
}

/// Ask for confirmation before proceeding.
fn prompt_to_proceed(prompt: &str) -> anyhow::Result<bool> {
    Ok(dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global=true)]
    verbose: u8,

    /// The path to the tracker's root directory
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Status(status::Status::default()))
            .run(self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Show policy counts and urgent follow-ups (default)
    Status(status::Status),

    /// Write a default config.toml to the root directory
    Init,

    /// Add a new policy with its requirement checklist
    Add(add::Add),

    /// List policies with filters, urgency and date ordering
    List(list::List),

    /// Show detailed information about a policy
    Show(show::Show),

    /// Update a requirement's status on a policy
    Check(check::Check),

    /// Manage a policy's communication notes
    Note(note::Command),

    /// Edit a policy's client or policy fields
    Edit(edit::Edit),

    /// Restore an archived policy to the active view
    Restore(restore::Restore),

    /// Permanently delete a policy
    Delete(delete::Delete),

    /// Export a dated backup of the whole collection
    Export(export::Export),

    /// Replace the collection with an exported backup
    Import(import::Import),

    /// Draft a client email with the configured AI assistant
    Draft(draft::Draft),
}

impl Command {
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        match self {
            Self::Status(command) => command.run(&root)?,
            Self::Init => init(&root)?,
            Self::Add(command) => command.run(&root)?,
            Self::List(command) => command.run(&root)?,
            Self::Show(command) => command.run(&root)?,
            Self::Check(command) => command.run(&root)?,
            Self::Note(command) => command.run(&root)?,
            Self::Edit(command) => command.run(&root)?,
            Self::Restore(command) => command.run(&root)?,
            Self::Delete(command) => command.run(&root)?,
            Self::Export(command) => command.run(&root)?,
            Self::Import(command) => command.run(&root)?,
            Self::Draft(command) => command.run(&root)?,
        }
        Ok(())
    }
}

fn init(root: &Path) -> anyhow::Result<()> {
    let config_path = root.join("config.toml");
    if config_path.exists() {
        anyhow::bail!("Already initialized (found existing config.toml)");
    }

    let config = Config::default();
    config
        .save(&config_path)
        .map_err(|e| anyhow::anyhow!("Failed to create config.toml: {e}"))?;

    println!("Initialized new-business tracker in {}", root.display());
    println!("  Created: config.toml");
    println!();
    println!("Next steps:");
    println!("  nbt add --client \"Jane Doe\" --email jane@example.com ...");
    Ok(())
}
