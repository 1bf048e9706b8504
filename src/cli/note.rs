use std::path::Path;

use clap::Parser;
use nbt::Derive;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
pub struct Command {
    #[command(subcommand)]
    command: NoteCommand,
}

#[derive(Debug, Parser)]
enum NoteCommand {
    /// Record a new communication note on a policy
    Add(Add),

    /// Delete a communication note by id
    Delete(Delete),
}

impl Command {
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        match self.command {
            NoteCommand::Add(command) => command.run(root),
            NoteCommand::Delete(command) => command.run(root),
        }
    }
}

#[derive(Debug, Parser)]
pub struct Add {
    /// Policy id (or unique id prefix)
    policy: String,

    /// The note text
    note: String,
}

impl Add {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        if self.note.trim().is_empty() {
            anyhow::bail!("Note text must not be empty");
        }

        let (_config, store) = super::open_store(root);
        let mut policy = super::find_policy(&store, &self.policy)?;

        let note_id = policy.add_note(self.note.trim()).id.clone();
        store.update(policy, Derive::Apply)?;

        println!("{}", "✅ Note recorded".success());
        println!("  id: {}", note_id.dim());
        Ok(())
    }
}

#[derive(Debug, Parser)]
pub struct Delete {
    /// Policy id (or unique id prefix)
    policy: String,

    /// The note id (or unique id prefix)
    note: String,
}

impl Delete {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let (_config, store) = super::open_store(root);
        let mut policy = super::find_policy(&store, &self.policy)?;

        let needle = self.note.as_str();
        let mut matches = policy.communications.iter().filter(|c| {
            c.id == needle || c.id.starts_with(needle)
        });
        let id = match (matches.next(), matches.next()) {
            (Some(note), None) => note.id.clone(),
            (Some(_), Some(_)) => anyhow::bail!("Note id prefix '{needle}' is ambiguous"),
            _ => anyhow::bail!("No note matching '{needle}' on this policy"),
        };

        policy.remove_note(&id);
        store.update(policy, Derive::Apply)?;

        println!("{}", "✅ Note deleted".success());
        Ok(())
    }
}
