//! CLI commands for study notes.

use anyhow::Result;
use clap::Subcommand;

use crate::config;
use crate::progress;

/// Notes subcommands
#[derive(Subcommand, Debug)]
pub enum NotesCommands {
    /// Add a note
    Add {
        /// Note text (words are joined with spaces)
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// List notes, newest first
    List,

    /// Remove a note by id (a unique prefix is enough)
    Remove { note_id: String },
}

/// Leading eight chars of a note id, or the whole id if shorter
fn short_id(id: &str) -> &str {
    id.char_indices().nth(8).map_or(id, |(idx, _)| &id[..idx])
}

/// Execute a notes subcommand
pub fn execute(command: NotesCommands) -> Result<()> {
    let store = progress::notes_store(&config::fekb_home()?);

    match command {
        NotesCommands::Add { text } => {
            let note = store.update(|book| book.add(&text.join(" ")))??;
            println!("Added note {}", short_id(&note.id));
        }
        NotesCommands::List => {
            let book = store.load()?;
            if book.is_empty() {
                println!("No notes yet. Use 'fekb notes add <text>' to write one.");
                return Ok(());
            }

            for note in book.list() {
                println!(
                    "{}  {}  {}",
                    short_id(&note.id),
                    note.created_at.format("%Y-%m-%d %H:%M"),
                    note.text
                );
            }
        }
        NotesCommands::Remove { note_id } => {
            let note = store.update(|book| book.remove(&note_id))??;
            println!("Removed note: {}", note.text);
        }
    }

    Ok(())
}
