//! Command-line front end for the pocketnote store.
//!
//! # Responsibility
//! - Translate user actions into store operations and render the
//!   resulting notes or errors.
//! - Keep all business rules inside `pocketnote_core`.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pocketnote_core::db::open_db;
use pocketnote_core::{
    core_version, default_log_level, init_logging, NoteStore, NoteUpdate, SqliteSnapshotRepository,
};
use std::path::PathBuf;
use uuid::Uuid;

const DEFAULT_DB_FILE: &str = "pocketnote.sqlite3";

#[derive(Parser)]
#[command(name = "pocketnote", about = "Local note keeping over a SQLite snapshot", version)]
struct Cli {
    /// Path to the notes database file
    #[arg(long, default_value = DEFAULT_DB_FILE)]
    db: PathBuf,

    /// Absolute directory for rolling log files (logging off when omitted)
    #[arg(long)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database file and report core status
    Init,
    /// Add a new note
    Add {
        /// Note title
        title: String,
        /// Optional note body
        #[arg(long)]
        content: Option<String>,
    },
    /// List all notes in insertion order
    Ls,
    /// Show one note
    Show {
        /// Note ID
        id: Uuid,
    },
    /// Edit a note's title and/or body
    Edit {
        /// Note ID
        id: Uuid,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New body
        #[arg(long)]
        content: Option<String>,
    },
    /// Delete a note (unknown IDs are ignored)
    Rm {
        /// Note ID
        id: Uuid,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        init_logging(default_log_level(), log_dir)
            .map_err(|message| anyhow::anyhow!(message))
            .context("failed to initialize logging")?;
    }

    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open database at {}", cli.db.display()))?;
    let repo = SqliteSnapshotRepository::try_new(&conn)?;
    let (mut store, report) = NoteStore::open(repo)?;
    if report.recovered_from_corrupt {
        eprintln!("warning: stored notes were unreadable and have been reset");
    }

    match cli.command {
        Commands::Init => {
            println!(
                "initialized {} (core {}, {} note(s))",
                cli.db.display(),
                core_version(),
                store.len()
            );
        }
        Commands::Add { title, content } => {
            let note = store.create(title, content)?;
            println!("created {}  {}", note.id, note.title);
        }
        Commands::Ls => {
            if store.is_empty() {
                println!("No notes yet. Create one!");
            }
            for note in store.list() {
                println!("{}  {}", note.id, note.title);
            }
        }
        Commands::Show { id } => match store.get(id) {
            Some(note) => {
                println!("{}", note.title);
                if let Some(content) = note.content.as_deref() {
                    println!();
                    println!("{content}");
                }
            }
            None => bail!("note not found: {id}"),
        },
        Commands::Edit { id, title, content } => {
            let updated = store.update(id, NoteUpdate { title, content })?;
            println!("updated {}  {}", updated.id, updated.title);
        }
        Commands::Rm { id } => {
            if store.delete(id)? {
                println!("deleted {id}");
            } else {
                println!("nothing to delete for {id}");
            }
        }
    }

    Ok(())
}
