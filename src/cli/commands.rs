use clap::{Parser, Subcommand};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use crate::cli::error::exit_with;
use crate::cli::session::{Session, SessionState};
use crate::cli::ui::ConsoleUi;
use crate::db::{DbConnection, LazyStorage, Storage, TaskStore};
use crate::error::YarrError;

#[derive(Parser)]
#[command(name = "yarr")]
#[command(
    about = "Yarr - the pirate task manager. Keeps yer todos, deadlines and events shipshape."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Task ledger location (overrides data.location in ~/.yarr/rc)
    #[arg(long, global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive session (default)
    Chat,
    /// Run a single command, e.g. `yarr exec deadline report /by 20/12/2024 1800`
    Exec {
        /// Command words, joined with single spaces
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        words: Vec<String>,
    },
    /// Print all tasks as JSON
    Export,
    /// Print the resolved task ledger location
    Where,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let path = DbConnection::resolve_path(cli.data.as_deref())?;
    log::debug!("Using task ledger {}", path.display());

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => handle_chat(&path),
        Commands::Exec { words } => handle_exec(&path, &words),
        Commands::Export => handle_export(&path),
        Commands::Where => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

/// Interactive session over stdin until `bye` or end of input
///
/// The ledger is opened lazily: if it cannot be read the failure is reported
/// and the session carries on with an empty list held in memory.
fn handle_chat(path: &Path) -> Result<()> {
    let mut ui = ConsoleUi;
    let mut session = Session::open(LazyStorage::new(path), &mut ui);
    session.greet(&mut ui);

    let mut stdin = std::io::stdin().lock();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match stdin.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                log::warn!("Failed to read input: {}", e);
                break;
            }
        }
        // Bytes that are not UTF-8 become replacement characters
        let line = String::from_utf8_lossy(&buf);
        if session.handle_line(&line, &mut ui) == SessionState::Exited {
            return Ok(());
        }
    }

    log::debug!("Input closed without bye");
    session.close(&mut ui);
    Ok(())
}

/// Run one command line against the stored list
///
/// Unlike the interactive session, an unreadable ledger is fatal here so a
/// one-shot command never overwrites it with an empty list.
fn handle_exec(path: &Path, words: &[String]) -> Result<()> {
    let line = join_words(words);
    let opened = Storage::open(path).and_then(Session::try_open);
    let mut session = match opened {
        Ok(session) => session,
        Err(e) => exit_with(&YarrError::Storage(e)),
    };

    let mut ui = ConsoleUi;
    if let Err(e) = session.execute_line(&line, &mut ui) {
        exit_with(&e);
    }
    Ok(())
}

fn handle_export(path: &Path) -> Result<()> {
    let storage = Storage::open(path)?;
    let tasks = storage.load_task_list()
        .context("Failed to load tasks")?;
    let json = serde_json::to_string_pretty(&tasks)
        .context("Failed to serialize tasks")?;
    println!("{}", json);
    Ok(())
}

/// Join command words into one input line
pub fn join_words(words: &[String]) -> String {
    words
        .iter()
        .map(|w| w.trim())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
