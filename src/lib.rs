//! Yarr - a pirate-flavoured personal task tracker
//!
//! This library provides the core of Yarr:
//! - Task models (todos, deadlines, events) and the ordered task list
//! - Parsing of free-text command lines into validated commands
//! - Command execution against the task list, with persistence
//! - SQLite-backed storage and schema migrations
//! - Date/time utilities
//!
//! # Example
//!
//! ```
//! use yarr::cli::Session;
//! use yarr::cli::BufferUi;
//! use yarr::db::Storage;
//!
//! let mut ui = BufferUi::new();
//! let mut session = Session::open(Storage::in_memory().unwrap(), &mut ui);
//! let reply = session.respond("todo swab the deck");
//! assert!(reply.contains("[T][ ] swab the deck"));
//! ```

pub mod cli;
pub mod db;
pub mod error;
pub mod models;
pub mod utils;
