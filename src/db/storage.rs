// Task persistence
//
// The whole list is written on every save: one transaction deletes every row
// and re-inserts the current snapshot, so readers never see a partial list.

use once_cell::unsync::OnceCell;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use thiserror::Error;
use crate::db::DbConnection;
use crate::models::{Task, TaskKind};
use crate::utils::{from_storage, to_storage};

/// Persistence failures
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to create data directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read task ledger {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("corrupt task record at position {position}: {reason}")]
    Corrupt { position: i64, reason: String },
}

/// Where the ordered task list is kept between sessions
pub trait TaskStore {
    /// Overwrite the persisted list with `tasks`
    fn save_task_list(&self, tasks: &[Task]) -> Result<(), StorageError>;

    /// Previously saved tasks in order; empty when nothing was saved yet
    fn load_task_list(&self) -> Result<Vec<Task>, StorageError>;
}

/// SQLite-backed task store
pub struct Storage {
    conn: Connection,
}

impl Storage {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Open (creating if needed) the ledger file at `path`
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Ok(Self::new(DbConnection::connect(path)?))
    }

    /// In-memory ledger (for testing)
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        crate::db::MigrationManager::initialize(&conn)?;
        Ok(Self::new(conn))
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl TaskStore for Storage {
    fn save_task_list(&self, tasks: &[Task]) -> Result<(), StorageError> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM tasks", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO tasks (position, kind, description, is_done, by_ts, from_ts, to_ts)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for (position, task) in tasks.iter().enumerate() {
                let (by_ts, from_ts, to_ts) = match &task.kind {
                    TaskKind::Todo => (None, None, None),
                    TaskKind::Deadline { by } => (Some(to_storage(by)), None, None),
                    TaskKind::Event { from, to } => {
                        (None, Some(to_storage(from)), Some(to_storage(to)))
                    }
                };
                stmt.execute(rusqlite::params![
                    position as i64,
                    task.kind.as_str(),
                    task.description,
                    task.is_done,
                    by_ts,
                    from_ts,
                    to_ts,
                ])?;
            }
        }
        tx.commit()?;
        log::info!("Saved {} task(s)", tasks.len());
        Ok(())
    }

    fn load_task_list(&self) -> Result<Vec<Task>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT position, kind, description, is_done, by_ts, from_ts, to_ts
             FROM tasks ORDER BY position",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(TaskRow {
                position: row.get(0)?,
                kind: row.get(1)?,
                description: row.get(2)?,
                is_done: row.get(3)?,
                by_ts: row.get(4)?,
                from_ts: row.get(5)?,
                to_ts: row.get(6)?,
            })
        })?;

        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row?.into_task()?);
        }
        log::info!("Loaded {} task(s)", tasks.len());
        Ok(tasks)
    }
}

/// Ledger file that is opened on first use
///
/// Opening is retried on every call until it succeeds, so a session can start
/// (and keep its tasks in memory) while the file is unreadable.
pub struct LazyStorage {
    path: PathBuf,
    storage: OnceCell<Storage>,
}

impl LazyStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            storage: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage(&self) -> Result<&Storage, StorageError> {
        self.storage.get_or_try_init(|| Storage::open(&self.path))
    }
}

impl TaskStore for LazyStorage {
    fn save_task_list(&self, tasks: &[Task]) -> Result<(), StorageError> {
        self.storage()?.save_task_list(tasks)
    }

    fn load_task_list(&self) -> Result<Vec<Task>, StorageError> {
        self.storage()?.load_task_list()
    }
}

/// Raw ledger row before validation
struct TaskRow {
    position: i64,
    kind: String,
    description: String,
    is_done: bool,
    by_ts: Option<String>,
    from_ts: Option<String>,
    to_ts: Option<String>,
}

impl TaskRow {
    fn corrupt(&self, reason: impl Into<String>) -> StorageError {
        StorageError::Corrupt { position: self.position, reason: reason.into() }
    }

    fn date(
        &self,
        field: &str,
        value: &Option<String>,
    ) -> Result<chrono::NaiveDateTime, StorageError> {
        let raw = value.as_deref().ok_or_else(|| self.corrupt(format!("missing {}", field)))?;
        from_storage(raw).ok_or_else(|| self.corrupt(format!("bad {} '{}'", field, raw)))
    }

    fn into_task(self) -> Result<Task, StorageError> {
        if self.description.trim().is_empty() {
            return Err(self.corrupt("empty description"));
        }
        let mut task = match self.kind.as_str() {
            "todo" => Task::todo(self.description.clone()),
            "deadline" => {
                let by = self.date("by_ts", &self.by_ts)?;
                Task::deadline(self.description.clone(), by)
            }
            "event" => {
                let from = self.date("from_ts", &self.from_ts)?;
                let to = self.date("to_ts", &self.to_ts)?;
                Task::event(self.description.clone(), from, to)
                    .map_err(|_| self.corrupt("event ends before it starts"))?
            }
            other => return Err(self.corrupt(format!("unknown kind '{}'", other))),
        };
        task.is_done = self.is_done;
        Ok(task)
    }
}
