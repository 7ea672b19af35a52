use rusqlite::{Connection, Result};
use std::collections::HashMap;

/// Current ledger schema version
const CURRENT_VERSION: u32 = 1;

/// Migration system for managing ledger schema versions
pub struct MigrationManager;

impl MigrationManager {
    /// Initialize the ledger with the current schema
    /// This creates the schema_version table and applies pending migrations
    pub fn initialize(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            )",
            [],
        )?;

        let current_version = Self::get_version(conn)?;

        for version in (current_version + 1)..=CURRENT_VERSION {
            Self::apply_migration(conn, version)?;
        }

        Ok(())
    }

    /// Apply a specific migration by version number
    fn apply_migration(conn: &Connection, version: u32) -> Result<()> {
        let migrations = get_migrations();
        let migration = migrations.get(&version).ok_or_else(|| {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_MISUSE),
                Some(format!("No migration found for version {}", version)),
            )
        })?;

        let tx = conn.unchecked_transaction()?;
        migration(&tx)?;
        tx.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [version],
        )?;
        tx.commit()?;
        log::debug!("Applied ledger migration v{}", version);
        Ok(())
    }

    /// Get the current schema version
    pub fn get_version(conn: &Connection) -> Result<u32> {
        conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
    }
}

/// Get all migrations indexed by version
fn get_migrations() -> HashMap<u32, fn(&rusqlite::Transaction) -> Result<()>> {
    let mut migrations: HashMap<u32, fn(&rusqlite::Transaction) -> Result<()>> = HashMap::new();
    migrations.insert(1, migration_v1);
    migrations
}

/// Migration v1: task table
///
/// `position` is the 0-based list order; date-times are `YYYY-MM-DDTHH:MM` text.
fn migration_v1(tx: &rusqlite::Transaction) -> Result<()> {
    tx.execute(
        "CREATE TABLE tasks (
            position INTEGER PRIMARY KEY,
            kind TEXT NOT NULL CHECK(kind IN ('todo','deadline','event')),
            description TEXT NOT NULL,
            is_done INTEGER NOT NULL DEFAULT 0,
            by_ts TEXT NULL,
            from_ts TEXT NULL,
            to_ts TEXT NULL
        )",
        [],
    )?;
    Ok(())
}
