use rusqlite::Connection;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use crate::db::migrations::MigrationManager;
use crate::db::StorageError;

/// Ledger connection manager
pub struct DbConnection;

impl DbConnection {
    fn home_dir() -> Result<PathBuf> {
        dirs::home_dir().context("Failed to determine home directory")
    }

    /// Directory holding the config file and the default ledger
    pub fn config_dir() -> Result<PathBuf> {
        Ok(Self::home_dir()?.join(".yarr"))
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("rc"))
    }

    /// Get the default ledger path
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("tasks.db"))
    }

    /// Resolve the ledger path: explicit override, then the rc file, then the default
    pub fn resolve_path(override_path: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = override_path {
            return Ok(path.to_path_buf());
        }

        let config_path = Self::config_path()?;
        if config_path.exists() {
            let config = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
            let config_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
            if let Some(path) = parse_data_location(&config, config_dir) {
                return Ok(path);
            }
        }

        Self::default_path()
    }

    /// Open the ledger at `path`, creating it and parent directories if needed
    pub fn connect(path: &Path) -> Result<Connection, StorageError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| StorageError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let unreadable = |source| StorageError::Unreadable { path: path.to_path_buf(), source };
        let conn = Connection::open(path).map_err(unreadable)?;
        // A file that is not a SQLite database only fails once it is queried
        MigrationManager::initialize(&conn).map_err(unreadable)?;

        log::debug!("Opened task ledger at {}", path.display());
        Ok(conn)
    }
}

/// Extract `data.location=` from rc file contents
///
/// Relative paths are resolved against `config_dir`. Later lines win.
pub fn parse_data_location(config: &str, config_dir: &Path) -> Option<PathBuf> {
    config
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .filter_map(|line| line.strip_prefix("data.location="))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .last()
        .map(|value| {
            let path = PathBuf::from(value);
            if path.is_relative() {
                config_dir.join(path)
            } else {
                path
            }
        })
}
