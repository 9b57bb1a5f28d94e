//! SQLite storage boundary: connection configuration, opening and schema
//! bootstrap.
//!
//! # Responsibility
//! - Describe where the store lives and how connections are configured.
//! - Hand out one fresh connection per repository call.
//!
//! # Invariants
//! - Connections are never cached or shared between calls.
//! - Every storage failure is returned as `DbError`; nothing is retried here.

use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

mod open;
pub mod schema;

pub use open::open_db;

/// File used when no path is configured.
pub const DEFAULT_DB_PATH: &str = "demo.db";
/// Environment variable overriding `DbConfig::path`.
pub const DB_PATH_ENV: &str = "USERMANAGE_DB_PATH";
/// Environment variable overriding `DbConfig::busy_timeout` (milliseconds).
pub const DB_BUSY_TIMEOUT_ENV: &str = "USERMANAGE_DB_BUSY_TIMEOUT_MS";

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub type DbResult<T> = Result<T, DbError>;

/// Storage-layer failure: opening a connection or executing a statement.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Connection settings for a file-backed store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// SQLite database file.
    pub path: PathBuf,
    /// How long a statement waits on a locked database before failing.
    pub busy_timeout: Duration,
    /// Create the `user` table on open when the file is empty.
    pub bootstrap_schema: bool,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DB_PATH),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            bootstrap_schema: true,
        }
    }
}

impl DbConfig {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Builds a config from `USERMANAGE_DB_PATH` and
    /// `USERMANAGE_DB_BUSY_TIMEOUT_MS`, falling back to defaults for unset or
    /// unparsable values.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(path) = lookup(DB_PATH_ENV).filter(|value| !value.trim().is_empty()) {
            config.path = PathBuf::from(path.trim());
        }
        if let Some(timeout_ms) = lookup(DB_BUSY_TIMEOUT_ENV)
            .and_then(|value| value.trim().parse::<u64>().ok())
        {
            config.busy_timeout = Duration::from_millis(timeout_ms);
        }
        config
    }

    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }

    pub fn with_schema_bootstrap(mut self, enabled: bool) -> Self {
        self.bootstrap_schema = enabled;
        self
    }
}

/// Factory for the per-call connections repositories run statements on.
///
/// Each call must return a new, independently closable connection.
pub trait ConnectionSource {
    fn open(&self) -> DbResult<Connection>;
}

impl<S: ConnectionSource + ?Sized> ConnectionSource for &S {
    fn open(&self) -> DbResult<Connection> {
        (**self).open()
    }
}

/// Opens the configured SQLite file on every call.
#[derive(Debug, Clone, Default)]
pub struct SqliteFile {
    config: DbConfig,
}

impl SqliteFile {
    pub fn new(config: DbConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DbConfig {
        &self.config
    }
}

impl ConnectionSource for SqliteFile {
    fn open(&self) -> DbResult<Connection> {
        open_db(&self.config)
    }
}
