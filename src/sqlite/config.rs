use std::time::Duration;

use crate::config::DbOptions;
use crate::db::Db;
use crate::error::{DbError, DbResult};

/// Path that opens a private in-memory database.
pub const MEMORY_PATH: &str = ":memory:";

/// Options for opening a `SQLite` database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteOptions {
    pub db_path: String,
    pub busy_timeout: Option<Duration>,
    /// Switch the journal to WAL on open.
    pub wal: bool,
    pub debug: bool,
}

impl SqliteOptions {
    #[must_use]
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            busy_timeout: None,
            wal: false,
            debug: false,
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MEMORY_PATH)
    }

    /// Read options from the environment, loading a `.env` file first if one exists.
    ///
    /// `DB_DATABASE` is the database path (`:memory:` allowed), `DB_DEBUG` enables statement
    /// dumps, and `DB_CONNECTION`, when set, must be `sqlite`.
    ///
    /// # Errors
    /// Returns `DbError::ConfigError` if `DB_DATABASE` is missing or `DB_CONNECTION` names
    /// another driver.
    pub fn from_env() -> DbResult<Self> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(DbError::ConfigError(format!("failed to load .env: {err}")));
            }
        }
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    /// Build options from an arbitrary variable source.
    ///
    /// # Errors
    /// See [`SqliteOptions::from_env`].
    pub fn from_lookup<F>(lookup: F) -> DbResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(driver) = lookup("DB_CONNECTION") {
            if !driver.eq_ignore_ascii_case("sqlite") {
                return Err(DbError::ConfigError(format!(
                    "DB_CONNECTION={driver} is not supported by the sqlite backend"
                )));
            }
        }
        let db_path = lookup("DB_DATABASE")
            .filter(|path| !path.trim().is_empty())
            .ok_or_else(|| DbError::ConfigError("DB_DATABASE is not set".into()))?;
        let debug = lookup("DB_DEBUG").is_some_and(|v| parse_flag(&v));

        let mut opts = Self::new(db_path);
        opts.debug = debug;
        if let Some(ms) = lookup("DB_BUSY_TIMEOUT_MS") {
            let ms: u64 = ms.trim().parse().map_err(|e| {
                DbError::ConfigError(format!("DB_BUSY_TIMEOUT_MS is not a number: {e}"))
            })?;
            opts.busy_timeout = Some(Duration::from_millis(ms));
        }
        Ok(opts)
    }

    /// Open a raw rusqlite connection with these options applied.
    ///
    /// # Errors
    /// Returns `DbError::ConnectionError` if the database cannot be opened, or the rusqlite
    /// error if applying the options fails.
    pub fn connect(&self) -> DbResult<rusqlite::Connection> {
        let opened = if self.db_path == MEMORY_PATH {
            rusqlite::Connection::open_in_memory()
        } else {
            rusqlite::Connection::open(&self.db_path)
        };
        let conn = opened.map_err(|err| {
            DbError::ConnectionError(format!("failed to open {}: {err}", self.db_path))
        })?;
        if let Some(timeout) = self.busy_timeout {
            conn.busy_timeout(timeout)?;
        }
        if self.wal {
            conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        }
        tracing::debug!(path = %self.db_path, wal = self.wal, "opened sqlite database");
        Ok(conn)
    }

    /// Open the database and wrap it in a [`Db`].
    ///
    /// # Errors
    /// Returns the rusqlite error if the database cannot be opened or configured.
    pub fn open(&self) -> DbResult<Db<rusqlite::Connection>> {
        let conn = self.connect()?;
        Ok(Db::with_options(conn, DbOptions::default().with_debug(self.debug)))
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Fluent builder for `SQLite` options.
#[derive(Debug, Clone)]
pub struct SqliteOptionsBuilder {
    opts: SqliteOptions,
}

impl SqliteOptionsBuilder {
    #[must_use]
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            opts: SqliteOptions::new(db_path),
        }
    }

    #[must_use]
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.opts.busy_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn wal(mut self, wal: bool) -> Self {
        self.opts.wal = wal;
        self
    }

    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.opts.debug = debug;
        self
    }

    #[must_use]
    pub fn finish(self) -> SqliteOptions {
        self.opts
    }

    /// Open the configured database.
    ///
    /// # Errors
    /// Returns the rusqlite error if the database cannot be opened or configured.
    pub fn open(self) -> DbResult<Db<rusqlite::Connection>> {
        self.opts.open()
    }
}

impl SqliteOptions {
    #[must_use]
    pub fn builder(db_path: impl Into<String>) -> SqliteOptionsBuilder {
        SqliteOptionsBuilder::new(db_path)
    }
}
