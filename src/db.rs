use crate::config::DbOptions;
use crate::dialect::Dialect;
use crate::executor::Connection;
use crate::query_builder::QueryBuilder;

/// Entry point: owns a connection and hands out query builders.
///
/// ```rust
/// # #[cfg(feature = "sqlite")]
/// # fn demo() -> Result<(), relaxed_db::DbError> {
/// use relaxed_db::prelude::*;
///
/// let db = Db::new(relaxed_db::rusqlite::Connection::open_in_memory()?);
/// db.connection()
///     .execute_batch("CREATE TABLE users (id INTEGER PRIMARY KEY, username TEXT)")?;
///
/// let id = db.table("users").insert_get_id([("username", "alice")])?;
/// let row = db.table("users").find(id)?.expect("inserted row");
/// assert_eq!(row.get("username").and_then(Value::as_text), Some("alice"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Db<C: Connection> {
    conn: C,
    options: DbOptions,
}

impl<C: Connection> Db<C> {
    #[must_use]
    pub fn new(conn: C) -> Self {
        Self::with_options(conn, DbOptions::default())
    }

    #[must_use]
    pub fn with_options(conn: C, options: DbOptions) -> Self {
        Self { conn, options }
    }

    /// Start a builder targeting `name`. Every call starts from empty state.
    #[must_use]
    pub fn table(&self, name: impl Into<String>) -> QueryBuilder<'_, C> {
        self.query().table(name)
    }

    /// Start a builder with no table set.
    #[must_use]
    pub fn query(&self) -> QueryBuilder<'_, C> {
        QueryBuilder::new(&self.conn, self.dialect(), self.options.debug)
    }

    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.options
            .dialect
            .unwrap_or_else(|| self.conn.dialect())
    }

    #[must_use]
    pub fn options(&self) -> &DbOptions {
        &self.options
    }

    #[must_use]
    pub fn connection(&self) -> &C {
        &self.conn
    }

    #[must_use]
    pub fn into_inner(self) -> C {
        self.conn
    }
}
