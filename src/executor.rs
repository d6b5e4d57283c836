//! Statement execution against a [`Connection`].
//!
//! The executor never builds SQL. It takes a [`CompiledQuery`], prepares it, binds every
//! value positionally (1-based) and runs it. "No rows" comes back as `Ok(None)` or an empty
//! [`RowSet`]; anything the driver rejects comes back as `Err`, unmodified.

use crate::dialect::Dialect;
use crate::error::DbResult;
use crate::query_builder::CompiledQuery;
use crate::results::{Row, RowSet};
use crate::types::{BindType, Value};

/// Tracing target for statement events.
pub const SQL_TARGET: &str = "relaxed_db::sql";

/// A database connection the builder can run statements on.
///
/// Implemented for `rusqlite::Connection` when the `sqlite` feature is enabled; implement it
/// for any other driver to reuse the builder.
pub trait Connection {
    type Statement<'conn>: PreparedStatement
    where
        Self: 'conn;

    /// Prepare `sql` for execution.
    ///
    /// # Errors
    /// Returns the driver's error if the statement cannot be prepared.
    fn prepare(&self, sql: &str) -> DbResult<Self::Statement<'_>>;

    /// Row id generated by the most recent insert on this connection.
    ///
    /// # Errors
    /// Returns the driver's error if the id cannot be read.
    fn last_insert_id(&self) -> DbResult<i64>;

    /// SQL flavour this connection speaks.
    fn dialect(&self) -> Dialect {
        Dialect::MySql
    }
}

/// A prepared statement with positional parameters.
pub trait PreparedStatement {
    /// Bind `value` at `index` (1-based) as `bind_type`.
    ///
    /// The executor always passes [`Value::bind_type`], so an implementation only has to map
    /// each [`BindType`] onto its driver's parameter types.
    ///
    /// # Errors
    /// Returns the driver's error if the parameter cannot be bound, or
    /// `DbError::ParameterError` if `bind_type` cannot carry `value`.
    fn bind(&mut self, index: usize, value: &Value, bind_type: BindType) -> DbResult<()>;

    /// Run the statement and return the number of rows affected.
    ///
    /// # Errors
    /// Returns the driver's error if execution fails.
    fn execute(&mut self) -> DbResult<usize>;

    /// Run the statement and return the first row, if any.
    ///
    /// # Errors
    /// Returns the driver's error if execution or row conversion fails.
    fn fetch_one(&mut self) -> DbResult<Option<Row>>;

    /// Run the statement and return every row.
    ///
    /// # Errors
    /// Returns the driver's error if execution or row conversion fails.
    fn fetch_all(&mut self) -> DbResult<RowSet>;
}

/// Runs compiled statements on a borrowed connection.
pub struct Executor<'conn, C: Connection> {
    conn: &'conn C,
    debug: bool,
}

impl<'conn, C: Connection> Executor<'conn, C> {
    #[must_use]
    pub fn new(conn: &'conn C, debug: bool) -> Self {
        Self { conn, debug }
    }

    /// Prepare `query` and bind its values in order.
    ///
    /// # Errors
    /// Returns the driver's error if preparing or binding fails.
    pub fn prepare_and_bind(&self, query: &CompiledQuery) -> DbResult<C::Statement<'conn>> {
        tracing::trace!(
            target: SQL_TARGET,
            sql = %query.sql,
            bind_count = query.binds.len(),
            "prepare"
        );
        if self.debug {
            tracing::debug!(
                target: SQL_TARGET,
                sql = %query.sql,
                binds = %query.binds_json(),
                "statement"
            );
        }

        let mut stmt = self
            .conn
            .prepare(&query.sql)
            .inspect_err(|err| log_failure(query, err))?;
        for (i, value) in query.binds.iter().enumerate() {
            stmt.bind(i + 1, value, value.bind_type())
                .inspect_err(|err| log_failure(query, err))?;
        }
        Ok(stmt)
    }

    /// Run a statement that returns no rows; yields rows affected.
    ///
    /// # Errors
    /// Returns the driver's error if the statement fails.
    pub fn execute(&self, query: &CompiledQuery) -> DbResult<usize> {
        let mut stmt = self.prepare_and_bind(query)?;
        stmt.execute().inspect_err(|err| log_failure(query, err))
    }

    /// # Errors
    /// Returns the driver's error if the statement fails.
    pub fn fetch_one(&self, query: &CompiledQuery) -> DbResult<Option<Row>> {
        let mut stmt = self.prepare_and_bind(query)?;
        stmt.fetch_one().inspect_err(|err| log_failure(query, err))
    }

    /// # Errors
    /// Returns the driver's error if the statement fails.
    pub fn fetch_all(&self, query: &CompiledQuery) -> DbResult<RowSet> {
        let mut stmt = self.prepare_and_bind(query)?;
        stmt.fetch_all().inspect_err(|err| log_failure(query, err))
    }

    /// # Errors
    /// Returns the driver's error if the id cannot be read.
    pub fn last_insert_id(&self) -> DbResult<i64> {
        self.conn.last_insert_id()
    }
}

fn log_failure(query: &CompiledQuery, err: &crate::error::DbError) {
    tracing::warn!(
        target: SQL_TARGET,
        sql = %query.sql,
        error = %err,
        "statement failed"
    );
}
