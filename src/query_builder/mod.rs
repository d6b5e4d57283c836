use std::fmt;

use serde::Serialize;

use crate::dialect::Dialect;
use crate::error::{DbError, DbResult};
use crate::executor::{Connection, Executor};
use crate::types::{Record, Value};

mod compile;
mod dml;
mod select;

pub use compile::{
    COUNT_ALIAS, CompiledQuery, compile_count, compile_delete, compile_exists, compile_find,
    compile_first, compile_insert, compile_select, compile_truncate, compile_update,
};

/// Key column used by [`QueryBuilder::find`] unless overridden.
pub const DEFAULT_PRIMARY_KEY: &str = "id";

/// Connective joining a predicate to the ones before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Boolean {
    And,
    Or,
}

impl Boolean {
    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            Boolean::And => "AND",
            Boolean::Or => "OR",
        }
    }
}

/// One filter condition. Its value lives at the same position in [`BuilderState::binds`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Predicate {
    pub boolean: Boolean,
    pub field: String,
    /// Inserted into the SQL verbatim.
    pub operator: String,
}

/// Everything the compiler reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuilderState {
    pub table: String,
    pub predicates: Vec<Predicate>,
    pub binds: Vec<Value>,
    /// Empty means `*`.
    pub fields: Vec<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub primary_key: Option<String>,
}

impl BuilderState {
    /// Append a predicate and its value, keeping both lists the same length.
    pub fn push_predicate(
        &mut self,
        boolean: Boolean,
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) {
        self.predicates.push(Predicate {
            boolean,
            field: field.into(),
            operator: operator.into(),
        });
        self.binds.push(value.into());
    }

    #[must_use]
    pub fn key_column(&self) -> &str {
        self.primary_key.as_deref().unwrap_or(DEFAULT_PRIMARY_KEY)
    }
}

/// Fluent query builder bound to a connection.
///
/// Configuration calls consume and return the builder; terminal calls (`get`, `first`,
/// `find`, `insert`, `update`, `delete`, `truncate`, ...) borrow it, so the same state can
/// be executed more than once. Clone the builder to branch a query:
///
/// ```rust
/// # #[cfg(feature = "sqlite")]
/// # fn demo() -> Result<(), relaxed_db::DbError> {
/// use relaxed_db::prelude::*;
///
/// let db = Db::new(relaxed_db::rusqlite::Connection::open_in_memory()?);
/// let adults = db.table("users").where_("age", ">=", 18);
/// let preview = adults.clone().limit(10).to_select()?;
/// assert_eq!(preview.sql, "SELECT * FROM `users` WHERE `age` >= ? LIMIT 10");
/// # Ok(())
/// # }
/// ```
pub struct QueryBuilder<'conn, C: Connection> {
    conn: &'conn C,
    dialect: Dialect,
    debug: bool,
    state: BuilderState,
}

impl<C: Connection> Clone for QueryBuilder<'_, C> {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn,
            dialect: self.dialect,
            debug: self.debug,
            state: self.state.clone(),
        }
    }
}

impl<C: Connection> fmt::Debug for QueryBuilder<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("dialect", &self.dialect)
            .field("debug", &self.debug)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<'conn, C: Connection> QueryBuilder<'conn, C> {
    pub(crate) fn new(conn: &'conn C, dialect: Dialect, debug: bool) -> Self {
        Self {
            conn,
            dialect,
            debug,
            state: BuilderState::default(),
        }
    }

    /// Set the target table. Calling it again replaces the previous name.
    #[must_use]
    pub fn table(mut self, name: impl Into<String>) -> Self {
        self.state.table = name.into();
        self
    }

    /// Project these fields instead of `*`. Replaces any earlier projection.
    #[must_use]
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Add an `AND` predicate. `operator` is written into the SQL as given.
    #[must_use]
    pub fn where_(
        mut self,
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.state.push_predicate(Boolean::And, field, operator, value);
        self
    }

    /// Add an `OR` predicate. Chains are not parenthesized.
    #[must_use]
    pub fn or_where(
        mut self,
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.state.push_predicate(Boolean::Or, field, operator, value);
        self
    }

    #[must_use]
    pub fn where_eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.where_(field, "=", value)
    }

    #[must_use]
    pub fn or_where_eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.or_where(field, "=", value)
    }

    /// Row limit for [`get`](Self::get). `limit(0)` is kept as an explicit zero.
    ///
    /// Engines store bounds as signed 64-bit integers, so a limit above `i64::MAX` means no
    /// limit at all.
    #[must_use]
    pub fn limit(mut self, n: u64) -> Self {
        self.state.limit = Some(n);
        self
    }

    /// Row offset for [`get`](Self::get). Values above `i64::MAX` are clamped to it.
    #[must_use]
    pub fn offset(mut self, n: u64) -> Self {
        self.state.offset = Some(n);
        self
    }

    /// Key column for [`find`](Self::find); defaults to `id`.
    #[must_use]
    pub fn primary_key(mut self, column: impl Into<String>) -> Self {
        self.state.primary_key = Some(column.into());
        self
    }

    /// Dump the compiled SQL and binds of every statement this builder runs.
    #[must_use]
    pub fn debug(mut self) -> Self {
        self.debug = true;
        self
    }

    #[must_use]
    pub fn state(&self) -> &BuilderState {
        &self.state
    }

    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    #[must_use]
    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub(crate) fn executor(&self) -> Executor<'conn, C> {
        Executor::new(self.conn, self.debug)
    }

    fn require_table(&self) -> DbResult<&str> {
        if self.state.table.trim().is_empty() {
            return Err(DbError::ConfigError(
                "no table set; call table() before running a statement".into(),
            ));
        }
        Ok(&self.state.table)
    }

    // Previews: compile without executing.

    /// # Errors
    /// Returns `DbError::ConfigError` if no table was set.
    pub fn to_select(&self) -> DbResult<CompiledQuery> {
        self.require_table()?;
        Ok(compile_select(&self.state, self.dialect))
    }

    /// # Errors
    /// Returns `DbError::ConfigError` if no table was set.
    pub fn to_first(&self) -> DbResult<CompiledQuery> {
        self.require_table()?;
        Ok(compile_first(&self.state, self.dialect))
    }

    /// # Errors
    /// Returns `DbError::ConfigError` if no table was set.
    pub fn to_find(&self, id: impl Into<Value>) -> DbResult<CompiledQuery> {
        self.require_table()?;
        Ok(compile_find(&self.state, self.dialect, id.into()))
    }

    /// # Errors
    /// Returns `DbError::ConfigError` if no table was set.
    pub fn to_count(&self) -> DbResult<CompiledQuery> {
        self.require_table()?;
        Ok(compile_count(&self.state, self.dialect))
    }

    /// # Errors
    /// Returns `DbError::ConfigError` if no table was set.
    pub fn to_exists(&self) -> DbResult<CompiledQuery> {
        self.require_table()?;
        Ok(compile_exists(&self.state, self.dialect))
    }

    /// # Errors
    /// Returns `DbError::ConfigError` if no table was set, or `DbError::ParameterError` if
    /// `data` is empty.
    pub fn to_insert<I, K, V>(&self, data: I) -> DbResult<CompiledQuery>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let table = self.require_table()?;
        let data = collect_record(data, "insert")?;
        Ok(compile_insert(table, &data, self.dialect))
    }

    /// # Errors
    /// Returns `DbError::ConfigError` if no table was set, or `DbError::ParameterError` if
    /// `data` is empty.
    pub fn to_update<I, K, V>(&self, data: I) -> DbResult<CompiledQuery>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.require_table()?;
        let data = collect_record(data, "update")?;
        Ok(compile_update(&self.state, &data, self.dialect))
    }

    /// # Errors
    /// Returns `DbError::ConfigError` if no table was set.
    pub fn to_delete(&self) -> DbResult<CompiledQuery> {
        self.require_table()?;
        Ok(compile_delete(&self.state, self.dialect))
    }

    /// # Errors
    /// Returns `DbError::ConfigError` if no table was set.
    pub fn to_truncate(&self) -> DbResult<CompiledQuery> {
        let table = self.require_table()?;
        Ok(compile_truncate(table, self.dialect))
    }
}

/// Collect column/value pairs, preserving the caller's iteration order.
fn collect_record<I, K, V>(data: I, statement: &str) -> DbResult<Record>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    let record: Record = data
        .into_iter()
        .map(|(column, value)| (column.into(), value.into()))
        .collect();
    if record.is_empty() {
        return Err(DbError::ParameterError(format!("{statement} needs at least one column")));
    }
    Ok(record)
}
