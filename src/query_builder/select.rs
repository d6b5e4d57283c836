use crate::error::{DbError, DbResult};
use crate::executor::Connection;
use crate::results::{Row, RowSet};
use crate::types::Value;

use super::{COUNT_ALIAS, QueryBuilder};

impl<C: Connection> QueryBuilder<'_, C> {
    /// Fetch every matching row, honoring `limit` and `offset`.
    ///
    /// # Errors
    /// Returns `DbError::ConfigError` if no table was set, or the driver's error if the
    /// statement fails.
    pub fn get(&self) -> DbResult<RowSet> {
        let query = self.to_select()?;
        self.executor().fetch_all(&query)
    }

    /// Fetch the first matching row. `limit` and `offset` are not applied.
    ///
    /// # Errors
    /// Returns `DbError::ConfigError` if no table was set, or the driver's error if the
    /// statement fails.
    pub fn first(&self) -> DbResult<Option<Row>> {
        let query = self.to_first()?;
        self.executor().fetch_one(&query)
    }

    /// Fetch the row whose key column equals `id`, ignoring any `where_`/`or_where`
    /// predicates on this builder.
    ///
    /// # Errors
    /// Returns `DbError::ConfigError` if no table was set, or the driver's error if the
    /// statement fails.
    pub fn find(&self, id: impl Into<Value>) -> DbResult<Option<Row>> {
        let query = self.to_find(id)?;
        self.executor().fetch_one(&query)
    }

    /// Count matching rows.
    ///
    /// # Errors
    /// Returns `DbError::ConfigError` if no table was set, the driver's error if the statement
    /// fails, or `DbError::ExecutionError` if the driver returned no count.
    pub fn count(&self) -> DbResult<i64> {
        let query = self.to_count()?;
        let row = self.executor().fetch_one(&query)?;
        row.as_ref()
            .and_then(|row| row.get(COUNT_ALIAS))
            .and_then(Value::as_int)
            .copied()
            .ok_or_else(|| DbError::ExecutionError("count query returned no value".into()))
    }

    /// Whether at least one row matches.
    ///
    /// # Errors
    /// Returns `DbError::ConfigError` if no table was set, or the driver's error if the
    /// statement fails.
    pub fn exists(&self) -> DbResult<bool> {
        let query = self.to_exists()?;
        Ok(self.executor().fetch_one(&query)?.is_some())
    }
}
