use crate::error::DbResult;
use crate::executor::Connection;
use crate::types::Value;

use super::QueryBuilder;

impl<C: Connection> QueryBuilder<'_, C> {
    /// Insert one row. Columns are written in the iteration order of `data`.
    ///
    /// Returns `true` when the driver reports a written row.
    ///
    /// # Errors
    /// Returns `DbError::ConfigError` if no table was set, `DbError::ParameterError` if `data`
    /// is empty, or the driver's error if the insert fails.
    pub fn insert<I, K, V>(&self, data: I) -> DbResult<bool>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let query = self.to_insert(data)?;
        Ok(self.executor().execute(&query)? > 0)
    }

    /// Insert one row and return the id the database generated for it.
    ///
    /// The id is read from the connection right after the insert, so it is only reliable when
    /// no other insert runs on the same connection in between.
    ///
    /// # Errors
    /// Same as [`insert`](Self::insert), plus the driver's error if the id cannot be read.
    pub fn insert_get_id<I, K, V>(&self, data: I) -> DbResult<i64>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let query = self.to_insert(data)?;
        let executor = self.executor();
        executor.execute(&query)?;
        executor.last_insert_id()
    }

    /// Update matching rows and return how many were affected. Without predicates every row
    /// in the table is updated.
    ///
    /// # Errors
    /// Returns `DbError::ConfigError` if no table was set, `DbError::ParameterError` if `data`
    /// is empty, or the driver's error if the update fails.
    pub fn update<I, K, V>(&self, data: I) -> DbResult<usize>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let query = self.to_update(data)?;
        self.executor().execute(&query)
    }

    /// Delete matching rows and return how many were removed. Without predicates every row
    /// in the table is deleted.
    ///
    /// # Errors
    /// Returns `DbError::ConfigError` if no table was set, or the driver's error if the
    /// delete fails.
    pub fn delete(&self) -> DbResult<usize> {
        let query = self.to_delete()?;
        self.executor().execute(&query)
    }

    /// Remove every row from the table.
    ///
    /// # Errors
    /// Returns `DbError::ConfigError` if no table was set, or the driver's error if the
    /// statement fails.
    pub fn truncate(&self) -> DbResult<()> {
        let query = self.to_truncate()?;
        self.executor().execute(&query)?;
        Ok(())
    }
}
