use rusqlite::Statement;

use crate::dialect::Dialect;
use crate::error::DbResult;
use crate::executor::{Connection, PreparedStatement};
use crate::results::{Row, RowSet};
use crate::types::{BindType, Value};

use super::params::value_to_sqlite;
use super::query::collect_rows;

/// Prepared rusqlite statement.
pub struct SqliteStatement<'conn> {
    stmt: Statement<'conn>,
}

impl<'conn> SqliteStatement<'conn> {
    #[must_use]
    pub fn new(stmt: Statement<'conn>) -> Self {
        Self { stmt }
    }

    /// Number of `?` parameters the statement expects.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.stmt.parameter_count()
    }
}

impl PreparedStatement for SqliteStatement<'_> {
    fn bind(&mut self, index: usize, value: &Value, bind_type: BindType) -> DbResult<()> {
        let value = value_to_sqlite(value, bind_type)?;
        self.stmt.raw_bind_parameter(index, value)?;
        Ok(())
    }

    fn execute(&mut self) -> DbResult<usize> {
        Ok(self.stmt.raw_execute()?)
    }

    fn fetch_one(&mut self) -> DbResult<Option<Row>> {
        let rows = collect_rows(&mut self.stmt, Some(1))?;
        Ok(rows.into_iter().next())
    }

    fn fetch_all(&mut self) -> DbResult<RowSet> {
        collect_rows(&mut self.stmt, None)
    }
}

impl Connection for rusqlite::Connection {
    type Statement<'conn>
        = SqliteStatement<'conn>
    where
        Self: 'conn;

    fn prepare(&self, sql: &str) -> DbResult<SqliteStatement<'_>> {
        let stmt = rusqlite::Connection::prepare(self, sql)?;
        Ok(SqliteStatement::new(stmt))
    }

    fn last_insert_id(&self) -> DbResult<i64> {
        Ok(self.last_insert_rowid())
    }

    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }
}
