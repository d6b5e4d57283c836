use rusqlite::Statement;
use rusqlite::types::Value as SqliteValue;

use crate::error::DbResult;
use crate::results::RowSet;
use crate::types::Value;

use super::params::value_from_sqlite;

/// Extract a [`Value`] from a `SQLite` row.
///
/// # Errors
/// Returns the rusqlite error if the column cannot be read.
pub fn extract_value(row: &rusqlite::Row<'_>, idx: usize) -> DbResult<Value> {
    let value: SqliteValue = row.get(idx)?;
    Ok(value_from_sqlite(value))
}

/// Run a statement whose parameters are already bound and materialize its rows.
///
/// Stops after `max_rows` rows when given.
///
/// # Errors
/// Returns the rusqlite error if stepping the statement or reading a column fails.
pub fn collect_rows(stmt: &mut Statement<'_>, max_rows: Option<usize>) -> DbResult<RowSet> {
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let col_count = column_names.len();
    let mut result_set = RowSet::new(column_names);

    let mut rows = stmt.raw_query();
    while let Some(row) = rows.next()? {
        let mut row_values = Vec::with_capacity(col_count);
        for i in 0..col_count {
            row_values.push(extract_value(row, i)?);
        }
        result_set.push_values(row_values);

        if max_rows.is_some_and(|max| result_set.len() >= max) {
            break;
        }
    }

    Ok(result_set)
}
