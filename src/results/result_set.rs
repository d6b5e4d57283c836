use std::collections::HashMap;
use std::sync::Arc;

use super::row::{Row, index_columns};
use crate::types::Value;

/// Ordered rows returned by a read.
///
/// An empty set means the statement ran and matched nothing; failures are reported as
/// errors, never as an empty set.
#[derive(Debug, Clone, Default)]
pub struct RowSet {
    rows: Vec<Row>,
    /// Column names shared by all rows (to avoid duplicating in each row)
    column_names: Arc<Vec<String>>,
    column_index: Arc<HashMap<String, usize>>,
}

impl RowSet {
    /// Create an empty set for the given columns.
    #[must_use]
    pub fn new(column_names: Vec<String>) -> Self {
        let column_index = Arc::new(index_columns(&column_names));
        Self {
            rows: Vec::new(),
            column_names: Arc::new(column_names),
            column_index,
        }
    }

    /// Append a row whose values follow this set's column order.
    pub fn push_values(&mut self, values: Vec<Value>) {
        self.rows.push(Row::with_index(
            Arc::clone(&self.column_names),
            values,
            Arc::clone(&self.column_index),
        ));
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

impl IntoIterator for RowSet {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a RowSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_share_column_names() {
        let mut set = RowSet::new(vec!["id".into()]);
        set.push_values(vec![Value::Int(1)]);
        set.push_values(vec![Value::Int(2)]);
        assert_eq!(set.len(), 2);
        let ids: Vec<i64> = set.iter().filter_map(|r| r.get("id")?.as_int().copied()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(set.rows[1].columns(), set.column_names());
    }

    #[test]
    fn default_is_empty() {
        let set = RowSet::default();
        assert!(set.is_empty());
        assert!(set.first().is_none());
    }
}
