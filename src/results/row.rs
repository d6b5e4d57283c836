use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Map as JsonMap;

use crate::types::Value;

/// A single fetched record.
///
/// Column names are shared across every row of a [`RowSet`](super::RowSet); values are kept
/// in select-list order.
#[derive(Debug, Clone)]
pub struct Row {
    /// The column names for this row (shared across all rows in a result set)
    column_names: Arc<Vec<String>>,
    /// The values for this row
    values: Vec<Value>,
    // Lookup cache shared with sibling rows
    column_index: Arc<HashMap<String, usize>>,
}

impl Row {
    /// Create a row with its own column index.
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, values: Vec<Value>) -> Self {
        let column_index = Arc::new(index_columns(&column_names));
        Self::with_index(column_names, values, column_index)
    }

    pub(crate) fn with_index(
        column_names: Arc<Vec<String>>,
        values: Vec<Value>,
        column_index: Arc<HashMap<String, usize>>,
    ) -> Self {
        Self {
            column_names,
            values,
            column_index,
        }
    }

    /// Get the index of a column by name
    #[must_use]
    pub fn get_column_index(&self, column_name: &str) -> Option<usize> {
        self.column_index.get(column_name).copied()
    }

    /// Get a value from the row by column name, or `None` if the column wasn't selected.
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&Value> {
        self.get_column_index(column_name)
            .and_then(|idx| self.values.get(idx))
    }

    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.column_names
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(column, value)` pairs in select-list order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.column_names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    #[must_use]
    pub fn into_pairs(self) -> Vec<(String, Value)> {
        self.column_names.iter().cloned().zip(self.values).collect()
    }

    /// Render the row as a JSON object keyed by column name.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let map: JsonMap<String, serde_json::Value> = self
            .iter()
            .map(|(name, value)| (name.to_owned(), value.to_json()))
            .collect();
        serde_json::Value::Object(map)
    }
}

pub(crate) fn index_columns(column_names: &[String]) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(column_names.len());
    for (i, name) in column_names.iter().enumerate() {
        // first occurrence wins for duplicate column names
        index.entry(name.clone()).or_insert(i);
    }
    index
}
