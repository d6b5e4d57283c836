//! Turns builder state into SQL text plus an ordered bind list.
//!
//! Every function here is pure: the same state and dialect always produce the same output,
//! and no function fails. Clause order for reads is fixed as
//! `SELECT -> FROM -> WHERE -> LIMIT -> OFFSET`.

use serde::Serialize;

use super::{BuilderState, Predicate};
use crate::dialect::Dialect;
use crate::types::Value;

/// SQL text paired with the values for its placeholders, in placeholder order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledQuery {
    pub sql: String,
    pub binds: Vec<Value>,
}

impl CompiledQuery {
    /// The bind list rendered as a JSON array.
    #[must_use]
    pub fn binds_json(&self) -> String {
        serde_json::to_string(&self.binds).unwrap_or_default()
    }
}

/// Accumulates SQL text and keeps placeholder numbering in step with the binds.
struct SqlWriter {
    dialect: Dialect,
    sql: String,
    binds: Vec<Value>,
}

impl SqlWriter {
    fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            sql: String::with_capacity(64),
            binds: Vec::new(),
        }
    }

    fn push(&mut self, fragment: &str) {
        self.sql.push_str(fragment);
    }

    fn ident(&mut self, name: &str) {
        self.dialect.push_ident(&mut self.sql, name);
    }

    fn bind(&mut self, value: Value) {
        self.binds.push(value);
        self.dialect.push_placeholder(&mut self.sql, self.binds.len());
    }

    fn finish(self) -> CompiledQuery {
        CompiledQuery {
            sql: self.sql,
            binds: self.binds,
        }
    }
}

fn push_select_list(w: &mut SqlWriter, fields: &[String]) {
    w.push("SELECT ");
    if fields.is_empty() {
        w.push("*");
        return;
    }
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            w.push(", ");
        }
        w.ident(field);
    }
}

fn push_from(w: &mut SqlWriter, table: &str) {
    w.push(" FROM ");
    w.ident(table);
}

/// Predicates chain left to right with no grouping; the first connective is dropped.
fn push_where(w: &mut SqlWriter, predicates: &[Predicate], binds: &[Value]) {
    if predicates.is_empty() {
        return;
    }
    w.push(" WHERE ");
    for (i, (predicate, value)) in predicates.iter().zip(binds).enumerate() {
        if i > 0 {
            w.push(" ");
            w.push(predicate.boolean.as_sql());
            w.push(" ");
        }
        w.ident(&predicate.field);
        w.push(" ");
        w.push(&predicate.operator);
        w.push(" ");
        w.bind(value.clone());
    }
}

/// Largest bound every supported engine accepts as a 64-bit signed integer.
const MAX_BOUND: u64 = i64::MAX.unsigned_abs();

/// A limit past [`MAX_BOUND`] is treated as no limit, and an offset past it is clamped.
fn push_limit_offset(w: &mut SqlWriter, limit: Option<u64>, offset: Option<u64>) {
    let limit = limit.filter(|n| *n <= MAX_BOUND);
    let offset = offset.map(|n| n.min(MAX_BOUND));
    match (limit, offset) {
        (Some(limit), _) => {
            w.push(" LIMIT ");
            w.push(&limit.to_string());
        }
        (None, Some(_)) => {
            if let Some(unbounded) = w.dialect.unbounded_limit() {
                w.push(" LIMIT ");
                w.push(unbounded);
            }
        }
        (None, None) => {}
    }
    if let Some(offset) = offset {
        w.push(" OFFSET ");
        w.push(&offset.to_string());
    }
}

/// `SELECT ... FROM ... [WHERE ...] [LIMIT n] [OFFSET n]`
#[must_use]
pub fn compile_select(state: &BuilderState, dialect: Dialect) -> CompiledQuery {
    let mut w = SqlWriter::new(dialect);
    push_select_list(&mut w, &state.fields);
    push_from(&mut w, &state.table);
    push_where(&mut w, &state.predicates, &state.binds);
    push_limit_offset(&mut w, state.limit, state.offset);
    w.finish()
}

/// Like [`compile_select`] but always limited to one row; the builder's limit and offset
/// are not applied.
#[must_use]
pub fn compile_first(state: &BuilderState, dialect: Dialect) -> CompiledQuery {
    let mut w = SqlWriter::new(dialect);
    push_select_list(&mut w, &state.fields);
    push_from(&mut w, &state.table);
    push_where(&mut w, &state.predicates, &state.binds);
    w.push(" LIMIT 1");
    w.finish()
}

/// Lookup by key column. Accumulated predicates are ignored entirely.
#[must_use]
pub fn compile_find(state: &BuilderState, dialect: Dialect, id: Value) -> CompiledQuery {
    let mut w = SqlWriter::new(dialect);
    push_select_list(&mut w, &state.fields);
    push_from(&mut w, &state.table);
    w.push(" WHERE ");
    w.ident(state.key_column());
    w.push(" = ");
    w.bind(id);
    w.push(" LIMIT 1");
    w.finish()
}

/// Alias the count column is read back under.
pub const COUNT_ALIAS: &str = "aggregate";

#[must_use]
pub fn compile_count(state: &BuilderState, dialect: Dialect) -> CompiledQuery {
    let mut w = SqlWriter::new(dialect);
    w.push("SELECT COUNT(*) AS ");
    w.ident(COUNT_ALIAS);
    push_from(&mut w, &state.table);
    push_where(&mut w, &state.predicates, &state.binds);
    w.finish()
}

#[must_use]
pub fn compile_exists(state: &BuilderState, dialect: Dialect) -> CompiledQuery {
    let mut w = SqlWriter::new(dialect);
    w.push("SELECT 1");
    push_from(&mut w, &state.table);
    push_where(&mut w, &state.predicates, &state.binds);
    w.push(" LIMIT 1");
    w.finish()
}

/// Columns and placeholders are emitted in the order of `data`, and binds follow the same
/// order, so each value lands in the column it was paired with.
#[must_use]
pub fn compile_insert(table: &str, data: &[(String, Value)], dialect: Dialect) -> CompiledQuery {
    let mut w = SqlWriter::new(dialect);
    w.push("INSERT INTO ");
    w.ident(table);
    w.push(" (");
    for (i, (column, _)) in data.iter().enumerate() {
        if i > 0 {
            w.push(", ");
        }
        w.ident(column);
    }
    w.push(") VALUES (");
    for (i, (_, value)) in data.iter().enumerate() {
        if i > 0 {
            w.push(", ");
        }
        w.bind(value.clone());
    }
    w.push(")");
    w.finish()
}

/// SET binds come first in the bind list because their placeholders precede the WHERE
/// placeholders in the text.
#[must_use]
pub fn compile_update(
    state: &BuilderState,
    data: &[(String, Value)],
    dialect: Dialect,
) -> CompiledQuery {
    let mut w = SqlWriter::new(dialect);
    w.push("UPDATE ");
    w.ident(&state.table);
    w.push(" SET ");
    for (i, (column, value)) in data.iter().enumerate() {
        if i > 0 {
            w.push(", ");
        }
        w.ident(column);
        w.push(" = ");
        w.bind(value.clone());
    }
    push_where(&mut w, &state.predicates, &state.binds);
    w.finish()
}

#[must_use]
pub fn compile_delete(state: &BuilderState, dialect: Dialect) -> CompiledQuery {
    let mut w = SqlWriter::new(dialect);
    w.push("DELETE FROM ");
    w.ident(&state.table);
    push_where(&mut w, &state.predicates, &state.binds);
    w.finish()
}

#[must_use]
pub fn compile_truncate(table: &str, dialect: Dialect) -> CompiledQuery {
    CompiledQuery {
        sql: dialect.truncate_sql(table),
        binds: Vec::new(),
    }
}
