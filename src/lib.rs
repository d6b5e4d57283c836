//! # relaxed-db
//!
//! A small fluent query builder over a database connection. Pick a table, add predicates,
//! a projection and bounds, then run `get`, `first`, `find`, `insert`, `insert_get_id`,
//! `update`, `delete` or `truncate`. Values always travel as positional binds; only
//! identifiers and operators are written into the SQL text.
//!
//! ```rust
//! # #[cfg(feature = "sqlite")]
//! # fn demo() -> Result<(), relaxed_db::DbError> {
//! use relaxed_db::prelude::*;
//!
//! let db = SqliteOptions::in_memory().open()?;
//! db.connection().execute_batch(
//!     "CREATE TABLE users (id INTEGER PRIMARY KEY, username TEXT, age INTEGER)",
//! )?;
//!
//! db.table("users").insert(record! { "username" => "alice", "age" => 31 })?;
//! db.table("users").insert(record! { "username" => "bob", "age" => 17 })?;
//!
//! let adults = db.table("users").where_("age", ">=", 18).get()?;
//! assert_eq!(adults.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! Predicates chain strictly left to right: `where_(a).or_where(b).where_(c)` compiles to
//! `a OR b AND c` and the database's own AND/OR precedence applies.

pub mod config;
pub mod db;
pub mod dialect;
pub mod error;
pub mod executor;
mod macros;
pub mod prelude;
pub mod query_builder;
pub mod results;
pub mod types;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use config::{DbOptions, DbOptionsBuilder};
pub use db::Db;
pub use dialect::{Dialect, PlaceholderStyle};
pub use error::{DbError, DbResult};
pub use executor::{Connection, Executor, PreparedStatement, SQL_TARGET};
pub use query_builder::{Boolean, BuilderState, CompiledQuery, Predicate, QueryBuilder};
pub use results::{Row, RowSet};
pub use types::{BindType, Record, Value};

#[cfg(feature = "sqlite")]
pub use rusqlite;
#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteOptions, SqliteOptionsBuilder};
