//! Convenient imports for common functionality.

pub use crate::config::{DbOptions, DbOptionsBuilder};
pub use crate::db::Db;
pub use crate::dialect::Dialect;
pub use crate::error::{DbError, DbResult};
pub use crate::executor::{Connection, PreparedStatement};
pub use crate::query_builder::{CompiledQuery, QueryBuilder};
pub use crate::record;
pub use crate::results::{Row, RowSet};
pub use crate::types::{BindType, Record, Value};

#[cfg(feature = "sqlite")]
pub use crate::sqlite::{SqliteOptions, SqliteOptionsBuilder};
