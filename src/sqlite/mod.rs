// SQLite backend built on rusqlite.
//
// - config: connection options and opening
// - connection: `Connection`/`PreparedStatement` for rusqlite
// - params: value conversion into SQLite parameters
// - query: row extraction

pub mod config;
pub mod connection;
pub mod params;
pub mod query;

pub use config::{SqliteOptions, SqliteOptionsBuilder};
pub use connection::SqliteStatement;
pub use params::value_to_sqlite;
pub use query::collect_rows;
