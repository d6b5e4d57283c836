use crate::dialect::Dialect;

/// Options for a [`Db`](crate::Db) handle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DbOptions {
    /// Dump SQL and binds for every statement.
    ///
    /// See [`QueryBuilder::debug`](crate::QueryBuilder::debug) for the per-builder switch.
    pub debug: bool,
    /// Overrides the dialect reported by the connection.
    pub dialect: Option<Dialect>,
}

impl DbOptions {
    #[must_use]
    pub fn builder() -> DbOptionsBuilder {
        DbOptionsBuilder::default()
    }

    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }
}

/// Fluent builder for [`DbOptions`].
#[derive(Debug, Clone, Default)]
pub struct DbOptionsBuilder {
    opts: DbOptions,
}

impl DbOptionsBuilder {
    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.opts.debug = debug;
        self
    }

    #[must_use]
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.opts.dialect = Some(dialect);
        self
    }

    #[must_use]
    pub fn finish(self) -> DbOptions {
        self.opts
    }
}
