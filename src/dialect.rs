use std::fmt::Write;

use clap::ValueEnum;

/// SQL flavour the compiler renders for.
///
/// The dialect decides identifier quoting, placeholder style and the handful of statements
/// that differ between engines (`TRUNCATE`, `OFFSET` without `LIMIT`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Dialect {
    /// MySQL / MariaDB: backtick identifiers, `?` placeholders.
    #[default]
    #[value(name = "mysql")]
    MySql,
    /// `SQLite`: backtick identifiers, `?` placeholders, no `TRUNCATE`.
    Sqlite,
    /// `PostgreSQL`: double-quoted identifiers, `$N` placeholders.
    Postgres,
}

/// Placeholder style used in compiled SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// Anonymous positional `?`.
    Question,
    /// Numbered `$1`, `$2`, ...
    Numbered,
}

impl Dialect {
    /// SQLite reads an unresolvable double-quoted name as a string literal, so it gets
    /// backticks, which it only ever reads as identifiers.
    #[must_use]
    pub fn quote_char(self) -> char {
        match self {
            Dialect::MySql | Dialect::Sqlite => '`',
            Dialect::Postgres => '"',
        }
    }

    #[must_use]
    pub fn placeholder_style(self) -> PlaceholderStyle {
        match self {
            Dialect::MySql | Dialect::Sqlite => PlaceholderStyle::Question,
            Dialect::Postgres => PlaceholderStyle::Numbered,
        }
    }

    /// Append the placeholder for the bind at `position` (1-based).
    pub fn push_placeholder(self, out: &mut String, position: usize) {
        match self.placeholder_style() {
            PlaceholderStyle::Question => out.push('?'),
            PlaceholderStyle::Numbered => {
                let _ = write!(out, "${position}");
            }
        }
    }

    /// Append `name` as a quoted identifier.
    ///
    /// Dotted names are quoted per segment (`users.id` becomes `` `users`.`id` ``) and an
    /// embedded quote character is doubled. Names are not validated.
    pub fn push_ident(self, out: &mut String, name: &str) {
        let quote = self.quote_char();
        for (i, part) in name.split('.').enumerate() {
            if i > 0 {
                out.push('.');
            }
            out.push(quote);
            for c in part.chars() {
                if c == quote {
                    out.push(quote);
                }
                out.push(c);
            }
            out.push(quote);
        }
    }

    #[must_use]
    pub fn quote_ident(self, name: &str) -> String {
        let mut out = String::with_capacity(name.len() + 2);
        self.push_ident(&mut out, name);
        out
    }

    /// Statement that empties a table.
    #[must_use]
    pub fn truncate_sql(self, table: &str) -> String {
        let table = self.quote_ident(table);
        match self {
            Dialect::MySql | Dialect::Postgres => format!("TRUNCATE TABLE {table}"),
            Dialect::Sqlite => format!("DELETE FROM {table}"),
        }
    }

    /// `LIMIT` value to emit when only an offset was requested, for engines whose grammar
    /// does not accept a bare `OFFSET`.
    #[must_use]
    pub fn unbounded_limit(self) -> Option<&'static str> {
        match self {
            Dialect::MySql => Some("18446744073709551615"),
            Dialect::Sqlite => Some("-1"),
            Dialect::Postgres => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn quotes_per_dialect() {
        assert_eq!(Dialect::MySql.quote_ident("users"), "`users`");
        assert_eq!(Dialect::Sqlite.quote_ident("users"), "`users`");
        assert_eq!(
            Dialect::Postgres.quote_ident("public.users"),
            "\"public\".\"users\""
        );
    }

    #[test]
    fn doubles_embedded_quotes() {
        assert_eq!(Dialect::MySql.quote_ident("we`ird"), "`we``ird`");
        assert_eq!(Dialect::Sqlite.quote_ident("a`b"), "`a``b`");
        assert_eq!(Dialect::Postgres.quote_ident("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn placeholders() {
        let mut out = String::new();
        Dialect::MySql.push_placeholder(&mut out, 3);
        Dialect::Postgres.push_placeholder(&mut out, 3);
        assert_eq!(out, "?$3");
    }

    #[test]
    fn truncate_falls_back_to_delete_on_sqlite() {
        assert_eq!(Dialect::MySql.truncate_sql("t"), "TRUNCATE TABLE `t`");
        assert_eq!(Dialect::Postgres.truncate_sql("t"), "TRUNCATE TABLE \"t\"");
        assert_eq!(Dialect::Sqlite.truncate_sql("t"), "DELETE FROM `t`");
    }

    #[test]
    fn parses_from_cli_value() {
        assert_eq!(
            <Dialect as ValueEnum>::from_str("sqlite", true).unwrap(),
            Dialect::Sqlite
        );
        assert_eq!(
            <Dialect as ValueEnum>::from_str("MySQL", true).unwrap(),
            Dialect::MySql
        );
    }
}
