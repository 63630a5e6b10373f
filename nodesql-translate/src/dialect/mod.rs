//! SQL dialects.
//!
//! A [`Dialect`] renders the handful of SQL idioms that differ between the
//! supported engines: casts, string aggregation, case-insensitive LIKE,
//! native regular expressions and timezone-aware timestamps. Everything
//! else the translator emits is portable SQL.

mod h2;
mod mysql;
mod postgres;

pub use h2::H2Dialect;
pub use mysql::MySqlDialect;
pub use postgres::PostgresDialect;

use crate::types::ValueType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported SQL engines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    #[default]
    #[serde(alias = "postgres")]
    PostgreSql,
    MySql,
    H2,
}

impl DialectKind {
    pub const ALL: [DialectKind; 3] = [DialectKind::PostgreSql, DialectKind::MySql, DialectKind::H2];

    /// Instantiate the dialect.
    pub fn dialect(&self) -> Box<dyn Dialect> {
        match self {
            DialectKind::PostgreSql => Box::new(PostgresDialect),
            DialectKind::MySql => Box::new(MySqlDialect),
            DialectKind::H2 => Box::new(H2Dialect),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DialectKind::PostgreSql => "postgresql",
            DialectKind::MySql => "mysql",
            DialectKind::H2 => "h2",
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DialectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgresql" | "postgres" | "pgsql" => Ok(DialectKind::PostgreSql),
            "mysql" => Ok(DialectKind::MySql),
            "h2" => Ok(DialectKind::H2),
            other => Err(format!("unknown SQL dialect '{other}'")),
        }
    }
}

/// Engine-specific SQL rendering.
///
/// All methods receive already generated SQL fragments and return a new
/// fragment; none of them quote or escape their inputs.
pub trait Dialect: Send + Sync {
    /// Which engine this dialect renders for.
    fn kind(&self) -> DialectKind;

    /// Cast `expr` to the column type backing `ty`.
    ///
    /// Types without a dedicated SQL type (strings, URIs, nodes) are returned
    /// unchanged.
    fn cast_to(&self, ty: ValueType, expr: &str) -> String;

    /// String aggregation over `expr`. `separator` is an SQL string
    /// expression; `None` means the SPARQL default of a single space.
    fn group_concat(&self, expr: &str, separator: Option<&str>, distinct: bool) -> String;

    /// Case-insensitive LIKE.
    fn ilike(&self, expr: &str, pattern: &str) -> String;

    /// Native regular expression match with SPARQL `flags`.
    fn regexp(&self, expr: &str, pattern: &str, flags: Option<&str>) -> String;

    /// Timezone-aware timestamp of the node row behind `alias`.
    fn date_time_tz(&self, alias: &str) -> String;
}

/// Default GROUP_CONCAT separator as an SQL string literal.
pub(crate) const DEFAULT_SEPARATOR: &str = "' '";

/// Whether SPARQL regex `flags` request case-insensitive matching.
pub(crate) fn is_case_insensitive(flags: Option<&str>) -> bool {
    flags.is_some_and(|f| f.chars().any(|c| c.eq_ignore_ascii_case(&'i')))
}

/// Quote `s` as an SQL string literal, doubling embedded single quotes.
pub fn quote_str(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_kind_parsing() {
        assert_eq!("postgres".parse::<DialectKind>(), Ok(DialectKind::PostgreSql));
        assert_eq!("PostgreSQL".parse::<DialectKind>(), Ok(DialectKind::PostgreSql));
        assert_eq!("mysql".parse::<DialectKind>(), Ok(DialectKind::MySql));
        assert_eq!("h2".parse::<DialectKind>(), Ok(DialectKind::H2));
        assert!("oracle".parse::<DialectKind>().is_err());
    }

    #[test]
    fn test_dialect_kind_roundtrip() {
        for kind in DialectKind::ALL {
            assert_eq!(kind.dialect().kind(), kind);
            assert_eq!(kind.as_str().parse::<DialectKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_quote_str() {
        assert_eq!(quote_str("abc"), "'abc'");
        assert_eq!(quote_str("it's"), "'it''s'");
    }

    #[test]
    fn test_case_insensitive_flag() {
        assert!(is_case_insensitive(Some("i")));
        assert!(is_case_insensitive(Some("si")));
        assert!(!is_case_insensitive(Some("s")));
        assert!(!is_case_insensitive(None));
    }
}
