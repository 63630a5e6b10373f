//! MySQL dialect
//!
//! - `GROUP_CONCAT(... SEPARATOR ...)`
//! - no ILIKE; both sides are lower-cased instead
//! - regex match via `REGEXP_LIKE` with an explicit match type

use super::{is_case_insensitive, Dialect, DialectKind, DEFAULT_SEPARATOR};
use crate::types::ValueType;
use nodesql_vocab::nodes;

/// MySQL dialect
#[derive(Clone, Copy, Debug, Default)]
pub struct MySqlDialect;

impl Dialect for MySqlDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::MySql
    }

    fn cast_to(&self, ty: ValueType, expr: &str) -> String {
        let target = match ty {
            ValueType::Double => "DOUBLE",
            ValueType::Decimal => "DECIMAL(65,30)",
            ValueType::Int => "SIGNED",
            // MySQL booleans are TINYINT(1)
            ValueType::Bool => "UNSIGNED",
            ValueType::Date => "DATETIME",
            _ => return expr.to_string(),
        };
        format!("CAST({expr} AS {target})")
    }

    fn group_concat(&self, expr: &str, separator: Option<&str>, distinct: bool) -> String {
        let separator = separator.unwrap_or(DEFAULT_SEPARATOR);
        let distinct = if distinct { "DISTINCT " } else { "" };
        format!("GROUP_CONCAT({distinct}{expr} SEPARATOR {separator})")
    }

    fn ilike(&self, expr: &str, pattern: &str) -> String {
        format!("lower({expr}) LIKE lower({pattern})")
    }

    fn regexp(&self, expr: &str, pattern: &str, flags: Option<&str>) -> String {
        let match_type = if is_case_insensitive(flags) { "i" } else { "c" };
        format!("REGEXP_LIKE({expr}, {pattern}, '{match_type}')")
    }

    fn date_time_tz(&self, alias: &str) -> String {
        format!(
            "DATE_ADD({alias}.{}, INTERVAL {alias}.{} SECOND)",
            nodes::TVALUE,
            nodes::TZOFFSET
        )
    }
}
