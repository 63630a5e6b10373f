//! PostgreSQL dialect
//!
//! - `string_agg` instead of GROUP_CONCAT
//! - native `ILIKE`
//! - regex match via `~` / `~*`
//! - timezone offset applied as an interval

use super::{is_case_insensitive, Dialect, DialectKind, DEFAULT_SEPARATOR};
use crate::types::ValueType;
use nodesql_vocab::nodes;

/// PostgreSQL dialect
#[derive(Clone, Copy, Debug, Default)]
pub struct PostgresDialect;

impl Dialect for PostgresDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::PostgreSql
    }

    fn cast_to(&self, ty: ValueType, expr: &str) -> String {
        let target = match ty {
            ValueType::Double => "double precision",
            ValueType::Decimal => "decimal",
            ValueType::Int => "bigint",
            ValueType::Bool => "boolean",
            ValueType::Date => "timestamp",
            _ => return expr.to_string(),
        };
        format!("CAST({expr} AS {target})")
    }

    fn group_concat(&self, expr: &str, separator: Option<&str>, distinct: bool) -> String {
        let separator = separator.unwrap_or(DEFAULT_SEPARATOR);
        if distinct {
            format!("string_agg(DISTINCT {expr}, {separator})")
        } else {
            format!("string_agg({expr}, {separator})")
        }
    }

    fn ilike(&self, expr: &str, pattern: &str) -> String {
        format!("{expr} ILIKE {pattern}")
    }

    fn regexp(&self, expr: &str, pattern: &str, flags: Option<&str>) -> String {
        if is_case_insensitive(flags) {
            format!("{expr} ~* {pattern}")
        } else {
            format!("{expr} ~ {pattern}")
        }
    }

    fn date_time_tz(&self, alias: &str) -> String {
        format!(
            "({alias}.{} + {alias}.{} * INTERVAL '1 second')",
            nodes::TVALUE,
            nodes::TZOFFSET
        )
    }
}
