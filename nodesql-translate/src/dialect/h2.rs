//! H2 dialect (embedded and test deployments)

use super::{is_case_insensitive, Dialect, DialectKind, DEFAULT_SEPARATOR};
use crate::types::ValueType;
use nodesql_vocab::nodes;

/// H2 dialect
#[derive(Clone, Copy, Debug, Default)]
pub struct H2Dialect;

impl Dialect for H2Dialect {
    fn kind(&self) -> DialectKind {
        DialectKind::H2
    }

    fn cast_to(&self, ty: ValueType, expr: &str) -> String {
        let target = match ty {
            ValueType::Double => "DOUBLE",
            ValueType::Decimal => "DECIMAL",
            ValueType::Int => "BIGINT",
            ValueType::Bool => "BOOLEAN",
            ValueType::Date => "TIMESTAMP",
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
        format!("{expr} ILIKE {pattern}")
    }

    fn regexp(&self, expr: &str, pattern: &str, flags: Option<&str>) -> String {
        if is_case_insensitive(flags) {
            format!("REGEXP_LIKE({expr}, {pattern}, 'i')")
        } else {
            format!("REGEXP_LIKE({expr}, {pattern})")
        }
    }

    fn date_time_tz(&self, alias: &str) -> String {
        format!(
            "DATEADD('SECOND', {alias}.{}, {alias}.{})",
            nodes::TZOFFSET,
            nodes::TVALUE
        )
    }
}
