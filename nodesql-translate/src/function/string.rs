//! XPath string functions.
//!
//! Arguments arrive as rendered SQL; positions are 1-based like SQL.

use super::{join_args, locate, BuiltinFunction};
use crate::dialect::{Dialect, DialectKind};
use nodesql_vocab::fn_ns;

use crate::types::ValueType::{Bool, Int, String as Str};

fn nth(args: &[String], i: usize) -> &str {
    args.get(i).map(String::as_str).unwrap_or("NULL")
}

fn concat(_: &dyn Dialect, args: &[String]) -> String {
    format!("CONCAT({})", join_args(args))
}

fn contains(dialect: &dyn Dialect, args: &[String]) -> String {
    format!("{} > 0", locate(dialect, nth(args, 1), nth(args, 0)))
}

fn starts_with(dialect: &dyn Dialect, args: &[String]) -> String {
    format!("{} = 1", locate(dialect, nth(args, 1), nth(args, 0)))
}

fn ends_with(_: &dyn Dialect, args: &[String]) -> String {
    let (s, suffix) = (nth(args, 0), nth(args, 1));
    format!("RIGHT({s}, CHAR_LENGTH({suffix})) = {suffix}")
}

fn string_length(_: &dyn Dialect, args: &[String]) -> String {
    format!("CHAR_LENGTH({})", nth(args, 0))
}

fn upper_case(_: &dyn Dialect, args: &[String]) -> String {
    format!("UPPER({})", nth(args, 0))
}

fn lower_case(_: &dyn Dialect, args: &[String]) -> String {
    format!("LOWER({})", nth(args, 0))
}

fn substring(dialect: &dyn Dialect, args: &[String]) -> String {
    let name = match dialect.kind() {
        DialectKind::PostgreSql => "substr",
        DialectKind::MySql | DialectKind::H2 => "SUBSTRING",
    };
    format!("{name}({})", join_args(args))
}

fn substring_before(dialect: &dyn Dialect, args: &[String]) -> String {
    let (s, sep) = (nth(args, 0), nth(args, 1));
    let pos = locate(dialect, sep, s);
    format!("CASE WHEN {pos} > 0 THEN SUBSTRING({s}, 1, {pos} - 1) ELSE '' END")
}

fn substring_after(dialect: &dyn Dialect, args: &[String]) -> String {
    let (s, sep) = (nth(args, 0), nth(args, 1));
    let pos = locate(dialect, sep, s);
    format!("CASE WHEN {pos} > 0 THEN SUBSTRING({s}, {pos} + CHAR_LENGTH({sep})) ELSE '' END")
}

fn replace(dialect: &dyn Dialect, args: &[String]) -> String {
    let (s, pattern, replacement) = (nth(args, 0), nth(args, 1), nth(args, 2));
    let flags = args.get(3);
    match (dialect.kind(), flags) {
        (DialectKind::PostgreSql, Some(f)) => {
            format!("regexp_replace({s}, {pattern}, {replacement}, 'g' || {f})")
        }
        (DialectKind::PostgreSql, None) => {
            format!("regexp_replace({s}, {pattern}, {replacement}, 'g')")
        }
        (DialectKind::MySql, Some(f)) => {
            format!("REGEXP_REPLACE({s}, {pattern}, {replacement}, 1, 0, {f})")
        }
        (DialectKind::H2, Some(f)) => {
            format!("REGEXP_REPLACE({s}, {pattern}, {replacement}, {f})")
        }
        (DialectKind::MySql | DialectKind::H2, None) => {
            format!("REGEXP_REPLACE({s}, {pattern}, {replacement})")
        }
    }
}

pub(super) fn functions() -> Vec<BuiltinFunction> {
    vec![
        BuiltinFunction::new(fn_ns::CONCAT, Str, &[Str], 1, usize::MAX, concat),
        BuiltinFunction::new(fn_ns::CONTAINS, Bool, &[Str], 2, 2, contains),
        BuiltinFunction::new(fn_ns::STARTS_WITH, Bool, &[Str], 2, 2, starts_with),
        BuiltinFunction::new(fn_ns::ENDS_WITH, Bool, &[Str], 2, 2, ends_with),
        BuiltinFunction::new(fn_ns::STRING_LENGTH, Int, &[Str], 1, 1, string_length),
        BuiltinFunction::new(fn_ns::UPPER_CASE, Str, &[Str], 1, 1, upper_case),
        BuiltinFunction::new(fn_ns::LOWER_CASE, Str, &[Str], 1, 1, lower_case),
        BuiltinFunction::new(fn_ns::SUBSTRING, Str, &[Str, Int, Int], 2, 3, substring),
        BuiltinFunction::new(fn_ns::SUBSTRING_BEFORE, Str, &[Str], 2, 2, substring_before),
        BuiltinFunction::new(fn_ns::SUBSTRING_AFTER, Str, &[Str], 2, 2, substring_after),
        BuiltinFunction::new(fn_ns::REPLACE, Str, &[Str], 3, 4, replace),
    ]
}
