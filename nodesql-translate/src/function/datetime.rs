//! NOW and the date/time field accessors.

use super::BuiltinFunction;
use crate::dialect::{Dialect, DialectKind};
use crate::types::ValueType;
use nodesql_vocab::{fn_ns, sparql};

fn now(dialect: &dyn Dialect, _: &[String]) -> String {
    match dialect.kind() {
        DialectKind::PostgreSql => "now()".to_string(),
        DialectKind::MySql => "NOW()".to_string(),
        DialectKind::H2 => "CURRENT_TIMESTAMP".to_string(),
    }
}

fn extract(field: &str, args: &[String]) -> String {
    format!(
        "EXTRACT({field} FROM {})",
        args.first().map(String::as_str).unwrap_or("NULL")
    )
}

fn year(_: &dyn Dialect, args: &[String]) -> String {
    extract("YEAR", args)
}

fn month(_: &dyn Dialect, args: &[String]) -> String {
    extract("MONTH", args)
}

fn day(_: &dyn Dialect, args: &[String]) -> String {
    extract("DAY", args)
}

fn hours(_: &dyn Dialect, args: &[String]) -> String {
    extract("HOUR", args)
}

fn minutes(_: &dyn Dialect, args: &[String]) -> String {
    extract("MINUTE", args)
}

fn seconds(_: &dyn Dialect, args: &[String]) -> String {
    extract("SECOND", args)
}

const DATE: &[ValueType] = &[ValueType::Date];

pub(super) fn functions() -> Vec<BuiltinFunction> {
    use ValueType::{Date, Double, Int};
    vec![
        BuiltinFunction::new(sparql::NOW, Date, &[], 0, 0, now),
        BuiltinFunction::new(fn_ns::YEAR_FROM_DATETIME, Int, DATE, 1, 1, year),
        BuiltinFunction::new(fn_ns::MONTH_FROM_DATETIME, Int, DATE, 1, 1, month),
        BuiltinFunction::new(fn_ns::DAY_FROM_DATETIME, Int, DATE, 1, 1, day),
        BuiltinFunction::new(fn_ns::HOURS_FROM_DATETIME, Int, DATE, 1, 1, hours),
        BuiltinFunction::new(fn_ns::MINUTES_FROM_DATETIME, Int, DATE, 1, 1, minutes),
        BuiltinFunction::new(fn_ns::SECONDS_FROM_DATETIME, Double, DATE, 1, 1, seconds),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{H2Dialect, PostgresDialect};
    use crate::function::NativeFunction;

    #[test]
    fn test_year_extract() {
        let f = functions()
            .into_iter()
            .find(|f| f.uri() == fn_ns::YEAR_FROM_DATETIME)
            .unwrap();
        assert_eq!(
            f.render(&PostgresDialect, &["a.tvalue".into()]).unwrap(),
            "EXTRACT(YEAR FROM a.tvalue)"
        );
        assert_eq!(f.return_type(), ValueType::Int);
        assert_eq!(f.argument_type(0), ValueType::Date);
    }

    #[test]
    fn test_now() {
        let f = functions()
            .into_iter()
            .find(|f| f.uri() == sparql::NOW)
            .unwrap();
        assert_eq!(f.render(&H2Dialect, &[]).unwrap(), "CURRENT_TIMESTAMP");
    }
}
