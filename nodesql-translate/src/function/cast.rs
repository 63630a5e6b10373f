//! XSD constructor casts.

use super::BuiltinFunction;
use crate::dialect::Dialect;
use crate::types::ValueType;
use nodesql_vocab::xsd;

fn arg(args: &[String]) -> &str {
    args.first().map(String::as_str).unwrap_or("NULL")
}

fn to_double(dialect: &dyn Dialect, args: &[String]) -> String {
    dialect.cast_to(ValueType::Double, arg(args))
}

fn to_decimal(dialect: &dyn Dialect, args: &[String]) -> String {
    dialect.cast_to(ValueType::Decimal, arg(args))
}

fn to_int(dialect: &dyn Dialect, args: &[String]) -> String {
    dialect.cast_to(ValueType::Int, arg(args))
}

fn to_bool(dialect: &dyn Dialect, args: &[String]) -> String {
    dialect.cast_to(ValueType::Bool, arg(args))
}

fn to_date(dialect: &dyn Dialect, args: &[String]) -> String {
    dialect.cast_to(ValueType::Date, arg(args))
}

fn to_string(_: &dyn Dialect, args: &[String]) -> String {
    arg(args).to_string()
}

const FROM_STRING: &[ValueType] = &[ValueType::String];

pub(super) fn functions() -> Vec<BuiltinFunction> {
    vec![
        BuiltinFunction::new(xsd::DOUBLE, ValueType::Double, FROM_STRING, 1, 1, to_double),
        BuiltinFunction::new(xsd::FLOAT, ValueType::Double, FROM_STRING, 1, 1, to_double),
        BuiltinFunction::new(xsd::DECIMAL, ValueType::Decimal, FROM_STRING, 1, 1, to_decimal),
        BuiltinFunction::new(xsd::INTEGER, ValueType::Int, FROM_STRING, 1, 1, to_int),
        BuiltinFunction::new(xsd::INT, ValueType::Int, FROM_STRING, 1, 1, to_int),
        BuiltinFunction::new(xsd::BOOLEAN, ValueType::Bool, FROM_STRING, 1, 1, to_bool),
        BuiltinFunction::new(xsd::DATE, ValueType::Date, FROM_STRING, 1, 1, to_date),
        BuiltinFunction::new(xsd::DATE_TIME, ValueType::Date, FROM_STRING, 1, 1, to_date),
        BuiltinFunction::new(xsd::STRING, ValueType::String, FROM_STRING, 1, 1, to_string),
    ]
}
