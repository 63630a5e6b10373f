use super::BuiltinFunction;
use crate::dialect::{Dialect, DialectKind};
use crate::types::ValueType;
use nodesql_vocab::{fn_ns, sparql};

fn unary(name: &str, args: &[String]) -> String {
    format!("{name}({})", args.first().map(String::as_str).unwrap_or("NULL"))
}

fn abs(_: &dyn Dialect, args: &[String]) -> String {
    unary("ABS", args)
}

fn round(_: &dyn Dialect, args: &[String]) -> String {
    unary("ROUND", args)
}

fn ceiling(_: &dyn Dialect, args: &[String]) -> String {
    unary("CEIL", args)
}

fn floor(_: &dyn Dialect, args: &[String]) -> String {
    unary("FLOOR", args)
}

fn rand(dialect: &dyn Dialect, _: &[String]) -> String {
    match dialect.kind() {
        DialectKind::PostgreSql => "random()".to_string(),
        DialectKind::MySql | DialectKind::H2 => "RAND()".to_string(),
    }
}

const NUMERIC: &[ValueType] = &[ValueType::Double];

pub(super) fn functions() -> Vec<BuiltinFunction> {
    vec![
        BuiltinFunction::new(fn_ns::ABS, ValueType::Double, NUMERIC, 1, 1, abs),
        BuiltinFunction::new(fn_ns::ROUND, ValueType::Double, NUMERIC, 1, 1, round),
        BuiltinFunction::new(fn_ns::CEILING, ValueType::Double, NUMERIC, 1, 1, ceiling),
        BuiltinFunction::new(fn_ns::FLOOR, ValueType::Double, NUMERIC, 1, 1, floor),
        BuiltinFunction::new(sparql::RAND, ValueType::Double, &[], 0, 0, rand),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{MySqlDialect, PostgresDialect};
    use crate::function::NativeFunction;

    #[test]
    fn test_rand_per_dialect() {
        let f = functions()
            .into_iter()
            .find(|f| f.uri() == sparql::RAND)
            .unwrap();
        assert_eq!(f.render(&PostgresDialect, &[]).unwrap(), "random()");
        assert_eq!(f.render(&MySqlDialect, &[]).unwrap(), "RAND()");
        assert_eq!(f.argument_type(0), ValueType::Any);
    }

    #[test]
    fn test_ceiling() {
        let f = functions()
            .into_iter()
            .find(|f| f.uri() == fn_ns::CEILING)
            .unwrap();
        assert_eq!(
            f.render(&PostgresDialect, &["a.dvalue".into()]).unwrap(),
            "CEIL(a.dvalue)"
        );
    }
}
