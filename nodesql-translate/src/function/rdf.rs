//! UUID generators.

use super::BuiltinFunction;
use crate::dialect::{Dialect, DialectKind};
use crate::types::ValueType;
use nodesql_vocab::sparql;

fn random_uuid(dialect: &dyn Dialect) -> &'static str {
    match dialect.kind() {
        DialectKind::PostgreSql => "gen_random_uuid()",
        DialectKind::MySql => "UUID()",
        DialectKind::H2 => "RANDOM_UUID()",
    }
}

fn uuid(dialect: &dyn Dialect, _: &[String]) -> String {
    format!("CONCAT('urn:uuid:', {})", random_uuid(dialect))
}

fn struuid(dialect: &dyn Dialect, _: &[String]) -> String {
    match dialect.kind() {
        DialectKind::MySql => random_uuid(dialect).to_string(),
        DialectKind::PostgreSql => format!("CAST({} AS text)", random_uuid(dialect)),
        DialectKind::H2 => format!("CAST({} AS VARCHAR)", random_uuid(dialect)),
    }
}

pub(super) fn functions() -> Vec<BuiltinFunction> {
    vec![
        BuiltinFunction::new(sparql::UUID, ValueType::Uri, &[], 0, 0, uuid),
        BuiltinFunction::new(sparql::STRUUID, ValueType::String, &[], 0, 0, struuid),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{MySqlDialect, PostgresDialect};
    use crate::function::NativeFunction;

    #[test]
    fn test_uuid_is_urn() {
        let f = functions()
            .into_iter()
            .find(|f| f.uri() == sparql::UUID)
            .unwrap();
        assert_eq!(
            f.render(&PostgresDialect, &[]).unwrap(),
            "CONCAT('urn:uuid:', gen_random_uuid())"
        );
        assert_eq!(f.return_type(), ValueType::Uri);
    }

    #[test]
    fn test_struuid() {
        let f = functions()
            .into_iter()
            .find(|f| f.uri() == sparql::STRUUID)
            .unwrap();
        assert_eq!(f.render(&MySqlDialect, &[]).unwrap(), "UUID()");
    }
}
