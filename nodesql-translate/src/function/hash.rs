//! Hash digests, rendered as lower-case hex strings.
//!
//! H2 has no hex digest function over strings, so none of these are
//! available there. PostgreSQL only ships SHA-2 and MD5 without pgcrypto.

use super::BuiltinFunction;
use crate::dialect::{Dialect, DialectKind};
use crate::types::ValueType;
use nodesql_vocab::sparql;

const PG_AND_MYSQL: &[DialectKind] = &[DialectKind::PostgreSql, DialectKind::MySql];
const MYSQL_ONLY: &[DialectKind] = &[DialectKind::MySql];

fn arg(args: &[String]) -> &str {
    args.first().map(String::as_str).unwrap_or("NULL")
}

fn md5(dialect: &dyn Dialect, args: &[String]) -> String {
    match dialect.kind() {
        DialectKind::PostgreSql => format!("md5({})", arg(args)),
        _ => format!("MD5({})", arg(args)),
    }
}

fn sha1(_: &dyn Dialect, args: &[String]) -> String {
    format!("SHA1({})", arg(args))
}

fn sha2(dialect: &dyn Dialect, args: &[String], bits: u16) -> String {
    match dialect.kind() {
        DialectKind::PostgreSql => {
            format!("encode(sha{bits}(convert_to({}, 'UTF8')), 'hex')", arg(args))
        }
        _ => format!("SHA2({}, {bits})", arg(args)),
    }
}

fn sha256(dialect: &dyn Dialect, args: &[String]) -> String {
    sha2(dialect, args, 256)
}

fn sha512(dialect: &dyn Dialect, args: &[String]) -> String {
    sha2(dialect, args, 512)
}

const STRING: &[ValueType] = &[ValueType::String];

pub(super) fn functions() -> Vec<BuiltinFunction> {
    vec![
        BuiltinFunction::new(sparql::MD5, ValueType::String, STRING, 1, 1, md5).only(PG_AND_MYSQL),
        BuiltinFunction::new(sparql::SHA1, ValueType::String, STRING, 1, 1, sha1).only(MYSQL_ONLY),
        BuiltinFunction::new(sparql::SHA256, ValueType::String, STRING, 1, 1, sha256)
            .only(PG_AND_MYSQL),
        BuiltinFunction::new(sparql::SHA512, ValueType::String, STRING, 1, 1, sha512)
            .only(PG_AND_MYSQL),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{H2Dialect, MySqlDialect, PostgresDialect};
    use crate::function::NativeFunction;

    fn find(uri: &str) -> BuiltinFunction {
        functions().into_iter().find(|f| f.uri() == uri).unwrap()
    }

    #[test]
    fn test_sha256_per_dialect() {
        let f = find(sparql::SHA256);
        assert_eq!(
            f.render(&PostgresDialect, &["a.svalue".into()]).unwrap(),
            "encode(sha256(convert_to(a.svalue, 'UTF8')), 'hex')"
        );
        assert_eq!(
            f.render(&MySqlDialect, &["a.svalue".into()]).unwrap(),
            "SHA2(a.svalue, 256)"
        );
    }

    #[test]
    fn test_no_hashes_on_h2() {
        for f in functions() {
            assert!(!f.is_supported(&H2Dialect), "{} on h2", f.uri());
        }
    }
}
