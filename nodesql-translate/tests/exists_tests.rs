//! EXISTS sub-query delegation.
//!
//! The query builder receives a private copy of the variable table; bindings
//! it adds for the sub-query must not leak back into the enclosing scope.

use nodesql_translate::{
    translate_as, CompareOp, ErrorKind, GraphPattern, InMemoryNodeConverter, NoSubqueries,
    PostgresDialect, QueryBuilder, Result, SqlVariable, TermPattern, TranslateError,
    TranslationContext, Value, ValueExpr, ValueType, VariableTable,
};
use std::sync::Mutex;

/// Binds every pattern variable missing from the scope to a fresh alias and
/// records the table it was handed.
#[derive(Debug, Default)]
struct RecordingBuilder {
    seen: Mutex<Vec<VariableTable>>,
}

impl QueryBuilder for RecordingBuilder {
    fn build_exists(&self, pattern: &GraphPattern, mut variables: VariableTable) -> Result<String> {
        let mut joins = Vec::new();
        for (i, name) in pattern.variables().into_iter().enumerate() {
            if !variables.contains(name) {
                let alias = format!("e{i}");
                joins.push(format!("nodes {alias}"));
                variables.insert(SqlVariable::new(name).with_alias(alias));
            }
        }
        let sql = format!("SELECT 1 FROM {}", joins.join(", "));
        self.seen.lock().unwrap().push(variables);
        Ok(sql)
    }
}

fn knows(object: &str) -> GraphPattern {
    GraphPattern::triple(
        TermPattern::Var("x".into()),
        TermPattern::Term(Value::iri("http://xmlns.com/foaf/0.1/knows")),
        TermPattern::Var(object.into()),
    )
}

fn exists(pattern: GraphPattern) -> ValueExpr {
    ValueExpr::Exists {
        pattern: Box::new(pattern),
    }
}

fn scope() -> VariableTable {
    [SqlVariable::new("x").with_alias("n0")].into_iter().collect()
}

#[test]
fn exists_wraps_builder_sql() {
    let variables = scope();
    let converter = InMemoryNodeConverter::new();
    let builder = RecordingBuilder::default();
    let ctx = TranslationContext::new(&PostgresDialect, &converter, &builder, &variables);

    let sql = translate_as(&exists(knows("z")), ValueType::Bool, &ctx).unwrap();
    assert_eq!(sql, "EXISTS (SELECT 1 FROM nodes e1)");
}

#[test]
fn builder_bindings_do_not_leak_into_scope() {
    let variables = scope();
    let before = variables.clone();
    let converter = InMemoryNodeConverter::new();
    let builder = RecordingBuilder::default();
    let ctx = TranslationContext::new(&PostgresDialect, &converter, &builder, &variables);

    translate_as(&exists(knows("z")), ValueType::Bool, &ctx).unwrap();

    let seen = builder.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].contains("z"));
    assert!(seen[0].contains("x"));

    assert_eq!(variables, before);
    assert!(!variables.contains("z"));
    assert_eq!(
        translate_as(&ValueExpr::var("z"), ValueType::String, &ctx).unwrap(),
        "NULL"
    );
}

#[test]
fn each_exists_gets_its_own_copy() {
    let variables = scope();
    let converter = InMemoryNodeConverter::new();
    let builder = RecordingBuilder::default();
    let ctx = TranslationContext::new(&PostgresDialect, &converter, &builder, &variables);

    let expr = ValueExpr::or(exists(knows("a")), exists(knows("b")));
    let sql = translate_as(&expr, ValueType::Bool, &ctx).unwrap();
    assert_eq!(
        sql,
        "(EXISTS (SELECT 1 FROM nodes e0) OR EXISTS (SELECT 1 FROM nodes e0))"
    );

    let seen = builder.seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert!(seen[0].contains("a") && !seen[0].contains("b"));
    assert!(seen[1].contains("b") && !seen[1].contains("a"));
}

#[test]
fn exists_inside_conjunction() {
    let variables = scope();
    let converter = InMemoryNodeConverter::new();
    let builder = RecordingBuilder::default();
    let ctx = TranslationContext::new(&PostgresDialect, &converter, &builder, &variables);

    let expr = ValueExpr::and(
        ValueExpr::compare(CompareOp::Gt, ValueExpr::var("x"), ValueExpr::integer(1)),
        ValueExpr::not(exists(knows("z"))),
    );
    assert_eq!(
        translate_as(&expr, ValueType::Bool, &ctx).unwrap(),
        "(n0.ivalue > 1 AND NOT (EXISTS (SELECT 1 FROM nodes e1)))"
    );
}

#[test]
fn exists_without_builder_is_unsupported() {
    let variables = scope();
    let converter = InMemoryNodeConverter::new();
    let ctx = TranslationContext::new(&PostgresDialect, &converter, &NoSubqueries, &variables);

    let err = translate_as(&exists(knows("z")), ValueType::Bool, &ctx).unwrap_err();
    assert!(matches!(
        err,
        TranslateError::UnsupportedExpression {
            construct: "EXISTS",
            ..
        }
    ));
    assert_eq!(err.kind(), ErrorKind::Unsupported);
}
