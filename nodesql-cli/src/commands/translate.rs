use crate::error::CliResult;
use crate::input::{read_file, read_input, resolve_input};
use nodesql_translate::{
    translate_as, InMemoryNodeConverter, NoSubqueries, SqlVariable, TranslationContext,
    TranslatorConfig, Value, ValueExpr, VariableTable,
};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Contents of a `--bindings` file.
///
/// ```json
/// {
///   "variables": [{ "name": "x", "alias": "n0" }],
///   "nodes": [{ "value": { "type": "iri", "value": "http://x.org/a" }, "id": 17 }]
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct Bindings {
    #[serde(default)]
    pub variables: Vec<SqlVariable>,
    /// Constants with known node ids; other constants get fresh ids
    #[serde(default)]
    pub nodes: Vec<PinnedNode>,
}

#[derive(Debug, Deserialize)]
pub struct PinnedNode {
    pub value: Value,
    pub id: i64,
}

pub struct TranslateOpts<'a> {
    pub expr: Option<&'a Path>,
    pub bindings: Option<&'a Path>,
    pub config: TranslatorConfig,
}

pub fn run(opts: TranslateOpts<'_>) -> CliResult<()> {
    let expr_json = read_input(&resolve_input(opts.expr)?)?;
    let bindings_json = opts.bindings.map(read_file).transpose()?;
    let sql = translate_json(&expr_json, bindings_json.as_deref(), opts.config)?;
    println!("{sql}");
    Ok(())
}

/// Decode the expression and bindings, then translate.
pub fn translate_json(
    expr_json: &str,
    bindings_json: Option<&str>,
    config: TranslatorConfig,
) -> CliResult<String> {
    let expr: ValueExpr = serde_json::from_str(expr_json)?;
    let bindings: Bindings = match bindings_json {
        Some(json) => serde_json::from_str(json)?,
        None => Bindings::default(),
    };

    let variables: VariableTable = bindings.variables.into_iter().collect();
    let converter = bindings
        .nodes
        .into_iter()
        .fold(InMemoryNodeConverter::new(), |converter, node| {
            converter.with_node(node.value, node.id)
        });
    let dialect = config.dialect.dialect();
    let ctx = TranslationContext::new(dialect.as_ref(), &converter, &NoSubqueries, &variables);

    let sql = translate_as(&expr, config.expected_type, &ctx)?;
    info!(
        kind = expr.kind_name(),
        dialect = %config.dialect,
        variables = variables.len(),
        "translated expression"
    );
    Ok(sql)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use nodesql_translate::{DialectKind, TranslateError, ValueType};

    const EXPR: &str = r#"{
        "kind": "same_term",
        "left": { "kind": "var", "name": "x" },
        "right": { "kind": "constant", "value": { "type": "iri", "value": "http://x.org/a" } }
    }"#;

    fn config(dialect: DialectKind, expected_type: ValueType) -> TranslatorConfig {
        TranslatorConfig {
            dialect,
            expected_type,
        }
    }

    #[test]
    fn test_pinned_node_ids() {
        let bindings = r#"{
            "variables": [{ "name": "x", "alias": "n0" }],
            "nodes": [{ "value": { "type": "iri", "value": "http://x.org/a" }, "id": 17 }]
        }"#;
        let sql = translate_json(
            EXPR,
            Some(bindings),
            config(DialectKind::PostgreSql, ValueType::Bool),
        )
        .unwrap();
        assert_eq!(sql, "n0.id = 17");
    }

    #[test]
    fn test_without_bindings_variables_are_null() {
        let sql = translate_json(EXPR, None, config(DialectKind::MySql, ValueType::Bool)).unwrap();
        assert_eq!(sql, "NULL = 1");
    }

    #[test]
    fn test_iri_comparison_is_string_typed() {
        let expr = r#"{
            "kind": "compare",
            "op": "eq",
            "left": { "kind": "var", "name": "x" },
            "right": { "kind": "constant", "value": { "type": "iri", "value": "http://x.org/a" } }
        }"#;
        let bindings = r#"{ "variables": [{ "name": "x", "alias": "n0" }] }"#;
        let sql = translate_json(
            expr,
            Some(bindings),
            config(DialectKind::H2, ValueType::Bool),
        )
        .unwrap();
        assert_eq!(sql, "n0.svalue = 'http://x.org/a'");
    }

    #[test]
    fn test_bad_json_is_input_error() {
        let err = translate_json("{", None, TranslatorConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::Input(msg) if msg.starts_with("JSON parse error")));
    }

    #[test]
    fn test_translate_error_is_propagated() {
        let expr = r#"{ "kind": "function_call", "uri": "http://example.org/f" }"#;
        let err = translate_json(expr, None, TranslatorConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            CliError::Translate(TranslateError::UnsupportedFunction { .. })
        ));
    }
}
