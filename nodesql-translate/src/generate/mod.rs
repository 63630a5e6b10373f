//! SQL generation for value expressions.
//!
//! [`SqlGenerator`] walks a [`ValueExpr`] once, appending SQL to a single
//! buffer. A stack of expected [`ValueType`]s decides how each leaf is
//! rendered: a variable bound to a nodes-table row selects `svalue`,
//! `ivalue`, `dvalue` and so on depending on the type on top of the stack,
//! and constants are formatted as the matching SQL literal. Compound nodes
//! push the type their operands must share (see [`TypeCoercionFinder`])
//! before visiting them.
//!
//! Sub-expressions rendered into a dialect or function template (function
//! arguments, GROUP_CONCAT, case-insensitive LIKE) are generated by a
//! separate generator over the same context.

mod regex;
mod value;

pub use regex::optimize_regex;

use crate::ast::{GraphPattern, MathOp, Value, ValueExpr};
use crate::builder::QueryBuilder;
use crate::coerce::TypeCoercionFinder;
use crate::convert::NodeConverter;
use crate::dialect::{quote_str, Dialect};
use crate::error::{Result, TranslateError};
use crate::function::{FunctionRegistry, NativeFunction};
use crate::types::ValueType;
use crate::variables::VariableTable;
use nodesql_vocab::{fn_ns, nodes, ntype, xsd};
use rand::Rng;
use std::time::Instant;
use tracing::trace;

/// Everything a translation reads besides the expression itself.
#[derive(Clone, Copy)]
pub struct TranslationContext<'a> {
    pub dialect: &'a dyn Dialect,
    pub functions: &'a FunctionRegistry,
    pub converter: &'a dyn NodeConverter,
    pub builder: &'a dyn QueryBuilder,
    pub variables: &'a VariableTable,
}

impl<'a> TranslationContext<'a> {
    /// Create a context using the built-in function registry.
    pub fn new(
        dialect: &'a dyn Dialect,
        converter: &'a dyn NodeConverter,
        builder: &'a dyn QueryBuilder,
        variables: &'a VariableTable,
    ) -> Self {
        Self {
            dialect,
            functions: FunctionRegistry::global(),
            converter,
            builder,
            variables,
        }
    }

    /// Use `functions` instead of the built-in registry.
    pub fn with_functions(mut self, functions: &'a FunctionRegistry) -> Self {
        self.functions = functions;
        self
    }
}

/// Translate `expr` with the node row as expected type.
pub fn translate(expr: &ValueExpr, ctx: &TranslationContext<'_>) -> Result<String> {
    translate_as(expr, ValueType::Node, ctx)
}

/// Translate `expr` expecting a value of type `ty`.
pub fn translate_as(
    expr: &ValueExpr,
    ty: ValueType,
    ctx: &TranslationContext<'_>,
) -> Result<String> {
    let start = Instant::now();
    let sql = SqlGenerator::new(ctx, ty).generate(expr)?;
    trace!(
        kind = expr.kind_name(),
        expected = %ty,
        elapsed_us = start.elapsed().as_micros() as u64,
        "expression translated"
    );
    Ok(sql)
}

/// Single-use generator: output buffer plus expected-type stack.
pub struct SqlGenerator<'c, 'a> {
    ctx: &'c TranslationContext<'a>,
    out: String,
    types: Vec<ValueType>,
}

impl<'c, 'a> SqlGenerator<'c, 'a> {
    pub fn new(ctx: &'c TranslationContext<'a>, ty: ValueType) -> Self {
        Self {
            ctx,
            out: String::new(),
            types: vec![ty],
        }
    }

    /// Generate SQL for `expr`, consuming the generator.
    pub fn generate(mut self, expr: &ValueExpr) -> Result<String> {
        self.visit(expr)?;
        Ok(self.out)
    }

    fn current(&self) -> ValueType {
        self.types.last().copied().unwrap_or(ValueType::Node)
    }

    /// Run `f` with `ty` as expected type; the previous type is restored on
    /// every exit path.
    fn with_type<F>(&mut self, ty: ValueType, f: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.types.push(ty);
        let result = f(self);
        self.types.pop();
        result
    }

    fn visit_as(&mut self, expr: &ValueExpr, ty: ValueType) -> Result<()> {
        self.with_type(ty, |g| g.visit(expr))
    }

    /// Generate `expr` into a fresh buffer.
    fn nested(&self, expr: &ValueExpr, ty: ValueType) -> Result<String> {
        SqlGenerator::new(self.ctx, ty).generate(expr)
    }

    fn coerce(&self, expr: &ValueExpr) -> Result<ValueType> {
        TypeCoercionFinder::new(self.ctx.functions).coerce(expr)
    }

    fn visit(&mut self, expr: &ValueExpr) -> Result<()> {
        match expr {
            ValueExpr::And { left, right } => self.infix(left, " AND ", right),
            ValueExpr::Or { left, right } => self.infix(left, " OR ", right),
            ValueExpr::Not { arg } => {
                self.out.push_str("NOT (");
                self.visit(arg)?;
                self.out.push(')');
                Ok(())
            }

            ValueExpr::Exists { pattern } => self.exists(pattern),

            ValueExpr::FunctionCall { uri, args } => self.function_call(uri, args),

            ValueExpr::Count { arg, distinct } => self.count(arg.as_deref(), *distinct),
            ValueExpr::Sum { arg } => self.aggregate("SUM", arg),
            ValueExpr::Avg { arg } => self.aggregate("AVG", arg),
            ValueExpr::Min { arg } => self.aggregate("MIN", arg),
            ValueExpr::Max { arg } => self.aggregate("MAX", arg),
            ValueExpr::GroupConcat {
                arg,
                separator,
                distinct,
            } => {
                let arg = self.nested(arg, ValueType::String)?;
                let separator = separator
                    .as_deref()
                    .map(|sep| self.nested(sep, ValueType::String))
                    .transpose()?;
                let sql = self
                    .ctx
                    .dialect
                    .group_concat(&arg, separator.as_deref(), *distinct);
                self.out.push_str(&sql);
                Ok(())
            }

            ValueExpr::Compare { op, left, right } => {
                let ty = match self.coerce(expr)? {
                    ValueType::Any => ValueType::Term,
                    ty => ty,
                };
                self.with_type(ty, |g| {
                    g.visit(left)?;
                    g.out.push_str(op.sql_operator());
                    g.visit(right)
                })
            }

            ValueExpr::Math { op, left, right } => self.math(expr, *op, left, right),

            ValueExpr::If {
                condition,
                then_expr,
                else_expr,
            } => {
                self.out.push_str("CASE WHEN ");
                self.visit_as(condition, ValueType::Bool)?;
                let ty = match self.coerce(expr)? {
                    ValueType::Any => self.current(),
                    ty => ty,
                };
                self.with_type(ty, |g| {
                    g.out.push_str(" THEN ");
                    g.visit(then_expr)?;
                    g.out.push_str(" ELSE ");
                    g.visit(else_expr)?;
                    g.out.push_str(" END");
                    Ok(())
                })
            }

            ValueExpr::Bound { arg } => {
                if arg.as_constant().is_some() {
                    self.out.push_str("TRUE");
                    return Ok(());
                }
                self.out.push('(');
                self.visit_as(arg, ValueType::Node)?;
                self.out.push_str(" IS NOT NULL)");
                Ok(())
            }
            ValueExpr::IsBNode { arg } => {
                self.term_predicate(expr, arg, &[ntype::BNODE], Value::is_bnode)
            }
            ValueExpr::IsUri { arg } => self.term_predicate(expr, arg, &[ntype::URI], Value::is_iri),
            ValueExpr::IsLiteral { arg } => {
                self.term_predicate(expr, arg, ntype::LITERALS, Value::is_literal)
            }
            ValueExpr::IsNumeric { arg } => {
                self.term_predicate(expr, arg, ntype::NUMERIC, is_numeric_constant)
            }
            ValueExpr::IsResource { arg } => {
                self.term_predicate(expr, arg, ntype::RESOURCES, |v| v.is_iri() || v.is_bnode())
            }

            ValueExpr::Str { arg } | ValueExpr::Label { arg } => {
                self.visit_as(arg, ValueType::String)
            }
            ValueExpr::LocalName { arg } => self.visit(arg),
            ValueExpr::Lang { arg } => {
                let Some(name) = arg.as_var() else {
                    return Err(TranslateError::unsupported_expression(
                        expr.kind_name(),
                        "argument must be a variable",
                    ));
                };
                let sql = self
                    .ctx
                    .variables
                    .get(name)
                    .and_then(|var| var.column(nodes::LANG))
                    .ok_or_else(|| TranslateError::missing_alias(name))?;
                self.out.push_str(&sql);
                Ok(())
            }
            ValueExpr::LangMatches { tag, range } => self.lang_matches(tag, range),

            ValueExpr::Iri { arg, base } => match base {
                Some(base) => {
                    let ex = self.nested(arg, ValueType::String)?;
                    let resolved = self.render_function(fn_ns::CONCAT, &[quote_str(base), ex.clone()])?;
                    self.out.push_str(&format!(
                        "CASE WHEN position(':' IN {ex}) > 0 THEN {ex} ELSE {resolved} END"
                    ));
                    Ok(())
                }
                None => self.visit_as(arg, ValueType::String),
            },
            ValueExpr::BNodeGenerator { arg } => match arg {
                Some(arg) => self.visit_as(arg, ValueType::String),
                None => {
                    let millis = chrono::Utc::now().timestamp_millis();
                    let salt: u32 = rand::thread_rng().gen_range(0..1000);
                    self.out.push_str(&format!("'{millis:x}{salt:x}'"));
                    Ok(())
                }
            },

            ValueExpr::Regex {
                arg,
                pattern,
                flags,
            } => {
                let value = self.nested(arg, ValueType::String)?;
                let pattern_sql = self.nested(pattern, ValueType::String)?;
                let flags = match flags.as_deref() {
                    None => None,
                    Some(ValueExpr::Constant { value }) => Some(value.string_value()),
                    Some(_) => {
                        return Err(TranslateError::unsupported_expression(
                            expr.kind_name(),
                            "flags must be a constant",
                        ))
                    }
                };
                let sql = if pattern.as_constant().is_some() {
                    optimize_regex(&value, &pattern_sql, flags, self.ctx.dialect)
                } else {
                    self.ctx.dialect.regexp(&value, &pattern_sql, flags)
                };
                self.out.push_str(&sql);
                Ok(())
            }

            ValueExpr::Like {
                arg,
                pattern,
                case_sensitive,
            } => {
                if *case_sensitive {
                    // TODO: quote and escape the pattern once callers stop passing
                    // pre-quoted SQL
                    self.visit_as(arg, ValueType::String)?;
                    self.out.push_str(" LIKE ");
                    self.out.push_str(pattern);
                } else {
                    let value = self.nested(arg, ValueType::String)?;
                    let sql = self.ctx.dialect.ilike(&value, &quote_str(pattern));
                    self.out.push_str(&sql);
                }
                Ok(())
            }

            ValueExpr::Coalesce { args } => {
                self.out.push_str("COALESCE(");
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.visit(arg)?;
                }
                self.out.push(')');
                Ok(())
            }

            ValueExpr::SameTerm { left, right } => self.with_type(ValueType::Term, |g| {
                g.visit(left)?;
                g.out.push_str(" = ");
                g.visit(right)
            }),

            ValueExpr::Var { name } => self.variable(name),
            ValueExpr::Constant { value } => self.constant(value),
        }
    }

    fn infix(&mut self, left: &ValueExpr, op: &str, right: &ValueExpr) -> Result<()> {
        self.out.push('(');
        self.visit(left)?;
        self.out.push_str(op);
        self.visit(right)?;
        self.out.push(')');
        Ok(())
    }

    fn exists(&mut self, pattern: &GraphPattern) -> Result<()> {
        let subquery = self
            .ctx
            .builder
            .build_exists(pattern, self.ctx.variables.deep_clone())?;
        self.out.push_str("EXISTS (");
        self.out.push_str(&subquery);
        self.out.push(')');
        Ok(())
    }

    fn function_call(&mut self, uri: &str, args: &[ValueExpr]) -> Result<()> {
        if let [arg] = args {
            if let Some(ty) = cast_target(uri) {
                return self.visit_as(arg, ty);
            }
        }

        let ctx = self.ctx;
        let function = ctx
            .functions
            .lookup(uri)
            .filter(|f| f.is_supported(ctx.dialect))
            .ok_or_else(|| TranslateError::unsupported_function(uri))?;
        check_arity(function, args.len())?;

        let rendered = args
            .iter()
            .enumerate()
            .map(|(i, arg)| self.nested(arg, function.argument_type(i)))
            .collect::<Result<Vec<_>>>()?;
        let call = function.render(ctx.dialect, &rendered)?;

        let expected = self.current();
        if function.return_type() != expected {
            self.out.push_str(&ctx.dialect.cast_to(expected, &call));
        } else {
            self.out.push_str(&call);
        }
        Ok(())
    }

    /// Render a registered function over already generated arguments.
    fn render_function(&self, uri: &str, args: &[String]) -> Result<String> {
        let function = self
            .ctx
            .functions
            .lookup(uri)
            .filter(|f| f.is_supported(self.ctx.dialect))
            .ok_or_else(|| TranslateError::unsupported_function(uri))?;
        check_arity(function, args.len())?;
        function.render(self.ctx.dialect, args)
    }

    fn aggregate(&mut self, name: &str, arg: &ValueExpr) -> Result<()> {
        self.out.push_str(name);
        self.out.push('(');
        self.visit_as(arg, ValueType::Double)?;
        self.out.push(')');
        Ok(())
    }

    fn count(&mut self, arg: Option<&ValueExpr>, distinct: bool) -> Result<()> {
        self.out.push_str("COUNT(");
        if distinct {
            self.out.push_str("DISTINCT ");
        }
        match arg {
            Some(arg) => self.visit_as(arg, ValueType::Node)?,
            None => {
                // SQL rows don't line up with solution mappings, so count the
                // tuple of all node bindings instead of `*`
                let items = self
                    .ctx
                    .variables
                    .iter()
                    .filter(|var| !var.projection_type.is_materialized())
                    .map(|var| {
                        var.primary_expression()
                            .ok_or_else(|| TranslateError::missing_alias(var.name.as_str()))
                    })
                    .collect::<Result<Vec<_>>>()?;
                self.out.push_str("ARRAY[");
                self.out.push_str(&items.join(","));
                self.out.push(']');
            }
        }
        self.out.push(')');
        Ok(())
    }

    fn math(
        &mut self,
        expr: &ValueExpr,
        op: MathOp,
        left: &ValueExpr,
        right: &ValueExpr,
    ) -> Result<()> {
        let ty = match self.coerce(expr)? {
            ValueType::String => {
                if op != MathOp::Plus {
                    return Err(TranslateError::UnsupportedStringOperation { op: op.as_str() });
                }
                let args = [
                    self.nested(left, ValueType::String)?,
                    self.nested(right, ValueType::String)?,
                ];
                let sql = self.render_function(fn_ns::CONCAT, &args)?;
                self.out.push_str(&sql);
                return Ok(());
            }
            ValueType::Any | ValueType::Node | ValueType::Term => ValueType::Double,
            ty => ty,
        };
        self.with_type(ty, |g| {
            g.visit(left)?;
            g.out.push_str(op.sql_operator());
            g.visit(right)
        })
    }

    fn term_predicate(
        &mut self,
        expr: &ValueExpr,
        arg: &ValueExpr,
        tags: &[&str],
        test: impl Fn(&Value) -> bool,
    ) -> Result<()> {
        match arg {
            ValueExpr::Constant { value } => {
                self.out.push_str(if test(value) { "TRUE" } else { "FALSE" });
                Ok(())
            }
            ValueExpr::Var { name } => {
                let column = self
                    .ctx
                    .variables
                    .get(name)
                    .and_then(|var| var.column(nodes::NTYPE))
                    .ok_or_else(|| TranslateError::missing_alias(name.as_str()))?;
                let checks: Vec<String> = tags
                    .iter()
                    .map(|tag| format!("{column} = '{tag}'"))
                    .collect();
                if checks.len() == 1 {
                    self.out.push_str(&checks[0]);
                } else {
                    self.out.push('(');
                    self.out.push_str(&checks.join(" OR "));
                    self.out.push(')');
                }
                Ok(())
            }
            _ => Err(TranslateError::unsupported_expression(
                expr.kind_name(),
                "argument must be a variable or a constant",
            )),
        }
    }

    fn lang_matches(&mut self, tag: &ValueExpr, range: &ValueExpr) -> Result<()> {
        let Some(range) = range.as_constant() else {
            return Err(TranslateError::unsupported_expression(
                "LANGMATCHES",
                "language range must be a constant",
            ));
        };
        let range = range.string_value().to_lowercase();
        let tag = self.nested(tag, ValueType::String)?;
        let sql = match range.as_str() {
            "*" => format!("{tag} LIKE '%'"),
            "" => format!("{tag} IS NULL"),
            _ => format!(
                "({tag} = {} OR {tag} LIKE {})",
                quote_str(&range),
                quote_str(&format!("{range}-%"))
            ),
        };
        self.out.push_str(&sql);
        Ok(())
    }
}

/// Expected type of a single-argument XSD cast that is rendered by visiting
/// its argument directly.
fn cast_target(uri: &str) -> Option<ValueType> {
    match uri {
        xsd::DOUBLE | xsd::FLOAT => Some(ValueType::Double),
        xsd::INTEGER | xsd::INT => Some(ValueType::Int),
        xsd::BOOLEAN => Some(ValueType::Bool),
        xsd::DATE => Some(ValueType::Date),
        _ => None,
    }
}

fn check_arity(function: &dyn NativeFunction, actual: usize) -> Result<()> {
    if actual < function.min_args() || actual > function.max_args() {
        return Err(TranslateError::FunctionArity {
            uri: function.uri().to_string(),
            min: function.min_args(),
            max: function.max_args(),
            actual,
        });
    }
    Ok(())
}

/// NaN and infinities count as numeric here.
fn is_numeric_constant(term: &Value) -> bool {
    term.is_literal() && term.string_value().trim().parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::CompareOp;
    use crate::builder::NoSubqueries;
    use crate::convert::InMemoryNodeConverter;
    use crate::dialect::PostgresDialect;
    use crate::variables::SqlVariable;

    fn render(expr: &ValueExpr, ty: ValueType, variables: &VariableTable) -> Result<String> {
        let converter = InMemoryNodeConverter::new();
        let ctx = TranslationContext::new(&PostgresDialect, &converter, &NoSubqueries, variables);
        translate_as(expr, ty, &ctx)
    }

    fn table() -> VariableTable {
        [SqlVariable::new("x").with_alias("n0")].into_iter().collect()
    }

    #[test]
    fn test_type_stack_is_restored_after_error() {
        let converter = InMemoryNodeConverter::new();
        let vars = table();
        let ctx = TranslationContext::new(&PostgresDialect, &converter, &NoSubqueries, &vars);
        let mut gen = SqlGenerator::new(&ctx, ValueType::String);
        let bad = ValueExpr::string("abc");
        assert!(gen.visit_as(&bad, ValueType::Int).is_err());
        assert_eq!(gen.types, vec![ValueType::String]);
    }

    #[test]
    fn test_not_and_or() {
        let expr = ValueExpr::not(ValueExpr::or(
            ValueExpr::compare(CompareOp::Eq, ValueExpr::var("x"), ValueExpr::integer(1)),
            ValueExpr::compare(CompareOp::Eq, ValueExpr::var("x"), ValueExpr::integer(2)),
        ));
        assert_eq!(
            render(&expr, ValueType::Bool, &table()).unwrap(),
            "NOT ((n0.ivalue = 1 OR n0.ivalue = 2))"
        );
    }

    #[test]
    fn test_cast_target() {
        assert_eq!(cast_target(xsd::FLOAT), Some(ValueType::Double));
        assert_eq!(cast_target(xsd::INT), Some(ValueType::Int));
        assert_eq!(cast_target(xsd::DECIMAL), None);
    }

    #[test]
    fn test_numeric_constant() {
        assert!(is_numeric_constant(&Value::integer(3)));
        assert!(!is_numeric_constant(&Value::string("three")));
        assert!(is_numeric_constant(&Value::typed("NaN", xsd::DOUBLE)));
        assert!(is_numeric_constant(&Value::typed("INF", xsd::DOUBLE)));
        assert!(is_numeric_constant(&Value::typed("-INF", xsd::DOUBLE)));
        assert!(!is_numeric_constant(&Value::iri("http://x.org/3")));
    }
}
