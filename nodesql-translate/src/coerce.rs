//! Operand type inference.
//!
//! [`TypeCoercionFinder`] collects the logical types of the type-bearing
//! leaves under an expression and folds them with
//! [`ValueType::coerce_with`]. Variables carry no type of their own, and
//! EXISTS sub-queries are not entered.

use crate::ast::{Value, ValueExpr};
use crate::error::Result;
use crate::function::FunctionRegistry;
use crate::types::ValueType;
use nodesql_vocab::xsd;

/// Computes the single type all operands of an expression are evaluated as.
#[derive(Debug, Clone, Copy)]
pub struct TypeCoercionFinder<'a> {
    registry: &'a FunctionRegistry,
}

impl<'a> TypeCoercionFinder<'a> {
    pub fn new(registry: &'a FunctionRegistry) -> Self {
        Self { registry }
    }

    /// Coerced type of `expr`; [`ValueType::Any`] when nothing under it
    /// carries a type.
    pub fn coerce(&self, expr: &ValueExpr) -> Result<ValueType> {
        let mut types = Vec::new();
        self.collect(expr, &mut types);
        ValueType::coerce_all(types)
    }

    fn collect(&self, expr: &ValueExpr, out: &mut Vec<ValueType>) {
        match expr {
            ValueExpr::Constant { value } => out.push(constant_type(value)),
            ValueExpr::Str { .. }
            | ValueExpr::Lang { .. }
            | ValueExpr::LocalName { .. }
            | ValueExpr::Label { .. } => out.push(ValueType::String),
            ValueExpr::FunctionCall { uri, .. } => {
                if let Some(function) = self.registry.lookup(uri) {
                    out.push(function.return_type());
                }
            }
            ValueExpr::Var { .. } | ValueExpr::Exists { .. } => {}

            ValueExpr::And { left, right }
            | ValueExpr::Or { left, right }
            | ValueExpr::Compare { left, right, .. }
            | ValueExpr::Math { left, right, .. }
            | ValueExpr::SameTerm { left, right } => {
                self.collect(left, out);
                self.collect(right, out);
            }
            ValueExpr::LangMatches { tag, range } => {
                self.collect(tag, out);
                self.collect(range, out);
            }
            ValueExpr::Not { arg }
            | ValueExpr::Sum { arg }
            | ValueExpr::Avg { arg }
            | ValueExpr::Min { arg }
            | ValueExpr::Max { arg }
            | ValueExpr::Bound { arg }
            | ValueExpr::IsBNode { arg }
            | ValueExpr::IsLiteral { arg }
            | ValueExpr::IsNumeric { arg }
            | ValueExpr::IsResource { arg }
            | ValueExpr::IsUri { arg }
            | ValueExpr::Iri { arg, .. }
            | ValueExpr::Like { arg, .. } => self.collect(arg, out),
            ValueExpr::Count { arg, .. } | ValueExpr::BNodeGenerator { arg } => {
                if let Some(arg) = arg {
                    self.collect(arg, out);
                }
            }
            ValueExpr::GroupConcat { arg, separator, .. } => {
                self.collect(arg, out);
                if let Some(sep) = separator {
                    self.collect(sep, out);
                }
            }
            ValueExpr::If {
                condition,
                then_expr,
                else_expr,
            } => {
                self.collect(condition, out);
                self.collect(then_expr, out);
                self.collect(else_expr, out);
            }
            ValueExpr::Regex {
                arg,
                pattern,
                flags,
            } => {
                self.collect(arg, out);
                self.collect(pattern, out);
                if let Some(flags) = flags {
                    self.collect(flags, out);
                }
            }
            ValueExpr::Coalesce { args } => {
                for arg in args {
                    self.collect(arg, out);
                }
            }
        }
    }
}

/// Logical type of a constant, inferred from its datatype.
pub fn constant_type(value: &Value) -> ValueType {
    match value.datatype() {
        Some(dt) if xsd::is_float_family(dt) => ValueType::Double,
        Some(dt) if xsd::is_integer_family(dt) => ValueType::Int,
        Some(dt) if xsd::is_temporal(dt) => ValueType::Date,
        _ => ValueType::String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{CompareOp, GraphPattern, MathOp, TermPattern};
    use crate::error::{ErrorKind, TranslateError};
    use nodesql_vocab::fn_ns;

    fn coerce(expr: &ValueExpr) -> Result<ValueType> {
        TypeCoercionFinder::new(FunctionRegistry::global()).coerce(expr)
    }

    #[test]
    fn test_constant_types() {
        assert_eq!(constant_type(&Value::integer(1)), ValueType::Int);
        assert_eq!(constant_type(&Value::typed("1", xsd::SHORT)), ValueType::Int);
        assert_eq!(constant_type(&Value::typed("1.5", xsd::DECIMAL)), ValueType::Double);
        assert_eq!(constant_type(&Value::typed("1.5", xsd::FLOAT)), ValueType::Double);
        assert_eq!(
            constant_type(&Value::typed("2020-01-01", xsd::DATE)),
            ValueType::Date
        );
        assert_eq!(constant_type(&Value::string("x")), ValueType::String);
        assert_eq!(constant_type(&Value::iri("http://x.org/")), ValueType::String);
    }

    #[test]
    fn test_variable_against_integer() {
        let expr = ValueExpr::compare(CompareOp::Eq, ValueExpr::var("x"), ValueExpr::integer(5));
        assert_eq!(coerce(&expr).unwrap(), ValueType::Int);
    }

    #[test]
    fn test_variables_alone_are_any() {
        let expr = ValueExpr::compare(CompareOp::Eq, ValueExpr::var("x"), ValueExpr::var("y"));
        assert_eq!(coerce(&expr).unwrap(), ValueType::Any);
    }

    #[test]
    fn test_int_and_double_widen() {
        let expr = ValueExpr::math(
            MathOp::Plus,
            ValueExpr::integer(1),
            ValueExpr::constant(Value::double(2.5)),
        );
        assert_eq!(coerce(&expr).unwrap(), ValueType::Double);
    }

    #[test]
    fn test_str_forces_string() {
        let expr = ValueExpr::compare(
            CompareOp::Eq,
            ValueExpr::str(ValueExpr::var("x")),
            ValueExpr::integer(5),
        );
        assert_eq!(coerce(&expr).unwrap(), ValueType::String);
    }

    #[test]
    fn test_function_return_type() {
        let expr = ValueExpr::compare(
            CompareOp::Gt,
            ValueExpr::function(fn_ns::STRING_LENGTH, vec![ValueExpr::var("x")]),
            ValueExpr::var("y"),
        );
        assert_eq!(coerce(&expr).unwrap(), ValueType::Int);

        let unknown = ValueExpr::function("http://example.org/f", vec![ValueExpr::var("x")]);
        assert_eq!(coerce(&unknown).unwrap(), ValueType::Any);
    }

    #[test]
    fn test_date_and_bool_conflict() {
        let expr = ValueExpr::compare(
            CompareOp::Eq,
            ValueExpr::constant(Value::typed("2020-01-01T00:00:00", xsd::DATE_TIME)),
            ValueExpr::function(xsd::BOOLEAN, vec![ValueExpr::var("b")]),
        );
        let err = coerce(&expr).unwrap_err();
        assert!(matches!(err, TranslateError::Coercion { .. }));
        assert_eq!(err.kind(), ErrorKind::Coercion);
    }

    #[test]
    fn test_exists_is_not_entered() {
        let expr = ValueExpr::and(
            ValueExpr::Exists {
                pattern: Box::new(GraphPattern::Filter {
                    pattern: Box::new(GraphPattern::triple(
                        TermPattern::Var("s".into()),
                        TermPattern::Var("p".into()),
                        TermPattern::Var("o".into()),
                    )),
                    expr: ValueExpr::integer(1),
                }),
            },
            ValueExpr::var("x"),
        );
        assert_eq!(coerce(&expr).unwrap(), ValueType::Any);
    }
}
