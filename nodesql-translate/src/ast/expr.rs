//! SPARQL value expression types.
//!
//! This module defines the algebra-level expression tree handed to the
//! translator: one variant per node kind, children boxed, node-specific
//! literals (operator, separator, flags) inline. The tree is never mutated
//! by translation.

use super::pattern::GraphPattern;
use super::term::Value;
use serde::{Deserialize, Serialize};

/// A SPARQL value expression.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueExpr {
    // Logical
    And {
        left: Box<ValueExpr>,
        right: Box<ValueExpr>,
    },
    Or {
        left: Box<ValueExpr>,
        right: Box<ValueExpr>,
    },
    Not {
        arg: Box<ValueExpr>,
    },

    /// EXISTS { pattern }
    Exists {
        pattern: Box<GraphPattern>,
    },

    /// Call of a function addressed by IRI
    FunctionCall {
        uri: String,
        #[serde(default)]
        args: Vec<ValueExpr>,
    },

    // Aggregates
    /// COUNT; `arg` is `None` for the count-all form
    Count {
        #[serde(default)]
        arg: Option<Box<ValueExpr>>,
        #[serde(default)]
        distinct: bool,
    },
    Sum {
        arg: Box<ValueExpr>,
    },
    Avg {
        arg: Box<ValueExpr>,
    },
    Min {
        arg: Box<ValueExpr>,
    },
    Max {
        arg: Box<ValueExpr>,
    },
    GroupConcat {
        arg: Box<ValueExpr>,
        #[serde(default)]
        separator: Option<Box<ValueExpr>>,
        #[serde(default)]
        distinct: bool,
    },

    Compare {
        op: CompareOp,
        left: Box<ValueExpr>,
        right: Box<ValueExpr>,
    },

    Math {
        op: MathOp,
        left: Box<ValueExpr>,
        right: Box<ValueExpr>,
    },

    /// IF(condition, then, else)
    If {
        condition: Box<ValueExpr>,
        then_expr: Box<ValueExpr>,
        else_expr: Box<ValueExpr>,
    },

    // Term-type predicates
    Bound {
        arg: Box<ValueExpr>,
    },
    #[serde(rename = "is_bnode")]
    IsBNode {
        arg: Box<ValueExpr>,
    },
    IsLiteral {
        arg: Box<ValueExpr>,
    },
    IsNumeric {
        arg: Box<ValueExpr>,
    },
    IsResource {
        arg: Box<ValueExpr>,
    },
    IsUri {
        arg: Box<ValueExpr>,
    },

    // String and IRI helpers
    Str {
        arg: Box<ValueExpr>,
    },
    Lang {
        arg: Box<ValueExpr>,
    },
    /// LANGMATCHES(tag, range); `range` must be a constant
    LangMatches {
        tag: Box<ValueExpr>,
        range: Box<ValueExpr>,
    },
    Label {
        arg: Box<ValueExpr>,
    },
    LocalName {
        arg: Box<ValueExpr>,
    },
    /// IRI(arg), resolved against `base` when present
    Iri {
        arg: Box<ValueExpr>,
        #[serde(default)]
        base: Option<String>,
    },
    #[serde(rename = "bnode_generator")]
    BNodeGenerator {
        #[serde(default)]
        arg: Option<Box<ValueExpr>>,
    },

    Regex {
        arg: Box<ValueExpr>,
        pattern: Box<ValueExpr>,
        #[serde(default)]
        flags: Option<Box<ValueExpr>>,
    },

    /// SQL-style LIKE with a raw pattern
    Like {
        arg: Box<ValueExpr>,
        pattern: String,
        #[serde(default = "default_case_sensitive")]
        case_sensitive: bool,
    },

    Coalesce {
        args: Vec<ValueExpr>,
    },

    SameTerm {
        left: Box<ValueExpr>,
        right: Box<ValueExpr>,
    },

    /// Variable reference (name without `?`)
    Var {
        name: String,
    },

    /// Constant RDF term
    Constant {
        value: Value,
    },
}

fn default_case_sensitive() -> bool {
    true
}

impl ValueExpr {
    /// Create a variable reference.
    pub fn var(name: impl Into<String>) -> Self {
        ValueExpr::Var { name: name.into() }
    }

    /// Create a constant.
    pub fn constant(value: Value) -> Self {
        ValueExpr::Constant { value }
    }

    /// Create a plain string constant.
    pub fn string(s: impl Into<String>) -> Self {
        ValueExpr::constant(Value::string(s))
    }

    /// Create an `xsd:integer` constant.
    pub fn integer(n: i64) -> Self {
        ValueExpr::constant(Value::integer(n))
    }

    /// Create an IRI constant.
    pub fn iri_const(iri: impl Into<String>) -> Self {
        ValueExpr::constant(Value::iri(iri))
    }

    /// Create a comparison.
    pub fn compare(op: CompareOp, left: ValueExpr, right: ValueExpr) -> Self {
        ValueExpr::Compare {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Create an arithmetic expression.
    pub fn math(op: MathOp, left: ValueExpr, right: ValueExpr) -> Self {
        ValueExpr::Math {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Create a conjunction.
    pub fn and(left: ValueExpr, right: ValueExpr) -> Self {
        ValueExpr::And {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Create a disjunction.
    pub fn or(left: ValueExpr, right: ValueExpr) -> Self {
        ValueExpr::Or {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Create a negation.
    pub fn not(arg: ValueExpr) -> Self {
        ValueExpr::Not { arg: Box::new(arg) }
    }

    /// Create a function call.
    pub fn function(uri: impl Into<String>, args: Vec<ValueExpr>) -> Self {
        ValueExpr::FunctionCall {
            uri: uri.into(),
            args,
        }
    }

    /// Create a STR() call.
    pub fn str(arg: ValueExpr) -> Self {
        ValueExpr::Str { arg: Box::new(arg) }
    }

    /// Create a REGEX() call.
    pub fn regex(arg: ValueExpr, pattern: ValueExpr, flags: Option<ValueExpr>) -> Self {
        ValueExpr::Regex {
            arg: Box::new(arg),
            pattern: Box::new(pattern),
            flags: flags.map(Box::new),
        }
    }

    /// Variable name if this is a bare variable.
    pub fn as_var(&self) -> Option<&str> {
        match self {
            ValueExpr::Var { name } => Some(name),
            _ => None,
        }
    }

    /// Value if this is a constant.
    pub fn as_constant(&self) -> Option<&Value> {
        match self {
            ValueExpr::Constant { value } => Some(value),
            _ => None,
        }
    }

    /// Node kind name, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ValueExpr::And { .. } => "AND",
            ValueExpr::Or { .. } => "OR",
            ValueExpr::Not { .. } => "NOT",
            ValueExpr::Exists { .. } => "EXISTS",
            ValueExpr::FunctionCall { .. } => "function call",
            ValueExpr::Count { .. } => "COUNT",
            ValueExpr::Sum { .. } => "SUM",
            ValueExpr::Avg { .. } => "AVG",
            ValueExpr::Min { .. } => "MIN",
            ValueExpr::Max { .. } => "MAX",
            ValueExpr::GroupConcat { .. } => "GROUP_CONCAT",
            ValueExpr::Compare { .. } => "comparison",
            ValueExpr::Math { .. } => "arithmetic",
            ValueExpr::If { .. } => "IF",
            ValueExpr::Bound { .. } => "BOUND",
            ValueExpr::IsBNode { .. } => "isBlank",
            ValueExpr::IsLiteral { .. } => "isLiteral",
            ValueExpr::IsNumeric { .. } => "isNumeric",
            ValueExpr::IsResource { .. } => "isResource",
            ValueExpr::IsUri { .. } => "isIRI",
            ValueExpr::Str { .. } => "STR",
            ValueExpr::Lang { .. } => "LANG",
            ValueExpr::LangMatches { .. } => "LANGMATCHES",
            ValueExpr::Label { .. } => "LABEL",
            ValueExpr::LocalName { .. } => "LOCALNAME",
            ValueExpr::Iri { .. } => "IRI",
            ValueExpr::BNodeGenerator { .. } => "BNODE",
            ValueExpr::Regex { .. } => "REGEX",
            ValueExpr::Like { .. } => "LIKE",
            ValueExpr::Coalesce { .. } => "COALESCE",
            ValueExpr::SameTerm { .. } => "sameTerm",
            ValueExpr::Var { .. } => "variable",
            ValueExpr::Constant { .. } => "constant",
        }
    }
}

/// Comparison operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareOp {
    Eq, // =
    Ne, // !=
    Lt, // <
    Le, // <=
    Gt, // >
    Ge, // >=
}

impl CompareOp {
    /// SQL infix operator, padded with spaces.
    pub fn sql_operator(&self) -> &'static str {
        match self {
            CompareOp::Eq => " = ",
            CompareOp::Ne => " <> ",
            CompareOp::Lt => " < ",
            CompareOp::Le => " <= ",
            CompareOp::Gt => " > ",
            CompareOp::Ge => " >= ",
        }
    }
}

/// Arithmetic operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MathOp {
    Plus,
    Minus,
    Multiply,
    Divide,
}

impl MathOp {
    /// SPARQL operator symbol.
    pub fn as_str(&self) -> &'static str {
        match self {
            MathOp::Plus => "+",
            MathOp::Minus => "-",
            MathOp::Multiply => "*",
            MathOp::Divide => "/",
        }
    }

    /// SQL infix operator, padded with spaces.
    pub fn sql_operator(&self) -> &'static str {
        match self {
            MathOp::Plus => " + ",
            MathOp::Minus => " - ",
            MathOp::Divide => " / ",
            // TODO: confirm with query owners whether Multiply should emit `*`
            MathOp::Multiply => " / ",
        }
    }
}
