//! SPARQL value expression to SQL translation.
//!
//! This crate compiles SPARQL value expressions (filters, projections,
//! aggregates) into SQL scalar or boolean expressions over a normalized
//! nodes table, where each RDF term is one row with one typed value column
//! per logical type (`svalue`, `ivalue`, `dvalue`, `bvalue`, `tvalue`) plus
//! a term-kind tag (`ntype`).
//!
//! # Pipeline
//!
//! 1. [`TypeCoercionFinder`] infers which logical type the operands of a
//!    compound expression share
//! 2. [`SqlGenerator`] walks the tree, choosing the physical column or
//!    literal form for each leaf from the expected type, and rendering
//!    functions through the [`FunctionRegistry`] and engine idioms through
//!    the [`Dialect`]
//! 3. REGEX calls with constant patterns are rewritten to `LIKE` or `=` by
//!    [`optimize_regex`] when equivalent
//!
//! The query that surrounds the expression is not built here. Callers
//! supply a [`VariableTable`] mapping variables to table aliases, a
//! [`NodeConverter`] for constant node ids and a [`QueryBuilder`] for EXISTS
//! sub-queries.
//!
//! # Example
//!
//! ```
//! use nodesql_translate::{
//!     translate_as, CompareOp, InMemoryNodeConverter, NoSubqueries, PostgresDialect,
//!     SqlVariable, TranslationContext, ValueExpr, ValueType, VariableTable,
//! };
//!
//! let vars: VariableTable = [SqlVariable::new("x").with_alias("n0")].into_iter().collect();
//! let converter = InMemoryNodeConverter::new();
//! let ctx = TranslationContext::new(&PostgresDialect, &converter, &NoSubqueries, &vars);
//!
//! let expr = ValueExpr::compare(CompareOp::Eq, ValueExpr::var("x"), ValueExpr::integer(5));
//! assert_eq!(translate_as(&expr, ValueType::Bool, &ctx).unwrap(), "n0.ivalue = 5");
//! ```

pub mod ast;
pub mod builder;
pub mod coerce;
pub mod config;
pub mod convert;
pub mod dialect;
pub mod error;
pub mod function;
pub mod generate;
pub mod types;
pub mod variables;

pub use ast::{CompareOp, GraphPattern, Literal, MathOp, TermPattern, Value, ValueExpr};
pub use builder::{NoSubqueries, QueryBuilder};
pub use coerce::TypeCoercionFinder;
pub use config::{ConfigError, TranslatorConfig};
pub use convert::{InMemoryNodeConverter, NodeConverter, NodeHandle};
pub use dialect::{Dialect, DialectKind, H2Dialect, MySqlDialect, PostgresDialect};
pub use error::{ErrorKind, Result, TranslateError};
pub use function::{BuiltinFunction, FunctionRegistry, NativeFunction};
pub use generate::{optimize_regex, translate, translate_as, SqlGenerator, TranslationContext};
pub use types::ValueType;
pub use variables::{SqlVariable, VariableTable};
