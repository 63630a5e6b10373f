//! Query builder collaborator for EXISTS sub-queries.

use crate::ast::GraphPattern;
use crate::error::{Result, TranslateError};
use crate::variables::VariableTable;
use std::fmt::Debug;

/// Builds the SQL of a nested sub-query.
pub trait QueryBuilder: Debug + Send + Sync {
    /// Build the sub-query for `pattern`.
    ///
    /// `variables` is a private copy of the enclosing scope; the builder may
    /// add bindings or substitutes to it freely.
    fn build_exists(&self, pattern: &GraphPattern, variables: VariableTable) -> Result<String>;
}

/// A builder that rejects every sub-query.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSubqueries;

impl QueryBuilder for NoSubqueries {
    fn build_exists(&self, _pattern: &GraphPattern, _variables: VariableTable) -> Result<String> {
        Err(TranslateError::unsupported_expression(
            "EXISTS",
            "no query builder is available for sub-queries",
        ))
    }
}
