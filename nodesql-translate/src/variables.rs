//! Variable/alias table.
//!
//! Maps each SPARQL variable in scope to the SQL alias of its nodes-table
//! row, plus optional substitutes and precomputed SQL expressions. The
//! surrounding query builder owns the table; the generator only reads it.

use crate::ast::ValueExpr;
use crate::types::ValueType;
use nodesql_vocab::nodes;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};

/// A variable binding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SqlVariable {
    /// Variable name (without `?`)
    pub name: String,
    /// SQL alias of the joined nodes-table row
    #[serde(default)]
    pub alias: Option<String>,
    /// Expressions rendered in place of the variable (first one wins)
    #[serde(default)]
    pub substitutes: Vec<ValueExpr>,
    /// Precomputed SQL expressions for the variable's value
    #[serde(default)]
    pub expressions: Vec<String>,
    /// Type the variable is projected as
    #[serde(default = "default_projection_type")]
    pub projection_type: ValueType,
}

fn default_projection_type() -> ValueType {
    ValueType::Node
}

impl SqlVariable {
    /// Create a binding with no alias, projected as a node.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            substitutes: Vec::new(),
            expressions: Vec::new(),
            projection_type: ValueType::Node,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_substitute(mut self, expr: ValueExpr) -> Self {
        self.substitutes.push(expr);
        self
    }

    pub fn with_expression(mut self, sql: impl Into<String>) -> Self {
        self.expressions.push(sql.into());
        self
    }

    pub fn with_projection_type(mut self, ty: ValueType) -> Self {
        self.projection_type = ty;
        self
    }

    /// The SQL identifying this variable's node: the first cached
    /// expression, else `<alias>.id`.
    pub fn primary_expression(&self) -> Option<String> {
        self.expressions
            .first()
            .cloned()
            .or_else(|| self.column(nodes::ID))
    }

    /// `<alias>.<column>`, if an alias is bound.
    pub fn column(&self, column: &str) -> Option<String> {
        self.alias.as_ref().map(|alias| format!("{alias}.{column}"))
    }
}

/// Variable bindings ordered by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VariableTable {
    vars: BTreeMap<String, SqlVariable>,
}

impl VariableTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&SqlVariable> {
        self.vars.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut SqlVariable> {
        self.vars.get_mut(name)
    }

    /// Insert `var`, returning the binding it replaced.
    pub fn insert(&mut self, var: SqlVariable) -> Option<SqlVariable> {
        self.vars.insert(var.name.clone(), var)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Bindings in name order.
    pub fn iter(&self) -> btree_map::Values<'_, String, SqlVariable> {
        self.vars.values()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Independent copy for a nested sub-query pass.
    ///
    /// Changes made to the copy (new bindings, extra substitutes) are never
    /// visible through `self`.
    pub fn deep_clone(&self) -> VariableTable {
        self.clone()
    }
}

impl FromIterator<SqlVariable> for VariableTable {
    fn from_iter<I: IntoIterator<Item = SqlVariable>>(iter: I) -> Self {
        let mut table = VariableTable::new();
        for var in iter {
            table.insert(var);
        }
        table
    }
}

impl<'a> IntoIterator for &'a VariableTable {
    type Item = &'a SqlVariable;
    type IntoIter = btree_map::Values<'a, String, SqlVariable>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_expression() {
        let plain = SqlVariable::new("x").with_alias("n0");
        assert_eq!(plain.primary_expression().as_deref(), Some("n0.id"));

        let cached = SqlVariable::new("x")
            .with_alias("n0")
            .with_expression("sub.x_id");
        assert_eq!(cached.primary_expression().as_deref(), Some("sub.x_id"));

        assert_eq!(SqlVariable::new("x").primary_expression(), None);
    }

    #[test]
    fn test_iteration_is_name_ordered() {
        let table: VariableTable = ["c", "a", "b"]
            .into_iter()
            .map(SqlVariable::new)
            .collect();
        let names: Vec<&str> = table.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_deep_clone_is_isolated() {
        let mut parent = VariableTable::new();
        parent.insert(SqlVariable::new("x").with_alias("n0"));

        let mut child = parent.deep_clone();
        child
            .get_mut("x")
            .unwrap()
            .substitutes
            .push(ValueExpr::integer(1));
        child.insert(SqlVariable::new("z").with_alias("n9"));

        assert!(parent.get("x").unwrap().substitutes.is_empty());
        assert!(!parent.contains("z"));
        assert_eq!(child.len(), 2);
    }

    #[test]
    fn test_binding_json_defaults() {
        let var: SqlVariable = serde_json::from_str(r#"{"name": "x", "alias": "n0"}"#).unwrap();
        assert_eq!(var.projection_type, ValueType::Node);
        assert!(var.substitutes.is_empty());
        assert_eq!(var.alias.as_deref(), Some("n0"));
    }
}
