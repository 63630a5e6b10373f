//! Graph patterns carried by EXISTS.
//!
//! The translator never evaluates these itself; they are handed to the
//! [`QueryBuilder`](crate::builder::QueryBuilder) that owns the FROM/JOIN
//! assembly.

use super::expr::ValueExpr;
use super::term::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Subject, predicate or object position of a triple pattern.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermPattern {
    Var(String),
    Term(Value),
}

/// Sub-query algebra.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GraphPattern {
    /// A single triple pattern
    Triple {
        subject: TermPattern,
        predicate: TermPattern,
        object: TermPattern,
    },

    /// Conjunction of patterns
    Join { patterns: Vec<GraphPattern> },

    /// Pattern restricted by a filter expression
    Filter {
        pattern: Box<GraphPattern>,
        expr: ValueExpr,
    },
}

impl GraphPattern {
    /// Create a triple pattern.
    pub fn triple(subject: TermPattern, predicate: TermPattern, object: TermPattern) -> Self {
        GraphPattern::Triple {
            subject,
            predicate,
            object,
        }
    }

    /// Variables mentioned in triple positions, in name order.
    pub fn variables(&self) -> BTreeSet<&str> {
        let mut vars = BTreeSet::new();
        self.collect_variables(&mut vars);
        vars
    }

    fn collect_variables<'a>(&'a self, out: &mut BTreeSet<&'a str>) {
        match self {
            GraphPattern::Triple {
                subject,
                predicate,
                object,
            } => {
                for tp in [subject, predicate, object] {
                    if let TermPattern::Var(name) = tp {
                        out.insert(name.as_str());
                    }
                }
            }
            GraphPattern::Join { patterns } => {
                for p in patterns {
                    p.collect_variables(out);
                }
            }
            GraphPattern::Filter { pattern, .. } => pattern.collect_variables(out),
        }
    }
}
