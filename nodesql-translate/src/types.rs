//! Logical value types.
//!
//! A `ValueType` names the SQL column category a SPARQL value compiles into.
//! The same logical variable can be read from several physical columns of a
//! node row; the expected `ValueType` at each point of the expression tree
//! decides which one.

use crate::error::{Result, TranslateError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The coercion lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// No constraint yet; absorbed by any concrete type
    Any,
    String,
    Int,
    Double,
    Decimal,
    Bool,
    Date,
    /// Timezone-aware timestamp
    TzDate,
    Uri,
    /// Opaque RDF term identity (node id)
    Term,
    /// Full node row
    Node,
    None,
}

impl ValueType {
    /// Fold `other` into `self` following the lattice rules.
    ///
    /// - `Any` is absorbed by any concrete type
    /// - numeric types widen along `Int < Decimal < Double`
    /// - any mix involving `String` yields `String`
    /// - any other mismatch is a coercion error
    pub fn coerce_with(self, other: ValueType) -> Result<ValueType> {
        use ValueType::*;
        match (self, other) {
            (Any, r) => Ok(r),
            (l, Any) => Ok(l),
            (l, r) if l == r => Ok(l),
            (Int, Double) | (Double, Int) | (Decimal, Double) | (Double, Decimal) => Ok(Double),
            (Int, Decimal) | (Decimal, Int) => Ok(Decimal),
            (String, _) | (_, String) => Ok(String),
            (l, r) => Err(TranslateError::coercion(l, r)),
        }
    }

    /// Fold a sequence of candidate types left to right, starting at `Any`.
    pub fn coerce_all<I>(types: I) -> Result<ValueType>
    where
        I: IntoIterator<Item = ValueType>,
    {
        types
            .into_iter()
            .try_fold(ValueType::Any, ValueType::coerce_with)
    }

    /// Whether a variable projected with this type carries a materialized
    /// SQL value rather than a reference into the nodes table.
    pub fn is_materialized(&self) -> bool {
        !matches!(self, ValueType::Node | ValueType::None)
    }

    /// Upper-case tag name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Any => "ANY",
            ValueType::String => "STRING",
            ValueType::Int => "INT",
            ValueType::Double => "DOUBLE",
            ValueType::Decimal => "DECIMAL",
            ValueType::Bool => "BOOL",
            ValueType::Date => "DATE",
            ValueType::TzDate => "TZDATE",
            ValueType::Uri => "URI",
            ValueType::Term => "TERM",
            ValueType::Node => "NODE",
            ValueType::None => "NONE",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let ty = match s.to_ascii_lowercase().as_str() {
            "any" => ValueType::Any,
            "string" => ValueType::String,
            "int" => ValueType::Int,
            "double" => ValueType::Double,
            "decimal" => ValueType::Decimal,
            "bool" => ValueType::Bool,
            "date" => ValueType::Date,
            "tzdate" => ValueType::TzDate,
            "uri" => ValueType::Uri,
            "term" => ValueType::Term,
            "node" => ValueType::Node,
            "none" => ValueType::None,
            other => return Err(format!("unknown value type '{other}'")),
        };
        Ok(ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_any_is_absorbed() {
        assert_eq!(
            ValueType::Any.coerce_with(ValueType::Date).unwrap(),
            ValueType::Date
        );
        assert_eq!(
            ValueType::Bool.coerce_with(ValueType::Any).unwrap(),
            ValueType::Bool
        );
    }

    #[test]
    fn test_numeric_widening_is_order_independent() {
        let a = ValueType::coerce_all([ValueType::Int, ValueType::Double]).unwrap();
        let b = ValueType::coerce_all([ValueType::Double, ValueType::Int]).unwrap();
        assert_eq!(a, ValueType::Double);
        assert_eq!(a, b);

        assert_eq!(
            ValueType::coerce_all([ValueType::Int, ValueType::Decimal]).unwrap(),
            ValueType::Decimal
        );
    }

    #[test]
    fn test_string_wins() {
        assert_eq!(
            ValueType::coerce_all([ValueType::Int, ValueType::String]).unwrap(),
            ValueType::String
        );
        assert_eq!(
            ValueType::coerce_all([ValueType::Date, ValueType::String, ValueType::Bool]).unwrap(),
            ValueType::String
        );
    }

    #[test]
    fn test_incompatible_types_fail() {
        let err = ValueType::coerce_all([ValueType::Date, ValueType::Bool]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Coercion);
        assert_eq!(err.to_string(), "unsupported type coercion: DATE and BOOL");
    }

    #[test]
    fn test_empty_fold_is_any() {
        assert_eq!(ValueType::coerce_all([]).unwrap(), ValueType::Any);
    }

    #[test]
    fn test_parse_matches_display() {
        for ty in [ValueType::Int, ValueType::TzDate, ValueType::Node] {
            assert_eq!(ty.as_str().parse::<ValueType>(), Ok(ty));
        }
        assert!("varchar".parse::<ValueType>().is_err());
    }

    #[test]
    fn test_serde_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            t: ValueType,
        }

        let w: Wrapper = toml::from_str("t = \"tzdate\"").unwrap();
        assert_eq!(w.t, ValueType::TzDate);
    }
}
