//! Translation error types.

use crate::types::ValueType;
use thiserror::Error;

/// Broad failure category of a [`TranslateError`].
///
/// All three abort the translation of the whole expression; none are retried.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Incompatible operand types in the coercion fold
    Coercion,
    /// Function, operator or operand type the translation cannot express
    Unsupported,
    /// Missing alias or malformed literal
    Precondition,
}

/// Error that can occur while translating a value expression to SQL.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// Two operand types cannot be folded into one
    #[error("unsupported type coercion: {left} and {right}")]
    Coercion { left: ValueType, right: ValueType },

    /// Function unknown to the registry or not supported by the dialect
    #[error("the function {uri} is not supported by the SQL translation")]
    UnsupportedFunction { uri: String },

    /// Function called with an argument count outside its arity
    #[error("function {uri} expects between {min} and {max} arguments, got {actual}")]
    FunctionArity {
        uri: String,
        min: usize,
        max: usize,
        actual: usize,
    },

    /// Arithmetic operator other than `+` on strings
    #[error("operation {op} is not supported on strings")]
    UnsupportedStringOperation { op: &'static str },

    /// Expected type the VARIABLE/CONSTANT rendering cannot produce
    #[error("unsupported value type: {0}")]
    UnsupportedValueType(ValueType),

    /// Expression shape the translation does not handle
    #[error("{construct} is not supported: {reason}")]
    UnsupportedExpression {
        construct: &'static str,
        reason: String,
    },

    /// Variable requires a nodes table alias but none is bound
    #[error("no alias available for variable ?{0}")]
    MissingAlias(String),

    /// Materialized variable without a precomputed SQL expression
    #[error("no expressions available for variable ?{0}")]
    MissingExpression(String),

    /// Literal that does not parse as the expected type
    #[error("invalid {kind} literal '{value}'")]
    InvalidLiteral { kind: &'static str, value: String },

    /// Node converter could not resolve a constant to a node id
    #[error("could not resolve node for '{value}': {reason}")]
    NodeConversion { value: String, reason: String },
}

impl TranslateError {
    /// Create a coercion error.
    pub fn coercion(left: ValueType, right: ValueType) -> Self {
        Self::Coercion { left, right }
    }

    /// Create an unsupported function error.
    pub fn unsupported_function(uri: impl Into<String>) -> Self {
        Self::UnsupportedFunction { uri: uri.into() }
    }

    /// Create an unsupported expression error.
    pub fn unsupported_expression(construct: &'static str, reason: impl Into<String>) -> Self {
        Self::UnsupportedExpression {
            construct,
            reason: reason.into(),
        }
    }

    /// Create a missing alias error.
    pub fn missing_alias(var: impl Into<String>) -> Self {
        Self::MissingAlias(var.into())
    }

    /// Create an invalid literal error.
    pub fn invalid_literal(kind: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidLiteral {
            kind,
            value: value.into(),
        }
    }

    /// Create a node conversion error.
    pub fn node_conversion(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NodeConversion {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Failure category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Coercion { .. } => ErrorKind::Coercion,
            Self::UnsupportedFunction { .. }
            | Self::FunctionArity { .. }
            | Self::UnsupportedStringOperation { .. }
            | Self::UnsupportedValueType(_)
            | Self::UnsupportedExpression { .. }
            | Self::NodeConversion { .. } => ErrorKind::Unsupported,
            Self::MissingAlias(_) | Self::MissingExpression(_) | Self::InvalidLiteral { .. } => {
                ErrorKind::Precondition
            }
        }
    }
}

/// Result type for translation operations.
pub type Result<T> = std::result::Result<T, TranslateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            TranslateError::unsupported_function("http://example.org/f").to_string(),
            "the function http://example.org/f is not supported by the SQL translation"
        );
        assert_eq!(
            TranslateError::missing_alias("x").to_string(),
            "no alias available for variable ?x"
        );
        assert_eq!(
            TranslateError::invalid_literal("integer", "4.2").to_string(),
            "invalid integer literal '4.2'"
        );
        assert_eq!(
            TranslateError::UnsupportedStringOperation { op: "-" }.to_string(),
            "operation - is not supported on strings"
        );
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            TranslateError::coercion(ValueType::Date, ValueType::Bool).kind(),
            ErrorKind::Coercion
        );
        assert_eq!(
            TranslateError::UnsupportedValueType(ValueType::Any).kind(),
            ErrorKind::Unsupported
        );
        assert_eq!(
            TranslateError::MissingExpression("y".into()).kind(),
            ErrorKind::Precondition
        );
    }
}
