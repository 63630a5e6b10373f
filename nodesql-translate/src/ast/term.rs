//! RDF term values carried by constant expressions.

use nodesql_vocab::{rdf, xsd};
use serde::{Deserialize, Serialize};

/// An RDF term.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Value {
    /// IRI
    Iri(String),
    /// Blank node label
    BNode(String),
    /// Literal
    Literal(Literal),
}

impl Value {
    /// Create an IRI value.
    pub fn iri(iri: impl Into<String>) -> Self {
        Value::Iri(iri.into())
    }

    /// Create a blank node value.
    pub fn bnode(id: impl Into<String>) -> Self {
        Value::BNode(id.into())
    }

    /// Create a plain (untyped) literal.
    pub fn string(lexical: impl Into<String>) -> Self {
        Value::Literal(Literal::plain(lexical))
    }

    /// Create a typed literal.
    pub fn typed(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        Value::Literal(Literal::typed(lexical, datatype))
    }

    /// Create an `xsd:integer` literal.
    pub fn integer(n: i64) -> Self {
        Value::typed(n.to_string(), xsd::INTEGER)
    }

    /// Create an `xsd:double` literal.
    pub fn double(d: f64) -> Self {
        Value::typed(format!("{:?}", d), xsd::DOUBLE)
    }

    /// Create an `xsd:boolean` literal.
    pub fn boolean(b: bool) -> Self {
        Value::typed(b.to_string(), xsd::BOOLEAN)
    }

    /// The string value of the term: IRI, blank node label or lexical form.
    pub fn string_value(&self) -> &str {
        match self {
            Value::Iri(iri) => iri,
            Value::BNode(id) => id,
            Value::Literal(lit) => &lit.lexical,
        }
    }

    /// Datatype IRI if this is a typed literal.
    pub fn datatype(&self) -> Option<&str> {
        match self {
            Value::Literal(lit) => lit.datatype.as_deref(),
            _ => None,
        }
    }

    pub fn is_iri(&self) -> bool {
        matches!(self, Value::Iri(_))
    }

    pub fn is_bnode(&self) -> bool {
        matches!(self, Value::BNode(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Value::Literal(_))
    }
}

/// An RDF literal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    /// Lexical form
    pub lexical: String,
    /// Datatype IRI (absent for plain literals)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    /// Language tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl Literal {
    /// Create a plain literal.
    pub fn plain(lexical: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: None,
            lang: None,
        }
    }

    /// Create a typed literal.
    pub fn typed(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: Some(datatype.into()),
            lang: None,
        }
    }

    /// Create a language-tagged literal.
    pub fn lang_string(lexical: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: Some(rdf::LANG_STRING.to_string()),
            lang: Some(lang.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_value() {
        assert_eq!(Value::iri("http://x.org/a").string_value(), "http://x.org/a");
        assert_eq!(Value::bnode("b0").string_value(), "b0");
        assert_eq!(Value::integer(42).string_value(), "42");
        assert_eq!(Value::double(5.0).string_value(), "5.0");
    }

    #[test]
    fn test_datatype() {
        assert_eq!(Value::boolean(true).datatype(), Some(xsd::BOOLEAN));
        assert_eq!(Value::string("x").datatype(), None);
        assert_eq!(Value::iri("http://x.org/a").datatype(), None);
    }

    #[test]
    fn test_lang_string() {
        let lit = Literal::lang_string("chat", "fr");
        assert_eq!(lit.lang.as_deref(), Some("fr"));
        assert_eq!(lit.datatype.as_deref(), Some(rdf::LANG_STRING));
    }
}
