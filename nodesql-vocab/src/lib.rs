//! Vocabulary constants and node-table layout for nodesql
//!
//! This crate provides a centralized location for the RDF vocabulary IRIs and
//! the relational layout names shared by the translator and its callers.
//!
//! # Organization
//!
//! - `rdf` - RDF vocabulary (http://www.w3.org/1999/02/22-rdf-syntax-ns#)
//! - `xsd` - XSD datatypes plus datatype family helpers
//! - `fn_ns` - XPath functions namespace (http://www.w3.org/2005/xpath-functions#)
//! - `sparql` - SPARQL built-ins that have no XPath counterpart
//! - `nodes` - column names of the normalized nodes table
//! - `ntype` - values of the nodes table term-kind discriminator column

/// RDF vocabulary constants
pub mod rdf {
    /// rdf:langString IRI
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
}

/// XSD vocabulary constants
pub mod xsd {
    /// XSD namespace IRI
    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";

    /// xsd:string IRI
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

    /// xsd:integer IRI
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

    /// xsd:long IRI
    pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";

    /// xsd:int IRI
    pub const INT: &str = "http://www.w3.org/2001/XMLSchema#int";

    /// xsd:short IRI
    pub const SHORT: &str = "http://www.w3.org/2001/XMLSchema#short";

    /// xsd:byte IRI
    pub const BYTE: &str = "http://www.w3.org/2001/XMLSchema#byte";

    /// xsd:unsignedLong IRI
    pub const UNSIGNED_LONG: &str = "http://www.w3.org/2001/XMLSchema#unsignedLong";

    /// xsd:unsignedInt IRI
    pub const UNSIGNED_INT: &str = "http://www.w3.org/2001/XMLSchema#unsignedInt";

    /// xsd:unsignedShort IRI
    pub const UNSIGNED_SHORT: &str = "http://www.w3.org/2001/XMLSchema#unsignedShort";

    /// xsd:unsignedByte IRI
    pub const UNSIGNED_BYTE: &str = "http://www.w3.org/2001/XMLSchema#unsignedByte";

    /// xsd:nonNegativeInteger IRI
    pub const NON_NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonNegativeInteger";

    /// xsd:positiveInteger IRI
    pub const POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#positiveInteger";

    /// xsd:nonPositiveInteger IRI
    pub const NON_POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonPositiveInteger";

    /// xsd:negativeInteger IRI
    pub const NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#negativeInteger";

    /// xsd:decimal IRI
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";

    /// xsd:float IRI
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";

    /// xsd:double IRI
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";

    /// xsd:boolean IRI
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

    /// xsd:dateTime IRI
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";

    /// xsd:date IRI
    pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";

    /// xsd:time IRI
    pub const TIME: &str = "http://www.w3.org/2001/XMLSchema#time";

    // ========================================================================
    // Datatype Family Helpers
    // ========================================================================

    /// Check if a datatype IRI is an integer-family type
    #[inline]
    pub fn is_integer_family(datatype_iri: &str) -> bool {
        matches!(
            datatype_iri,
            INTEGER
                | LONG
                | INT
                | SHORT
                | BYTE
                | UNSIGNED_LONG
                | UNSIGNED_INT
                | UNSIGNED_SHORT
                | UNSIGNED_BYTE
                | NON_NEGATIVE_INTEGER
                | POSITIVE_INTEGER
                | NON_POSITIVE_INTEGER
                | NEGATIVE_INTEGER
        )
    }

    /// Check if a datatype IRI is stored as a floating point value
    ///
    /// xsd:decimal is included: the nodes table keeps decimals in the
    /// double column.
    #[inline]
    pub fn is_float_family(datatype_iri: &str) -> bool {
        matches!(datatype_iri, DOUBLE | FLOAT | DECIMAL)
    }

    /// Check if a datatype IRI is a temporal type
    #[inline]
    pub fn is_temporal(datatype_iri: &str) -> bool {
        matches!(datatype_iri, DATE_TIME | DATE | TIME)
    }

    /// Check if a datatype IRI is a numeric type
    #[inline]
    pub fn is_numeric_datatype(datatype_iri: &str) -> bool {
        is_integer_family(datatype_iri) || is_float_family(datatype_iri)
    }
}

/// XPath functions namespace (`fn:`)
///
/// SPARQL built-ins that share semantics with XPath functions are addressed
/// by these IRIs in the algebra.
pub mod fn_ns {
    /// fn: namespace IRI
    pub const NS: &str = "http://www.w3.org/2005/xpath-functions#";

    pub const CONCAT: &str = "http://www.w3.org/2005/xpath-functions#concat";
    pub const CONTAINS: &str = "http://www.w3.org/2005/xpath-functions#contains";
    pub const STARTS_WITH: &str = "http://www.w3.org/2005/xpath-functions#starts-with";
    pub const ENDS_WITH: &str = "http://www.w3.org/2005/xpath-functions#ends-with";
    pub const STRING_LENGTH: &str = "http://www.w3.org/2005/xpath-functions#string-length";
    pub const UPPER_CASE: &str = "http://www.w3.org/2005/xpath-functions#upper-case";
    pub const LOWER_CASE: &str = "http://www.w3.org/2005/xpath-functions#lower-case";
    pub const SUBSTRING: &str = "http://www.w3.org/2005/xpath-functions#substring";
    pub const SUBSTRING_BEFORE: &str = "http://www.w3.org/2005/xpath-functions#substring-before";
    pub const SUBSTRING_AFTER: &str = "http://www.w3.org/2005/xpath-functions#substring-after";
    pub const REPLACE: &str = "http://www.w3.org/2005/xpath-functions#replace";

    pub const ABS: &str = "http://www.w3.org/2005/xpath-functions#abs";
    pub const ROUND: &str = "http://www.w3.org/2005/xpath-functions#round";
    pub const CEILING: &str = "http://www.w3.org/2005/xpath-functions#ceiling";
    pub const FLOOR: &str = "http://www.w3.org/2005/xpath-functions#floor";

    pub const YEAR_FROM_DATETIME: &str =
        "http://www.w3.org/2005/xpath-functions#year-from-dateTime";
    pub const MONTH_FROM_DATETIME: &str =
        "http://www.w3.org/2005/xpath-functions#month-from-dateTime";
    pub const DAY_FROM_DATETIME: &str = "http://www.w3.org/2005/xpath-functions#day-from-dateTime";
    pub const HOURS_FROM_DATETIME: &str =
        "http://www.w3.org/2005/xpath-functions#hours-from-dateTime";
    pub const MINUTES_FROM_DATETIME: &str =
        "http://www.w3.org/2005/xpath-functions#minutes-from-dateTime";
    pub const SECONDS_FROM_DATETIME: &str =
        "http://www.w3.org/2005/xpath-functions#seconds-from-dateTime";
}

/// SPARQL built-ins without an XPath counterpart
pub mod sparql {
    /// Namespace used to address SPARQL built-ins as function calls
    pub const NS: &str = "http://www.w3.org/ns/sparql#";

    pub const RAND: &str = "http://www.w3.org/ns/sparql#rand";
    pub const NOW: &str = "http://www.w3.org/ns/sparql#now";
    pub const UUID: &str = "http://www.w3.org/ns/sparql#uuid";
    pub const STRUUID: &str = "http://www.w3.org/ns/sparql#struuid";
    pub const MD5: &str = "http://www.w3.org/ns/sparql#md5";
    pub const SHA1: &str = "http://www.w3.org/ns/sparql#sha1";
    pub const SHA256: &str = "http://www.w3.org/ns/sparql#sha256";
    pub const SHA512: &str = "http://www.w3.org/ns/sparql#sha512";
}

/// Column names of the normalized nodes table (one row per RDF term)
pub mod nodes {
    /// Persistent node identifier (primary key)
    pub const ID: &str = "id";

    /// String value (literals, IRIs, blank node labels)
    pub const SVALUE: &str = "svalue";

    /// Integer value
    pub const IVALUE: &str = "ivalue";

    /// Floating point value (double, float, decimal)
    pub const DVALUE: &str = "dvalue";

    /// Boolean value
    pub const BVALUE: &str = "bvalue";

    /// Timestamp value
    pub const TVALUE: &str = "tvalue";

    /// Timezone offset in seconds, paired with `tvalue`
    pub const TZOFFSET: &str = "tzoffset";

    /// Language tag of a language-tagged literal
    pub const LANG: &str = "lang";

    /// Term-kind discriminator, one of the [`super::ntype`] tags
    pub const NTYPE: &str = "ntype";
}

/// Values of the `ntype` discriminator column
pub mod ntype {
    pub const BNODE: &str = "bnode";
    pub const URI: &str = "uri";
    pub const STRING: &str = "string";
    pub const INT: &str = "int";
    pub const DOUBLE: &str = "double";
    pub const DATE: &str = "date";
    pub const BOOLEAN: &str = "boolean";

    /// Tags covered by isLiteral
    pub const LITERALS: &[&str] = &[STRING, INT, DOUBLE, DATE, BOOLEAN];

    /// Tags covered by isNumeric
    pub const NUMERIC: &[&str] = &[INT, DOUBLE];

    /// Tags covered by isResource
    pub const RESOURCES: &[&str] = &[URI, BNODE];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_family() {
        assert!(xsd::is_integer_family(xsd::INTEGER));
        assert!(xsd::is_integer_family(xsd::UNSIGNED_BYTE));
        assert!(!xsd::is_integer_family(xsd::DECIMAL));
        assert!(!xsd::is_integer_family(xsd::STRING));
    }

    #[test]
    fn test_float_family_includes_decimal() {
        assert!(xsd::is_float_family(xsd::DOUBLE));
        assert!(xsd::is_float_family(xsd::FLOAT));
        assert!(xsd::is_float_family(xsd::DECIMAL));
        assert!(!xsd::is_float_family(xsd::INT));
    }

    #[test]
    fn test_temporal() {
        assert!(xsd::is_temporal(xsd::DATE_TIME));
        assert!(xsd::is_temporal(xsd::TIME));
        assert!(!xsd::is_temporal(xsd::STRING));
    }

    #[test]
    fn test_namespaces_prefix_constants() {
        assert!(fn_ns::CONCAT.starts_with(fn_ns::NS));
        assert!(xsd::BOOLEAN.starts_with(xsd::NS));
        assert!(sparql::UUID.starts_with(sparql::NS));
    }

    #[test]
    fn test_literal_tags() {
        assert_eq!(ntype::LITERALS.len(), 5);
        assert!(!ntype::LITERALS.contains(&ntype::URI));
        assert!(ntype::RESOURCES.contains(&ntype::BNODE));
    }
}
