//! Native function registry.
//!
//! Functions the SQL backend can evaluate natively, keyed by function IRI.
//! Each descriptor declares its return and argument types (used for type
//! coercion and casting), its arity, which dialects support it, and how to
//! render a call from already generated argument SQL.
//!
//! The built-in catalog is split by category:
//! - `cast` - XSD constructor casts
//! - `string` - XPath string functions
//! - `numeric` - XPath numeric functions and RAND
//! - `datetime` - NOW and date/time accessors
//! - `hash` - MD5/SHA digests
//! - `rdf` - UUID/STRUUID

mod cast;
mod datetime;
mod hash;
mod numeric;
mod rdf;
mod string;

use crate::dialect::{Dialect, DialectKind};
use crate::error::{Result, TranslateError};
use crate::types::ValueType;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// A function the SQL backend evaluates natively.
pub trait NativeFunction: Send + Sync {
    /// Function IRI.
    fn uri(&self) -> &str;

    /// Whether `dialect` can evaluate this function.
    fn is_supported(&self, dialect: &dyn Dialect) -> bool;

    /// Render a call from already generated argument SQL.
    fn render(&self, dialect: &dyn Dialect, args: &[String]) -> Result<String>;

    /// Logical type of the call's result.
    fn return_type(&self) -> ValueType;

    /// Logical type the `index`'th argument (starting at 0) is evaluated as.
    fn argument_type(&self, index: usize) -> ValueType;

    /// Minimum number of arguments.
    fn min_args(&self) -> usize;

    /// Maximum number of arguments.
    fn max_args(&self) -> usize;
}

/// Renderer of a built-in function call.
pub type RenderFn = fn(&dyn Dialect, &[String]) -> String;

/// Table-driven [`NativeFunction`] used for the built-in catalog.
#[derive(Clone)]
pub struct BuiltinFunction {
    uri: &'static str,
    return_type: ValueType,
    /// Argument types by position; the last entry repeats for variadic calls
    arg_types: &'static [ValueType],
    min_args: usize,
    max_args: usize,
    dialects: &'static [DialectKind],
    render: RenderFn,
}

/// Every dialect.
pub(crate) const ALL_DIALECTS: &[DialectKind] = &DialectKind::ALL;

impl BuiltinFunction {
    /// Create a descriptor supported by every dialect.
    pub const fn new(
        uri: &'static str,
        return_type: ValueType,
        arg_types: &'static [ValueType],
        min_args: usize,
        max_args: usize,
        render: RenderFn,
    ) -> Self {
        Self {
            uri,
            return_type,
            arg_types,
            min_args,
            max_args,
            dialects: ALL_DIALECTS,
            render,
        }
    }

    /// Restrict support to `dialects`.
    pub const fn only(mut self, dialects: &'static [DialectKind]) -> Self {
        self.dialects = dialects;
        self
    }
}

impl fmt::Debug for BuiltinFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinFunction")
            .field("uri", &self.uri)
            .field("return_type", &self.return_type)
            .field("min_args", &self.min_args)
            .field("max_args", &self.max_args)
            .field("dialects", &self.dialects)
            .finish()
    }
}

impl NativeFunction for BuiltinFunction {
    fn uri(&self) -> &str {
        self.uri
    }

    fn is_supported(&self, dialect: &dyn Dialect) -> bool {
        self.dialects.contains(&dialect.kind())
    }

    fn render(&self, dialect: &dyn Dialect, args: &[String]) -> Result<String> {
        if !self.is_supported(dialect) {
            return Err(TranslateError::unsupported_function(self.uri));
        }
        Ok((self.render)(dialect, args))
    }

    fn return_type(&self) -> ValueType {
        self.return_type
    }

    fn argument_type(&self, index: usize) -> ValueType {
        self.arg_types
            .get(index)
            .or_else(|| self.arg_types.last())
            .copied()
            .unwrap_or(ValueType::Any)
    }

    fn min_args(&self) -> usize {
        self.min_args
    }

    fn max_args(&self) -> usize {
        self.max_args
    }
}

/// Function descriptors keyed by IRI.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, Arc<dyn NativeFunction>>,
}

impl FunctionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in catalog.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        let catalog = cast::functions()
            .into_iter()
            .chain(string::functions())
            .chain(numeric::functions())
            .chain(datetime::functions())
            .chain(hash::functions())
            .chain(rdf::functions());
        for function in catalog {
            registry.register(Arc::new(function));
        }
        registry
    }

    /// The shared built-in registry, built on first access.
    pub fn global() -> &'static FunctionRegistry {
        static GLOBAL: OnceLock<FunctionRegistry> = OnceLock::new();
        GLOBAL.get_or_init(FunctionRegistry::builtin)
    }

    /// Register `function`, replacing any previous descriptor for its IRI.
    pub fn register(&mut self, function: Arc<dyn NativeFunction>) {
        self.functions.insert(function.uri().to_string(), function);
    }

    /// Look up the descriptor for `uri`.
    pub fn lookup(&self, uri: &str) -> Option<&dyn NativeFunction> {
        self.functions.get(uri).map(|f| f.as_ref())
    }

    /// Descriptors supported by `dialect`, sorted by IRI.
    pub fn supported_by(&self, dialect: &dyn Dialect) -> Vec<&dyn NativeFunction> {
        let mut functions: Vec<&dyn NativeFunction> = self
            .functions
            .values()
            .map(|f| f.as_ref())
            .filter(|f| f.is_supported(dialect))
            .collect();
        functions.sort_by(|a, b| a.uri().cmp(b.uri()));
        functions
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut uris: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        uris.sort_unstable();
        f.debug_struct("FunctionRegistry")
            .field("functions", &uris)
            .finish()
    }
}

/// Join rendered arguments with `", "`.
pub(crate) fn join_args(args: &[String]) -> String {
    args.join(", ")
}

/// Position of `needle` in `haystack` (1-based, 0 when absent).
pub(crate) fn locate(dialect: &dyn Dialect, needle: &str, haystack: &str) -> String {
    match dialect.kind() {
        DialectKind::PostgreSql => format!("position({needle} IN {haystack})"),
        DialectKind::MySql | DialectKind::H2 => format!("LOCATE({needle}, {haystack})"),
    }
}
