//! Error types for descriptor construction and reflection lookups.
//!
//! Failing to synthesize an access path or a documentation URL is not an error:
//! those operations return `None`. Only handing a non-callable to
//! `CallableDescriptor::new` and failed registry lookups are reported here.

use thiserror::Error;

/// Raised when a `CallableDescriptor` is built from something that is not a
/// reflectable callable (a class, a plain value, ...).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot describe {kind} '{name}' as a callable")]
pub struct InvalidSymbolError {
    /// What was supplied instead of a callable, e.g. `"class"`.
    pub kind: &'static str,
    /// Name of the offending symbol or type of the offending value.
    pub name: String,
}

impl InvalidSymbolError {
    pub(crate) fn new(kind: &'static str, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

/// Lookup failures from the in-memory reflection registry.
///
/// Messages follow PHP's `ReflectionException` wording so they read naturally
/// next to dumped output.
#[derive(Error, Debug)]
pub enum ReflectionError {
    #[error("Class \"{0}\" does not exist")]
    UnknownClass(String),
    #[error("Method {class}::{method}() does not exist")]
    UnknownMethod { class: String, method: String },
    #[error("Function {0}() does not exist")]
    UnknownFunction(String),
    #[error("\"{0}\" is neither a class, a method nor a function")]
    UnknownSymbol(String),
    #[error("invalid reflection snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for registry operations.
pub type ReflectionResult<T> = Result<T, ReflectionError>;
