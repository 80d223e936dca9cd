//! Structured descriptors of reflected callables.
//!
//! A `CallableDescriptor` is built once from a reflected `Symbol` and is immutable
//! afterwards, with one exception: its access path. That depends on the value the
//! callable was found on, which the dump pipeline only knows later, so it lives in
//! a set-once cell filled by `set_access_path_from`.

use std::cell::OnceCell;

use ahash::AHashSet;

use crate::{
    access_path::{OwnerContext, synthesize},
    doc_url::DocUrlResolver,
    docstring,
    error::InvalidSymbolError,
    modifiers::Modifiers,
    param::{ParamSpec, render_params},
    reflection::{CallableInfo, MethodRef, Reflector, SourceLocation, Symbol, Visibility},
};

/// How a callable is reached from its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display, serde::Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OperatorKind {
    /// A free function, not reached through anything.
    #[default]
    None,
    /// Called through the type: `Foo::bar()`.
    Static,
    /// Called through an instance: `$foo->bar()`.
    Object,
}

impl OperatorKind {
    /// The PHP member-access token for this kind.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Static => "::",
            Self::Object => "->",
        }
    }
}

/// Visibility of a described callable. `None` is reserved for free functions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display, strum::IntoStaticStr, serde::Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Access {
    #[default]
    None,
    Public,
    Protected,
    Private,
}

impl Access {
    /// The modifier keyword, or `None` for `Access::None`.
    #[must_use]
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            access => Some(access.into()),
        }
    }
}

impl From<Visibility> for Access {
    fn from(visibility: Visibility) -> Self {
        match visibility {
            Visibility::Public => Self::Public,
            Visibility::Protected => Self::Protected,
            Visibility::Private => Self::Private,
        }
    }
}

/// Everything the dump pipeline shows about a method, constructor or function.
///
/// Invariants upheld by construction:
/// - built-in callables (`is_internal()`) have no file or line information
/// - `operator() == OperatorKind::None` exactly when `owner_class()` and `access()` are unset
/// - `is_static()` implies `operator() == OperatorKind::Static`
#[derive(Debug, Clone)]
pub struct CallableDescriptor {
    name: String,
    location: Option<SourceLocation>,
    docstring: Option<String>,
    operator: OperatorKind,
    access: Access,
    owner_class: Option<String>,
    is_static: bool,
    is_final: bool,
    is_abstract: bool,
    parameters: Vec<ParamSpec>,
    return_type: Option<String>,
    returns_reference: bool,
    /// Unset until an owner is supplied; `Some(None)` when no invocation rule applied.
    access_path: OnceCell<Option<String>>,
}

impl CallableDescriptor {
    /// Builds a descriptor from a reflected symbol.
    ///
    /// For methods without a doc-comment of their own, the comment is inherited from
    /// the nearest ancestor declaration `reflector` reports.
    ///
    /// # Errors
    /// Returns `InvalidSymbolError` if `symbol` is a class or some other non-callable value.
    pub fn new(symbol: Symbol<'_>, reflector: &(impl Reflector + ?Sized)) -> Result<Self, InvalidSymbolError> {
        match symbol {
            Symbol::Function(function) => Ok(Self::from_callable(function)),
            Symbol::Method(method) => Ok(Self::from_method(method, reflector)),
            Symbol::Class(class) => Err(InvalidSymbolError::new("class", &class.name)),
            Symbol::Value(type_name) => Err(InvalidSymbolError::new("value of type", type_name)),
        }
    }

    fn from_callable(info: &CallableInfo) -> Self {
        Self {
            name: info.name.clone(),
            location: info.location.clone(),
            docstring: own_docstring(info),
            operator: OperatorKind::None,
            access: Access::None,
            owner_class: None,
            is_static: false,
            is_final: false,
            is_abstract: false,
            parameters: info.params.iter().map(ParamSpec::from).collect(),
            return_type: info.return_type.clone(),
            returns_reference: info.returns_reference,
            access_path: OnceCell::new(),
        }
    }

    fn from_method(method: MethodRef<'_>, reflector: &(impl Reflector + ?Sized)) -> Self {
        let info = method.method;
        let mut descriptor = Self::from_callable(&info.callable);
        descriptor.operator = if info.is_static {
            OperatorKind::Static
        } else {
            OperatorKind::Object
        };
        descriptor.access = info.visibility.into();
        descriptor.owner_class = Some(method.class.name.clone());
        descriptor.is_static = info.is_static;
        descriptor.is_final = info.is_final;
        descriptor.is_abstract = info.is_abstract;
        if descriptor.docstring.is_none() {
            descriptor.docstring = inherited_docstring(method, reflector);
        }
        descriptor
    }

    /// Declared name, case preserved.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.location.as_ref().map(|location| location.file.as_str())
    }

    #[must_use]
    pub fn start_line(&self) -> Option<u32> {
        self.location.as_ref().map(|location| location.start_line)
    }

    #[must_use]
    pub fn end_line(&self) -> Option<u32> {
        self.location.as_ref().map(|location| location.end_line)
    }

    /// True for built-in callables, i.e. those reflection reports no source file for.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.location.is_none()
    }

    /// Raw doc-comment, possibly inherited from an ancestor declaration.
    #[must_use]
    pub fn docstring(&self) -> Option<&str> {
        self.docstring.as_deref()
    }

    #[must_use]
    pub fn operator(&self) -> OperatorKind {
        self.operator
    }

    #[must_use]
    pub fn access(&self) -> Access {
        self.access
    }

    /// The declaring class. For inherited methods this is the ancestor, not the class
    /// the method was looked up on.
    #[must_use]
    pub fn owner_class(&self) -> Option<&str> {
        self.owner_class.as_deref()
    }

    #[must_use]
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    #[must_use]
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    #[must_use]
    pub fn parameters(&self) -> &[ParamSpec] {
        &self.parameters
    }

    #[must_use]
    pub fn return_type(&self) -> Option<&str> {
        self.return_type.as_deref()
    }

    #[must_use]
    pub fn returns_reference(&self) -> bool {
        self.returns_reference
    }

    #[must_use]
    pub fn modifiers(&self) -> Modifiers {
        Modifiers {
            access: self.access,
            is_abstract: self.is_abstract,
            is_final: self.is_final,
            is_static: self.is_static,
        }
    }

    /// The parameter list as it appears between the parentheses of a call or signature.
    #[must_use]
    pub fn params(&self) -> String {
        render_params(&self.parameters)
    }

    /// Declaration-style signature, e.g. `final public static function &mix(array &$x): array`.
    #[must_use]
    pub fn signature(&self) -> String {
        let mut out = self.modifiers().to_string();
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str("function ");
        if self.returns_reference {
            out.push('&');
        }
        out.push_str(&self.name);
        out.push('(');
        out.push_str(&self.params());
        out.push(')');
        if let Some(return_type) = &self.return_type {
            out.push_str(": ");
            out.push_str(return_type);
        }
        out
    }

    /// First paragraph of the doc-comment, on one line.
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        self.docstring.as_deref().and_then(docstring::summary)
    }

    /// The synthesized access path, or `None` if no owner was supplied yet or no
    /// invocation rule applies to this callable.
    #[must_use]
    pub fn access_path(&self) -> Option<&str> {
        self.access_path.get().and_then(Option::as_deref)
    }

    /// Synthesizes the access path for this callable as found on `owner`.
    ///
    /// Only the first call does any work; later calls return the cached result,
    /// whatever owner they pass.
    pub fn set_access_path_from(&self, owner: &OwnerContext<'_>) -> Option<&str> {
        self.access_path.get_or_init(|| synthesize(self, owner)).as_deref()
    }

    /// Sets the access path from an explicit base expression, e.g. `$m->array_hint`.
    /// The parameter list is appended.
    ///
    /// Like `set_access_path_from`, this has no effect once an access path was set.
    pub fn set_access_path(&self, base: &str) -> Option<&str> {
        self.access_path
            .get_or_init(|| Some(format!("{base}({})", self.params())))
            .as_deref()
    }

    /// Manual page for built-in callables, on the default documentation host.
    #[must_use]
    pub fn php_doc_url(&self) -> Option<String> {
        DocUrlResolver::default().resolve(self)
    }
}

/// The callable's own doc-comment, ignoring blank ones.
fn own_docstring(info: &CallableInfo) -> Option<String> {
    info.doc_comment.as_ref().filter(|doc| !doc.trim().is_empty()).cloned()
}

/// Walks the prototype chain until a declaration with a doc-comment turns up.
fn inherited_docstring(method: MethodRef<'_>, reflector: &(impl Reflector + ?Sized)) -> Option<String> {
    let mut seen = AHashSet::new();
    seen.insert(method.class.name.to_ascii_lowercase());

    let mut current = reflector.prototype(method)?;
    loop {
        if !seen.insert(current.class.name.to_ascii_lowercase()) {
            return None;
        }
        if let Some(doc) = own_docstring(&current.method.callable) {
            tracing::trace!(
                method = %method.name(),
                class = %method.class.name,
                from = %current.class.name,
                "inherited docstring"
            );
            return Some(doc);
        }
        current = reflector.prototype(current)?;
    }
}
