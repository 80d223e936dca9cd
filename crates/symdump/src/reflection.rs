//! The reflection collaborator: an in-memory model of reflected PHP symbols.
//!
//! Descriptors never talk to a live runtime. Whatever performs the actual
//! introspection produces a `Snapshot` (classes with their declared methods, plus
//! free functions), which is loaded into a `Registry`. The registry answers the
//! questions descriptor construction needs: where a method is declared, and which
//! ancestor declaration a method overrides (its "prototype").
//!
//! Class, method and function names are matched case-insensitively and a leading
//! `\` is ignored, as PHP does.

use ahash::{AHashMap, AHashSet};
use indexmap::IndexMap;

use crate::error::{ReflectionError, ReflectionResult};

/// Declared visibility of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

/// A parameter's default value as reported by reflection.
///
/// Arrays only carry their length since the renderer never prints their contents.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DefaultValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(usize),
    /// A named constant such as `PHP_INT_MAX` or `self::LIMIT`.
    Constant(String),
}

/// Where a user-defined callable lives. Built-in callables have none.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub start_line: u32,
    pub end_line: u32,
}

/// One reflected parameter.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParamInfo {
    /// Name without the leading `$`.
    pub name: String,
    /// Type hint as written, e.g. `array`, `?int`, `Foo\Bar`. Some built-ins report none.
    #[serde(default)]
    pub type_hint: Option<String>,
    #[serde(default)]
    pub by_ref: bool,
    #[serde(default)]
    pub default: Option<DefaultValue>,
    #[serde(default)]
    pub variadic: bool,
}

/// Metadata shared by free functions and methods.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CallableInfo {
    pub name: String,
    #[serde(default)]
    pub location: Option<SourceLocation>,
    /// Raw doc-comment text including the `/** */` delimiters.
    #[serde(default)]
    pub doc_comment: Option<String>,
    #[serde(default)]
    pub params: Vec<ParamInfo>,
    #[serde(default)]
    pub return_type: Option<String>,
    #[serde(default)]
    pub returns_reference: bool,
}

/// A method as declared on one class.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MethodInfo {
    #[serde(flatten)]
    pub callable: CallableInfo,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default)]
    pub is_abstract: bool,
}

/// A reflected class, interface or trait with the methods it declares itself.
///
/// Inherited methods are not repeated here; the registry finds them by walking
/// `parent` and `interfaces`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClassInfo {
    /// Fully-qualified name without a leading `\`.
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub methods: Vec<MethodInfo>,
}

/// Serializable dump of everything a `Registry` knows about.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub classes: Vec<ClassInfo>,
    #[serde(default)]
    pub functions: Vec<CallableInfo>,
}

/// A method together with the class that declares it.
#[derive(Debug, Clone, Copy)]
pub struct MethodRef<'r> {
    /// The declaring class, which may be an ancestor of the class the method was looked up on.
    pub class: &'r ClassInfo,
    pub method: &'r MethodInfo,
}

impl MethodRef<'_> {
    /// Declared method name, case preserved.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.method.callable.name
    }
}

/// A reflected handle passed to `CallableDescriptor::new`.
///
/// Only `Function` and `Method` describe callables; the other variants exist so
/// callers can hand over whatever they resolved and get a proper error back.
#[derive(Debug, Clone, Copy)]
pub enum Symbol<'r> {
    Function(&'r CallableInfo),
    Method(MethodRef<'r>),
    Class(&'r ClassInfo),
    /// Any other runtime value, identified by its type name (e.g. `stdClass`).
    Value(&'r str),
}

/// Ancestor lookups the descriptor needs from the reflection layer.
pub trait Reflector {
    /// Returns the nearest declaration of the same method in an ancestor of the
    /// method's declaring class, i.e. the declaration `method` overrides or implements.
    ///
    /// Parents are searched before interfaces, closest first.
    fn prototype<'r>(&'r self, method: MethodRef<'_>) -> Option<MethodRef<'r>>;
}

#[derive(Debug)]
struct ClassEntry {
    info: ClassInfo,
    /// lower-cased method name -> index into `info.methods`, in declaration order
    methods: IndexMap<String, usize>,
}

impl ClassEntry {
    fn new(info: ClassInfo) -> Self {
        let methods = info
            .methods
            .iter()
            .enumerate()
            .map(|(index, method)| (method.callable.name.to_ascii_lowercase(), index))
            .collect();
        Self { info, methods }
    }

    fn declared(&self, lower_name: &str) -> Option<MethodRef<'_>> {
        let index = *self.methods.get(lower_name)?;
        Some(MethodRef {
            class: &self.info,
            method: &self.info.methods[index],
        })
    }
}

/// In-memory symbol table implementing `Reflector`.
#[derive(Debug, Default)]
pub struct Registry {
    classes: AHashMap<String, ClassEntry>,
    functions: AHashMap<String, CallableInfo>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from a snapshot. Later entries replace earlier ones with the same name.
    #[must_use]
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut registry = Self::new();
        for class in snapshot.classes {
            registry.insert_class(class);
        }
        for function in snapshot.functions {
            registry.insert_function(function);
        }
        registry
    }

    /// Parses a JSON-encoded `Snapshot`.
    pub fn from_json(json: &str) -> ReflectionResult<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn insert_class(&mut self, class: ClassInfo) {
        self.classes.insert(normalize(&class.name), ClassEntry::new(class));
    }

    pub fn insert_function(&mut self, function: CallableInfo) {
        self.functions.insert(normalize(&function.name), function);
    }

    pub fn class(&self, name: &str) -> ReflectionResult<&ClassInfo> {
        self.entry(name)
            .map(|entry| &entry.info)
            .ok_or_else(|| ReflectionError::UnknownClass(name.to_owned()))
    }

    pub fn function(&self, name: &str) -> ReflectionResult<&CallableInfo> {
        self.functions
            .get(&normalize(name))
            .ok_or_else(|| ReflectionError::UnknownFunction(name.to_owned()))
    }

    /// Looks a method up on `class`, falling back to its ancestors.
    ///
    /// The returned `MethodRef::class` is the class that actually declares the method.
    pub fn method(&self, class: &str, name: &str) -> ReflectionResult<MethodRef<'_>> {
        let entry = self
            .entry(class)
            .ok_or_else(|| ReflectionError::UnknownClass(class.to_owned()))?;
        let lower = name.to_ascii_lowercase();
        entry
            .declared(&lower)
            .or_else(|| {
                self.ancestor_entries(entry)
                    .into_iter()
                    .find_map(|ancestor| ancestor.declared(&lower))
            })
            .ok_or_else(|| ReflectionError::UnknownMethod {
                class: entry.info.name.clone(),
                method: name.to_owned(),
            })
    }

    /// Resolves `Class::method`, a function name or a class name, in that order of precedence.
    pub fn resolve(&self, path: &str) -> ReflectionResult<Symbol<'_>> {
        if let Some((class, method)) = path.split_once("::") {
            return self.method(class, method).map(Symbol::Method);
        }
        if let Ok(function) = self.function(path) {
            return Ok(Symbol::Function(function));
        }
        if let Ok(class) = self.class(path) {
            return Ok(Symbol::Class(class));
        }
        Err(ReflectionError::UnknownSymbol(path.to_owned()))
    }

    /// All known ancestors of `class`: parents first (closest first), then interfaces,
    /// breadth-first. The class itself is not included.
    pub fn ancestors(&self, class: &str) -> ReflectionResult<Vec<&ClassInfo>> {
        let entry = self
            .entry(class)
            .ok_or_else(|| ReflectionError::UnknownClass(class.to_owned()))?;
        Ok(self
            .ancestor_entries(entry)
            .into_iter()
            .map(|entry| &entry.info)
            .collect())
    }

    fn entry(&self, name: &str) -> Option<&ClassEntry> {
        self.classes.get(&normalize(name))
    }

    fn ancestor_entries<'r>(&'r self, start: &'r ClassEntry) -> Vec<&'r ClassEntry> {
        let mut seen = AHashSet::new();
        seen.insert(normalize(&start.info.name));
        let mut out = Vec::new();

        // parent chain, closest first
        let mut current = start;
        while let Some(parent) = current.info.parent.as_deref() {
            if !seen.insert(normalize(parent)) {
                break;
            }
            let Some(entry) = self.entry(parent) else {
                tracing::trace!(class = %current.info.name, missing = %parent, "parent not in registry");
                break;
            };
            out.push(entry);
            current = entry;
        }

        // interfaces of the class and each parent, then the interfaces those extend
        let mut pending: Vec<&ClassEntry> = std::iter::once(start).chain(out.iter().copied()).collect();
        let mut cursor = 0;
        while let Some(entry) = pending.get(cursor).copied() {
            cursor += 1;
            for name in &entry.info.interfaces {
                if !seen.insert(normalize(name)) {
                    continue;
                }
                match self.entry(name) {
                    Some(interface) => {
                        out.push(interface);
                        pending.push(interface);
                    }
                    None => tracing::trace!(class = %entry.info.name, interface = %name, "interface not in registry"),
                }
            }
        }
        out
    }
}

impl Reflector for Registry {
    fn prototype<'r>(&'r self, method: MethodRef<'_>) -> Option<MethodRef<'r>> {
        let entry = self.entry(&method.class.name)?;
        let lower = method.name().to_ascii_lowercase();
        let found = self
            .ancestor_entries(entry)
            .into_iter()
            .find_map(|ancestor| ancestor.declared(&lower));
        if let Some(proto) = found {
            tracing::trace!(
                method = %method.name(),
                class = %method.class.name,
                prototype = %proto.class.name,
                "found prototype"
            );
        }
        found
    }
}

/// Registry key for a class or function name.
fn normalize(name: &str) -> String {
    name.trim_start_matches('\\').to_ascii_lowercase()
}
