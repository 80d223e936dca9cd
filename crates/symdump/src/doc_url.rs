//! Manual page URLs for built-in callables.
//!
//! Pages are named `<class>.<member>` for methods and `function.<name>` for free
//! functions, all lower-case with underscores turned into dashes. Magic methods
//! drop their `__` prefix (`reflectionmethod.construct`). Since a descriptor's
//! owner class is the declaring class, inherited built-in methods link to the
//! ancestor's page, which is where the manual documents them.

use crate::{config::DocConfig, descriptor::CallableDescriptor, magic::MagicMethod};

/// Builds documentation URLs from descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocUrlResolver {
    config: DocConfig,
}

impl DocUrlResolver {
    #[must_use]
    pub fn new(config: DocConfig) -> Self {
        Self { config }
    }

    /// The manual page for `descriptor`.
    ///
    /// `None` for user-defined callables and for `__`-prefixed names that are not
    /// known magic methods.
    #[must_use]
    pub fn resolve(&self, descriptor: &CallableDescriptor) -> Option<String> {
        if !descriptor.is_internal() {
            return None;
        }
        let page = match descriptor.owner_class() {
            Some(class) => class.trim_start_matches('\\').to_ascii_lowercase(),
            None => "function".to_owned(),
        };
        let member = member_slug(descriptor.name())?;
        Some(format!("{}/{page}.{member}", self.config.base()))
    }
}

/// Member part of a manual page name.
fn member_slug(name: &str) -> Option<String> {
    if let Some(magic) = MagicMethod::from_name(name) {
        return Some(magic.doc_slug().to_owned());
    }
    if name.starts_with("__") {
        tracing::trace!(method = %name, "no manual page naming rule for reserved name");
        return None;
    }
    Some(name.to_ascii_lowercase().replace('_', "-"))
}
