//! Canonical modifier strings, e.g. `final protected static`.

use std::fmt;

use smallvec::SmallVec;

use crate::descriptor::Access;

/// The modifier flags of a callable, rendered in PHP's canonical order:
/// `[abstract|final] [public|protected|private] [static]`.
///
/// `abstract` and `final` are mutually exclusive in valid PHP. Should both be set
/// anyway, only `abstract` is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub access: Access,
    pub is_abstract: bool,
    pub is_final: bool,
    pub is_static: bool,
}

impl Modifiers {
    /// The individual keywords, in order.
    #[must_use]
    pub fn keywords(self) -> SmallVec<[&'static str; 3]> {
        let mut out = SmallVec::new();
        if self.is_abstract {
            out.push("abstract");
        } else if self.is_final {
            out.push("final");
        }
        if let Some(access) = self.access.keyword() {
            out.push(access);
        }
        if self.is_static {
            out.push("static");
        }
        out
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.keywords().join(" "))
    }
}
