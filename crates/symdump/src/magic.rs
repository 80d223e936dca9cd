//! PHP magic method identities.
//!
//! Magic methods are invoked through language syntax (`new`, `clone`, string casts,
//! property access, ...) rather than by name, which matters both for access-path
//! synthesis and for the manual page slug. Matching is ASCII case-insensitive, so
//! `__ToStRiNg` is `MagicMethod::ToString`.

/// Every method name PHP reserves with special call semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum MagicMethod {
    #[strum(serialize = "__construct")]
    Construct,
    #[strum(serialize = "__destruct")]
    Destruct,
    #[strum(serialize = "__call")]
    Call,
    #[strum(serialize = "__callStatic")]
    CallStatic,
    #[strum(serialize = "__get")]
    Get,
    #[strum(serialize = "__set")]
    Set,
    #[strum(serialize = "__isset")]
    Isset,
    #[strum(serialize = "__unset")]
    Unset,
    #[strum(serialize = "__sleep")]
    Sleep,
    #[strum(serialize = "__wakeup")]
    Wakeup,
    #[strum(serialize = "__serialize")]
    Serialize,
    #[strum(serialize = "__unserialize")]
    Unserialize,
    #[strum(serialize = "__toString")]
    ToString,
    #[strum(serialize = "__invoke")]
    Invoke,
    #[strum(serialize = "__set_state")]
    SetState,
    #[strum(serialize = "__clone")]
    Clone,
    #[strum(serialize = "__debugInfo")]
    DebugInfo,
}

impl MagicMethod {
    /// Identifies a method name, ignoring ASCII case. `None` for ordinary methods.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    /// Member part of the manual URL, e.g. `construct` in `reflectionmethod.construct`.
    #[must_use]
    pub fn doc_slug(self) -> &'static str {
        match self {
            Self::Construct => "construct",
            Self::Destruct => "destruct",
            Self::Call => "call",
            Self::CallStatic => "callstatic",
            Self::Get => "get",
            Self::Set => "set",
            Self::Isset => "isset",
            Self::Unset => "unset",
            Self::Sleep => "sleep",
            Self::Wakeup => "wakeup",
            Self::Serialize => "serialize",
            Self::Unserialize => "unserialize",
            Self::ToString => "tostring",
            Self::Invoke => "invoke",
            Self::SetState => "set-state",
            Self::Clone => "clone",
            Self::DebugInfo => "debuginfo",
        }
    }
}
