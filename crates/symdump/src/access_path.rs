//! Access-path synthesis: rebuilding a pasteable PHP expression that invokes a
//! described callable on the value it was found on.
//!
//! The rules are an ordered table. Magic identities are checked first because
//! their call syntax is fixed no matter how the method is declared; only then do
//! the structural rules (static, final) apply. Plain instance methods that are not
//! final get no access path: an override could run a different body than the one
//! that was inspected.

use std::fmt;

use crate::{
    descriptor::{CallableDescriptor, OperatorKind},
    magic::MagicMethod,
};

/// The value a callable was found on, as the dump pipeline rendered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerContext<'a> {
    /// Expression that evaluates to the owner, e.g. `$tc` or `$list[0]->child`.
    pub expr: &'a str,
    /// Fully-qualified runtime class of the owner.
    pub class_name: &'a str,
}

impl<'a> OwnerContext<'a> {
    #[must_use]
    pub fn new(expr: &'a str, class_name: &'a str) -> Self {
        Self { expr, class_name }
    }
}

/// One row of the rule table.
pub struct AccessRule {
    /// Short identifier, used in logs and tests.
    pub name: &'static str,
    applies: fn(&CallableDescriptor, Option<MagicMethod>) -> bool,
    build: fn(&CallableDescriptor, &OwnerContext<'_>) -> Option<String>,
}

impl fmt::Debug for AccessRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessRule").field("name", &self.name).finish_non_exhaustive()
    }
}

impl AccessRule {
    /// Whether this rule handles `descriptor`.
    #[must_use]
    pub fn applies(&self, descriptor: &CallableDescriptor) -> bool {
        (self.applies)(descriptor, MagicMethod::from_name(descriptor.name()))
    }

    /// Builds the access path, `None` for rules that refuse to produce one.
    #[must_use]
    pub fn build(&self, descriptor: &CallableDescriptor, owner: &OwnerContext<'_>) -> Option<String> {
        (self.build)(descriptor, owner)
    }
}

/// Invocation rules in priority order; the first rule that applies wins.
pub static RULES: &[AccessRule] = &[
    AccessRule {
        name: "constructor",
        applies: |_, magic| magic == Some(MagicMethod::Construct),
        build: constructor,
    },
    AccessRule {
        name: "clone",
        applies: |_, magic| magic == Some(MagicMethod::Clone),
        build: |_, owner| Some(format!("clone {}", owner.expr)),
    },
    AccessRule {
        name: "invoke",
        applies: |_, magic| magic == Some(MagicMethod::Invoke),
        build: |descriptor, owner| Some(format!("{}({})", owner.expr, descriptor.params())),
    },
    AccessRule {
        name: "string-cast",
        applies: |_, magic| magic == Some(MagicMethod::ToString),
        build: |_, owner| Some(format!("(string) {}", owner.expr)),
    },
    AccessRule {
        name: "unsupported-magic",
        applies: |_, magic| magic.is_some(),
        build: |_, _| None,
    },
    AccessRule {
        name: "static",
        applies: |descriptor, _| descriptor.operator() == OperatorKind::Static,
        build: static_call,
    },
    AccessRule {
        name: "final",
        applies: |descriptor, _| {
            descriptor.operator() == OperatorKind::Object && descriptor.is_final() && !descriptor.is_abstract()
        },
        build: instance_call,
    },
];

/// The first rule in `RULES` that applies to `descriptor`, if any.
#[must_use]
pub fn rule_for(descriptor: &CallableDescriptor) -> Option<&'static AccessRule> {
    let magic = MagicMethod::from_name(descriptor.name());
    RULES.iter().find(|rule| (rule.applies)(descriptor, magic))
}

/// Runs the rule table for `descriptor` found on `owner`.
///
/// This does not touch the descriptor's cache; use
/// `CallableDescriptor::set_access_path_from` for that.
#[must_use]
pub fn synthesize(descriptor: &CallableDescriptor, owner: &OwnerContext<'_>) -> Option<String> {
    let Some(rule) = rule_for(descriptor) else {
        tracing::debug!(method = %descriptor.name(), "no access path rule applies");
        return None;
    };
    let path = rule.build(descriptor, owner);
    tracing::debug!(method = %descriptor.name(), rule = rule.name, path = ?path, "synthesized access path");
    path
}

fn constructor(descriptor: &CallableDescriptor, owner: &OwnerContext<'_>) -> Option<String> {
    Some(format!(
        "new \\{}({})",
        owner.class_name.trim_start_matches('\\'),
        descriptor.params()
    ))
}

fn static_call(descriptor: &CallableDescriptor, _owner: &OwnerContext<'_>) -> Option<String> {
    let class = descriptor.owner_class()?.trim_start_matches('\\');
    Some(format!(
        "\\{class}{}{}({})",
        OperatorKind::Static.token(),
        descriptor.name(),
        descriptor.params()
    ))
}

fn instance_call(descriptor: &CallableDescriptor, owner: &OwnerContext<'_>) -> Option<String> {
    Some(format!(
        "{}{}{}({})",
        owner.expr,
        OperatorKind::Object.token(),
        descriptor.name(),
        descriptor.params()
    ))
}
