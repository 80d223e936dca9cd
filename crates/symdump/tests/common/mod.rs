//! Shared fixture loading for the integration tests.

use symdump::{CallableDescriptor, OwnerContext, Registry};

pub const TEST_CLASS: &str = "Fixture\\Stub\\TestClass";
pub const CHILD_TEST_CLASS: &str = "Fixture\\Stub\\ChildTestClass";

/// The stub hierarchy from `fixtures/classes.json`.
pub fn registry() -> Registry {
    Registry::from_json(include_str!("../fixtures/classes.json")).unwrap()
}

/// Describes `path` (`Class::method` or a function name) from the fixture registry.
pub fn describe(path: &str) -> CallableDescriptor {
    let registry = registry();
    let symbol = registry.resolve(path).unwrap();
    CallableDescriptor::new(symbol, &registry).unwrap()
}

/// Describes `TestClass::<method>`.
pub fn test_method(method: &str) -> CallableDescriptor {
    describe(&format!("{TEST_CLASS}::{method}"))
}

/// A `TestClass` instance rendered as `$tc`.
pub fn tc_owner() -> OwnerContext<'static> {
    OwnerContext::new("$tc", TEST_CLASS)
}
