//! Tests for access-path synthesis and its set-once cache.

mod common;

use common::{CHILD_TEST_CLASS, TEST_CLASS, describe, tc_owner, test_method};
use pretty_assertions::assert_eq;
use symdump::{OwnerContext, RULES, rule_for, synthesize};

// === Rule table ===

#[test]
fn constructor_uses_new() {
    let m = test_method("__construct");
    assert_eq!(m.access_path(), None);
    m.set_access_path_from(&tc_owner());
    assert_eq!(m.access_path(), Some("new \\Fixture\\Stub\\TestClass()"));
}

#[test]
fn constructor_ignores_owner_expression() {
    let m = test_method("__construct");
    let owner = OwnerContext::new("$some->deeply['nested']->value", TEST_CLASS);
    assert_eq!(m.set_access_path_from(&owner), Some("new \\Fixture\\Stub\\TestClass()"));
}

#[test]
fn constructor_uses_runtime_class() {
    let m = describe(&format!("{CHILD_TEST_CLASS}::__construct"));
    let owner = OwnerContext::new("$child", CHILD_TEST_CLASS);
    assert_eq!(m.set_access_path_from(&owner), Some("new \\Fixture\\Stub\\ChildTestClass()"));
}

#[test]
fn static_method_uses_declaring_class() {
    let m = test_method("static_method");
    assert_eq!(m.access_path(), None);
    m.set_access_path_from(&tc_owner());
    assert_eq!(m.access_path(), Some("\\Fixture\\Stub\\TestClass::static_method()"));
}

#[test]
fn final_method_uses_owner_expression() {
    let m = test_method("final_method");
    assert_eq!(m.access_path(), None);
    m.set_access_path_from(&tc_owner());
    assert_eq!(m.access_path(), Some("$tc->final_method()"));
}

#[test]
fn static_method_with_parameters() {
    let m = test_method("mix");
    m.set_access_path_from(&tc_owner());
    assert_eq!(
        m.access_path(),
        Some("\\Fixture\\Stub\\TestClass::mix(array &$x, Fixture\\Stub\\TestClass $y = null, $z = array(...), $_ = 'string')")
    );
}

#[test]
fn clone_uses_clone_keyword() {
    let m = test_method("__clone");
    assert_eq!(m.access_path(), None);
    m.set_access_path_from(&tc_owner());
    assert_eq!(m.access_path(), Some("clone $tc"));
}

#[test]
fn invoke_calls_owner() {
    let m = test_method("__invoke");
    assert_eq!(m.access_path(), None);
    m.set_access_path_from(&tc_owner());
    assert_eq!(m.access_path(), Some("$tc($x)"));
}

#[test]
fn to_string_is_case_insensitive() {
    let m = test_method("__tostring");
    assert_eq!(m.access_path(), None);
    m.set_access_path_from(&tc_owner());
    assert_eq!(m.name(), "__ToStRiNg");
    assert_eq!(m.access_path(), Some("(string) $tc"));
}

#[test]
fn unsupported_magic_method_has_no_access_path() {
    let m = test_method("__get");
    assert_eq!(m.access_path(), None);
    assert_eq!(m.set_access_path_from(&tc_owner()), None);
    assert_eq!(m.access_path(), None);
}

#[test]
fn final_magic_method_is_not_called_through_owner() {
    let m = describe(&format!("{CHILD_TEST_CLASS}::__get"));
    assert!(m.is_final());
    let owner = OwnerContext::new("$child", CHILD_TEST_CLASS);
    assert_eq!(rule_for(&m).map(|rule| rule.name), Some("unsupported-magic"));
    assert_eq!(m.set_access_path_from(&owner), None);
    assert_eq!(m.access_path(), None);
}

#[test]
fn static_magic_method_is_not_called_through_class() {
    let m = describe(&format!("{CHILD_TEST_CLASS}::__callStatic"));
    assert!(m.is_static());
    let owner = OwnerContext::new("$child", CHILD_TEST_CLASS);
    assert_eq!(rule_for(&m).map(|rule| rule.name), Some("unsupported-magic"));
    assert_eq!(m.set_access_path_from(&owner), None);
}

#[test]
fn non_final_method_has_no_access_path() {
    let m = test_method("array_hint");
    assert_eq!(m.set_access_path_from(&tc_owner()), None);
    assert_eq!(m.access_path(), None);
}

#[test]
fn abstract_final_method_has_no_access_path() {
    let m = describe(&format!("{CHILD_TEST_CLASS}::abstractish"));
    let owner = OwnerContext::new("$child", CHILD_TEST_CLASS);
    assert_eq!(m.set_access_path_from(&owner), None);
}

#[test]
fn free_function_has_no_access_path() {
    let f = describe("explode");
    assert_eq!(f.set_access_path_from(&tc_owner()), None);
}

#[test]
fn final_method_with_variadic() {
    let m = test_method("variadic_method");
    assert_eq!(
        m.set_access_path_from(&tc_owner()),
        Some("$tc->variadic_method(?string $label = null, int ...$values)")
    );
}

#[test]
fn leading_backslash_is_not_doubled() {
    let m = test_method("__construct");
    let owner = OwnerContext::new("$tc", "\\Fixture\\Stub\\TestClass");
    assert_eq!(m.set_access_path_from(&owner), Some("new \\Fixture\\Stub\\TestClass()"));
}

// === Caching ===

#[test]
fn set_access_path_from_is_idempotent() {
    let m = test_method("final_method");
    let first = m.set_access_path_from(&tc_owner()).map(str::to_owned);
    let second = m.set_access_path_from(&tc_owner()).map(str::to_owned);
    assert_eq!(first.as_deref(), Some("$tc->final_method()"));
    assert_eq!(first, second);
}

#[test]
fn second_owner_does_not_reevaluate() {
    let m = test_method("final_method");
    m.set_access_path_from(&tc_owner());
    let other = OwnerContext::new("$other", TEST_CLASS);
    assert_eq!(m.set_access_path_from(&other), Some("$tc->final_method()"));
    assert_eq!(m.access_path(), Some("$tc->final_method()"));
}

#[test]
fn refused_access_path_stays_refused() {
    let m = test_method("__get");
    m.set_access_path_from(&tc_owner());
    assert_eq!(m.set_access_path("$tc->__get"), None);
    assert_eq!(m.access_path(), None);
}

#[test]
fn explicit_base_path_gets_parameters() {
    let m = test_method("array_hint");
    assert_eq!(m.access_path(), None);
    m.set_access_path("$m->array_hint");
    assert_eq!(m.access_path(), Some("$m->array_hint(array $x)"));
}

#[test]
fn explicit_base_path_is_set_once() {
    let m = test_method("final_method");
    m.set_access_path("$first->final_method");
    m.set_access_path_from(&tc_owner());
    assert_eq!(m.access_path(), Some("$first->final_method()"));
}

// === Rule selection ===

#[test]
fn rules_are_ordered_magic_first() {
    let names: Vec<&str> = RULES.iter().map(|rule| rule.name).collect();
    assert_eq!(
        names,
        ["constructor", "clone", "invoke", "string-cast", "unsupported-magic", "static", "final"]
    );
}

#[test]
fn rule_for_picks_expected_rules() {
    let cases = [
        ("__construct", Some("constructor")),
        ("__clone", Some("clone")),
        ("__invoke", Some("invoke")),
        ("__tostring", Some("string-cast")),
        ("__get", Some("unsupported-magic")),
        ("static_method", Some("static")),
        ("mix", Some("static")),
        ("final_method", Some("final")),
        ("array_hint", None),
        ("ref", None),
    ];
    for (method, expected) in cases {
        let m = test_method(method);
        assert_eq!(rule_for(&m).map(|rule| rule.name), expected, "{method}");
    }
}

#[test]
fn synthesize_does_not_fill_cache() {
    let m = test_method("final_method");
    assert_eq!(synthesize(&m, &tc_owner()).as_deref(), Some("$tc->final_method()"));
    assert_eq!(m.access_path(), None);
}

#[test]
fn rule_applies_matches_rule_for() {
    let m = test_method("__clone");
    let applying: Vec<&str> = RULES
        .iter()
        .filter(|rule| rule.applies(&m))
        .map(|rule| rule.name)
        .collect();
    // the catch-all magic rule matches too but ranks lower
    assert_eq!(applying, ["clone", "unsupported-magic"]);
    let rule = rule_for(&m).unwrap();
    assert_eq!(rule.build(&m, &tc_owner()).as_deref(), Some("clone $tc"));
}
