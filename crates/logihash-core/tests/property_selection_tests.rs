//! Property Selection Tests
//!
//! This test suite verifies how a type's hashed properties are resolved.
//!
//! ## Scenarios Covered
//!
//! 1. Include, exclude, and include-then-exclude composition
//! 2. Declaration order and inherited properties fix salt positions
//! 3. Conflicting declaration sites are rejected
//! 4. Selection sites parsed from JSON and TOML
//! 5. The selection rule holds for arbitrary lists (proptest)

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashSet;
use std::sync::Arc;

use logihash_core::selection::select_properties;
use logihash_core::{
    ExError, ExErrorKind, HashEngine, LogiHashError, LogicalType, Selection, SelectionConfig,
    TypeDecl,
};
use proptest::prelude::*;

fn names(props: &[String]) -> Vec<&str> {
    props.iter().map(String::as_str).collect()
}

#[test]
fn test_default_selection_takes_every_declared_property() {
    let ty = LogicalType::builder(TypeDecl::new("Point", ["x", "y", "z"]))
        .build()
        .unwrap();
    assert_eq!(names(ty.properties()), vec!["x", "y", "z"]);
}

#[test]
fn test_include_list_keeps_declaration_order() {
    // Include order does not reorder salts; declaration order does
    let ty = LogicalType::builder(TypeDecl::new("Point", ["x", "y", "z"]))
        .includes(["z", "x"])
        .build()
        .unwrap();
    assert_eq!(names(ty.properties()), vec!["x", "z"]);
}

#[test]
fn test_exclude_list_removes_properties() {
    let ty = LogicalType::builder(TypeDecl::new("Account", ["id", "owner", "balance"]))
        .excludes(["id"])
        .build()
        .unwrap();
    assert_eq!(names(ty.properties()), vec!["owner", "balance"]);
    assert_eq!(ty.position_of("owner"), Some(0));
}

#[test]
fn test_include_then_exclude_across_sites() {
    // GIVEN an include-only site and a separate exclude-only site
    let ty = LogicalType::builder(TypeDecl::new("Account", ["id", "owner", "balance"]))
        .includes(["id", "owner"])
        .excludes(["id"])
        .build()
        .unwrap();

    // THEN only properties both included and not excluded remain
    assert_eq!(names(ty.properties()), vec!["owner"]);
    assert_eq!(ty.includes(), &["id".to_string(), "owner".to_string()]);
    assert_eq!(ty.excludes(), &["id".to_string()]);
}

#[test]
fn test_earlier_site_wins_for_each_list() {
    let ty = LogicalType::builder(TypeDecl::new("Account", ["id", "owner", "balance"]))
        .includes(["owner"])
        .includes(["balance"])
        .build()
        .unwrap();
    assert_eq!(names(ty.properties()), vec!["owner"]);
}

#[test]
fn test_unknown_names_in_lists_are_ignored() {
    let ty = LogicalType::builder(TypeDecl::new("Point", ["x", "y"]))
        .excludes(["w"])
        .build()
        .unwrap();
    assert_eq!(names(ty.properties()), vec!["x", "y"]);

    let ty = LogicalType::builder(TypeDecl::new("Point", ["x", "y"]))
        .includes(["w"])
        .build()
        .unwrap();
    assert!(ty.properties().is_empty());
}

#[test]
fn test_conflicting_site_is_rejected() {
    // GIVEN one site carrying both lists
    let site = SelectionConfig {
        includes: vec!["x".to_string()],
        excludes: vec!["y".to_string()],
    };
    let engine = HashEngine::new().unwrap();

    // WHEN the type is registered
    let err = engine
        .register(LogicalType::builder(TypeDecl::new("Point", ["x", "y"])).declare(site))
        .unwrap_err();

    // THEN registration fails with a typed, coded error
    assert!(matches!(
        &err,
        LogiHashError::ConflictingSelection { type_name, .. } if type_name == "Point"
    ));
    let ex: ExError = err.into();
    assert_eq!(ex.kind(), ExErrorKind::ConflictingSelection);
    assert_eq!(ex.code(), "ERR_CONFLICTING_SELECTION");
    assert_eq!(ex.type_name(), Some("Point"));
}

#[test]
fn test_blank_type_name_is_rejected() {
    let err = LogicalType::builder(TypeDecl::new("   ", ["x"]))
        .build()
        .unwrap_err();
    assert!(matches!(err, LogiHashError::InvalidTypeName { .. }));
}

#[test]
fn test_inherited_properties_follow_own_properties() {
    // GIVEN Employee extends Person
    let person = Arc::new(TypeDecl::new("Person", ["name", "email"]));
    let employee = TypeDecl::new("Employee", ["employer", "name"]).extends(person);

    // THEN own properties come first and redeclared names keep their first slot
    let ty = LogicalType::builder(employee).build().unwrap();
    assert_eq!(names(ty.properties()), vec!["employer", "name", "email"]);
}

#[test]
fn test_selection_applies_to_inherited_properties() {
    let base = Arc::new(TypeDecl::new("Entity", ["id", "created_at"]));
    let person = Arc::new(TypeDecl::new("Person", ["name"]).extends(base));
    let employee = TypeDecl::new("Employee", ["employer"]).extends(person);

    let ty = LogicalType::builder(employee)
        .excludes(["id", "created_at"])
        .build()
        .unwrap();
    assert_eq!(names(ty.properties()), vec!["employer", "name"]);
}

#[test]
fn test_engine_reports_selected_properties() {
    let engine = HashEngine::new().unwrap();
    let ty = engine
        .register(LogicalType::builder(TypeDecl::new("Point", ["x", "y"])).excludes(["x"]))
        .unwrap();
    assert_eq!(engine.selected_properties(&ty), &["y".to_string()]);
}

#[test]
fn test_sites_parse_from_json_and_toml() {
    let from_json = SelectionConfig::from_json_str(r#"{"excludes": ["id"]}"#).unwrap();
    let from_toml = SelectionConfig::from_toml_str(r#"excludes = ["id"]"#).unwrap();
    assert_eq!(from_json, from_toml);
    assert_eq!(from_json, SelectionConfig::excluding(["id"]));

    let err = SelectionConfig::from_json_str(r#"{"include": ["id"]}"#).unwrap_err();
    assert!(matches!(err, LogiHashError::Serialization { .. }));
}

#[test]
fn test_parsed_conflicting_site_fails_at_build() {
    let site =
        SelectionConfig::from_toml_str("includes = [\"a\"]\nexcludes = [\"b\"]").unwrap();
    let err = LogicalType::builder(TypeDecl::new("T", ["a", "b"]))
        .declare(site)
        .build()
        .unwrap_err();
    assert!(matches!(err, LogiHashError::ConflictingSelection { .. }));
}

fn property_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "d", "e", "f", "g", "h"]).prop_map(String::from)
}

fn name_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(property_name(), 0..6)
}

proptest! {
    /// Selected iff (includes empty or included) and not excluded
    #[test]
    fn selection_rule_holds(declared in name_list(), includes in name_list(), excludes in name_list()) {
        let sites = [
            SelectionConfig { includes: includes.clone(), excludes: Vec::new() },
            SelectionConfig { includes: Vec::new(), excludes: excludes.clone() },
        ];
        let selection = Selection::merge("T", &sites).unwrap();
        let selected = select_properties(&TypeDecl::new("T", declared.clone()), &selection);

        let mut seen = HashSet::new();
        let expected: Vec<String> = declared
            .into_iter()
            .filter(|p| seen.insert(p.clone()))
            .filter(|p| (includes.is_empty() || includes.contains(p)) && !excludes.contains(p))
            .collect();
        prop_assert_eq!(selected, expected);
    }

    /// Any single site declaring both lists is a conflict
    #[test]
    fn both_lists_on_one_site_conflict(
        includes in prop::collection::vec(property_name(), 1..4),
        excludes in prop::collection::vec(property_name(), 1..4),
    ) {
        let site = SelectionConfig { includes, excludes };
        let result = Selection::merge("T", &[site]);
        prop_assert!(
            matches!(result, Err(LogiHashError::ConflictingSelection { .. })),
            "expected a conflicting selection error"
        );
    }
}
