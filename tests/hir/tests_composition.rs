//! Multi-file composition through the pipeline.

use reflekt::hir::{DeclKind, codes};
use rstest::rstest;

use crate::helpers::model_helpers::{
    diagnostic_codes, member_names, model_from, snapshot, type_named,
};
use crate::helpers::source_fixtures::{
    GHOST_EXTENSION, NETWORK, POINT, POINT_EXTENSION, SHAPES,
};

// ============================================================================
// EXTENSIONS
// ============================================================================

#[test]
fn test_point_with_extension() {
    let model = model_from(&[("Point.swift", POINT), ("Point+Y.swift", POINT_EXTENSION)]);

    assert_eq!(model.types().len(), 1);
    let point = type_named(&model, "Point");
    assert_eq!(point.kind, DeclKind::Struct);
    assert_eq!(member_names(point), vec!["x", "y"]);
    assert!(point.annotations.contains_key("skipEquality"));
    assert_eq!(&*point.extensions[0].file, "Point+Y.swift");
    assert!(model.diagnostics().is_empty());
}

#[test]
fn test_ghost_is_external() {
    let model = model_from(&[("Ghost.swift", GHOST_EXTENSION)]);
    let ghost = type_named(&model, "Ghost");
    assert!(ghost.is_external);
    assert!(ghost.location.is_none());
    assert_eq!(member_names(ghost), vec!["z"]);
}

#[rstest]
#[case::forward(["A.swift", "B.swift", "C.swift"])]
#[case::reversed(["C.swift", "B.swift", "A.swift"])]
#[case::shuffled(["B.swift", "C.swift", "A.swift"])]
fn test_input_order_does_not_matter(#[case] order: [&str; 3]) {
    let text = |path: &str| match path {
        "A.swift" => POINT,
        "B.swift" => POINT_EXTENSION,
        _ => GHOST_EXTENSION,
    };
    let files: Vec<_> = order.iter().map(|path| (*path, text(path))).collect();
    let expected = model_from(&[
        ("A.swift", POINT),
        ("B.swift", POINT_EXTENSION),
        ("C.swift", GHOST_EXTENSION),
    ]);
    assert_eq!(snapshot(&model_from(&files)), snapshot(&expected));
}

#[test]
fn test_extension_conformance_joins_inheritance() {
    let model = model_from(&[("Network.swift", NETWORK)]);
    let endpoint = type_named(&model, "Endpoint");
    assert_eq!(endpoint.kind, DeclKind::Enum);
    assert!(endpoint.is_based_on("CustomStringConvertible"));
    assert!(endpoint.implements.is_empty());
    assert!(endpoint.variable("description").is_some());
    assert_eq!(endpoint.extensions.len(), 1);
}

// ============================================================================
// CONFLICTS
// ============================================================================

#[test]
fn test_member_conflict_across_extensions() {
    let model = model_from(&[
        ("Point.swift", POINT),
        ("A.swift", "extension Point { var label: String { \"a\" } }"),
        ("B.swift", "extension Point { var label: Int { 0 } }"),
    ]);
    let point = type_named(&model, "Point");
    let label = point.variable("label").unwrap();
    assert_eq!(label.type_name.as_ref().unwrap().name, "Int");
    assert_eq!(member_names(point), vec!["x", "label"]);
    assert_eq!(diagnostic_codes(&model), vec![codes::MEMBER_CONFLICT]);
}

#[test]
fn test_duplicate_type_is_an_error() {
    let model = model_from(&[("A.swift", POINT), ("B.swift", POINT)]);
    assert_eq!(model.types().len(), 1);
    assert!(model.has_errors());
    let found = diagnostic_codes(&model);
    assert_eq!(found[0], codes::DUPLICATE_DECLARATION);
    assert_eq!(&*model.diagnostics()[0].file, "B.swift");
}

// ============================================================================
// NESTING AND INHERITANCE
// ============================================================================

#[test]
fn test_nested_types_are_linked() {
    let model = model_from(&[("Network.swift", NETWORK)]);
    let endpoint = type_named(&model, "Endpoint");
    let response = type_named(&model, "Endpoint.Response");
    assert_eq!(response.name, "Response");
    assert_eq!(response.parent, Some(endpoint.id));
    assert_eq!(endpoint.contained, vec![response.id]);
    let top: Vec<_> = model.top_level().map(|t| t.name.as_str()).collect();
    assert_eq!(top, vec!["Endpoint"]);
}

#[test]
fn test_class_and_protocol_hierarchy() {
    let model = model_from(&[("Shapes.swift", SHAPES)]);
    let id = |name: &str| type_named(&model, name).id;

    let circle = type_named(&model, "Circle");
    assert_eq!(circle.superclass, Some(id("Base")));
    assert_eq!(circle.inherits, vec![id("Base"), id("Shape")]);
    assert_eq!(circle.all_inherited, vec![id("Base"), id("Shape"), id("Drawable")]);
    assert_eq!(circle.implements, vec![id("Shape"), id("Drawable")]);

    let drawables: Vec<_> = model
        .subtypes_of(id("Drawable"))
        .map(|t| t.name.as_str())
        .collect();
    assert_eq!(drawables, vec!["Shape", "Circle"]);

    let protocols: Vec<_> = model
        .types_of_kind(DeclKind::Protocol)
        .map(|t| t.name.as_str())
        .collect();
    assert_eq!(protocols, vec!["Drawable", "Shape"]);
}

#[test]
fn test_model_is_deterministic() {
    let files = [
        ("Shapes.swift", SHAPES),
        ("Network.swift", NETWORK),
        ("Point.swift", POINT),
        ("Point+Y.swift", POINT_EXTENSION),
    ];
    let first = snapshot(&model_from(&files));
    let second = snapshot(&model_from(&files));
    assert_eq!(first, second);

    let restored: reflekt::Model = serde_json::from_str(&first).unwrap();
    assert_eq!(restored, model_from(&files));
}
