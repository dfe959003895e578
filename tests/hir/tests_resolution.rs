//! Type-name resolution in the composed model.

use reflekt::hir::TypeNameKind;

use crate::helpers::model_helpers::{model_from, type_named};
use crate::helpers::source_fixtures::{NETWORK, SHAPES};

#[test]
fn test_parameter_types_resolve() {
    let model = model_from(&[("Shapes.swift", SHAPES)]);
    let context = type_named(&model, "Context").id;
    let draw = type_named(&model, "Circle").method("draw(in:)").unwrap();
    let param = draw.parameters[0].type_name.as_ref().unwrap();
    assert_eq!(param.resolved, Some(context));
    assert_eq!(model.resolve(param).map(|t| t.name.as_str()), Some("Context"));
}

#[test]
fn test_qualified_return_type_of_global_function() {
    let model = model_from(&[("Network.swift", NETWORK)]);
    let response = type_named(&model, "Endpoint.Response").id;
    let request = &model.functions()[0];
    assert_eq!(request.return_type.as_ref().unwrap().resolved, Some(response));
    let endpoint = request.parameters[0].type_name.as_ref().unwrap();
    assert_eq!(endpoint.resolved, Some(type_named(&model, "Endpoint").id));
}

#[test]
fn test_sibling_nested_name_resolves_from_inside() {
    let source = "enum API {\n  struct Request { var response: Response }\n  struct Response {}\n}";
    let model = model_from(&[("API.swift", source)]);
    let response = type_named(&model, "API.Response").id;
    let request = type_named(&model, "API.Request");
    let field = request.variable("response").unwrap().type_name.as_ref().unwrap();
    assert_eq!(field.resolved, Some(response));
}

#[test]
fn test_extension_members_resolve_in_extended_scope() {
    let model = model_from(&[
        ("A.swift", "struct Feed {\n  struct Entry {}\n}"),
        ("B.swift", "extension Feed {\n  var latest: Entry? { nil }\n}"),
    ]);
    let entry = type_named(&model, "Feed.Entry").id;
    let latest = type_named(&model, "Feed").variable("latest").unwrap();
    let name = latest.type_name.as_ref().unwrap();
    assert!(name.is_optional());
    assert_eq!(name.unwrapped().resolved, Some(entry));
}

#[test]
fn test_dictionary_parts_resolve() {
    let model = model_from(&[(
        "A.swift",
        "struct Key: Hashable {}\nstruct Value {}\nstruct Table { var rows: [Key: Value] }",
    )]);
    let rows = type_named(&model, "Table").variable("rows").unwrap();
    let TypeNameKind::Dictionary { key, value } = &rows.type_name.as_ref().unwrap().kind else {
        panic!("expected dictionary");
    };
    assert_eq!(model.resolve(key).map(|t| t.name.as_str()), Some("Key"));
    assert_eq!(model.resolve(value).map(|t| t.name.as_str()), Some("Value"));
}

#[test]
fn test_typealias_across_files() {
    let model = model_from(&[
        ("Aliases.swift", "typealias UserID = Identifier"),
        ("Identifier.swift", "struct Identifier {}"),
        ("User.swift", "struct User { let id: UserID }"),
    ]);
    let id = type_named(&model, "User").variable("id").unwrap();
    let name = id.type_name.as_ref().unwrap();
    assert_eq!(name.resolved, Some(type_named(&model, "Identifier").id));
    assert_eq!(name.actual.as_ref().map(|a| a.name.as_str()), Some("Identifier"));
}

#[test]
fn test_external_names_stay_unresolved() {
    let model = model_from(&[("Network.swift", NETWORK)]);
    let response = type_named(&model, "Endpoint.Response");
    let body = response.variable("body").unwrap().type_name.as_ref().unwrap();
    assert!(body.unwrapped().resolved.is_none());
    assert_eq!(response.inherited_types[0].resolved, None);
}
