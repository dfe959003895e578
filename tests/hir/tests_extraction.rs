//! Per-file extraction through the public API.

use reflekt::hir::{AccessLevel, DeclKind, ExtractOptions, Member, MethodKind, extract_file};
use reflekt::syntax::SyntaxFile;

use crate::helpers::model_helpers::extract;
use crate::helpers::source_fixtures::{NETWORK, SHAPES};

#[test]
fn test_file_level_facts() {
    let result = extract(NETWORK);

    let imports: Vec<_> = result
        .imports
        .iter()
        .map(|i| (i.path.as_str(), i.is_testable))
        .collect();
    assert_eq!(imports, vec![("Foundation", false), ("Core", true)]);
    assert_eq!(
        result.file_annotations.get("module").and_then(|v| v.as_str()),
        Some("Network")
    );

    let request = &result.functions[0];
    assert_eq!(request.name, "request(_:)");
    assert_eq!(request.short_name, "request");
    assert!(request.is_async);
    assert!(request.throws);
    assert_eq!(request.access, AccessLevel::Public);
    assert_eq!(request.return_type.as_ref().unwrap().name, "Endpoint.Response");
    assert_eq!(request.parameters[0].argument_label, None);
    assert_eq!(request.parameters[0].name, "endpoint");
}

#[test]
fn test_enum_with_nested_type() {
    let result = extract(NETWORK);
    let kinds: Vec<_> = result.declarations.iter().map(|d| d.kind).collect();
    assert_eq!(kinds, vec![DeclKind::Enum, DeclKind::Extension]);

    let endpoint = &result.declarations[0];
    let cases: Vec<_> = endpoint
        .members
        .iter()
        .filter_map(|m| match m {
            Member::EnumCase(c) => Some(c),
            _ => None,
        })
        .collect();
    let names: Vec<_> = cases.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["users", "user", "search"]);
    let page = &cases[2].associated_values[1];
    assert_eq!(page.local_name.as_deref(), Some("page"));
    assert_eq!(page.default_value.as_deref(), Some("1"));

    let response = &endpoint.nested[0];
    assert_eq!(response.qualified_name, "Endpoint.Response");
    assert_eq!(response.parent.as_deref(), Some("Endpoint"));
    assert_eq!(response.inherited_types[0].name, "Decodable");
}

#[test]
fn test_variable_access_levels() {
    let result = extract(NETWORK);
    let response = &result.declarations[0].nested[0];
    let Member::Variable(status) = &response.members[0] else {
        panic!("expected variable");
    };
    assert!(status.is_let);
    assert_eq!(status.read_access, AccessLevel::Public);
    assert_eq!(status.write_access, None);

    let Member::Variable(body) = &response.members[1] else {
        panic!("expected variable");
    };
    assert_eq!(body.read_access, AccessLevel::Public);
    assert_eq!(body.write_access, Some(AccessLevel::Private));
    assert!(body.type_name.as_ref().unwrap().is_optional());
}

#[test]
fn test_class_members_and_modifiers() {
    let result = extract(SHAPES);
    let circle = result
        .declarations
        .iter()
        .find(|d| d.name == "Circle")
        .expect("Circle declared");
    assert_eq!(circle.kind, DeclKind::Class);
    assert!(circle.has_modifier("final"));

    let methods: Vec<_> = circle
        .members
        .iter()
        .filter_map(|m| match m {
            Member::Method(m) => Some((m.name.as_str(), m.kind)),
            _ => None,
        })
        .collect();
    assert_eq!(
        methods,
        vec![
            ("init(radius:)", MethodKind::Initializer),
            ("draw(in:)", MethodKind::Function),
        ]
    );

    let area = circle
        .members
        .iter()
        .find_map(|m| match m {
            Member::Variable(v) if v.name == "area" => Some(v),
            _ => None,
        })
        .unwrap();
    assert!(area.is_computed);
}

#[test]
fn test_locations_point_at_declarations() {
    let source = "struct A {}\nstruct B {}\n";
    let result = extract(source);
    let b = &result.declarations[1];
    assert_eq!(&*b.location.file, "Test.swift");
    let start = usize::from(b.location.range.start());
    assert!(source[start..].starts_with("struct B"));
}

#[test]
fn test_documentation_is_opt_in() {
    let source = "/// A circle.\n/// Round.\nstruct Circle {}";
    assert!(extract(source).declarations[0].documentation.is_empty());

    let options = ExtractOptions {
        parse_documentation: true,
    };
    let result = extract_file("Test.swift", &SyntaxFile::new(source), options);
    assert_eq!(result.declarations[0].documentation, vec!["A circle.", "Round."]);
}

#[test]
fn test_unicode_names() {
    let result = extract("struct Café {\n  var naïve: Int\n  func grüßen(_ 名前: String) {}\n}\n");
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    let cafe = &result.declarations[0];
    assert_eq!(cafe.name, "Café");
    assert_eq!(cafe.members.len(), 2);
    match &cafe.members[1] {
        Member::Method(m) => assert_eq!(m.name, "grüßen(_:)"),
        other => panic!("expected method, got {:?}", other),
    }
}
