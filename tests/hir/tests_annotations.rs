//! Annotations from source comments to the composed model.

use reflekt::annotations::AnnotationValue;
use reflekt::hir::codes;

use crate::helpers::model_helpers::{diagnostic_codes, model_from, type_named};
use crate::helpers::source_fixtures::{BLOCK_ANNOTATIONS, NETWORK};

fn group_of(model: &reflekt::Model, name: &str) -> Option<String> {
    type_named(model, name)
        .annotations
        .get("group")
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

#[test]
fn test_block_regions_and_direct_precedence() {
    let model = model_from(&[("Blocks.swift", BLOCK_ANNOTATIONS)]);

    assert_eq!(group_of(&model, "First").as_deref(), Some("a"));
    assert_eq!(group_of(&model, "Second").as_deref(), Some("a"));
    assert!(type_named(&model, "Second").annotations.contains_key("inner"));
    assert!(!type_named(&model, "First").annotations.contains_key("inner"));
    assert_eq!(group_of(&model, "Third").as_deref(), Some("direct"));
    assert!(type_named(&model, "Fourth").annotations.is_empty());
    assert!(model.diagnostics().is_empty(), "{:?}", model.diagnostics());
}

#[test]
fn test_file_annotations_reach_every_declaration() {
    let model = model_from(&[("Network.swift", NETWORK)]);
    let facts = model.file("Network.swift").expect("file facts");
    assert_eq!(
        facts.annotations.get("module").and_then(|v| v.as_str()),
        Some("Network")
    );
    let endpoint = type_named(&model, "Endpoint");
    assert_eq!(
        endpoint.annotations.get("module").and_then(|v| v.as_str()),
        Some("Network")
    );
}

#[test]
fn test_value_forms_survive_composition() {
    let source = r#"
// sourcery: count = 3, ratio = 0.5, name = "n", flag
// sourcery: tags = ["a", "b"], options = {"deep": true}
struct Styled {}
"#;
    let model = model_from(&[("Styled.swift", source)]);
    let annotations = &type_named(&model, "Styled").annotations;

    assert_eq!(annotations.get("count").and_then(|v| v.as_i64()), Some(3));
    assert_eq!(annotations.get("ratio"), Some(&AnnotationValue::Float(0.5)));
    assert_eq!(annotations.get("name").and_then(|v| v.as_str()), Some("n"));
    assert_eq!(annotations.get("flag").and_then(|v| v.as_bool()), Some(true));
    assert_eq!(
        annotations.get("tags"),
        Some(&AnnotationValue::List(vec![
            AnnotationValue::String("a".to_string()),
            AnnotationValue::String("b".to_string()),
        ]))
    );
    let Some(AnnotationValue::Map(options)) = annotations.get("options") else {
        panic!("expected map value");
    };
    assert_eq!(options.get("deep"), Some(&AnnotationValue::Bool(true)));
}

#[test]
fn test_member_annotations_are_kept() {
    let source = "struct User {\n  // sourcery: skip\n  var id: String\n  var name: String // sourcery: label = \"Name\"\n}";
    let model = model_from(&[("User.swift", source)]);
    let user = type_named(&model, "User");
    assert!(user.variable("id").unwrap().annotations.contains_key("skip"));
    let name = &user.variable("name").unwrap().annotations;
    assert_eq!(name.get("label").and_then(|v| v.as_str()), Some("Name"));
    assert!(!name.contains_key("skip"));
}

#[test]
fn test_extension_annotations_reach_its_members_only() {
    let model = model_from(&[
        ("A.swift", "struct Account {\n  var id: Int\n}"),
        ("B.swift", "// sourcery: audited\nextension Account {\n  var balance: Int { 0 }\n}"),
    ]);
    let account = type_named(&model, "Account");
    assert!(account.annotations.contains_key("audited"));
    assert!(account.variable("balance").unwrap().annotations.contains_key("audited"));
    assert!(account.variable("id").unwrap().annotations.is_empty());
}

#[test]
fn test_conflicting_extension_annotation_is_reported() {
    let model = model_from(&[
        ("A.swift", "// sourcery: table = \"users\"\nstruct User {}"),
        ("B.swift", "// sourcery: table = \"people\"\nextension User {}"),
    ]);
    let user = type_named(&model, "User");
    assert_eq!(user.annotations.get("table").and_then(|v| v.as_str()), Some("users"));
    assert_eq!(diagnostic_codes(&model), vec![codes::ANNOTATION_CONFLICT]);
    let conflict = &model.diagnostics()[0];
    assert_eq!(&*conflict.file, "B.swift");
    assert!(conflict.message.contains("table"), "{}", conflict.message);
}

#[test]
fn test_unmatched_end_marker_is_reported() {
    let model = model_from(&[("A.swift", "struct A {}\n// sourcery:end\n")]);
    assert_eq!(diagnostic_codes(&model), vec![codes::UNMATCHED_BLOCK_MARKER]);
    assert!(!model.has_errors());
}
