//! Error recovery: malformed input yields positioned errors and a tree that
//! still holds every well-formed declaration.

use reflekt::syntax::parse_with_result;

use crate::helpers::model_helpers::extract;

#[test]
fn test_errors_carry_line_and_column() {
    let result = parse_with_result("struct A {}\n\nstruct {\n}\n");
    assert!(result.has_errors());
    let error = &result.errors[0];
    assert_eq!(error.line, 2);
    assert!(error.message.contains("name"), "{}", error.message);
    assert!(error.to_string().starts_with("3:"));
}

#[test]
fn test_recovered_tree_is_lossless() {
    let source = "struct A {\n  ??? junk\n  var y: Int\n}\nstruct B {}\n";
    let result = parse_with_result(source);
    assert!(result.has_errors());
    let file = result.syntax_file().expect("recovered tree");
    assert_eq!(file.source_text(), source);
}

#[test]
fn test_declarations_after_garbage_are_extracted() {
    let result = extract("struct A {\n  ??? junk\n  var y: Int\n}\nstruct B {}\n");
    assert!(result.has_parse_errors());
    let names: Vec<_> = result.declarations.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
    assert_eq!(result.declarations[0].members.len(), 1);
}

#[test]
fn test_unclosed_block_keeps_members() {
    let result = extract("class A {\n  var x: Int\n  func f() {}\n");
    assert!(result.has_parse_errors());
    assert_eq!(result.declarations.len(), 1);
    assert_eq!(result.declarations[0].members.len(), 2);
}

#[test]
fn test_clean_source_has_no_diagnostics() {
    let result = extract("struct A {\n  var x: Int\n}\n");
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
}

#[test]
fn test_unterminated_block_comment_is_a_parse_error() {
    let result = extract("struct A {}\n/* never closed\nstruct C {}\n");
    assert!(result.has_parse_errors());
    let names: Vec<_> = result.declarations.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["A"]);
    assert_eq!(&*result.diagnostics[0].message, "unterminated block comment");
}

#[test]
fn test_unterminated_string_is_a_parse_error() {
    let result = extract("struct A { var x: Int\n let s = \"oops\n var y: Int }");
    assert!(result.has_parse_errors());
    assert_eq!(result.diagnostics.len(), 1, "{:?}", result.diagnostics);
    assert_eq!(&*result.diagnostics[0].message, "unterminated string literal");
    assert_eq!(result.declarations[0].members.len(), 3);
}

#[test]
fn test_stray_character_is_a_parse_error() {
    let result = parse_with_result("struct A {}\n§\nstruct B {}\n");
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].message, "unexpected character");
    assert_eq!(result.errors[0].line, 1);
}
