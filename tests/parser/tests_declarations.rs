//! Parser tests over whole declarations: losslessness, opaque bodies and
//! the shapes of the declarations the extractor relies on.

use reflekt::parser::{AstNode, CONTEXTUAL_MODIFIERS, Item, SyntaxKind, parse};
use reflekt::syntax::SyntaxFile;
use rstest::rstest;

use crate::helpers::source_fixtures::{NETWORK, SHAPES};

fn item_kinds(source: &str) -> Vec<SyntaxKind> {
    let file = SyntaxFile::new(source);
    file.source_file()
        .expect("root is a source file")
        .items()
        .map(|item| item.syntax().kind())
        .collect()
}

// ============================================================================
// LOSSLESSNESS
// ============================================================================

#[rstest]
#[case::shapes(SHAPES)]
#[case::network(NETWORK)]
#[case::directives("#if DEBUG\nstruct A {}\n#else\nstruct B {}\n#endif\n")]
#[case::attributes("@objc(Foo) @available(iOS 13, *)\npublic final class Foo: NSObject {}\n")]
fn test_source_round_trips(#[case] source: &str) {
    let parse = parse(source);
    assert!(parse.ok(), "{:?}", parse.errors);
    assert_eq!(parse.syntax().text().to_string(), source);
}

#[test]
fn test_directives_are_trivia() {
    let source = "#if os(iOS)\nstruct A {}\n#elseif os(macOS)\nstruct B {}\n#endif";
    assert_eq!(
        item_kinds(source),
        vec![SyntaxKind::STRUCT_DECL, SyntaxKind::STRUCT_DECL]
    );
}

// ============================================================================
// OPAQUE BODIES
// ============================================================================

#[test]
fn test_function_bodies_are_skipped() {
    let source = r#"
struct A {
    func run() {
        let handler = { (x: Int) -> Int in
            if x > 0 { return x }
            return "}".count
        }
        _ = handler(1)
    }
    var after: Int
}
"#;
    let file = SyntaxFile::new(source);
    assert!(!file.has_errors(), "{:?}", file.errors());

    let Some(Item::Type(strukt)) = file.source_file().and_then(|f| f.items().next()) else {
        panic!("expected struct");
    };
    let members: Vec<_> = strukt
        .member_block()
        .expect("member block")
        .items()
        .map(|item| item.syntax().kind())
        .collect();
    assert_eq!(members, vec![SyntaxKind::FUNC_DECL, SyntaxKind::VAR_DECL]);
}

#[test]
fn test_accessor_and_initializer_bodies_are_skipped() {
    let source = "struct A {\n  var x: Int = { 1 }() { didSet { print(x) } }\n  lazy var y = [1, 2].map { $0 * 2 }\n}";
    let file = SyntaxFile::new(source);
    assert!(!file.has_errors(), "{:?}", file.errors());
    assert_eq!(file.source_text(), source);
}

// ============================================================================
// DECLARATION KINDS
// ============================================================================

#[test]
fn test_top_level_declaration_kinds() {
    let source = "import UIKit\nprotocol P {}\nclass C {}\nenum E {}\nactor S {}\nextension C {}\ntypealias T = Int\nfunc f() {}\n";
    assert_eq!(
        item_kinds(source),
        vec![
            SyntaxKind::IMPORT_DECL,
            SyntaxKind::PROTOCOL_DECL,
            SyntaxKind::CLASS_DECL,
            SyntaxKind::ENUM_DECL,
            SyntaxKind::ACTOR_DECL,
            SyntaxKind::EXTENSION_DECL,
            SyntaxKind::TYPEALIAS_DECL,
            SyntaxKind::FUNC_DECL,
        ]
    );
}

#[test]
fn test_member_declaration_kinds() {
    let source = "enum E {\n  case a, b\n  init() {}\n  deinit {}\n  subscript(i: Int) -> Int { i }\n  static var shared = E.a\n}";
    let file = SyntaxFile::new(source);
    let Some(Item::Type(decl)) = file.source_file().and_then(|f| f.items().next()) else {
        panic!("expected enum");
    };
    let kinds: Vec<_> = decl
        .member_block()
        .expect("member block")
        .items()
        .map(|item| item.syntax().kind())
        .collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::ENUM_CASE_DECL,
            SyntaxKind::INIT_DECL,
            SyntaxKind::DEINIT_DECL,
            SyntaxKind::SUBSCRIPT_DECL,
            SyntaxKind::VAR_DECL,
        ]
    );
}

#[test]
fn test_comments_survive_in_order() {
    let file = SyntaxFile::new(NETWORK);
    let first = file.comments().into_iter().next().expect("a comment");
    assert_eq!(first.text, "// sourcery:file: module = \"Network\"");
    assert!(!first.is_block);
}

#[rstest]
#[case::ownership_modifiers("struct A {\n  consuming func take() {}\n  borrowing func peek() {}\n}\n")]
#[case::interpolated_brace("struct A {\n  let s = \"a \\(\"}\") b\"\n  var y: Int\n}\n")]
#[case::nested_interpolation("func f() {\n  print(\"\\(g(\"(\")) and \\(\"\\(x)\")\")\n}\n")]
#[case::nested_comment("/* outer /* inner */ still outer */\nstruct A {}\n")]
fn test_valid_source_parses_cleanly(#[case] source: &str) {
    let parse = parse(source);
    assert!(parse.ok(), "{:?}", parse.errors);
    assert_eq!(parse.syntax().text().to_string(), source);
}

#[test]
fn test_contextual_modifiers_are_public() {
    for modifier in ["final", "mutating", "consuming", "borrowing"] {
        assert!(CONTEXTUAL_MODIFIERS.contains(&modifier), "{}", modifier);
    }
}
