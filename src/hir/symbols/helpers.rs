//! AST → partial declaration conversion helpers.
//!
//! Functions that convert typed AST data into the serialisable extraction
//! types (TypeName, Attribute, Modifier, MethodParameter, ...) and that
//! associate comments with the declaration they annotate.

use rowan::NodeOrToken;
use smol_str::SmolStr;

use crate::annotations::{Annotations, Marker, MarkerKind, comment_body};
use crate::base::LineIndex;
use crate::hir::type_name::{ClosureType, TupleElement, TypeName};
use crate::parser::ast::{self, AstNode};
use crate::parser::{SyntaxKind, SyntaxNode, SyntaxToken};

use super::types::{
    AccessLevel, Attribute, GenericParameter, GenericRequirement, MethodParameter, Modifier,
    RequirementRelation,
};

// ============================================================================
// Type names
// ============================================================================

/// Build a TypeName from a type reference, marking generic parameters in scope.
pub(super) fn type_name(ty: &ast::TypeRef, generics: &[String]) -> TypeName {
    let mut name = build_type_name(ty);
    if !generics.is_empty() {
        name.walk_mut(&mut |t| {
            let first = t
                .base_name()
                .and_then(|base| base.split('.').next())
                .map(str::to_string);
            if let Some(first) = first {
                t.is_generic_parameter = generics.contains(&first);
            }
        });
    }
    name
}

fn build_type_name(ty: &ast::TypeRef) -> TypeName {
    let fallback = || TypeName::named(ty.text(), Vec::new());
    match ty.kind() {
        SyntaxKind::NAMED_TYPE => named_type(ty),
        SyntaxKind::OPTIONAL_TYPE => ty
            .inner()
            .map(|i| TypeName::optional(build_type_name(&i)))
            .unwrap_or_else(fallback),
        SyntaxKind::IUO_TYPE => ty
            .inner()
            .map(|i| TypeName::implicitly_unwrapped(build_type_name(&i)))
            .unwrap_or_else(fallback),
        SyntaxKind::ARRAY_TYPE => ty
            .inner()
            .map(|i| TypeName::array(build_type_name(&i)))
            .unwrap_or_else(fallback),
        SyntaxKind::DICTIONARY_TYPE => {
            let types = ty.types();
            match (types.first(), types.get(1)) {
                (Some(key), Some(value)) => {
                    TypeName::dictionary(build_type_name(key), build_type_name(value))
                }
                _ => fallback(),
            }
        }
        SyntaxKind::TUPLE_TYPE => tuple_type(ty),
        SyntaxKind::FUNCTION_TYPE => function_type(ty).unwrap_or_else(fallback),
        SyntaxKind::COMPOSITION_TYPE => {
            TypeName::composition(ty.types().iter().map(build_type_name).collect())
        }
        SyntaxKind::METATYPE_TYPE => {
            let suffix = if ty.has_ident("Protocol") {
                "Protocol"
            } else {
                "Type"
            };
            ty.inner()
                .map(|i| TypeName::metatype(build_type_name(&i), suffix))
                .unwrap_or_else(fallback)
        }
        SyntaxKind::SOME_TYPE => ty
            .inner()
            .map(|i| TypeName::opaque(build_type_name(&i)))
            .unwrap_or_else(fallback),
        SyntaxKind::ANY_TYPE => ty
            .inner()
            .map(|i| TypeName::existential(build_type_name(&i)))
            .unwrap_or_else(fallback),
        SyntaxKind::ATTRIBUTED_TYPE => {
            let Some(inner) = ty.inner() else {
                return fallback();
            };
            let mut name = build_type_name(&inner);
            let mut attributes: Vec<Attribute> = ty.attributes().iter().map(attribute).collect();
            attributes.append(&mut name.attributes);
            name.attributes = attributes;
            name.is_inout |= ty.has_token(SyntaxKind::INOUT_KW);
            name
        }
        _ => fallback(),
    }
}

fn named_type(ty: &ast::TypeRef) -> TypeName {
    let segments = ty.segments();
    let Some((last, leading)) = segments.split_last() else {
        return TypeName::named(ty.text(), Vec::new());
    };

    let mut base = String::new();
    for segment in leading {
        base.push_str(&segment.name);
        if !segment.generic_args.is_empty() {
            let args: Vec<_> = segment.generic_args.iter().map(|a| build_type_name(a).name).collect();
            base.push('<');
            base.push_str(&args.join(", "));
            base.push('>');
        }
        base.push('.');
    }
    // `protocol P: class` is the legacy spelling of AnyObject
    if segments.len() == 1 && last.name == "class" {
        base.push_str("AnyObject");
    } else {
        base.push_str(&last.name);
    }

    let generic_args = last.generic_args.iter().map(build_type_name).collect();
    TypeName::named(base, generic_args)
}

fn tuple_type(ty: &ast::TypeRef) -> TypeName {
    let elements = ty.tuple_elements();
    if let [only] = elements.as_slice()
        && only.labels.is_empty()
        && !only.is_variadic
        && let Some(inner) = &only.ty
    {
        // Parenthesised type, not a tuple
        return build_type_name(inner);
    }
    TypeName::tuple(
        elements
            .iter()
            .map(|e| TupleElement {
                label: e.labels.first().filter(|l| l.as_str() != "_").cloned(),
                type_name: e
                    .ty
                    .as_ref()
                    .map(build_type_name)
                    .unwrap_or_else(|| TypeName::named("_", Vec::new())),
            })
            .collect(),
    )
}

fn function_type(ty: &ast::TypeRef) -> Option<TypeName> {
    let types = ty.types();
    let params = types.first()?;
    let result = types.get(1)?;
    let parameters = params
        .tuple_elements()
        .iter()
        .filter_map(|e| e.ty.as_ref().map(build_type_name))
        .collect();
    Some(TypeName::closure(ClosureType {
        parameters,
        return_type: Box::new(build_type_name(result)),
        is_async: ty.has_ident("async"),
        throws: ty.has_ident("throws") || ty.has_ident("rethrows"),
    }))
}

/// Infer the type of a literal initializer: `1`, `1.0`, `"s"`, `true`, `Foo(...)`.
pub(super) fn infer_literal_type(value: &str) -> Option<TypeName> {
    let value = value.trim();
    let simple = |name: &str| Some(TypeName::named(name, Vec::new()));

    if value == "true" || value == "false" {
        return simple("Bool");
    }
    if value.starts_with('"') || value.starts_with("#\"") {
        return simple("String");
    }
    let digits = value.strip_prefix('-').unwrap_or(value);
    if is_integer_literal(digits) {
        return simple("Int");
    }
    if is_float_literal(digits) {
        return simple("Double");
    }
    constructor_callee(value).map(|callee| TypeName::named(callee, Vec::new()))
}

fn is_integer_literal(text: &str) -> bool {
    let (body, radix) = if let Some(hex) = text.strip_prefix("0x") {
        (hex, 16)
    } else if let Some(bin) = text.strip_prefix("0b") {
        (bin, 2)
    } else if let Some(oct) = text.strip_prefix("0o") {
        (oct, 8)
    } else {
        (text, 10)
    };
    body.starts_with(|c: char| c.is_digit(radix))
        && body.chars().all(|c| c == '_' || c.is_digit(radix))
}

fn is_float_literal(text: &str) -> bool {
    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(at) => (&text[..at], Some(&text[at + 1..])),
        None => (text, None),
    };
    let exponent_ok = exponent.is_none_or(|e| {
        let e = e.strip_prefix(['+', '-']).unwrap_or(e);
        is_integer_literal(e)
    });
    let mantissa_ok = match mantissa.split_once('.') {
        Some((whole, fraction)) => is_integer_literal(whole) && is_integer_literal(fraction),
        None => exponent.is_some() && is_integer_literal(mantissa),
    };
    mantissa_ok && exponent_ok
}

/// `Foo` for `Foo(...)` or `Foo.init(...)` when the call spans the whole expression.
fn constructor_callee(value: &str) -> Option<String> {
    let open = value.find('(')?;
    let callee = value[..open].trim();
    let callee = callee.strip_suffix(".init").unwrap_or(callee);
    let last = callee.rsplit('.').next()?;
    if !last.starts_with(|c: char| c.is_uppercase())
        || !callee
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '.')
    {
        return None;
    }

    let mut depth = 0usize;
    for (i, c) in value.char_indices().skip_while(|(i, _)| *i < open) {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return (i + 1 == value.len()).then(|| callee.to_string());
                }
            }
            _ => {}
        }
    }
    None
}

// ============================================================================
// Attributes, modifiers and generics
// ============================================================================

pub(super) fn attribute(attr: &ast::Attribute) -> Attribute {
    Attribute {
        name: SmolStr::new(attr.name()),
        arguments: attr.arguments(),
    }
}

pub(super) fn attributes(attrs: &[ast::Attribute]) -> Vec<Attribute> {
    attrs.iter().map(attribute).collect()
}

pub(super) fn modifiers(mods: &[ast::Modifier]) -> Vec<Modifier> {
    mods.iter()
        .map(|m| Modifier {
            name: SmolStr::new(m.name()),
            detail: m.detail().map(SmolStr::new),
        })
        .collect()
}

/// Explicit access level (`public`, not `public(set)`).
pub(super) fn access_level(modifiers: &[Modifier]) -> Option<AccessLevel> {
    modifiers
        .iter()
        .filter(|m| m.detail.is_none())
        .find_map(|m| AccessLevel::from_keyword(&m.name))
}

/// Setter access from `private(set)` and friends.
pub(super) fn setter_access(modifiers: &[Modifier]) -> Option<AccessLevel> {
    modifiers
        .iter()
        .filter(|m| m.detail.as_deref() == Some("set"))
        .find_map(|m| AccessLevel::from_keyword(&m.name))
}

pub(super) fn generic_parameters(
    list: Option<ast::GenericParamList>,
    generics: &[String],
) -> Vec<GenericParameter> {
    list.map(|l| l.params())
        .unwrap_or_default()
        .iter()
        .filter_map(|p| {
            Some(GenericParameter {
                name: p.name()?,
                constraint: p.constraint().map(|c| type_name(&c, generics)),
            })
        })
        .collect()
}

pub(super) fn generic_requirements(
    clause: Option<ast::GenericWhereClause>,
    generics: &[String],
) -> Vec<GenericRequirement> {
    clause
        .map(|c| c.requirements())
        .unwrap_or_default()
        .iter()
        .filter_map(|r| {
            Some(GenericRequirement {
                left: type_name(&r.left()?, generics),
                right: type_name(&r.right()?, generics),
                relation: if r.is_same_type() {
                    RequirementRelation::SameType
                } else {
                    RequirementRelation::Conforms
                },
            })
        })
        .collect()
}

pub(super) fn inherited_types(
    clause: Option<ast::InheritanceClause>,
    generics: &[String],
) -> Vec<TypeName> {
    clause
        .map(|c| c.types())
        .unwrap_or_default()
        .iter()
        .map(|t| type_name(t, generics))
        .collect()
}

// ============================================================================
// Parameters
// ============================================================================

/// Convert a parameter list. Subscript parameters have no implicit argument label.
pub(super) fn parameters(
    params: &[ast::Param],
    generics: &[String],
    line_index: &LineIndex,
    is_subscript: bool,
) -> Vec<MethodParameter> {
    params
        .iter()
        .map(|param| {
            let names = param.names();
            let (argument_label, name) = match names.as_slice() {
                [label, name, ..] => (Some(label.clone()), name.clone()),
                [name] if is_subscript => (None, name.clone()),
                [name] => (Some(name.clone()), name.clone()),
                [] => (None, String::new()),
            };
            let type_name = param.ty().map(|t| type_name(&t, generics));
            MethodParameter {
                argument_label: argument_label.filter(|l| l != "_"),
                name,
                is_inout: type_name.as_ref().is_some_and(|t| t.is_inout),
                type_name,
                default_value: param.default_value(),
                is_variadic: param.is_variadic(),
                annotations: direct_annotations(param.syntax(), line_index),
            }
        })
        .collect()
}

/// Selector name: `foo(a:_:)`, `init(x:)`, `bar()`.
pub(super) fn selector(short_name: &str, parameters: &[MethodParameter]) -> String {
    let labels: String = parameters
        .iter()
        .map(|p| format!("{}:", p.argument_label.as_deref().unwrap_or("_")))
        .collect();
    format!("{}({})", short_name, labels)
}

// ============================================================================
// Comments
// ============================================================================

/// Elements whose line claims a following same-line comment as trailing.
fn claims_trailing(element: &NodeOrToken<SyntaxNode, SyntaxToken>) -> bool {
    match element {
        NodeOrToken::Node(_) => true,
        NodeOrToken::Token(t) => matches!(t.kind(), SyntaxKind::COMMA | SyntaxKind::SEMICOLON),
    }
}

/// Comments in the trivia directly before `node`, in source order.
///
/// A comment on the same line as the end of the previous declaration
/// belongs to that declaration and is skipped.
pub(super) fn leading_comments(node: &SyntaxNode, line_index: &LineIndex) -> Vec<SyntaxToken> {
    let mut comments = Vec::new();
    let mut current = node.prev_sibling_or_token();
    let mut anchor = None;
    while let Some(element) = current {
        match &element {
            NodeOrToken::Token(t) if t.kind().is_trivia() => {
                if t.kind().is_comment() {
                    comments.push(t.clone());
                }
                current = t.prev_sibling_or_token();
            }
            _ => {
                anchor = Some(element);
                break;
            }
        }
    }

    if let Some(anchor) = anchor.filter(claims_trailing) {
        let anchor_end = anchor.text_range().end();
        comments.retain(|c| !line_index.same_line(anchor_end, c.text_range().start()));
    }
    comments.reverse();
    comments
}

/// Comments after `node` on the line where it ends.
pub(super) fn trailing_comments(node: &SyntaxNode, line_index: &LineIndex) -> Vec<SyntaxToken> {
    let end = node.text_range().end();
    let mut comments = Vec::new();
    let mut current = node.next_sibling_or_token();
    while let Some(NodeOrToken::Token(t)) = current {
        if !line_index.same_line(end, t.text_range().start()) {
            break;
        }
        match t.kind() {
            kind if kind.is_comment() => comments.push(t.clone()),
            SyntaxKind::WHITESPACE | SyntaxKind::COMMA | SyntaxKind::SEMICOLON => {}
            _ => break,
        }
        current = t.next_sibling_or_token();
    }
    comments
}

/// Comments between the tokens of the declaration header itself.
fn inner_comments(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + '_ {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| t.kind().is_comment())
}

/// Inline marker annotations written directly on a declaration.
///
/// Separate comments repeating a key accumulate into a list.
pub(super) fn direct_annotations(node: &SyntaxNode, line_index: &LineIndex) -> Annotations {
    let mut annotations = Annotations::new();
    let comments = leading_comments(node, line_index)
        .into_iter()
        .chain(inner_comments(node))
        .chain(trailing_comments(node, line_index));
    for comment in comments {
        if let Some(marker) = Marker::parse(comment.text())
            && marker.kind == MarkerKind::Inline
        {
            annotations.accumulate_all(marker.annotations);
        }
    }
    annotations
}

/// `///` and `/** */` lines before a declaration, marker comments excluded.
pub(super) fn documentation(node: &SyntaxNode, line_index: &LineIndex) -> Vec<String> {
    let mut lines = Vec::new();
    for comment in leading_comments(node, line_index) {
        let text = comment.text();
        let is_doc = text.starts_with("///") || (text.starts_with("/**") && text != "/**/");
        if !is_doc || Marker::parse(text).is_some() {
            continue;
        }
        for line in comment_body(text).lines() {
            let line = line.trim();
            let line = line.strip_prefix('*').map(str::trim_start).unwrap_or(line);
            if !line.is_empty() {
                lines.push(line.to_string());
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::AnnotationValue;
    use crate::hir::type_name::TypeNameKind;
    use crate::parser::{SourceFile, parse};
    use rstest::rstest;

    fn var_type(source: &str) -> TypeName {
        let parse = parse(source);
        let file = SourceFile::cast(parse.syntax()).unwrap();
        let Some(ast::Item::Var(var)) = file.items().next() else {
            panic!("expected variable");
        };
        type_name(&var.bindings()[0].ty().unwrap(), &["T".to_string()])
    }

    #[rstest]
    #[case("var x: [Int]", "[Int]")]
    #[case("var x: Array<Int>", "Array<Int>")]
    #[case("var x: [String: Int]?", "[String: Int]?")]
    #[case("var x: (Int)", "Int")]
    #[case("var x: (a: Int, b: String)", "(a: Int, b: String)")]
    #[case("var x: (Int) async throws -> Void", "(Int) async throws -> Void")]
    #[case("var x: Foo.Bar<T>", "Foo.Bar<T>")]
    #[case("var x: some View", "some View")]
    #[case("var x: A & B", "A & B")]
    #[case("var x: T.Type", "T.Type")]
    fn test_type_name_text(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(var_type(source).name, expected);
    }

    #[test]
    fn test_sugar_and_spelled_out_share_kind() {
        assert!(matches!(var_type("var x: [Int]").kind, TypeNameKind::Array(_)));
        assert!(matches!(var_type("var x: Array<Int>").kind, TypeNameKind::Array(_)));
        assert!(matches!(var_type("var x: Optional<Int>").kind, TypeNameKind::Optional(_)));
    }

    #[test]
    fn test_generic_parameter_marked() {
        let name = var_type("var x: [T]");
        let TypeNameKind::Array(element) = name.kind else {
            panic!("expected array");
        };
        assert!(element.is_generic_parameter);
        assert!(!var_type("var x: Int").is_generic_parameter);
    }

    #[test]
    fn test_attributed_closure() {
        let parse = parse("func f(_ c: @escaping (Int) -> Void, v: inout Int) {}");
        let file = SourceFile::cast(parse.syntax()).unwrap();
        let Some(ast::Item::Func(func)) = file.items().next() else {
            panic!("expected function");
        };
        let index = LineIndex::new("");
        let params = parameters(&func.params(), &[], &index, false);
        let closure = params[0].type_name.as_ref().unwrap();
        assert!(closure.is_closure());
        assert_eq!(closure.attributes[0].name, "escaping");
        assert!(params[1].is_inout);
        assert_eq!(params[0].argument_label, None);
        assert_eq!(params[1].argument_label.as_deref(), Some("v"));
        assert_eq!(selector("f", &params), "f(_:v:)");
    }

    #[rstest]
    #[case("1", Some("Int"))]
    #[case("-42", Some("Int"))]
    #[case("0xFF", Some("Int"))]
    #[case("1.0", Some("Double"))]
    #[case("1e3", Some("Double"))]
    #[case("\"s\"", Some("String"))]
    #[case("true", Some("Bool"))]
    #[case("Foo()", Some("Foo"))]
    #[case("Foo.init(x: 1)", Some("Foo"))]
    #[case("Outer.Inner(a)", Some("Outer.Inner"))]
    #[case("foo()", None)]
    #[case("Foo().bar", None)]
    #[case("[1, 2]", None)]
    #[case("x + 1", None)]
    fn test_infer_literal_type(#[case] value: &str, #[case] expected: Option<&str>) {
        assert_eq!(
            infer_literal_type(value).map(|t| t.name),
            expected.map(str::to_string)
        );
    }

    fn first_item_node(source: &str) -> (SyntaxNode, LineIndex) {
        let parse = parse(source);
        let file = SourceFile::cast(parse.syntax()).unwrap();
        let node = file.items().next().unwrap().syntax().clone();
        (node, LineIndex::new(source))
    }

    #[test]
    fn test_leading_and_trailing_annotations() {
        let source = "// sourcery: a\n// sourcery: b = 2\nvar x: Int // sourcery: c\n";
        let (node, index) = first_item_node(source);
        let annotations = direct_annotations(&node, &index);
        let keys: Vec<_> = annotations.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_repeated_key_accumulates() {
        let source = "// sourcery: tag = 1\n// sourcery: tag = 2\nstruct A {}";
        let (node, index) = first_item_node(source);
        let annotations = direct_annotations(&node, &index);
        assert_eq!(
            annotations.get("tag"),
            Some(&AnnotationValue::List(vec![
                AnnotationValue::Integer(1),
                AnnotationValue::Integer(2)
            ]))
        );
    }

    #[test]
    fn test_previous_trailing_comment_not_leading() {
        let source = "struct A {\n  var x: Int // sourcery: mine\n  var y: Int\n}";
        let parse = parse(source);
        let file = SourceFile::cast(parse.syntax()).unwrap();
        let Some(ast::Item::Type(decl)) = file.items().next() else {
            panic!("expected type");
        };
        let members: Vec<_> = decl.member_block().unwrap().items().collect();
        let index = LineIndex::new(source);
        assert!(direct_annotations(members[0].syntax(), &index).contains_key("mine"));
        assert!(direct_annotations(members[1].syntax(), &index).is_empty());
    }

    #[test]
    fn test_documentation_lines() {
        let source = "/// First line\n/// Second line\n// sourcery: skip\nstruct A {}";
        let (node, index) = first_item_node(source);
        assert_eq!(documentation(&node, &index), vec!["First line", "Second line"]);

        let source = "/**\n * Block doc\n */\nstruct A {}";
        let (node, index) = first_item_node(source);
        assert_eq!(documentation(&node, &index), vec!["Block doc"]);
    }
}
