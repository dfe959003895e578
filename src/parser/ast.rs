//! Typed AST wrappers over the untyped rowan CST.
//!
//! This module provides strongly-typed accessors for Swift declaration nodes.
//! Each struct wraps a SyntaxNode and provides methods to access children.

use super::syntax_kind::SyntaxKind;
use super::{SyntaxElement, SyntaxNode, SyntaxToken};

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

// ============================================================================
// Helper macros and functions
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

fn child<N: AstNode>(node: &SyntaxNode) -> Option<N> {
    node.children().find_map(N::cast)
}

fn children<N: AstNode>(node: &SyntaxNode) -> Vec<N> {
    node.children().filter_map(N::cast).collect()
}

/// Direct child tokens, trivia excluded.
fn tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + '_ {
    node.children_with_tokens()
        .filter_map(SyntaxElement::into_token)
        .filter(|t| !t.kind().is_trivia())
}

fn has_token(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    tokens(node).any(|t| t.kind() == kind)
}

fn has_ident(node: &SyntaxNode, text: &str) -> bool {
    tokens(node).any(|t| t.kind() == SyntaxKind::IDENT && t.text() == text)
}

/// Strip the backticks of an escaped identifier.
pub fn unescape_ident(text: &str) -> &str {
    text.strip_prefix('`')
        .and_then(|t| t.strip_suffix('`'))
        .unwrap_or(text)
}

/// Node text with runs of whitespace and comments collapsed to one space.
pub fn compact_text(node: &SyntaxNode) -> String {
    let mut out = String::new();
    let mut pending_space = false;
    for token in node
        .descendants_with_tokens()
        .filter_map(SyntaxElement::into_token)
    {
        if token.kind().is_trivia() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push_str(token.text());
    }
    out
}

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    pub fn items(&self) -> impl Iterator<Item = Item> + '_ {
        self.0.children().filter_map(Item::cast)
    }
}

// ============================================================================
// Items
// ============================================================================

/// Any declaration that can appear at top level or in a member block
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Item {
    Import(ImportDecl),
    Type(TypeDecl),
    Extension(ExtensionDecl),
    Typealias(TypealiasDecl),
    AssociatedType(AssociatedTypeDecl),
    Var(VarDecl),
    Func(FuncDecl),
    Init(InitDecl),
    Deinit(DeinitDecl),
    Subscript(SubscriptDecl),
    EnumCase(EnumCaseDecl),
}

impl AstNode for Item {
    fn can_cast(kind: SyntaxKind) -> bool {
        TypeDecl::can_cast(kind)
            || matches!(
                kind,
                SyntaxKind::IMPORT_DECL
                    | SyntaxKind::EXTENSION_DECL
                    | SyntaxKind::TYPEALIAS_DECL
                    | SyntaxKind::ASSOCIATED_TYPE_DECL
                    | SyntaxKind::VAR_DECL
                    | SyntaxKind::FUNC_DECL
                    | SyntaxKind::INIT_DECL
                    | SyntaxKind::DEINIT_DECL
                    | SyntaxKind::SUBSCRIPT_DECL
                    | SyntaxKind::ENUM_CASE_DECL
            )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::IMPORT_DECL => Some(Self::Import(ImportDecl(node))),
            SyntaxKind::EXTENSION_DECL => Some(Self::Extension(ExtensionDecl(node))),
            SyntaxKind::TYPEALIAS_DECL => Some(Self::Typealias(TypealiasDecl(node))),
            SyntaxKind::ASSOCIATED_TYPE_DECL => {
                Some(Self::AssociatedType(AssociatedTypeDecl(node)))
            }
            SyntaxKind::VAR_DECL => Some(Self::Var(VarDecl(node))),
            SyntaxKind::FUNC_DECL => Some(Self::Func(FuncDecl(node))),
            SyntaxKind::INIT_DECL => Some(Self::Init(InitDecl(node))),
            SyntaxKind::DEINIT_DECL => Some(Self::Deinit(DeinitDecl(node))),
            SyntaxKind::SUBSCRIPT_DECL => Some(Self::Subscript(SubscriptDecl(node))),
            SyntaxKind::ENUM_CASE_DECL => Some(Self::EnumCase(EnumCaseDecl(node))),
            _ => TypeDecl::cast(node).map(Self::Type),
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Import(n) => n.syntax(),
            Self::Type(n) => n.syntax(),
            Self::Extension(n) => n.syntax(),
            Self::Typealias(n) => n.syntax(),
            Self::AssociatedType(n) => n.syntax(),
            Self::Var(n) => n.syntax(),
            Self::Func(n) => n.syntax(),
            Self::Init(n) => n.syntax(),
            Self::Deinit(n) => n.syntax(),
            Self::Subscript(n) => n.syntax(),
            Self::EnumCase(n) => n.syntax(),
        }
    }
}

/// Accessors shared by every declaration node
pub trait DeclNode: AstNode {
    fn attributes(&self) -> Vec<Attribute> {
        children(self.syntax())
    }

    fn modifiers(&self) -> Vec<Modifier> {
        children(self.syntax())
    }

    fn name(&self) -> Option<Name> {
        child(self.syntax())
    }

    fn generic_params(&self) -> Option<GenericParamList> {
        child(self.syntax())
    }

    fn where_clause(&self) -> Option<GenericWhereClause> {
        child(self.syntax())
    }

    fn inheritance(&self) -> Option<InheritanceClause> {
        child(self.syntax())
    }
}

impl DeclNode for Item {}

// ============================================================================
// Leaf helpers
// ============================================================================

ast_node!(Name, NAME);

impl Name {
    /// The declared name, backticks removed.
    pub fn text(&self) -> String {
        tokens(&self.0)
            .map(|t| unescape_ident(t.text()).to_string())
            .collect()
    }
}

ast_node!(Attribute, ATTRIBUTE);

impl Attribute {
    /// `available` for `@available(iOS 13, *)`, `Foo.Bar` for `@Foo.Bar`
    pub fn name(&self) -> String {
        tokens(&self.0)
            .filter(|t| t.kind() != SyntaxKind::AT)
            .map(|t| t.text().to_string())
            .collect()
    }

    /// Argument text inside the parentheses, if any.
    pub fn arguments(&self) -> Option<String> {
        let args = self
            .0
            .children()
            .find(|n| n.kind() == SyntaxKind::ATTRIBUTE_ARGS)?;
        let text = compact_text(&args);
        let inner = text
            .strip_prefix('(')
            .and_then(|t| t.strip_suffix(')'))
            .unwrap_or(&text);
        Some(inner.trim().to_string())
    }
}

ast_node!(Modifier, MODIFIER);

impl Modifier {
    pub fn name(&self) -> String {
        tokens(&self.0)
            .next()
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }

    /// `set` for `private(set)`
    pub fn detail(&self) -> Option<String> {
        let detail = self
            .0
            .children()
            .find(|n| n.kind() == SyntaxKind::MODIFIER_DETAIL)?;
        tokens(&detail)
            .find(|t| t.kind() == SyntaxKind::IDENT)
            .map(|t| t.text().to_string())
    }
}

ast_node!(GenericParamList, GENERIC_PARAM_LIST);

impl GenericParamList {
    pub fn params(&self) -> Vec<GenericParam> {
        children(&self.0)
    }
}

ast_node!(GenericParam, GENERIC_PARAM);

impl GenericParam {
    pub fn name(&self) -> Option<String> {
        child::<Name>(&self.0).map(|n| n.text())
    }

    pub fn constraint(&self) -> Option<TypeRef> {
        child(&self.0)
    }
}

ast_node!(GenericWhereClause, GENERIC_WHERE_CLAUSE);

impl GenericWhereClause {
    pub fn requirements(&self) -> Vec<GenericRequirement> {
        children(&self.0)
    }
}

ast_node!(GenericRequirement, GENERIC_REQUIREMENT);

impl GenericRequirement {
    pub fn left(&self) -> Option<TypeRef> {
        child(&self.0)
    }

    pub fn right(&self) -> Option<TypeRef> {
        self.0.children().filter_map(TypeRef::cast).nth(1)
    }

    /// True for `==`, false for `:`
    pub fn is_same_type(&self) -> bool {
        has_token(&self.0, SyntaxKind::EQ_EQ)
    }
}

ast_node!(InheritanceClause, INHERITANCE_CLAUSE);

impl InheritanceClause {
    pub fn types(&self) -> Vec<TypeRef> {
        children(&self.0)
    }
}

// ============================================================================
// Type declarations
// ============================================================================

/// `class`, `struct`, `enum`, `protocol` or `actor`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDecl(SyntaxNode);

impl AstNode for TypeDecl {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::CLASS_DECL
                | SyntaxKind::STRUCT_DECL
                | SyntaxKind::ENUM_DECL
                | SyntaxKind::PROTOCOL_DECL
                | SyntaxKind::ACTOR_DECL
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        Self::can_cast(node.kind()).then(|| Self(node))
    }

    fn syntax(&self) -> &SyntaxNode {
        &self.0
    }
}

impl DeclNode for TypeDecl {}

impl TypeDecl {
    pub fn kind(&self) -> SyntaxKind {
        self.0.kind()
    }

    pub fn member_block(&self) -> Option<MemberBlock> {
        child(&self.0)
    }
}

ast_node!(ExtensionDecl, EXTENSION_DECL);

impl DeclNode for ExtensionDecl {}

impl ExtensionDecl {
    pub fn extended_type(&self) -> Option<TypeRef> {
        child(&self.0)
    }

    pub fn member_block(&self) -> Option<MemberBlock> {
        child(&self.0)
    }
}

ast_node!(MemberBlock, MEMBER_BLOCK);

impl MemberBlock {
    pub fn items(&self) -> impl Iterator<Item = Item> + '_ {
        self.0.children().filter_map(Item::cast)
    }
}

ast_node!(TypealiasDecl, TYPEALIAS_DECL);

impl DeclNode for TypealiasDecl {}

impl TypealiasDecl {
    pub fn aliased_type(&self) -> Option<TypeRef> {
        child(&self.0)
    }
}

ast_node!(AssociatedTypeDecl, ASSOCIATED_TYPE_DECL);

impl DeclNode for AssociatedTypeDecl {}

impl AssociatedTypeDecl {
    pub fn default_type(&self) -> Option<TypeRef> {
        child(&self.0)
    }
}

ast_node!(ImportDecl, IMPORT_DECL);

impl DeclNode for ImportDecl {}

impl ImportDecl {
    /// `struct` in `import struct Foo.Bar`
    pub fn import_kind(&self) -> Option<String> {
        tokens(&self.0)
            .filter(|t| t.kind() != SyntaxKind::IMPORT_KW && t.kind().is_keyword())
            .map(|t| t.text().to_string())
            .next()
    }

    pub fn path(&self) -> String {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::IMPORT_PATH)
            .map(|n| tokens(&n).map(|t| t.text().to_string()).collect())
            .unwrap_or_default()
    }
}

// ============================================================================
// Members
// ============================================================================

ast_node!(VarDecl, VAR_DECL);

impl DeclNode for VarDecl {}

impl VarDecl {
    pub fn is_let(&self) -> bool {
        has_token(&self.0, SyntaxKind::LET_KW)
    }

    pub fn bindings(&self) -> Vec<PatternBinding> {
        children(&self.0)
    }
}

ast_node!(PatternBinding, PATTERN_BINDING);

impl PatternBinding {
    pub fn name(&self) -> Option<String> {
        child::<Name>(&self.0).map(|n| n.text())
    }

    pub fn is_tuple_pattern(&self) -> bool {
        self.0.children().any(|n| n.kind() == SyntaxKind::TUPLE_PATTERN)
    }

    pub fn ty(&self) -> Option<TypeRef> {
        child::<TypeAnnotation>(&self.0).and_then(|a| a.ty())
    }

    pub fn initializer(&self) -> Option<String> {
        child::<Initializer>(&self.0).and_then(|i| i.value())
    }

    pub fn accessor_block(&self) -> Option<AccessorBlock> {
        child(&self.0)
    }
}

ast_node!(TypeAnnotation, TYPE_ANNOTATION);

impl TypeAnnotation {
    pub fn ty(&self) -> Option<TypeRef> {
        child(&self.0)
    }
}

ast_node!(Initializer, INITIALIZER);

impl Initializer {
    pub fn value(&self) -> Option<String> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::EXPR)
            .map(|n| n.text().to_string().trim().to_string())
    }
}

/// Accessor keywords recognised inside `{ ... }` after a variable or subscript.
const ACCESSORS: &[&str] = &["get", "set", "willSet", "didSet", "_read", "_modify", "init"];

ast_node!(AccessorBlock, ACCESSOR_BLOCK);

impl AccessorBlock {
    /// Tokens one brace level deep (directly inside the accessor block).
    fn top_level_tokens(&self) -> Vec<SyntaxToken> {
        let mut depth = 0usize;
        let mut out = Vec::new();
        for token in self
            .0
            .descendants_with_tokens()
            .filter_map(SyntaxElement::into_token)
        {
            match token.kind() {
                SyntaxKind::L_BRACE => depth += 1,
                SyntaxKind::R_BRACE => depth = depth.saturating_sub(1),
                k if k.is_trivia() => {}
                _ if depth == 1 => out.push(token),
                _ => {}
            }
        }
        out
    }

    /// `get`, `set`, `willSet`, ... in source order.
    ///
    /// Empty for a shorthand getter body (`var x: Int { 42 }`).
    pub fn accessors(&self) -> Vec<String> {
        let tokens = self.top_level_tokens();
        let starts_with_accessor = tokens.first().is_some_and(|t| {
            ACCESSORS.contains(&t.text())
                || t.kind() == SyntaxKind::AT
                || t.kind().is_access_keyword()
                || t.text() == "mutating"
                || t.text() == "nonmutating"
        });
        if !starts_with_accessor {
            return Vec::new();
        }
        tokens
            .iter()
            .filter(|t| t.kind() == SyntaxKind::IDENT && ACCESSORS.contains(&t.text()))
            .map(|t| t.text().to_string())
            .collect()
    }

    pub fn has_effect(&self, effect: &str) -> bool {
        self.top_level_tokens()
            .iter()
            .any(|t| t.kind() == SyntaxKind::IDENT && t.text() == effect)
    }
}

ast_node!(FuncDecl, FUNC_DECL);

impl DeclNode for FuncDecl {}

impl FuncDecl {
    pub fn params(&self) -> Vec<Param> {
        child::<ParamList>(&self.0)
            .map(|l| l.params())
            .unwrap_or_default()
    }

    pub fn return_type(&self) -> Option<TypeRef> {
        child::<ReturnClause>(&self.0).and_then(|r| r.ty())
    }

    pub fn has_effect(&self, effect: &str) -> bool {
        has_ident(&self.0, effect)
    }

    pub fn has_body(&self) -> bool {
        self.0.children().any(|n| n.kind() == SyntaxKind::CODE_BLOCK)
    }
}

ast_node!(InitDecl, INIT_DECL);

impl DeclNode for InitDecl {}

impl InitDecl {
    pub fn params(&self) -> Vec<Param> {
        child::<ParamList>(&self.0)
            .map(|l| l.params())
            .unwrap_or_default()
    }

    /// `init?` or `init!`
    pub fn is_failable(&self) -> bool {
        has_token(&self.0, SyntaxKind::QUESTION) || has_token(&self.0, SyntaxKind::BANG)
    }

    pub fn has_effect(&self, effect: &str) -> bool {
        has_ident(&self.0, effect)
    }
}

ast_node!(DeinitDecl, DEINIT_DECL);

impl DeclNode for DeinitDecl {}

ast_node!(SubscriptDecl, SUBSCRIPT_DECL);

impl DeclNode for SubscriptDecl {}

impl SubscriptDecl {
    pub fn params(&self) -> Vec<Param> {
        child::<ParamList>(&self.0)
            .map(|l| l.params())
            .unwrap_or_default()
    }

    pub fn return_type(&self) -> Option<TypeRef> {
        child::<ReturnClause>(&self.0).and_then(|r| r.ty())
    }

    pub fn accessor_block(&self) -> Option<AccessorBlock> {
        child(&self.0)
    }
}

ast_node!(EnumCaseDecl, ENUM_CASE_DECL);

impl DeclNode for EnumCaseDecl {}

impl EnumCaseDecl {
    pub fn elements(&self) -> Vec<EnumCaseElement> {
        children(&self.0)
    }
}

ast_node!(EnumCaseElement, ENUM_CASE_ELEMENT);

impl EnumCaseElement {
    pub fn name(&self) -> Option<String> {
        child::<Name>(&self.0).map(|n| n.text())
    }

    pub fn associated_values(&self) -> Vec<Param> {
        child::<ParamList>(&self.0)
            .map(|l| l.params())
            .unwrap_or_default()
    }

    pub fn raw_value(&self) -> Option<String> {
        let raw = self
            .0
            .children()
            .find(|n| n.kind() == SyntaxKind::RAW_VALUE)?;
        raw.children()
            .find(|n| n.kind() == SyntaxKind::EXPR)
            .map(|n| n.text().to_string().trim().to_string())
    }
}

ast_node!(ParamList, PARAM_LIST);

impl ParamList {
    pub fn params(&self) -> Vec<Param> {
        children(&self.0)
    }
}

ast_node!(Param, PARAM);

impl Param {
    /// Label and name tokens before the `:`, backticks removed.
    pub fn names(&self) -> Vec<String> {
        tokens(&self.0)
            .filter(|t| t.kind() == SyntaxKind::IDENT)
            .map(|t| unescape_ident(t.text()).to_string())
            .collect()
    }

    pub fn ty(&self) -> Option<TypeRef> {
        child::<TypeAnnotation>(&self.0).and_then(|a| a.ty())
    }

    pub fn is_variadic(&self) -> bool {
        has_token(&self.0, SyntaxKind::ELLIPSIS)
    }

    pub fn default_value(&self) -> Option<String> {
        child::<Initializer>(&self.0).and_then(|i| i.value())
    }
}

ast_node!(ReturnClause, RETURN_CLAUSE);

impl ReturnClause {
    pub fn ty(&self) -> Option<TypeRef> {
        child(&self.0)
    }
}

// ============================================================================
// Types
// ============================================================================

/// Any type reference node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef(SyntaxNode);

impl AstNode for TypeRef {
    fn can_cast(kind: SyntaxKind) -> bool {
        kind.is_type_node()
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        Self::can_cast(node.kind()).then(|| Self(node))
    }

    fn syntax(&self) -> &SyntaxNode {
        &self.0
    }
}

/// One dotted component of a named type: `Dictionary<K, V>` in `Swift.Dictionary<K, V>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameSegment {
    pub name: String,
    pub generic_args: Vec<TypeRef>,
}

/// An element of a tuple type or function parameter list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupleTypeElement {
    pub labels: Vec<String>,
    pub ty: Option<TypeRef>,
    pub is_variadic: bool,
}

impl TypeRef {
    pub fn kind(&self) -> SyntaxKind {
        self.0.kind()
    }

    /// Nested type children in order.
    pub fn types(&self) -> Vec<TypeRef> {
        children(&self.0)
    }

    pub fn inner(&self) -> Option<TypeRef> {
        child(&self.0)
    }

    /// Source text with whitespace normalised.
    pub fn text(&self) -> String {
        compact_text(&self.0)
    }

    /// Dotted segments of a NAMED_TYPE.
    pub fn segments(&self) -> Vec<NameSegment> {
        let mut segments: Vec<NameSegment> = Vec::new();
        let mut prefix = String::new();
        for element in self.0.children_with_tokens() {
            match element {
                rowan::NodeOrToken::Token(t) => match t.kind() {
                    SyntaxKind::IDENT | SyntaxKind::CLASS_KW => segments.push(NameSegment {
                        name: format!("{}{}", prefix, unescape_ident(t.text())),
                        generic_args: Vec::new(),
                    }),
                    SyntaxKind::OPERATOR => prefix.push_str(t.text()),
                    _ => {}
                },
                rowan::NodeOrToken::Node(n) if n.kind() == SyntaxKind::GENERIC_ARG_LIST => {
                    if let Some(last) = segments.last_mut() {
                        last.generic_args = children(&n);
                    }
                }
                rowan::NodeOrToken::Node(_) => {}
            }
        }
        segments
    }

    /// Elements of a TUPLE_TYPE.
    pub fn tuple_elements(&self) -> Vec<TupleTypeElement> {
        self.0
            .children()
            .filter(|n| n.kind() == SyntaxKind::TUPLE_TYPE_ELEMENT)
            .map(|n| TupleTypeElement {
                labels: tokens(&n)
                    .filter(|t| t.kind() == SyntaxKind::IDENT)
                    .map(|t| unescape_ident(t.text()).to_string())
                    .collect(),
                ty: child(&n),
                is_variadic: has_token(&n, SyntaxKind::ELLIPSIS),
            })
            .collect()
    }

    /// Direct IDENT tokens such as `async`, `throws`, `inout` specifiers.
    pub fn has_ident(&self, text: &str) -> bool {
        has_ident(&self.0, text)
    }

    pub fn has_token(&self, kind: SyntaxKind) -> bool {
        has_token(&self.0, kind)
    }

    pub fn attributes(&self) -> Vec<Attribute> {
        children(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn source(text: &str) -> SourceFile {
        let parse = parse(text);
        assert!(parse.ok(), "{:?}", parse.errors);
        SourceFile::cast(parse.syntax()).unwrap()
    }

    #[test]
    fn test_type_decl_accessors() {
        let file = source("@objc public final class Foo<T: Equatable>: Bar, Baz where T: Hashable { }");
        let Some(Item::Type(decl)) = file.items().next() else {
            panic!("expected type declaration");
        };
        assert_eq!(decl.kind(), SyntaxKind::CLASS_DECL);
        assert_eq!(decl.name().unwrap().text(), "Foo");
        assert_eq!(decl.attributes()[0].name(), "objc");
        let modifiers: Vec<_> = decl.modifiers().iter().map(|m| m.name()).collect();
        assert_eq!(modifiers, vec!["public", "final"]);
        let params = decl.generic_params().unwrap().params();
        assert_eq!(params[0].name().as_deref(), Some("T"));
        assert_eq!(decl.inheritance().unwrap().types().len(), 2);
        assert_eq!(decl.where_clause().unwrap().requirements().len(), 1);
    }

    #[test]
    fn test_modifier_detail_and_accessors() {
        let file = source("struct A {\n  public private(set) var x: Int { get set }\n}");
        let Some(Item::Type(decl)) = file.items().next() else {
            panic!("expected type declaration");
        };
        let Some(Item::Var(var)) = decl.member_block().unwrap().items().next() else {
            panic!("expected variable");
        };
        assert_eq!(var.modifiers()[1].detail().as_deref(), Some("set"));
        let binding = &var.bindings()[0];
        assert_eq!(binding.name().as_deref(), Some("x"));
        assert_eq!(binding.accessor_block().unwrap().accessors(), vec!["get", "set"]);
    }

    #[test]
    fn test_shorthand_getter_has_no_accessors() {
        let file = source("var x: Int { 42 }");
        let Some(Item::Var(var)) = file.items().next() else {
            panic!("expected variable");
        };
        let block = var.bindings()[0].accessor_block().unwrap();
        assert!(block.accessors().is_empty());
    }

    #[test]
    fn test_func_params() {
        let file = source("func move(from a: Int, _ b: Int = 2, rest: String...) async throws -> Bool {}");
        let Some(Item::Func(func)) = file.items().next() else {
            panic!("expected function");
        };
        let params = func.params();
        assert_eq!(params[0].names(), vec!["from", "a"]);
        assert_eq!(params[1].default_value().as_deref(), Some("2"));
        assert!(params[2].is_variadic());
        assert!(func.has_effect("async"));
        assert!(func.has_effect("throws"));
        assert_eq!(func.return_type().unwrap().text(), "Bool");
    }

    #[test]
    fn test_named_type_segments() {
        let file = source("var x: Swift.Dictionary<String, [Int]>");
        let Some(Item::Var(var)) = file.items().next() else {
            panic!("expected variable");
        };
        let ty = var.bindings()[0].ty().unwrap();
        let segments = ty.segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].name, "Dictionary");
        assert_eq!(segments[1].generic_args.len(), 2);
    }
}
