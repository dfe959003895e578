//! Type, extension and typealias extraction.

use crate::annotations::Annotations;
use crate::parser::SyntaxKind;
use crate::parser::ast::{self, AstNode, DeclNode};

use super::context::{Container, ExtractionContext};
use super::extract::{Collected, extract_item};
use super::helpers::{
    access_level, attributes, direct_annotations, documentation, generic_parameters,
    generic_requirements, inherited_types, modifiers, type_name,
};
use super::types::{AccessLevel, DeclKind, Declaration, Modifier};

fn decl_kind(kind: SyntaxKind) -> DeclKind {
    match kind {
        SyntaxKind::STRUCT_DECL => DeclKind::Struct,
        SyntaxKind::ENUM_DECL => DeclKind::Enum,
        SyntaxKind::PROTOCOL_DECL => DeclKind::Protocol,
        _ => DeclKind::Class,
    }
}

/// Annotations and documentation of a declaration node.
fn annotations_and_docs(
    ctx: &ExtractionContext<'_>,
    node: &crate::parser::SyntaxNode,
) -> (Annotations, Vec<String>) {
    let direct = direct_annotations(node, ctx.line_index);
    let annotations = ctx.effective_annotations(direct, node.text_range(), false);
    let docs = if ctx.parse_documentation {
        documentation(node, ctx.line_index)
    } else {
        Vec::new()
    };
    (annotations, docs)
}

/// Walk a member block inside a pushed scope.
fn extract_body(
    ctx: &mut ExtractionContext<'_>,
    scope: &str,
    container: Container,
    block: Option<ast::MemberBlock>,
) -> Collected {
    let mut collected = Collected::default();
    ctx.push_scope(scope, container);
    if let Some(block) = block {
        for item in block.items() {
            extract_item(&mut collected, ctx, &item);
        }
    }
    ctx.pop_scope();
    collected
}

/// `class`, `struct`, `enum`, `protocol` or `actor` with its members.
pub(super) fn extract_type_decl(ctx: &mut ExtractionContext<'_>, decl: &ast::TypeDecl) -> Option<Declaration> {
    let node = decl.syntax();
    let name = decl.name()?.text();
    let kind = decl_kind(decl.kind());

    let mut modifiers = modifiers(&decl.modifiers());
    if decl.kind() == SyntaxKind::ACTOR_DECL {
        modifiers.push(Modifier::new("actor"));
    }
    let access = ctx.member_access(access_level(&modifiers));

    let own_generics = generic_parameters(decl.generic_params(), &[]);
    let own_names: Vec<String> = own_generics.iter().map(|g| g.name.clone()).collect();
    let mut generics = ctx.generics_in_scope();
    generics.extend(own_names.iter().cloned());

    let (annotations, documentation) = annotations_and_docs(ctx, node);
    let qualified_name = ctx.qualified_name(&name);
    let parent = ctx.parent_name();

    let container = Container {
        kind,
        annotations: annotations.clone(),
        default_access: (kind == DeclKind::Protocol).then_some(access),
        generics: own_names,
    };
    let body = extract_body(ctx, &name, container, decl.member_block());

    Some(Declaration {
        kind,
        name,
        qualified_name,
        parent,
        access,
        modifiers,
        attributes: attributes(&decl.attributes()),
        inherited_types: inherited_types(decl.inheritance(), &generics),
        generic_parameters: generic_parameters(decl.generic_params(), &generics),
        generic_requirements: generic_requirements(decl.where_clause(), &generics),
        members: body.members,
        nested: body.declarations,
        aliased: None,
        location: ctx.location(node.text_range()),
        annotations,
        documentation,
    })
}

/// `extension Target: Protocols where ... { members }`
pub(super) fn extract_extension(ctx: &mut ExtractionContext<'_>, ext: &ast::ExtensionDecl) -> Option<Declaration> {
    let node = ext.syntax();
    let target = type_name(&ext.extended_type()?, &[]);
    let name = target
        .base_name()
        .map(str::to_string)
        .unwrap_or_else(|| target.name.clone());

    let modifiers = modifiers(&ext.modifiers());
    let explicit = access_level(&modifiers);
    let (annotations, documentation) = annotations_and_docs(ctx, node);
    let qualified_name = ctx.qualified_name(&name);
    let parent = ctx.parent_name();

    let container = Container {
        kind: DeclKind::Extension,
        annotations: annotations.clone(),
        default_access: explicit,
        generics: Vec::new(),
    };
    let body = extract_body(ctx, &name, container, ext.member_block());

    Some(Declaration {
        kind: DeclKind::Extension,
        name,
        qualified_name,
        parent,
        access: explicit.unwrap_or_default(),
        modifiers,
        attributes: attributes(&ext.attributes()),
        inherited_types: inherited_types(ext.inheritance(), &[]),
        generic_parameters: Vec::new(),
        generic_requirements: generic_requirements(ext.where_clause(), &[]),
        members: body.members,
        nested: body.declarations,
        aliased: None,
        location: ctx.location(node.text_range()),
        annotations,
        documentation,
    })
}

/// `typealias Name<T> = Aliased`
pub(super) fn extract_typealias(
    ctx: &mut ExtractionContext<'_>,
    alias: &ast::TypealiasDecl,
) -> Option<Declaration> {
    let node = alias.syntax();
    let name = alias.name()?.text();
    let modifiers = modifiers(&alias.modifiers());
    let access: AccessLevel = ctx.member_access(access_level(&modifiers));

    let own_generics = generic_parameters(alias.generic_params(), &[]);
    let mut generics = ctx.generics_in_scope();
    generics.extend(own_generics.iter().map(|g| g.name.clone()));

    let (annotations, documentation) = annotations_and_docs(ctx, node);

    Some(Declaration {
        kind: DeclKind::Typealias,
        qualified_name: ctx.qualified_name(&name),
        parent: ctx.parent_name(),
        name,
        access,
        modifiers,
        attributes: attributes(&alias.attributes()),
        inherited_types: Vec::new(),
        generic_parameters: own_generics,
        generic_requirements: generic_requirements(alias.where_clause(), &generics),
        members: Vec::new(),
        nested: Vec::new(),
        aliased: alias.aliased_type().map(|t| type_name(&t, &generics)),
        location: ctx.location(node.text_range()),
        annotations,
        documentation,
    })
}
