//! Member extraction: variables, methods, subscripts, enum cases and associated types.

use crate::annotations::Annotations;
use crate::hir::type_name::TypeName;
use crate::parser::ast::{self, AstNode, DeclNode};
use crate::parser::{SyntaxKind, SyntaxNode};

use super::context::ExtractionContext;
use super::helpers::{
    access_level, attributes, direct_annotations, documentation, generic_parameters,
    generic_requirements, infer_literal_type, modifiers, parameters, selector, setter_access,
    type_name,
};
use super::types::{
    AssociatedType, AssociatedValue, EnumCase, Method, MethodKind, Subscript, Variable,
};

/// Effective annotations and documentation of a member node.
fn annotations_and_docs(
    ctx: &ExtractionContext<'_>,
    node: &SyntaxNode,
    is_enum_case: bool,
) -> (Annotations, Vec<String>) {
    let direct = direct_annotations(node, ctx.line_index);
    let annotations = ctx.effective_annotations(direct, node.text_range(), is_enum_case);
    (annotations, docs(ctx, node))
}

fn docs(ctx: &ExtractionContext<'_>, node: &SyntaxNode) -> Vec<String> {
    if ctx.parse_documentation {
        documentation(node, ctx.line_index)
    } else {
        Vec::new()
    }
}

fn has_code_block(node: &SyntaxNode) -> bool {
    node.children().any(|n| n.kind() == SyntaxKind::CODE_BLOCK)
}

/// Generic parameter names of the enclosing scopes plus the declaration's own.
fn scope_generics(ctx: &ExtractionContext<'_>, own: Option<ast::GenericParamList>) -> Vec<String> {
    let mut generics = ctx.generics_in_scope();
    if let Some(list) = own {
        generics.extend(list.params().iter().filter_map(|p| p.name()));
    }
    generics
}

// ============================================================================
// Variables
// ============================================================================

/// One Variable per named binding: `var a = 1, b: Int` yields two.
///
/// Tuple destructuring patterns are skipped.
pub(super) fn extract_variables(ctx: &mut ExtractionContext<'_>, var: &ast::VarDecl) -> Vec<Variable> {
    let node = var.syntax();
    let modifiers = modifiers(&var.modifiers());
    let attributes = attributes(&var.attributes());
    let read_access = ctx.member_access(access_level(&modifiers));
    let (annotations, documentation) = annotations_and_docs(ctx, node, false);
    let generics = ctx.generics_in_scope();
    let is_let = var.is_let();

    var.bindings()
        .iter()
        .filter_map(|binding| {
            let name = binding.name()?;
            let accessor_block = binding.accessor_block();
            let accessors = accessor_block
                .as_ref()
                .map(|b| b.accessors())
                .unwrap_or_default();
            let is_observed = accessors.iter().any(|a| a == "willSet" || a == "didSet");
            let is_computed = accessor_block.is_some() && !is_observed;
            let has_setter = accessors.iter().any(|a| a == "set" || a == "_modify");

            let write_access = if is_let || (is_computed && !has_setter) {
                None
            } else {
                Some(setter_access(&modifiers).unwrap_or(read_access))
            };

            let default_value = binding.initializer();
            let type_name = binding
                .ty()
                .map(|t| type_name(&t, &generics))
                .or_else(|| default_value.as_deref().and_then(infer_literal_type));

            Some(Variable {
                name,
                type_name,
                is_let,
                is_computed,
                read_access,
                write_access,
                default_value,
                is_async: accessor_block.as_ref().is_some_and(|b| b.has_effect("async")),
                throws: accessor_block.as_ref().is_some_and(|b| b.has_effect("throws")),
                modifiers: modifiers.clone(),
                attributes: attributes.clone(),
                annotations: annotations.clone(),
                documentation: documentation.clone(),
                location: ctx.location(node.text_range()),
            })
        })
        .collect()
}

// ============================================================================
// Methods
// ============================================================================

pub(super) fn extract_function(ctx: &mut ExtractionContext<'_>, func: &ast::FuncDecl) -> Option<Method> {
    let node = func.syntax();
    let short_name = func.name()?.text();
    let generics = scope_generics(ctx, func.generic_params());
    let parameters = parameters(&func.params(), &generics, ctx.line_index, false);
    let modifiers = modifiers(&func.modifiers());
    let (annotations, documentation) = annotations_and_docs(ctx, node, false);

    Some(Method {
        name: selector(&short_name, &parameters),
        short_name,
        parameters,
        return_type: Some(
            func.return_type()
                .map(|t| type_name(&t, &generics))
                .unwrap_or_else(|| TypeName::named("Void", Vec::new())),
        ),
        kind: MethodKind::Function,
        is_failable: false,
        is_async: func.has_effect("async"),
        throws: func.has_effect("throws"),
        rethrows: func.has_effect("rethrows"),
        access: ctx.member_access(access_level(&modifiers)),
        generic_parameters: generic_parameters(func.generic_params(), &generics),
        generic_requirements: generic_requirements(func.where_clause(), &generics),
        modifiers,
        attributes: attributes(&func.attributes()),
        annotations,
        documentation,
        location: ctx.location(node.text_range()),
        has_body: func.has_body(),
    })
}

pub(super) fn extract_initializer(ctx: &mut ExtractionContext<'_>, init: &ast::InitDecl) -> Method {
    let node = init.syntax();
    let generics = scope_generics(ctx, init.generic_params());
    let parameters = parameters(&init.params(), &generics, ctx.line_index, false);
    let modifiers = modifiers(&init.modifiers());
    let (annotations, documentation) = annotations_and_docs(ctx, node, false);

    Method {
        name: selector("init", &parameters),
        short_name: "init".to_string(),
        parameters,
        return_type: None,
        kind: MethodKind::Initializer,
        is_failable: init.is_failable(),
        is_async: init.has_effect("async"),
        throws: init.has_effect("throws"),
        rethrows: init.has_effect("rethrows"),
        access: ctx.member_access(access_level(&modifiers)),
        generic_parameters: generic_parameters(init.generic_params(), &generics),
        generic_requirements: generic_requirements(init.where_clause(), &generics),
        modifiers,
        attributes: attributes(&init.attributes()),
        annotations,
        documentation,
        location: ctx.location(node.text_range()),
        has_body: has_code_block(node),
    }
}

pub(super) fn extract_deinitializer(ctx: &mut ExtractionContext<'_>, deinit: &ast::DeinitDecl) -> Method {
    let node = deinit.syntax();
    let modifiers = modifiers(&deinit.modifiers());
    let (annotations, documentation) = annotations_and_docs(ctx, node, false);

    Method {
        name: "deinit".to_string(),
        short_name: "deinit".to_string(),
        parameters: Vec::new(),
        return_type: None,
        kind: MethodKind::Deinitializer,
        is_failable: false,
        is_async: false,
        throws: false,
        rethrows: false,
        access: ctx.member_access(access_level(&modifiers)),
        generic_parameters: Vec::new(),
        generic_requirements: Vec::new(),
        modifiers,
        attributes: attributes(&deinit.attributes()),
        annotations,
        documentation,
        location: ctx.location(node.text_range()),
        has_body: has_code_block(node),
    }
}

// ============================================================================
// Subscripts
// ============================================================================

pub(super) fn extract_subscript(
    ctx: &mut ExtractionContext<'_>,
    subscript: &ast::SubscriptDecl,
) -> Subscript {
    let node = subscript.syntax();
    let generics = scope_generics(ctx, subscript.generic_params());
    let modifiers = modifiers(&subscript.modifiers());
    let read_access = ctx.member_access(access_level(&modifiers));
    let (annotations, documentation) = annotations_and_docs(ctx, node, false);

    let has_setter = subscript
        .accessor_block()
        .is_some_and(|b| b.accessors().iter().any(|a| a == "set" || a == "_modify"));

    Subscript {
        parameters: parameters(&subscript.params(), &generics, ctx.line_index, true),
        return_type: subscript.return_type().map(|t| type_name(&t, &generics)),
        read_access,
        write_access: has_setter.then(|| setter_access(&modifiers).unwrap_or(read_access)),
        generic_parameters: generic_parameters(subscript.generic_params(), &generics),
        generic_requirements: generic_requirements(subscript.where_clause(), &generics),
        modifiers,
        attributes: attributes(&subscript.attributes()),
        annotations,
        documentation,
        location: ctx.location(node.text_range()),
    }
}

// ============================================================================
// Enum cases
// ============================================================================

/// One EnumCase per element: `case a, b(Int)` yields two.
pub(super) fn extract_enum_cases(
    ctx: &mut ExtractionContext<'_>,
    case: &ast::EnumCaseDecl,
) -> Vec<EnumCase> {
    let node = case.syntax();
    let shared = direct_annotations(node, ctx.line_index);
    let documentation = docs(ctx, node);
    let is_indirect = case.modifiers().iter().any(|m| m.name() == "indirect");
    let generics = ctx.generics_in_scope();

    case.elements()
        .iter()
        .filter_map(|element| {
            let name = element.name()?;
            let mut direct = direct_annotations(element.syntax(), ctx.line_index);
            direct.fill_from(&shared);
            let annotations = ctx.effective_annotations(direct, node.text_range(), true);

            let associated_values = element
                .associated_values()
                .iter()
                .map(|param| {
                    let names = param.names();
                    let (external_name, local_name) = match names.as_slice() {
                        [external, local, ..] => (Some(external.clone()), Some(local.clone())),
                        [name] => (Some(name.clone()), Some(name.clone())),
                        [] => (None, None),
                    };
                    AssociatedValue {
                        external_name: external_name.filter(|n| n != "_"),
                        local_name,
                        type_name: param.ty().map(|t| type_name(&t, &generics)),
                        default_value: param.default_value(),
                        annotations: direct_annotations(param.syntax(), ctx.line_index),
                    }
                })
                .collect();

            Some(EnumCase {
                name,
                associated_values,
                raw_value: element.raw_value(),
                is_indirect,
                annotations,
                documentation: documentation.clone(),
                location: ctx.location(element.syntax().text_range()),
            })
        })
        .collect()
}

// ============================================================================
// Associated types
// ============================================================================

pub(super) fn extract_associated_type(
    ctx: &mut ExtractionContext<'_>,
    assoc: &ast::AssociatedTypeDecl,
) -> Option<AssociatedType> {
    let node = assoc.syntax();
    let name = assoc.name()?.text();
    let generics = ctx.generics_in_scope();
    let (annotations, documentation) = annotations_and_docs(ctx, node, false);

    let mut constraints: Vec<TypeName> = assoc
        .inheritance()
        .map(|c| c.types())
        .unwrap_or_default()
        .iter()
        .map(|t| type_name(t, &generics))
        .collect();
    let constraint = match constraints.len() {
        0 => None,
        1 => constraints.pop(),
        _ => Some(TypeName::composition(constraints)),
    };

    Some(AssociatedType {
        name,
        constraint,
        default_type: assoc.default_type().map(|t| type_name(&t, &generics)),
        annotations,
        documentation,
        location: ctx.location(node.text_range()),
    })
}
