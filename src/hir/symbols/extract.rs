//! Per-file extraction entry point and AST item dispatch.

use std::sync::Arc;

use crate::annotations::FileRegions;
use crate::hir::diagnostics::DiagnosticCollector;
use crate::parser::ast::{self, AstNode};
use crate::syntax::SyntaxFile;

use super::context::ExtractionContext;
use super::extract_leaf::extract_import;
use super::extract_member::{
    extract_associated_type, extract_deinitializer, extract_enum_cases, extract_function,
    extract_initializer, extract_subscript, extract_variables,
};
use super::extract_type::{extract_extension, extract_type_decl, extract_typealias};
use super::types::{Declaration, FileParserResult, Import, Member};

/// Options that change what extraction produces (and therefore the cache key).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Collect `///` and `/** */` documentation comments
    pub parse_documentation: bool,
}

/// Items gathered from one declaration scope (file or member block).
#[derive(Debug, Default)]
pub(super) struct Collected {
    pub declarations: Vec<Declaration>,
    pub members: Vec<Member>,
    pub imports: Vec<Import>,
}

/// Extract the partial declarations of one parsed file.
///
/// Never consults other files. Parse errors and unmatched block markers
/// are returned as diagnostics on the result.
pub fn extract_file(path: &str, syntax: &SyntaxFile, options: ExtractOptions) -> FileParserResult {
    let path: Arc<str> = Arc::from(path);
    let mut diagnostics = DiagnosticCollector::new();

    for error in syntax.errors() {
        diagnostics.parse_error(&path, error.range, &error.message);
    }

    let comments = syntax.comments();
    let file_end = syntax.parse().syntax().text_range().end();
    let regions = FileRegions::collect(
        comments.iter().map(|c| (c.text.as_str(), c.range)),
        file_end,
    );
    for issue in &regions.issues {
        diagnostics.unmatched_block_marker(&path, issue.range, &issue.message);
    }

    let mut ctx = ExtractionContext::new(
        path.clone(),
        syntax.line_index(),
        regions,
        options.parse_documentation,
    );

    let mut collected = Collected::default();
    if let Some(source_file) = syntax.source_file() {
        for item in source_file.items() {
            extract_item(&mut collected, &mut ctx, &item);
        }
    }

    tracing::trace!(
        file = %path,
        declarations = collected.declarations.len(),
        imports = collected.imports.len(),
        "extracted file"
    );

    FileParserResult {
        path,
        declarations: collected.declarations,
        // Only functions survive at file scope; global variables are not modelled
        functions: collected
            .members
            .into_iter()
            .filter_map(|m| match m {
                Member::Method(method) => Some(method),
                _ => None,
            })
            .collect(),
        imports: collected.imports,
        file_annotations: ctx.regions.file.clone(),
        diagnostics: diagnostics.take(),
    }
}

/// Dispatch extraction for a single AST item.
pub(super) fn extract_item(out: &mut Collected, ctx: &mut ExtractionContext<'_>, item: &ast::Item) {
    match item {
        ast::Item::Import(import) => out.imports.push(extract_import(import)),
        ast::Item::Type(decl) => out.declarations.extend(extract_type_decl(ctx, decl)),
        ast::Item::Extension(ext) => out.declarations.extend(extract_extension(ctx, ext)),
        ast::Item::Typealias(alias) => out.declarations.extend(extract_typealias(ctx, alias)),
        ast::Item::AssociatedType(assoc) => {
            if let Some(assoc) = extract_associated_type(ctx, assoc) {
                out.members.push(Member::AssociatedType(assoc));
            }
        }
        ast::Item::Var(var) => out
            .members
            .extend(extract_variables(ctx, var).into_iter().map(Member::Variable)),
        ast::Item::Func(func) => {
            if let Some(method) = extract_function(ctx, func) {
                out.members.push(Member::Method(method));
            }
        }
        ast::Item::Init(init) => out.members.push(Member::Method(extract_initializer(ctx, init))),
        ast::Item::Deinit(deinit) => out
            .members
            .push(Member::Method(extract_deinitializer(ctx, deinit))),
        ast::Item::Subscript(subscript) => out
            .members
            .push(Member::Subscript(extract_subscript(ctx, subscript))),
        ast::Item::EnumCase(case) => out
            .members
            .extend(extract_enum_cases(ctx, case).into_iter().map(Member::EnumCase)),
    }
    tracing::trace!(kind = ?item.syntax().kind(), "extracted item");
}
