//! Flattening partial declarations and grouping them by canonical name.

use rustc_hash::FxHashMap;

use crate::hir::diagnostics::DiagnosticCollector;
use crate::hir::ids::TypeId;
use crate::hir::resolve::{ResolveResult, TypeIndex};
use crate::hir::symbols::{Declaration, FileParserResult};

/// One declaration in merge order, with its lexical parent.
#[derive(Debug)]
pub(super) struct Partial<'a> {
    pub decl: &'a Declaration,
    /// Position of the enclosing declaration
    pub parent: Option<usize>,
    /// Declared somewhere inside an extension body
    pub in_extension: bool,
}

/// Declarations of every file, parents before children.
///
/// Files must already be in path order; within a file preorder is byte
/// offset order, so the result is merge order.
pub(super) fn flatten<'a>(files: &[&'a FileParserResult]) -> Vec<Partial<'a>> {
    let mut out = Vec::new();
    for file in files {
        for decl in &file.declarations {
            push_partial(&mut out, decl, None, false);
        }
    }
    out
}

fn push_partial<'a>(
    out: &mut Vec<Partial<'a>>,
    decl: &'a Declaration,
    parent: Option<usize>,
    in_extension: bool,
) {
    let position = out.len();
    out.push(Partial {
        decl,
        parent,
        in_extension,
    });
    let nested_in_extension = in_extension || decl.is_extension();
    for nested in &decl.nested {
        push_partial(out, nested, Some(position), nested_in_extension);
    }
}

pub(super) fn join(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", scope, name)
    }
}

// ============================================================================
// CANONICAL NAMES
// ============================================================================

/// Names known so far, with placeholder ids for the resolver.
#[derive(Default)]
struct NameTable {
    index: TypeIndex,
    names: Vec<String>,
}

impl NameTable {
    fn register(&mut self, name: &str) {
        if self.index.insert(name, TypeId::new(self.names.len())) {
            self.names.push(name.to_string());
        }
    }

    fn name(&self, id: TypeId) -> Option<&str> {
        self.names.get(id.index()).map(String::as_str)
    }

    /// Extension target seen from `scope`: exact or scope walk, then unique suffix.
    fn resolve_target(&self, scope: &str, target: &str) -> Option<String> {
        match self.index.resolver_for_scope(scope).resolve_with_suffix(target) {
            ResolveResult::Found(id) => self.name(id).map(str::to_string),
            _ => None,
        }
    }
}

/// Qualified name of the composed type each partial contributes to.
///
/// Types declared outside extensions keep their lexical name. Extension
/// targets are resolved against the names known so far; declarations
/// nested in an extension hang off the extension's target. Extensions
/// that can never resolve name an external type by their literal target,
/// one at a time in merge order, since each new name may unblock others.
pub(super) fn canonical_names(partials: &[Partial<'_>]) -> Vec<String> {
    let mut table = NameTable::default();
    let mut canonical: Vec<Option<String>> = vec![None; partials.len()];

    for (position, partial) in partials.iter().enumerate() {
        if !partial.in_extension && !partial.decl.is_extension() {
            table.register(&partial.decl.qualified_name);
            canonical[position] = Some(partial.decl.qualified_name.clone());
        }
    }

    loop {
        let mut pending = false;
        let mut progress = false;

        for (position, partial) in partials.iter().enumerate() {
            if canonical[position].is_some() {
                continue;
            }
            pending = true;
            let scope = match partial.parent {
                Some(parent) => match &canonical[parent] {
                    Some(scope) => scope.as_str(),
                    None => continue,
                },
                None => "",
            };
            let name = if partial.decl.is_extension() {
                match table.resolve_target(scope, &partial.decl.name) {
                    Some(name) => name,
                    None => continue,
                }
            } else {
                join(scope, &partial.decl.name)
            };
            table.register(&name);
            canonical[position] = Some(name);
            progress = true;
        }

        if !pending {
            break;
        }
        if !progress {
            let next = partials.iter().enumerate().find(|(position, partial)| {
                canonical[*position].is_none()
                    && partial.parent.is_none_or(|p| canonical[p].is_some())
            });
            let Some((position, partial)) = next else {
                break;
            };
            let scope = partial
                .parent
                .and_then(|p| canonical[p].as_deref())
                .unwrap_or("");
            let name = join(scope, &partial.decl.name);
            tracing::trace!(target_name = %name, "extension of external type");
            table.register(&name);
            canonical[position] = Some(name);
        }
    }

    canonical
        .into_iter()
        .zip(partials)
        .map(|(name, partial)| name.unwrap_or_else(|| partial.decl.qualified_name.clone()))
        .collect()
}

// ============================================================================
// GROUPING
// ============================================================================

/// All partials contributing to one composed type.
#[derive(Debug)]
pub(super) struct Group {
    pub name: String,
    /// First non-extension declaration in merge order
    pub base: Option<usize>,
    /// Extensions and duplicate bases, in merge order
    pub contributors: Vec<usize>,
}

/// Group partials by canonical name. Group order is first appearance.
pub(super) fn group_partials(
    partials: &[Partial<'_>],
    canonical: &[String],
    diagnostics: &mut DiagnosticCollector,
) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    let mut by_name: FxHashMap<&str, usize> = FxHashMap::default();

    for (position, partial) in partials.iter().enumerate() {
        let name = canonical[position].as_str();
        let slot = *by_name.entry(name).or_insert_with(|| {
            groups.push(Group {
                name: name.to_string(),
                base: None,
                contributors: Vec::new(),
            });
            groups.len() - 1
        });
        let group = &mut groups[slot];

        if partial.decl.is_extension() {
            group.contributors.push(position);
            continue;
        }
        match group.base {
            None => group.base = Some(position),
            Some(existing) => {
                let existing = &partials[existing].decl.location;
                let location = &partial.decl.location;
                diagnostics.duplicate_declaration(
                    name,
                    &location.file,
                    location.range,
                    &existing.file,
                    existing.range,
                );
                group.contributors.push(position);
            }
        }
    }
    groups
}
