//! Composition: merging per-file partial declarations into one [`Model`].
//!
//! The composer runs once, single-threaded, over the complete set of
//! [`FileParserResult`]s of a run:
//!
//! ```text
//! flatten            declarations of every file, parents before children
//!     │
//!     ▼
//! canonical_names    extension targets resolved to qualified names
//!     │
//!     ▼
//! group_partials     one group per name: base + contributors
//!     │
//!     ▼
//! merge_group        members, annotations, inherited names
//!     │
//!     ▼
//! link_*             nesting, type references, inheritance closure
//! ```
//!
//! Every ordering decision follows [`MergeOrder`]: file path first, then
//! byte offset within the file. The order in which results are handed in
//! does not matter.

mod group;
mod link;
mod merge;


use crate::base::TextSize;
use crate::hir::diagnostics::DiagnosticCollector;
use crate::hir::ids::TypeId;
use crate::hir::model::{FileFacts, Model, Type};
use crate::hir::resolve::TypeIndex;
use crate::hir::symbols::{FileParserResult, Method, SourceLocation};

use group::{canonical_names, flatten, group_partials};
use link::{link_inheritance, link_nesting, resolve_names};
use merge::merge_group;

/// Position of a declaration in merge order: path, then byte offset.
///
/// When two declarations disagree, the one with the greater merge order
/// wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MergeOrder<'a> {
    pub path: &'a str,
    pub offset: TextSize,
}

impl<'a> MergeOrder<'a> {
    pub fn of(location: &'a SourceLocation) -> Self {
        Self {
            path: &location.file,
            offset: location.range.start(),
        }
    }
}

/// Compose the model from every file's partial declarations.
pub fn compose(results: &[FileParserResult]) -> Model {
    let mut files: Vec<&FileParserResult> = results.iter().collect();
    files.sort_by(|a, b| a.path.cmp(&b.path));

    let mut diagnostics = DiagnosticCollector::new();
    for file in &files {
        diagnostics.extend(file.diagnostics.iter().cloned());
    }

    let partials = flatten(&files);
    let canonical = canonical_names(&partials);
    let groups = group_partials(&partials, &canonical, &mut diagnostics);

    let mut types: Vec<Type> = Vec::with_capacity(groups.len());
    for (position, group) in groups.iter().enumerate() {
        types.push(merge_group(TypeId::new(position), group, &partials, &mut diagnostics));
    }

    let mut index = TypeIndex::new();
    for ty in &types {
        index.insert(&ty.qualified_name, ty.id);
    }
    link_nesting(&mut types, &index);

    let mut functions: Vec<Method> = files
        .iter()
        .flat_map(|file| file.functions.iter().cloned())
        .collect();
    resolve_names(&mut types, &mut functions, &index);
    link_inheritance(&mut types);

    let facts = files
        .iter()
        .map(|file| FileFacts {
            path: file.path.clone(),
            imports: file.imports.clone(),
            annotations: file.file_annotations.clone(),
        })
        .collect();

    tracing::debug!(
        files = files.len(),
        declarations = partials.len(),
        types = types.len(),
        external = types.iter().filter(|t| t.is_external).count(),
        diagnostics = diagnostics.diagnostics().len(),
        "composed model"
    );

    Model::new(types, functions, facts, diagnostics.take())
}
