//! Merging a group of partial declarations into one [`Type`].

use indexmap::{IndexMap, IndexSet};
use rustc_hash::{FxHashMap, FxHashSet};

use super::MergeOrder;
use super::group::{Group, Partial};
use crate::annotations::Annotations;
use crate::hir::diagnostics::DiagnosticCollector;
use crate::hir::ids::TypeId;
use crate::hir::model::Type;
use crate::hir::resolve::simple_name;
use crate::hir::symbols::{DeclKind, Declaration, Member};
use crate::hir::type_name::TypeName;

/// Build the composed type for `group`. Links are filled in later.
pub(super) fn merge_group(
    id: TypeId,
    group: &Group,
    partials: &[Partial<'_>],
    diagnostics: &mut DiagnosticCollector,
) -> Type {
    let base = group.base.map(|position| partials[position].decl);
    let contributors: Vec<&Declaration> = group
        .contributors
        .iter()
        .map(|position| partials[*position].decl)
        .collect();
    let sources: Vec<&Declaration> = base.into_iter().chain(contributors.iter().copied()).collect();

    let members = merge_members(&group.name, &sources, diagnostics);
    let annotations = merge_annotations(&group.name, base, &contributors, diagnostics);

    let mut seen = FxHashSet::default();
    let inherited_types: Vec<TypeName> = sources
        .iter()
        .flat_map(|decl| decl.inherited_types.iter())
        .filter(|t| seen.insert(t.name.clone()))
        .cloned()
        .collect();

    let extensions = contributors
        .iter()
        .filter(|decl| decl.is_extension())
        .map(|decl| decl.location.clone())
        .collect();

    let first = base.or_else(|| contributors.first().copied());
    let documentation = match base {
        Some(base) => base.documentation.clone(),
        None => contributors
            .iter()
            .find(|decl| !decl.documentation.is_empty())
            .map(|decl| decl.documentation.clone())
            .unwrap_or_default(),
    };

    Type {
        id,
        kind: base.map_or(DeclKind::Extension, |b| b.kind),
        name: simple_name(&group.name).to_string(),
        qualified_name: group.name.clone(),
        parent: None,
        access: first.map(|d| d.access).unwrap_or_default(),
        modifiers: base.map(|b| b.modifiers.clone()).unwrap_or_default(),
        attributes: base.map(|b| b.attributes.clone()).unwrap_or_default(),
        inherited_types,
        inherits: Vec::new(),
        superclass: None,
        based: IndexSet::new(),
        all_inherited: Vec::new(),
        implements: Vec::new(),
        generic_parameters: base.map(|b| b.generic_parameters.clone()).unwrap_or_default(),
        generic_requirements: base
            .map(|b| b.generic_requirements.clone())
            .unwrap_or_default(),
        members,
        contained: Vec::new(),
        aliased: base.and_then(|b| b.aliased.clone()),
        is_external: base.is_none(),
        location: base.map(|b| b.location.clone()),
        extensions,
        annotations,
        documentation,
    }
}

/// Union of members keyed by signature.
///
/// A repeated signature keeps its first position; the member later in
/// merge order wins and the other is reported.
fn merge_members(
    type_name: &str,
    sources: &[&Declaration],
    diagnostics: &mut DiagnosticCollector,
) -> Vec<Member> {
    let mut merged: IndexMap<String, Member> = IndexMap::new();

    for member in sources.iter().flat_map(|decl| decl.members.iter()) {
        let signature = member.signature();
        let Some(existing) = merged.get_mut(&signature) else {
            merged.insert(signature, member.clone());
            continue;
        };
        if MergeOrder::of(member.location()) >= MergeOrder::of(existing.location()) {
            let loser = std::mem::replace(existing, member.clone());
            let (winner, loser) = (member.location(), loser.location().clone());
            diagnostics.member_conflict(
                type_name,
                &signature,
                (&winner.file, winner.range),
                (&loser.file, loser.range),
            );
        } else {
            let (winner, loser) = (existing.location(), member.location());
            diagnostics.member_conflict(
                type_name,
                &signature,
                (&winner.file, winner.range),
                (&loser.file, loser.range),
            );
        }
    }
    merged.into_values().collect()
}

/// Type annotations: the base's effective set, then keys added by contributors.
///
/// The base always wins. Among contributors the later one in merge order
/// wins. A differing value that loses is reported at the loser's location.
fn merge_annotations(
    type_name: &str,
    base: Option<&Declaration>,
    contributors: &[&Declaration],
    diagnostics: &mut DiagnosticCollector,
) -> Annotations {
    let mut merged = base.map(|b| b.annotations.clone()).unwrap_or_default();
    // key -> contributor that set it; None for the base
    let mut origin: FxHashMap<String, Option<usize>> =
        merged.keys().map(|key| (key.clone(), None)).collect();

    for (position, decl) in contributors.iter().enumerate() {
        for (key, value) in decl.annotations.iter() {
            match origin.get(key).copied() {
                None => {
                    merged.insert(key.clone(), value.clone());
                    origin.insert(key.clone(), Some(position));
                }
                Some(None) => {
                    if merged.get(key) != Some(value) {
                        let location = &decl.location;
                        diagnostics.annotation_conflict(type_name, key, &location.file, location.range);
                    }
                }
                Some(Some(previous)) => {
                    if merged.get(key) != Some(value) {
                        let location = &contributors[previous].location;
                        diagnostics.annotation_conflict(type_name, key, &location.file, location.range);
                        merged.insert(key.clone(), value.clone());
                    }
                    origin.insert(key.clone(), Some(position));
                }
            }
        }
    }
    merged
}
