//! Linking composed types: nesting, type name resolution and inheritance.

use indexmap::IndexSet;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::base::constants::NAME_SEPARATOR;
use crate::hir::ids::TypeId;
use crate::hir::model::Type;
use crate::hir::resolve::{TypeIndex, parent_scope};
use crate::hir::symbols::{
    DeclKind, GenericParameter, GenericRequirement, Member, Method, MethodParameter,
};
use crate::hir::type_name::{TypeName, TypeNameKind};

// ============================================================================
// NESTING
// ============================================================================

/// Fill `parent` and `contained` from qualified names.
pub(super) fn link_nesting(types: &mut [Type], index: &TypeIndex) {
    for position in 0..types.len() {
        let parent = parent_scope(&types[position].qualified_name)
            .and_then(|scope| index.lookup_qualified(scope));
        types[position].parent = parent;
        if let Some(parent) = parent {
            let id = types[position].id;
            types[parent.index()].contained.push(id);
        }
    }
}

// ============================================================================
// NAME RESOLUTION
// ============================================================================

/// What a typealias points at, resolved without following other aliases.
#[derive(Debug)]
struct AliasTarget {
    target: Option<TypeId>,
    aliased: TypeName,
}

struct NameContext<'a> {
    index: &'a TypeIndex,
    aliases: FxHashMap<TypeId, AliasTarget>,
}

impl NameContext<'_> {
    /// Final non-alias type behind `id`, or `id` itself when the chain is
    /// unresolved or cyclic.
    fn follow_alias(&self, id: TypeId) -> TypeId {
        let mut visited = FxHashSet::default();
        let mut current = id;
        while let Some(alias) = self.aliases.get(&current) {
            if !visited.insert(current) {
                return id;
            }
            match alias.target {
                Some(next) => current = next,
                None => return id,
            }
        }
        current
    }

    /// Resolve every named part of `name` from `scope`.
    fn resolve(&self, name: &mut TypeName, scope: &str, generics: &[String]) {
        let resolver = self.index.resolver_for_scope(scope);
        name.walk_mut(&mut |t| {
            let base = match &t.kind {
                TypeNameKind::Named { base, .. } => base.clone(),
                _ => return,
            };
            if t.is_generic_parameter {
                return;
            }
            let head = base.split(NAME_SEPARATOR).next().unwrap_or(base.as_str());
            if generics.iter().any(|g| g == head) {
                t.is_generic_parameter = true;
                return;
            }
            let Some(id) = resolver.resolve(&base).id() else {
                return;
            };
            t.resolved = Some(self.follow_alias(id));
            if let Some(alias) = self.aliases.get(&id) {
                t.actual = Some(Box::new(alias.aliased.clone()));
            }
        });
    }

    fn resolve_opt(&self, name: &mut Option<TypeName>, scope: &str, generics: &[String]) {
        if let Some(name) = name {
            self.resolve(name, scope, generics);
        }
    }

    fn resolve_generics(
        &self,
        parameters: &mut [GenericParameter],
        requirements: &mut [GenericRequirement],
        scope: &str,
        generics: &[String],
    ) {
        for parameter in parameters {
            self.resolve_opt(&mut parameter.constraint, scope, generics);
        }
        for requirement in requirements {
            self.resolve(&mut requirement.left, scope, generics);
            self.resolve(&mut requirement.right, scope, generics);
        }
    }

    fn resolve_parameters(&self, parameters: &mut [MethodParameter], scope: &str, generics: &[String]) {
        for parameter in parameters {
            self.resolve_opt(&mut parameter.type_name, scope, generics);
        }
    }

    fn resolve_method(&self, method: &mut Method, scope: &str, generics: &[String]) {
        let generics = with_own(generics, &method.generic_parameters);
        self.resolve_parameters(&mut method.parameters, scope, &generics);
        self.resolve_opt(&mut method.return_type, scope, &generics);
        self.resolve_generics(
            &mut method.generic_parameters,
            &mut method.generic_requirements,
            scope,
            &generics,
        );
    }

    fn resolve_member(&self, member: &mut Member, scope: &str, generics: &[String]) {
        match member {
            Member::Variable(variable) => self.resolve_opt(&mut variable.type_name, scope, generics),
            Member::Method(method) => self.resolve_method(method, scope, generics),
            Member::Subscript(subscript) => {
                let generics = with_own(generics, &subscript.generic_parameters);
                self.resolve_parameters(&mut subscript.parameters, scope, &generics);
                self.resolve_opt(&mut subscript.return_type, scope, &generics);
                self.resolve_generics(
                    &mut subscript.generic_parameters,
                    &mut subscript.generic_requirements,
                    scope,
                    &generics,
                );
            }
            Member::EnumCase(case) => {
                for value in &mut case.associated_values {
                    self.resolve_opt(&mut value.type_name, scope, generics);
                }
            }
            Member::AssociatedType(associated) => {
                self.resolve_opt(&mut associated.constraint, scope, generics);
                self.resolve_opt(&mut associated.default_type, scope, generics);
            }
        }
    }

    fn resolve_type(&self, ty: &mut Type, generics: &[String]) {
        let scope = ty.qualified_name.clone();
        let outer = parent_scope(&scope).unwrap_or("");

        for inherited in &mut ty.inherited_types {
            self.resolve(inherited, outer, generics);
        }
        self.resolve_opt(&mut ty.aliased, outer, generics);
        self.resolve_generics(
            &mut ty.generic_parameters,
            &mut ty.generic_requirements,
            &scope,
            generics,
        );
        for member in &mut ty.members {
            self.resolve_member(member, &scope, generics);
        }
    }
}

fn with_own(outer: &[String], own: &[GenericParameter]) -> Vec<String> {
    let mut names = outer.to_vec();
    names.extend(own.iter().map(|g| g.name.clone()));
    names
}

/// Generic parameter names visible inside a type: its own and its ancestors'.
fn generics_in_scope(types: &[Type], position: usize) -> Vec<String> {
    let mut names = Vec::new();
    let mut current = Some(position);
    while let Some(at) = current {
        let ty = &types[at];
        names.extend(ty.generic_parameters.iter().map(|g| g.name.clone()));
        current = ty.parent.map(TypeId::index);
    }
    names
}

/// Resolve every type reference of every type and global function.
///
/// Typealias targets are resolved first, without following aliases, so
/// that later references can follow alias chains.
pub(super) fn resolve_names(types: &mut [Type], functions: &mut [Method], index: &TypeIndex) {
    let generics: Vec<Vec<String>> = (0..types.len())
        .map(|position| generics_in_scope(types, position))
        .collect();

    let shallow = NameContext {
        index,
        aliases: FxHashMap::default(),
    };
    let mut aliases = FxHashMap::default();
    for (position, ty) in types.iter().enumerate() {
        if ty.kind != DeclKind::Typealias {
            continue;
        }
        let Some(mut aliased) = ty.aliased.clone() else {
            continue;
        };
        let outer = parent_scope(&ty.qualified_name).unwrap_or("");
        shallow.resolve(&mut aliased, outer, &generics[position]);
        let target = aliased.base_name().and(aliased.resolved);
        aliases.insert(ty.id, AliasTarget { target, aliased });
    }

    let context = NameContext { index, aliases };
    for (position, ty) in types.iter_mut().enumerate() {
        context.resolve_type(ty, &generics[position]);
    }
    for function in functions {
        context.resolve_method(function, "", &[]);
    }
}

// ============================================================================
// INHERITANCE
// ============================================================================

/// Types reachable from `start` over inheritance edges, breadth first.
/// `start` itself is included only when it lies on a cycle.
fn reachable(edges: &[Vec<TypeId>], start: usize) -> Vec<TypeId> {
    let mut seen = FxHashSet::default();
    let mut order = Vec::new();
    let mut queue: std::collections::VecDeque<TypeId> = edges[start].iter().copied().collect();
    while let Some(id) = queue.pop_front() {
        if !seen.insert(id) {
            continue;
        }
        order.push(id);
        queue.extend(edges[id.index()].iter().copied());
    }
    order
}

/// Fill `inherits`, `superclass`, `all_inherited`, `based` and `implements`.
pub(super) fn link_inheritance(types: &mut [Type]) {
    let kinds: Vec<DeclKind> = types.iter().map(|t| t.kind).collect();
    let edges: Vec<Vec<TypeId>> = types
        .iter()
        .map(|ty| {
            let mut ids = Vec::new();
            for id in ty.inherited_types.iter().filter_map(|t| t.resolved) {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
            ids
        })
        .collect();

    for position in 0..types.len() {
        let all_inherited = reachable(&edges, position);

        let mut based: IndexSet<String> = types[position]
            .inherited_types
            .iter()
            .map(|t| t.name.clone())
            .collect();
        for id in &all_inherited {
            based.extend(types[id.index()].inherited_types.iter().map(|t| t.name.clone()));
        }

        let superclass = if kinds[position] == DeclKind::Class {
            edges[position]
                .iter()
                .copied()
                .find(|id| kinds[id.index()] == DeclKind::Class)
        } else {
            None
        };
        let implements = all_inherited
            .iter()
            .copied()
            .filter(|id| kinds[id.index()] == DeclKind::Protocol)
            .collect();

        let ty = &mut types[position];
        ty.inherits = edges[position].clone();
        ty.superclass = superclass;
        ty.based = based;
        ty.all_inherited = all_inherited;
        ty.implements = implements;
    }
}
