//! Name resolution: resolving type names to composed types.
//!
//! # Key Data Structures
//!
//! - [`TypeIndex`] - Qualified name → [`TypeId`] plus a simple-name index for suffix lookups
//! - [`Resolver`] - Query-time resolution from a scope, walking outward
//!
//! A name `X` used inside `A.B.C` tries `A.B.C.X`, `A.B.X`, `A.X`, then `X`.
//! Dotted names (`Outer.Inner`) walk the same way with the whole path
//! appended to each scope.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use super::ids::TypeId;
use crate::base::constants::NAME_SEPARATOR;

// ============================================================================
// TYPE INDEX
// ============================================================================

/// Index of every composed type by qualified name.
#[derive(Clone, Debug, Default)]
pub struct TypeIndex {
    /// Qualified name -> id (IndexMap preserves insertion order).
    by_qualified_name: IndexMap<Arc<str>, TypeId>,
    /// Last path segment -> qualified names ending with it.
    by_simple_name: FxHashMap<Arc<str>, Vec<Arc<str>>>,
}

impl TypeIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a qualified name. The first registration of a name wins.
    pub fn insert(&mut self, qualified_name: &str, id: TypeId) -> bool {
        if self.by_qualified_name.contains_key(qualified_name) {
            return false;
        }
        let qualified: Arc<str> = Arc::from(qualified_name);
        self.by_qualified_name.insert(qualified.clone(), id);
        self.by_simple_name
            .entry(Arc::from(simple_name(qualified_name)))
            .or_default()
            .push(qualified);
        true
    }

    pub fn lookup_qualified(&self, name: &str) -> Option<TypeId> {
        self.by_qualified_name.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_qualified_name.contains_key(name)
    }

    /// Every type whose qualified name is `name` or ends with `.name`.
    pub fn lookup_suffix(&self, name: &str) -> Vec<TypeId> {
        let Some(candidates) = self.by_simple_name.get(simple_name(name)) else {
            return Vec::new();
        };
        candidates
            .iter()
            .filter(|q| {
                q.as_ref() == name
                    || q.strip_suffix(name)
                        .is_some_and(|prefix| prefix.ends_with(NAME_SEPARATOR))
            })
            .filter_map(|q| self.lookup_qualified(q))
            .collect()
    }

    /// Qualified names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = (&str, TypeId)> {
        self.by_qualified_name.iter().map(|(k, v)| (k.as_ref(), *v))
    }

    pub fn len(&self) -> usize {
        self.by_qualified_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_qualified_name.is_empty()
    }

    /// Create a resolver starting at `scope`.
    pub fn resolver_for_scope(&self, scope: &str) -> Resolver<'_> {
        Resolver::new(self).with_scope(scope)
    }
}

/// Last dot-separated segment of a name.
pub fn simple_name(name: &str) -> &str {
    name.rsplit(NAME_SEPARATOR).next().unwrap_or(name)
}

/// Enclosing scope of a qualified name, if any.
pub fn parent_scope(name: &str) -> Option<&str> {
    name.rsplit_once(NAME_SEPARATOR).map(|(parent, _)| parent)
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Result of a name resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveResult {
    /// Successfully resolved to a single type.
    Found(TypeId),
    /// Resolved to multiple candidates (ambiguous).
    Ambiguous(Vec<TypeId>),
    /// Could not resolve the reference.
    NotFound,
}

impl ResolveResult {
    /// Get the resolved type if unambiguous.
    pub fn id(&self) -> Option<TypeId> {
        match self {
            ResolveResult::Found(id) => Some(*id),
            _ => None,
        }
    }

    /// Check if resolution was successful.
    pub fn is_found(&self) -> bool {
        matches!(self, ResolveResult::Found(_))
    }

    /// Check if resolution was ambiguous.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, ResolveResult::Ambiguous(_))
    }
}

/// Resolver for name lookups from a given scope.
#[derive(Clone, Debug)]
pub struct Resolver<'a> {
    /// The type index to search.
    index: &'a TypeIndex,
    /// Current scope (e.g., "Outer.Inner"); empty at file scope.
    current_scope: Arc<str>,
}

impl<'a> Resolver<'a> {
    /// Create a new resolver at file scope.
    pub fn new(index: &'a TypeIndex) -> Self {
        Self {
            index,
            current_scope: Arc::from(""),
        }
    }

    /// Set the current scope.
    pub fn with_scope(mut self, scope: impl Into<Arc<str>>) -> Self {
        self.current_scope = scope.into();
        self
    }

    /// Resolve a name by walking from the current scope outward.
    pub fn resolve(&self, name: &str) -> ResolveResult {
        let mut scope: Option<&str> = Some(&*self.current_scope).filter(|s| !s.is_empty());
        while let Some(current) = scope {
            let candidate = format!("{}{}{}", current, NAME_SEPARATOR, name);
            if let Some(id) = self.index.lookup_qualified(&candidate) {
                tracing::trace!(name, scope = current, %id, "resolved in scope");
                return ResolveResult::Found(id);
            }
            scope = parent_scope(current);
        }
        match self.index.lookup_qualified(name) {
            Some(id) => ResolveResult::Found(id),
            None => ResolveResult::NotFound,
        }
    }

    /// Resolve like [`resolve`](Self::resolve), then fall back to a unique
    /// type whose qualified name ends with `.name`.
    pub fn resolve_with_suffix(&self, name: &str) -> ResolveResult {
        let result = self.resolve(name);
        if result.is_found() {
            return result;
        }
        let mut candidates = self.index.lookup_suffix(name);
        match candidates.len() {
            0 => ResolveResult::NotFound,
            1 => ResolveResult::Found(candidates.remove(0)),
            _ => ResolveResult::Ambiguous(candidates),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(names: &[&str]) -> TypeIndex {
        let mut index = TypeIndex::new();
        for (i, name) in names.iter().enumerate() {
            index.insert(name, TypeId::new(i));
        }
        index
    }

    #[test]
    fn test_first_insert_wins() {
        let mut index = TypeIndex::new();
        assert!(index.insert("A", TypeId::new(0)));
        assert!(!index.insert("A", TypeId::new(1)));
        assert_eq!(index.lookup_qualified("A"), Some(TypeId::new(0)));
    }

    #[test]
    fn test_scope_walk_prefers_innermost() {
        let index = index(&["Config", "Outer", "Outer.Config", "Outer.Inner"]);
        let resolver = index.resolver_for_scope("Outer.Inner");
        assert_eq!(resolver.resolve("Config"), ResolveResult::Found(TypeId::new(2)));
        let resolver = index.resolver_for_scope("");
        assert_eq!(resolver.resolve("Config"), ResolveResult::Found(TypeId::new(0)));
    }

    #[test]
    fn test_dotted_name_walk() {
        let index = index(&["A", "A.B", "A.B.C"]);
        let resolver = index.resolver_for_scope("A");
        assert_eq!(resolver.resolve("B.C"), ResolveResult::Found(TypeId::new(2)));
        assert_eq!(resolver.resolve("C"), ResolveResult::NotFound);
    }

    #[test]
    fn test_unique_suffix() {
        let index = index(&["Outer.Inner", "Other.Thing", "Third.Thing"]);
        let resolver = Resolver::new(&index);
        assert_eq!(resolver.resolve_with_suffix("Inner"), ResolveResult::Found(TypeId::new(0)));
        assert!(resolver.resolve_with_suffix("Thing").is_ambiguous());
        // `ner` is not a path suffix of `Outer.Inner`
        assert_eq!(resolver.resolve_with_suffix("ner"), ResolveResult::NotFound);
    }

    #[test]
    fn test_name_helpers() {
        assert_eq!(simple_name("A.B.C"), "C");
        assert_eq!(parent_scope("A.B.C"), Some("A.B"));
        assert_eq!(parent_scope("A"), None);
    }
}
