//! The composed model: one canonical [`Type`] per qualified name.
//!
//! A [`Model`] is produced once per run by [`compose`](super::compose) and is
//! read-only afterwards. Types live in an arena addressed by [`TypeId`];
//! every link between them (`inherits`, `parent`, `contained`,
//! [`TypeName::resolved`]) is an id into that arena.

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use super::diagnostics::{Diagnostic, Severity, codes};
use super::ids::TypeId;
use super::symbols::{
    AccessLevel, AssociatedType, Attribute, DeclKind, EnumCase, GenericParameter,
    GenericRequirement, Import, Member, Method, Modifier, SourceLocation, Subscript, Variable,
};
use super::type_name::TypeName;
use crate::annotations::Annotations;

// ============================================================================
// TYPE
// ============================================================================

/// A canonical type: its base declaration merged with every extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Type {
    pub id: TypeId,
    /// Kind of the base declaration; [`DeclKind::Extension`] for external types
    pub kind: DeclKind,
    /// Simple name (last path segment)
    pub name: String,
    pub qualified_name: String,
    /// Enclosing type, if nested
    pub parent: Option<TypeId>,
    pub access: AccessLevel,
    pub modifiers: Vec<Modifier>,
    pub attributes: Vec<Attribute>,
    /// Inherited types as written, union over base and extensions
    pub inherited_types: Vec<TypeName>,
    /// Resolved direct inheritance, in `inherited_types` order
    pub inherits: Vec<TypeId>,
    pub superclass: Option<TypeId>,
    /// Every inherited name, direct and transitive, including unresolved ones
    pub based: IndexSet<String>,
    /// Transitive closure of `inherits`
    pub all_inherited: Vec<TypeId>,
    /// Protocols in `all_inherited`
    pub implements: Vec<TypeId>,
    pub generic_parameters: Vec<GenericParameter>,
    pub generic_requirements: Vec<GenericRequirement>,
    /// Members of the base followed by those added by extensions
    pub members: Vec<Member>,
    /// Nested types
    pub contained: Vec<TypeId>,
    /// Aliased type for typealiases
    pub aliased: Option<TypeName>,
    /// Only known through extensions
    pub is_external: bool,
    /// Location of the base declaration; None for external types
    pub location: Option<SourceLocation>,
    /// Locations of the extensions that contributed to this type
    pub extensions: Vec<SourceLocation>,
    pub annotations: Annotations,
    pub documentation: Vec<String>,
}

impl Type {
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.members.iter().filter_map(|m| match m {
            Member::Variable(v) => Some(v),
            _ => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.members.iter().filter_map(|m| match m {
            Member::Method(m) => Some(m),
            _ => None,
        })
    }

    pub fn subscripts(&self) -> impl Iterator<Item = &Subscript> {
        self.members.iter().filter_map(|m| match m {
            Member::Subscript(s) => Some(s),
            _ => None,
        })
    }

    pub fn enum_cases(&self) -> impl Iterator<Item = &EnumCase> {
        self.members.iter().filter_map(|m| match m {
            Member::EnumCase(c) => Some(c),
            _ => None,
        })
    }

    pub fn associated_types(&self) -> impl Iterator<Item = &AssociatedType> {
        self.members.iter().filter_map(|m| match m {
            Member::AssociatedType(a) => Some(a),
            _ => None,
        })
    }

    /// Find a variable by name (instance or static).
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables().find(|v| v.name == name)
    }

    /// Find a method by selector (`move(to:)`) or short name.
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods()
            .find(|m| m.name == name)
            .or_else(|| self.methods().find(|m| m.short_name == name))
    }

    pub fn has_modifier(&self, name: &str) -> bool {
        self.modifiers.iter().any(|m| m.name == name)
    }

    /// Whether `name` appears among the inherited names, directly or transitively.
    pub fn is_based_on(&self, name: &str) -> bool {
        self.based.contains(name)
    }
}

// ============================================================================
// MODEL
// ============================================================================

/// File-level facts that do not belong to any type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileFacts {
    pub path: Arc<str>,
    pub imports: Vec<Import>,
    /// `// sourcery:file:` annotations
    pub annotations: Annotations,
}

/// The composed, cross-referenced declaration model of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    types: Vec<Type>,
    /// Qualified name -> id, in id order
    index: IndexMap<String, TypeId>,
    functions: Vec<Method>,
    files: Vec<FileFacts>,
    diagnostics: Vec<Diagnostic>,
}

impl Model {
    pub(crate) fn new(
        types: Vec<Type>,
        functions: Vec<Method>,
        files: Vec<FileFacts>,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        let index = types
            .iter()
            .map(|t| (t.qualified_name.clone(), t.id))
            .collect();
        Self {
            types,
            index,
            functions,
            files,
            diagnostics,
        }
    }

    /// All types in id order.
    pub fn types(&self) -> &[Type] {
        &self.types
    }

    /// Types that are not nested in another type.
    pub fn top_level(&self) -> impl Iterator<Item = &Type> {
        self.types.iter().filter(|t| t.parent.is_none())
    }

    /// Look up a type by qualified name.
    pub fn get(&self, qualified_name: &str) -> Option<&Type> {
        self.index
            .get(qualified_name)
            .and_then(|id| self.type_by_id(*id))
    }

    pub fn type_by_id(&self, id: TypeId) -> Option<&Type> {
        self.types.get(id.index())
    }

    /// The type a reference resolved to, if any.
    pub fn resolve(&self, name: &TypeName) -> Option<&Type> {
        name.resolved.and_then(|id| self.type_by_id(id))
    }

    /// Types of the given kind, in id order.
    pub fn types_of_kind(&self, kind: DeclKind) -> impl Iterator<Item = &Type> {
        self.types.iter().filter(move |t| t.kind == kind)
    }

    /// Types whose inheritance closure contains `id`.
    pub fn subtypes_of(&self, id: TypeId) -> impl Iterator<Item = &Type> {
        self.types
            .iter()
            .filter(move |t| t.id != id && t.all_inherited.contains(&id))
    }

    /// Global functions in merge order.
    pub fn functions(&self) -> &[Method] {
        &self.functions
    }

    /// Per-file imports and annotations, in path order.
    pub fn files(&self) -> &[FileFacts] {
        &self.files
    }

    pub fn file(&self, path: &str) -> Option<&FileFacts> {
        self.files.iter().find(|f| &*f.path == path)
    }

    /// Per-file diagnostics in path order, then composition diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_parse_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.code.as_deref() == Some(codes::PARSE_ERROR))
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}
