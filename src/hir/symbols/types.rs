//! Partial declarations extracted from a single file.
//!
//! These are the per-file results of extraction: plain serialisable data,
//! independent of every other file, and exactly what the cache stores.
//! The composer merges them into the model.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::annotations::Annotations;
use crate::base::TextRange;
use crate::hir::diagnostics::Diagnostic;
use crate::hir::type_name::TypeName;

// ============================================================================
// SHARED PIECES
// ============================================================================

/// File path plus byte range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: Arc<str>,
    pub range: TextRange,
}

/// Swift access level
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Open,
    Public,
    Package,
    #[default]
    Internal,
    FilePrivate,
    Private,
}

impl AccessLevel {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "open" => Some(Self::Open),
            "public" => Some(Self::Public),
            "package" => Some(Self::Package),
            "internal" => Some(Self::Internal),
            "fileprivate" => Some(Self::FilePrivate),
            "private" => Some(Self::Private),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Public => "public",
            Self::Package => "package",
            Self::Internal => "internal",
            Self::FilePrivate => "fileprivate",
            Self::Private => "private",
        }
    }
}

/// A declaration modifier such as `static`, `final` or `private(set)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifier {
    pub name: SmolStr,
    /// `set` in `private(set)`
    pub detail: Option<SmolStr>,
}

impl Modifier {
    pub fn new(name: &str) -> Self {
        Self {
            name: SmolStr::new(name),
            detail: None,
        }
    }
}

/// An attribute such as `@objc` or `@available(iOS 13, *)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    pub name: SmolStr,
    pub arguments: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericParameter {
    pub name: String,
    pub constraint: Option<TypeName>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementRelation {
    /// `T: P`
    Conforms,
    /// `T == U`
    SameType,
}

/// One `where` clause requirement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericRequirement {
    pub left: TypeName,
    pub right: TypeName,
    pub relation: RequirementRelation,
}

/// `import Foo`, `import struct Foo.Bar`, `@testable import Foo`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    pub kind: Option<String>,
    pub path: String,
    pub is_testable: bool,
}

fn has_modifier(modifiers: &[Modifier], name: &str) -> bool {
    modifiers.iter().any(|m| m.name == name)
}

// ============================================================================
// MEMBERS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub type_name: Option<TypeName>,
    pub is_let: bool,
    pub is_computed: bool,
    pub read_access: AccessLevel,
    /// None for constants and get-only properties
    pub write_access: Option<AccessLevel>,
    pub default_value: Option<String>,
    pub is_async: bool,
    pub throws: bool,
    pub modifiers: Vec<Modifier>,
    pub attributes: Vec<Attribute>,
    pub annotations: Annotations,
    pub documentation: Vec<String>,
    pub location: SourceLocation,
}

impl Variable {
    pub fn is_static(&self) -> bool {
        has_modifier(&self.modifiers, "static") || has_modifier(&self.modifiers, "class")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    Function,
    Initializer,
    Deinitializer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodParameter {
    /// None for `_`
    pub argument_label: Option<String>,
    pub name: String,
    pub type_name: Option<TypeName>,
    pub default_value: Option<String>,
    pub is_variadic: bool,
    pub is_inout: bool,
    pub annotations: Annotations,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    /// Selector name, e.g. `move(from:_:)`
    pub name: String,
    /// Name without the parameter list
    pub short_name: String,
    pub parameters: Vec<MethodParameter>,
    pub return_type: Option<TypeName>,
    pub kind: MethodKind,
    pub is_failable: bool,
    pub is_async: bool,
    pub throws: bool,
    pub rethrows: bool,
    pub access: AccessLevel,
    pub generic_parameters: Vec<GenericParameter>,
    pub generic_requirements: Vec<GenericRequirement>,
    pub modifiers: Vec<Modifier>,
    pub attributes: Vec<Attribute>,
    pub annotations: Annotations,
    pub documentation: Vec<String>,
    pub location: SourceLocation,
    /// False for protocol requirements
    pub has_body: bool,
}

impl Method {
    pub fn is_static(&self) -> bool {
        has_modifier(&self.modifiers, "static") || has_modifier(&self.modifiers, "class")
    }

    pub fn is_initializer(&self) -> bool {
        self.kind == MethodKind::Initializer
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscript {
    pub parameters: Vec<MethodParameter>,
    pub return_type: Option<TypeName>,
    pub read_access: AccessLevel,
    pub write_access: Option<AccessLevel>,
    pub generic_parameters: Vec<GenericParameter>,
    pub generic_requirements: Vec<GenericRequirement>,
    pub modifiers: Vec<Modifier>,
    pub attributes: Vec<Attribute>,
    pub annotations: Annotations,
    pub documentation: Vec<String>,
    pub location: SourceLocation,
}

impl Subscript {
    pub fn is_static(&self) -> bool {
        has_modifier(&self.modifiers, "static") || has_modifier(&self.modifiers, "class")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociatedValue {
    pub local_name: Option<String>,
    pub external_name: Option<String>,
    pub type_name: Option<TypeName>,
    pub default_value: Option<String>,
    pub annotations: Annotations,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumCase {
    pub name: String,
    pub associated_values: Vec<AssociatedValue>,
    pub raw_value: Option<String>,
    pub is_indirect: bool,
    pub annotations: Annotations,
    pub documentation: Vec<String>,
    pub location: SourceLocation,
}

/// `associatedtype Element: Equatable = Int`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociatedType {
    pub name: String,
    pub constraint: Option<TypeName>,
    pub default_type: Option<TypeName>,
    pub annotations: Annotations,
    pub documentation: Vec<String>,
    pub location: SourceLocation,
}

/// A member declared directly inside a type or extension body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Member {
    Variable(Variable),
    Method(Method),
    Subscript(Subscript),
    EnumCase(EnumCase),
    AssociatedType(AssociatedType),
}

impl Member {
    /// Identity used to detect the same member declared twice.
    ///
    /// Variables: name and staticness. Methods: selector, staticness,
    /// parameter types and return type, so overloads stay distinct.
    /// Subscripts: parameter types and return type. Enum cases: name.
    pub fn signature(&self) -> String {
        let static_prefix = |is_static: bool| if is_static { "static " } else { "" };
        match self {
            Member::Variable(v) => format!("{}var {}", static_prefix(v.is_static()), v.name),
            Member::Method(m) => format!(
                "{}func {}({}){}",
                static_prefix(m.is_static()),
                m.name,
                parameter_types(&m.parameters),
                return_suffix(m.return_type.as_ref())
            ),
            Member::Subscript(s) => format!(
                "{}subscript({}){}",
                static_prefix(s.is_static()),
                parameter_types(&s.parameters),
                return_suffix(s.return_type.as_ref())
            ),
            Member::EnumCase(c) => format!("case {}", c.name),
            Member::AssociatedType(a) => format!("associatedtype {}", a.name),
        }
    }

    pub fn location(&self) -> &SourceLocation {
        match self {
            Member::Variable(v) => &v.location,
            Member::Method(m) => &m.location,
            Member::Subscript(s) => &s.location,
            Member::EnumCase(c) => &c.location,
            Member::AssociatedType(a) => &a.location,
        }
    }
}

fn parameter_types(parameters: &[MethodParameter]) -> String {
    parameters
        .iter()
        .map(|p| p.type_name.as_ref().map(|t| t.name.as_str()).unwrap_or("_"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn return_suffix(return_type: Option<&TypeName>) -> String {
    return_type
        .map(|t| format!(" -> {}", t.name))
        .unwrap_or_default()
}

// ============================================================================
// DECLARATIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
    Class,
    Struct,
    Enum,
    Protocol,
    Extension,
    Typealias,
}

/// A type, extension or typealias declaration as written in one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub kind: DeclKind,
    /// Simple name; for extensions the target as written (`Foo.Bar`)
    pub name: String,
    /// Lexical qualified name (enclosing declarations joined by `.`)
    pub qualified_name: String,
    /// Qualified name of the enclosing declaration, if nested
    pub parent: Option<String>,
    pub access: AccessLevel,
    pub modifiers: Vec<Modifier>,
    pub attributes: Vec<Attribute>,
    /// Inherited types in source order, as written
    pub inherited_types: Vec<TypeName>,
    pub generic_parameters: Vec<GenericParameter>,
    pub generic_requirements: Vec<GenericRequirement>,
    pub members: Vec<Member>,
    pub nested: Vec<Declaration>,
    /// Aliased type for typealiases
    pub aliased: Option<TypeName>,
    pub location: SourceLocation,
    /// Effective annotations: direct, then block, container and file level
    pub annotations: Annotations,
    pub documentation: Vec<String>,
}

impl Declaration {
    pub fn is_extension(&self) -> bool {
        self.kind == DeclKind::Extension
    }

    pub fn has_modifier(&self, name: &str) -> bool {
        has_modifier(&self.modifiers, name)
    }
}

/// Everything extracted from one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileParserResult {
    pub path: Arc<str>,
    pub declarations: Vec<Declaration>,
    /// Global functions
    pub functions: Vec<Method>,
    pub imports: Vec<Import>,
    pub file_annotations: Annotations,
    /// Parse errors and annotation marker issues
    pub diagnostics: Vec<Diagnostic>,
}

impl FileParserResult {
    pub fn empty(path: impl Into<Arc<str>>) -> Self {
        Self {
            path: path.into(),
            declarations: Vec::new(),
            functions: Vec::new(),
            imports: Vec::new(),
            file_annotations: Annotations::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn has_parse_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.code.as_deref() == Some(crate::hir::diagnostics::codes::PARSE_ERROR))
    }
}
