//! High-level IR (HIR) — partial declarations, composition and the model.
//!
//! Everything here is plain data plus pure functions. Per-file work
//! (extraction) depends only on one file; composition takes the complete
//! set of per-file results and produces the [`Model`].
//!
//! ## Key Types
//!
//! - [`Declaration`] — A type, extension or typealias as written in one file
//! - [`FileParserResult`] — Everything extracted from one file (cacheable)
//! - [`TypeName`] — A type reference, optionally resolved to a [`TypeId`]
//! - [`Model`] / [`Type`] — The composed, cross-referenced result
//! - [`TypeIndex`] / [`Resolver`] — Scope-walking name lookup
//! - [`Diagnostic`] — Problems found along the way
//!
//! ## Layers
//!
//! ```text
//! SyntaxFile                ← parsed CST (per file)
//!     │
//!     ▼
//! extract_file(file)        ← partial declarations (per file, parallel)
//!     │
//!     ▼
//! compose(results)          ← merge, resolve, link (whole run)
//!     │
//!     ▼
//! Model                     ← read-only output
//! ```

mod compose;
mod diagnostics;
mod ids;
mod model;
mod resolve;
mod symbols;
mod type_name;

pub use compose::{MergeOrder, compose};
pub use diagnostics::{Diagnostic, DiagnosticCollector, RelatedInfo, Severity, codes};
pub use ids::TypeId;
pub use model::{FileFacts, Model, Type};
pub use resolve::{ResolveResult, Resolver, TypeIndex, parent_scope, simple_name};
pub use symbols::{
    AccessLevel, AssociatedType, AssociatedValue, Attribute, DeclKind, Declaration, EnumCase,
    ExtractOptions, FileParserResult, GenericParameter, GenericRequirement, Import, Member,
    Method, MethodKind, MethodParameter, Modifier, RequirementRelation, SourceLocation, Subscript,
    Variable, extract_file,
};
pub use type_name::{ClosureType, TupleElement, TypeName, TypeNameKind};
