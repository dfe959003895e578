//! Declaration extraction from AST: pure functions from one file to its partial declarations.
//!
//! Extraction works directly with the typed AST wrapper types from
//! `crate::parser::ast`, producing serialisable [`Declaration`] values that
//! depend on nothing outside the file.
//!
//! # Module structure
//!
//! - [`types`] — Partial declaration types (Declaration, Member, Variable, Method, ...)
//! - [`context`] — ExtractionContext for tracking scope and annotation regions
//! - [`helpers`] — AST → TypeName/parameter conversion and comment association
//! - [`extract`] — Per-file entry point and item dispatch
//! - [`extract_leaf`] — Import extraction
//! - [`extract_type`] — Type, extension and typealias extraction
//! - [`extract_member`] — Variable, method, subscript, enum case and associated type extraction

mod context;
mod extract;
mod extract_leaf;
mod extract_member;
mod extract_type;
mod helpers;
mod types;


pub use types::{
    AccessLevel, AssociatedType, AssociatedValue, Attribute, DeclKind, Declaration, EnumCase,
    FileParserResult, GenericParameter, GenericRequirement, Import, Member, Method, MethodKind,
    MethodParameter, Modifier, RequirementRelation, SourceLocation, Subscript, Variable,
};

pub use extract::{ExtractOptions, extract_file};
