//! # reflekt-base
//!
//! Core library for parsing Swift sources into a composed declaration model
//! for code generation.
//!
//! Each file is parsed on its own (in parallel, through an on-disk cache)
//! into partial declarations. A single composition step then merges
//! extensions into their types, resolves type names, links inheritance and
//! propagates `sourcery` annotations. The resulting [`Model`] is read-only
//! and serializable.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project      → File discovery, result cache, run pipeline
//!   ↓
//! hir          → Partial declarations, composer, resolver, model, diagnostics
//!   ↓
//! annotations  → `sourcery` marker comments → key/value maps
//!   ↓
//! syntax       → Parsed files, comments, positioned parse errors
//!   ↓
//! parser       → Logos lexer, recursive-descent parser, rowan CST, typed AST
//!   ↓
//! base         → Primitives (TextRange, LineIndex, constants)
//! ```
//!
//! ## Example
//!
//! ```
//! use reflekt::project::{Pipeline, PipelineConfig, SourceInput};
//!
//! let sources = vec![
//!     SourceInput::new("Point.swift", "// sourcery: skipEquality\nstruct Point { var x: Int }"),
//!     SourceInput::new("Point+Y.swift", "extension Point { var y: Int }"),
//! ];
//! let model = Pipeline::new(PipelineConfig::new()).run(&sources).unwrap();
//!
//! let point = model.get("Point").unwrap();
//! assert_eq!(point.variables().count(), 2);
//! assert!(point.annotations.contains_key("skipEquality"));
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → annotations → hir → project)
// ============================================================================

/// Foundation types: TextRange, LineIndex, constants
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, typed AST
pub mod parser;

/// Syntax: parsed files, comments, ParseError/ParseResult
pub mod syntax;

/// Annotation comments: markers, values, block regions
pub mod annotations;

/// High-level IR: extraction, composition, model
pub mod hir;

/// Project: file loading, caching, pipeline
pub mod project;

// Re-export foundation types
pub use base::{LineCol, LineIndex, TextRange, TextSize};

// Re-export the main entry points
pub use hir::{Diagnostic, Model, Severity, Type, TypeId, TypeName, compose};
pub use project::{Pipeline, PipelineConfig, PipelineError, SourceInput};
