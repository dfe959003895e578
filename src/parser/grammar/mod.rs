//! Grammar rules for Swift declarations
//!
//! This module contains the parsing logic, split by construct:
//! - `items` - declarations, members, imports and opaque top-level statements
//! - `types` - type references (`[K: V]`, `(A) async throws -> B`, `some P & Q`, ...)
//! - `exprs` - raw initializer and default-value expressions
//!
//! Rules are free functions over the core [`Parser`]. Function, initializer
//! and accessor bodies are never parsed, only matched by braces.

mod exprs;
mod items;
mod types;

pub(super) use super::parser::Parser;
pub(super) use crate::parser::syntax_kind::SyntaxKind;

pub(crate) use self::exprs::{is_continuation, parse_expr};
pub(crate) use self::items::{at_decl_start, parse_attribute, parse_effects, parse_top_level_item};
pub(crate) use self::types::parse_type;

/// Tokens usable as a name where Swift allows keywords (argument labels, case names).
pub(crate) fn is_name_like(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::IDENT || kind.is_keyword()
}
