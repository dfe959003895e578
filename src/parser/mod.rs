//! Rowan-based parser for Swift declarations
//!
//! This module provides a lossless parser using:
//! - **logos** for fast lexing
//! - **rowan** for the CST (Concrete Syntax Tree)
//!
//! The CST preserves all whitespace and comments, so annotation comments can
//! be matched to declarations by position. A typed AST layer sits on top.
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! Parser → GreenNode tree (immutable, cheap to clone)
//!     ↓
//! SyntaxNode (rowan) → CST with parent pointers
//!     ↓
//! AST layer → Typed wrappers over SyntaxNode
//!     ↓
//! HIR → Partial declarations per file
//! ```
//!
//! Only declarations are parsed structurally. Function bodies, accessor
//! bodies and initializer expressions are kept as opaque token runs.

#[allow(clippy::module_inception)]
mod parser;

pub mod ast;
mod grammar;
mod lexer;
mod syntax_kind;

pub use ast::*;
pub use lexer::{Lexer, Token, tokenize};
pub use parser::{CONTEXTUAL_MODIFIERS, Parse, SyntaxError, parse};
pub use syntax_kind::{SwiftLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextRange, TextSize};
