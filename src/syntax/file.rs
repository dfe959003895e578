//! Syntax file wrapper for parsed Swift files.
//!
//! Bundles the rowan parse result with the source-derived data every later
//! stage needs: the line index and the ordered list of comment tokens.

use crate::base::{LineIndex, TextRange};
use crate::parser::{AstNode, Parse, SourceFile, SyntaxElement, SyntaxError, SyntaxKind, parse};

/// A comment token lifted out of the CST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    pub range: TextRange,
    pub is_block: bool,
}

/// A parsed Swift file.
#[derive(Debug, Clone)]
pub struct SyntaxFile {
    /// The underlying rowan parse result
    parse: Parse,
    line_index: LineIndex,
}

// Two SyntaxFiles are equal if they have the same text and the same errors
impl PartialEq for SyntaxFile {
    fn eq(&self, other: &Self) -> bool {
        self.parse.green == other.parse.green && self.parse.errors == other.parse.errors
    }
}

impl Eq for SyntaxFile {}

impl SyntaxFile {
    /// Parse source code into a syntax file
    pub fn new(source: &str) -> Self {
        Self {
            parse: parse(source),
            line_index: LineIndex::new(source),
        }
    }

    /// Get the underlying parse result
    pub fn parse(&self) -> &Parse {
        &self.parse
    }

    /// Get the root source file AST node
    pub fn source_file(&self) -> Option<SourceFile> {
        SourceFile::cast(self.parse.syntax())
    }

    /// Check if parsing had errors
    pub fn has_errors(&self) -> bool {
        !self.parse.errors.is_empty()
    }

    /// Get parse errors
    pub fn errors(&self) -> &[SyntaxError] {
        &self.parse.errors
    }

    /// Get the source text of the file
    pub fn source_text(&self) -> String {
        self.parse.syntax().text().to_string()
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Every comment in the file, in source order.
    pub fn comments(&self) -> Vec<Comment> {
        self.parse
            .syntax()
            .descendants_with_tokens()
            .filter_map(SyntaxElement::into_token)
            .filter(|t| t.kind().is_comment())
            .map(|t| Comment {
                text: t.text().to_string(),
                range: t.text_range(),
                is_block: t.kind() == SyntaxKind::BLOCK_COMMENT,
            })
            .collect()
    }
}
