//! Recursive descent parser for Swift declarations
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST: every token,
//! including comments and whitespace, ends up in the tree.
//!
//! Lookahead helpers (`at`, `nth`, `current_kind`) skip trivia. Trivia is
//! attached to the node that is open when the next significant token is
//! bumped, and `start_node` flushes pending trivia into the parent first, so
//! comments preceding a declaration are siblings of that declaration.

use super::grammar;
use super::lexer::{self, Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse Swift source code into a CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens, TextSize::of(input));
    parser.parse_source_file();
    parser.finish()
}

/// Contextual keywords that act as declaration modifiers.
pub const CONTEXTUAL_MODIFIERS: &[&str] = &[
    "final",
    "override",
    "mutating",
    "nonmutating",
    "consuming",
    "borrowing",
    "required",
    "convenience",
    "lazy",
    "weak",
    "unowned",
    "optional",
    "dynamic",
    "indirect",
    "nonisolated",
    "open",
    "package",
    "distributed",
    "prefix",
    "postfix",
    "infix",
];

/// The parser state
pub(crate) struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    end: TextSize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>], end: TextSize) -> Self {
        Self {
            tokens,
            pos: 0,
            end,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    fn parse_source_file(&mut self) {
        self.builder.start_node(SyntaxKind::SOURCE_FILE.into());
        while !self.at_eof() {
            grammar::parse_top_level_item(self);
        }
        self.bump_trivia();
        self.builder.finish_node();
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    /// Index of the n-th significant (non-trivia) token from the cursor.
    fn significant_index(&self, n: usize) -> Option<usize> {
        let mut count = 0;
        for idx in self.pos..self.tokens.len() {
            if !self.tokens[idx].kind.is_trivia() {
                if count == n {
                    return Some(idx);
                }
                count += 1;
            }
        }
        None
    }

    pub(crate) fn current_kind(&self) -> SyntaxKind {
        self.nth(0)
    }

    pub(crate) fn current_text(&self) -> &'a str {
        self.nth_text(0)
    }

    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        self.significant_index(n)
            .map(|idx| self.tokens[idx].kind)
            .unwrap_or(SyntaxKind::ERROR)
    }

    pub(crate) fn nth_text(&self, n: usize) -> &'a str {
        self.significant_index(n)
            .map(|idx| self.tokens[idx].text)
            .unwrap_or("")
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.significant_index(0).is_some() && self.current_kind() == kind
    }

    pub(crate) fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current_kind()) && !self.at_eof()
    }

    /// Current token is an identifier with exactly this text.
    pub(crate) fn at_ident(&self, text: &str) -> bool {
        self.at(SyntaxKind::IDENT) && self.current_text() == text
    }

    pub(crate) fn nth_ident(&self, n: usize, text: &str) -> bool {
        self.nth(n) == SyntaxKind::IDENT && self.nth_text(n) == text
    }

    /// The token right at the cursor has this kind, with no trivia before it.
    pub(crate) fn at_raw(&self, kind: SyntaxKind) -> bool {
        self.tokens.get(self.pos).map(|t| t.kind) == Some(kind)
    }

    /// Kind of the raw token at the cursor, trivia included.
    pub(crate) fn peek_raw_kind(&self) -> Option<SyntaxKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    /// The n-th significant token directly follows the (n-1)-th one.
    pub(crate) fn nth_adjacent(&self, n: usize) -> bool {
        match (n.checked_sub(1).and_then(|p| self.significant_index(p)), self.significant_index(n)) {
            (Some(prev), Some(idx)) => idx == prev + 1,
            _ => false,
        }
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.significant_index(0).is_none()
    }

    /// True when a line break separates the cursor from the next significant token.
    pub(crate) fn newline_before_current(&self) -> bool {
        for token in &self.tokens[self.pos..] {
            if !token.kind.is_trivia() {
                return false;
            }
            if token.kind == SyntaxKind::LINE_COMMENT
                || token.kind == SyntaxKind::DIRECTIVE
                || token.text.contains('\n')
            {
                return true;
            }
        }
        false
    }

    pub(crate) fn is_contextual_modifier(text: &str) -> bool {
        CONTEXTUAL_MODIFIERS.contains(&text)
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    /// Bump pending trivia into the currently open node.
    pub(crate) fn bump_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.pos) {
            if !token.kind.is_trivia() {
                break;
            }
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    /// Bump the next significant token (and the trivia before it).
    pub(crate) fn bump(&mut self) {
        self.bump_trivia();
        let tokens = self.tokens;
        if let Some(token) = tokens.get(self.pos) {
            self.report_lex_error(token);
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    /// Bump the next significant token, re-tagging it with `kind`.
    pub(crate) fn bump_as(&mut self, kind: SyntaxKind) {
        self.bump_trivia();
        let tokens = self.tokens;
        if let Some(token) = tokens.get(self.pos) {
            self.report_lex_error(token);
            self.builder.token(kind.into(), token.text);
            self.pos += 1;
        }
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: SyntaxKind, what: &str) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {}", what));
            false
        }
    }

    /// Bump a balanced `(..)`, `[..]` or `{..}` group starting at the cursor.
    ///
    /// Returns false when the input ended before the group closed.
    pub(crate) fn bump_balanced(&mut self) -> bool {
        let mut depth = 0usize;
        loop {
            if self.at_eof() {
                return false;
            }
            match self.current_kind() {
                SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET | SyntaxKind::L_BRACE => depth += 1,
                SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET | SyntaxKind::R_BRACE => {
                    depth = depth.saturating_sub(1)
                }
                _ => {}
            }
            self.bump();
            if depth == 0 {
                return true;
            }
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    pub(crate) fn error(&mut self, message: impl Into<String>) {
        let range = self
            .significant_index(0)
            .map(|idx| {
                let t = &self.tokens[idx];
                TextRange::at(t.offset, TextSize::of(t.text))
            })
            .unwrap_or_else(|| TextRange::empty(self.end));
        self.errors.push(SyntaxError::new(message, range));
    }

    /// Lexer errors surface when their token is consumed, so each is reported once.
    fn report_lex_error(&mut self, token: &Token<'_>) {
        if token.kind == SyntaxKind::ERROR {
            let range = TextRange::at(token.offset, TextSize::of(token.text));
            self.errors
                .push(SyntaxError::new(lexer::error_message(token.text), range));
        }
    }

    /// Report an error and skip to the next declaration start or closing brace.
    ///
    /// Balanced groups are skipped whole so a stray `{` cannot swallow the
    /// enclosing block's `}`.
    pub(crate) fn error_recover(&mut self, message: impl Into<String>) {
        self.error(message);
        self.bump_trivia();
        self.builder.start_node(SyntaxKind::ERROR.into());
        let mut consumed = false;
        while !self.at_eof() {
            if consumed && (self.at(SyntaxKind::R_BRACE) || grammar::at_decl_start(self)) {
                break;
            }
            if self.at_any(&[SyntaxKind::L_PAREN, SyntaxKind::L_BRACKET, SyntaxKind::L_BRACE]) {
                self.bump_balanced();
            } else {
                self.bump();
            }
            consumed = true;
        }
        self.builder.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    pub(crate) fn start_node(&mut self, kind: SyntaxKind) {
        self.bump_trivia();
        self.builder.start_node(kind.into());
    }

    pub(crate) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    pub(crate) fn checkpoint(&mut self) -> Checkpoint {
        self.bump_trivia();
        self.builder.checkpoint()
    }

    pub(crate) fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }
}
