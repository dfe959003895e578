//! Logos-based lexer for Swift declarations
//!
//! Fast tokenization using the logos crate. Every byte of the input ends up
//! in exactly one token, so the CST built on top stays lossless.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Message for a lexer `ERROR` token, chosen by how the token starts.
pub(crate) fn error_message(text: &str) -> &'static str {
    if text.starts_with("/*") {
        "unterminated block comment"
    } else if text.starts_with('"') {
        "unterminated string literal"
    } else {
        "unexpected character"
    }
}

/// Finish a block comment after its opening `/*`. Comments nest.
///
/// An unterminated comment becomes one error token running to the end of input.
fn lex_block_comment(lex: &mut logos::Lexer<LogosToken>) -> bool {
    let rest = lex.remainder().as_bytes();
    let mut depth = 1usize;
    let mut i = 0;
    while i < rest.len() {
        if rest[i..].starts_with(b"/*") {
            depth += 1;
            i += 2;
        } else if rest[i..].starts_with(b"*/") {
            depth -= 1;
            i += 2;
            if depth == 0 {
                lex.bump(i);
                return true;
            }
        } else {
            i += 1;
        }
    }
    lex.bump(rest.len());
    false
}

/// Finish a string literal after its opening `"`, including `"""` literals.
///
/// An unterminated single-line literal becomes an error token running to the
/// end of its line; a multi-line one runs to the end of input.
fn lex_string(lex: &mut logos::Lexer<LogosToken>) -> bool {
    let rest = lex.remainder();
    let multiline = rest.starts_with("\"\"");
    let opener = if multiline { 2 } else { 0 };
    match scan_string_body(&rest[opener..], multiline) {
        Some(len) => {
            lex.bump(opener + len);
            true
        }
        None => {
            let end = if multiline {
                rest.len()
            } else {
                rest.find('\n').unwrap_or(rest.len())
            };
            lex.bump(end);
            false
        }
    }
}

/// Length of a string body up to and including its closing delimiter.
fn scan_string_body(body: &str, multiline: bool) -> Option<usize> {
    let bytes = body.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if bytes.get(i + 1) == Some(&b'(') => {
                i += 2;
                i += scan_interpolation(&body[i..], multiline)?;
            }
            b'\\' => i += 2,
            b'"' if !multiline => return Some(i + 1),
            b'"' if bytes[i..].starts_with(b"\"\"\"") => return Some(i + 3),
            b'\n' if !multiline => return None,
            _ => i += 1,
        }
    }
    None
}

/// Length of an interpolation after its `\(`, up to and including the
/// matching `)`. Nested parentheses and string literals are skipped whole.
fn scan_interpolation(src: &str, multiline: bool) -> Option<usize> {
    let bytes = src.as_bytes();
    let mut depth = 1usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => {
                depth += 1;
                i += 1;
            }
            b')' => {
                depth -= 1;
                i += 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            b'"' => {
                let rest = &src[i + 1..];
                let nested_multiline = rest.starts_with("\"\"");
                let opener = if nested_multiline { 2 } else { 0 };
                i += 1 + opener + scan_string_body(&rest[opener..], nested_multiline)?;
            }
            b'\n' if !multiline => return None,
            _ => i += 1,
        }
    }
    None
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", lex_block_comment)]
    BlockComment,

    #[regex(r"#(if|elseif|else|endif)[^\n]*")]
    Directive,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[\p{XID_Start}_][\p{XID_Continue}]*")]
    #[regex(r"`[\p{XID_Start}_][\p{XID_Continue}]*`")]
    #[regex(r"\$[a-zA-Z0-9_]+")]
    Ident,

    #[regex(r"[0-9][0-9_]*")]
    #[regex(r"0x[0-9a-fA-F_]+")]
    #[regex(r"0b[01_]+")]
    Integer,

    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?")]
    Float,

    #[token("\"", lex_string)]
    #[regex(r##"#"[^"\n]*"#"##)]
    String,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("...")]
    Ellipsis,

    #[token("->")]
    Arrow,

    #[token("==")]
    EqEq,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("&")]
    Amp,
    #[token("?")]
    Question,
    #[token("!")]
    Bang,
    #[token("@")]
    At,
    #[token("#")]
    Hash,
    #[token("\\")]
    Backslash,
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("%")]
    #[token("|")]
    #[token("^")]
    #[token("~")]
    Operator,

    // =========================================================================
    // KEYWORDS (longest match wins over Ident in logos)
    // =========================================================================
    #[token("import")]
    ImportKw,
    #[token("class")]
    ClassKw,
    #[token("struct")]
    StructKw,
    #[token("enum")]
    EnumKw,
    #[token("protocol")]
    ProtocolKw,
    #[token("extension")]
    ExtensionKw,
    #[token("typealias")]
    TypealiasKw,
    #[token("associatedtype")]
    AssociatedtypeKw,
    #[token("func")]
    FuncKw,
    #[token("init")]
    InitKw,
    #[token("deinit")]
    DeinitKw,
    #[token("subscript")]
    SubscriptKw,
    #[token("var")]
    VarKw,
    #[token("let")]
    LetKw,
    #[token("case")]
    CaseKw,
    #[token("where")]
    WhereKw,
    #[token("static")]
    StaticKw,
    #[token("inout")]
    InoutKw,
    #[token("public")]
    PublicKw,
    #[token("private")]
    PrivateKw,
    #[token("fileprivate")]
    FileprivateKw,
    #[token("internal")]
    InternalKw,
    #[token("true")]
    TrueKw,
    #[token("false")]
    FalseKw,
    #[token("nil")]
    NilKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            // Trivia
            Whitespace => SyntaxKind::WHITESPACE,
            LineComment => SyntaxKind::LINE_COMMENT,
            BlockComment => SyntaxKind::BLOCK_COMMENT,
            Directive => SyntaxKind::DIRECTIVE,

            // Literals
            Ident => SyntaxKind::IDENT,
            Integer => SyntaxKind::INTEGER,
            Float => SyntaxKind::FLOAT,
            String => SyntaxKind::STRING,

            // Punctuation
            Ellipsis => SyntaxKind::ELLIPSIS,
            Arrow => SyntaxKind::ARROW,
            EqEq => SyntaxKind::EQ_EQ,
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            Semicolon => SyntaxKind::SEMICOLON,
            Colon => SyntaxKind::COLON,
            Comma => SyntaxKind::COMMA,
            Dot => SyntaxKind::DOT,
            Eq => SyntaxKind::EQ,
            Lt => SyntaxKind::LT,
            Gt => SyntaxKind::GT,
            Amp => SyntaxKind::AMP,
            Question => SyntaxKind::QUESTION,
            Bang => SyntaxKind::BANG,
            At => SyntaxKind::AT,
            Hash => SyntaxKind::HASH,
            Backslash => SyntaxKind::BACKSLASH,
            Operator => SyntaxKind::OPERATOR,

            // Keywords
            ImportKw => SyntaxKind::IMPORT_KW,
            ClassKw => SyntaxKind::CLASS_KW,
            StructKw => SyntaxKind::STRUCT_KW,
            EnumKw => SyntaxKind::ENUM_KW,
            ProtocolKw => SyntaxKind::PROTOCOL_KW,
            ExtensionKw => SyntaxKind::EXTENSION_KW,
            TypealiasKw => SyntaxKind::TYPEALIAS_KW,
            AssociatedtypeKw => SyntaxKind::ASSOCIATEDTYPE_KW,
            FuncKw => SyntaxKind::FUNC_KW,
            InitKw => SyntaxKind::INIT_KW,
            DeinitKw => SyntaxKind::DEINIT_KW,
            SubscriptKw => SyntaxKind::SUBSCRIPT_KW,
            VarKw => SyntaxKind::VAR_KW,
            LetKw => SyntaxKind::LET_KW,
            CaseKw => SyntaxKind::CASE_KW,
            WhereKw => SyntaxKind::WHERE_KW,
            StaticKw => SyntaxKind::STATIC_KW,
            InoutKw => SyntaxKind::INOUT_KW,
            PublicKw => SyntaxKind::PUBLIC_KW,
            PrivateKw => SyntaxKind::PRIVATE_KW,
            FileprivateKw => SyntaxKind::FILEPRIVATE_KW,
            InternalKw => SyntaxKind::INTERNAL_KW,
            TrueKw => SyntaxKind::TRUE_KW,
            FalseKw => SyntaxKind::FALSE_KW,
            NilKw => SyntaxKind::NIL_KW,
        }
    }
}
