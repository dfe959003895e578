//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree.
//! It covers the declaration-level subset of Swift: bodies and expressions
//! are kept as opaque token runs.

/// All syntax kinds (tokens and nodes).
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (type declarations, members, type references).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace, comments, compiler directives)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,
    DIRECTIVE, // #if / #elseif / #else / #endif line

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,   // identifier, `backticked`, $0
    INTEGER, // 42, 0xFF
    FLOAT,   // 3.14
    STRING,  // "hello", """multi""", #"raw"#

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,   // {
    R_BRACE,   // }
    L_BRACKET, // [
    R_BRACKET, // ]
    L_PAREN,   // (
    R_PAREN,   // )
    SEMICOLON, // ;
    COLON,     // :
    COMMA,     // ,
    DOT,       // .
    ELLIPSIS,  // ...
    EQ,        // =
    EQ_EQ,     // ==
    ARROW,     // ->
    LT,        // <
    GT,        // >
    AMP,       // &
    QUESTION,  // ?
    BANG,      // !
    AT,        // @
    HASH,      // #
    BACKSLASH, // \
    OPERATOR,  // any other operator character: + - * / % | ^ ~

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    IMPORT_KW,
    CLASS_KW,
    STRUCT_KW,
    ENUM_KW,
    PROTOCOL_KW,
    EXTENSION_KW,
    TYPEALIAS_KW,
    ASSOCIATEDTYPE_KW,
    FUNC_KW,
    INIT_KW,
    DEINIT_KW,
    SUBSCRIPT_KW,
    VAR_KW,
    LET_KW,
    CASE_KW,
    WHERE_KW,
    STATIC_KW,
    INOUT_KW,
    PUBLIC_KW,
    PRIVATE_KW,
    FILEPRIVATE_KW,
    INTERNAL_KW,
    TRUE_KW,
    FALSE_KW,
    NIL_KW,

    // =========================================================================
    // NODES
    // =========================================================================
    SOURCE_FILE,
    STATEMENT, // top-level code, kept opaque

    // Declarations
    IMPORT_DECL,
    IMPORT_PATH,
    CLASS_DECL,
    STRUCT_DECL,
    ENUM_DECL,
    PROTOCOL_DECL,
    EXTENSION_DECL,
    ACTOR_DECL,
    TYPEALIAS_DECL,
    ASSOCIATED_TYPE_DECL,
    VAR_DECL,
    PATTERN_BINDING,
    TUPLE_PATTERN,
    FUNC_DECL,
    INIT_DECL,
    DEINIT_DECL,
    SUBSCRIPT_DECL,
    ENUM_CASE_DECL,
    ENUM_CASE_ELEMENT,

    // Declaration parts
    NAME,
    ATTRIBUTE,
    ATTRIBUTE_ARGS,
    MODIFIER,
    MODIFIER_DETAIL,
    INHERITANCE_CLAUSE,
    GENERIC_PARAM_LIST,
    GENERIC_PARAM,
    GENERIC_WHERE_CLAUSE,
    GENERIC_REQUIREMENT,
    PARAM_LIST,
    PARAM,
    TYPE_ANNOTATION,
    RETURN_CLAUSE,
    INITIALIZER,
    EXPR,
    RAW_VALUE,
    MEMBER_BLOCK,
    CODE_BLOCK,
    ACCESSOR_BLOCK,

    // Types
    NAMED_TYPE,
    GENERIC_ARG_LIST,
    ARRAY_TYPE,
    DICTIONARY_TYPE,
    TUPLE_TYPE,
    TUPLE_TYPE_ELEMENT,
    FUNCTION_TYPE,
    OPTIONAL_TYPE,
    IUO_TYPE,
    COMPOSITION_TYPE,
    METATYPE_TYPE,
    SOME_TYPE,
    ANY_TYPE,
    ATTRIBUTED_TYPE,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace, comment or directive)
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT | Self::DIRECTIVE
        )
    }

    /// Check if this is a comment token
    pub fn is_comment(self) -> bool {
        matches!(self, Self::LINE_COMMENT | Self::BLOCK_COMMENT)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::IMPORT_KW as u16) && (self as u16) <= (Self::NIL_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_BRACE as u16) && (self as u16) <= (Self::OPERATOR as u16)
    }

    /// Check if this is a literal
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::INTEGER | Self::FLOAT | Self::STRING | Self::TRUE_KW | Self::FALSE_KW | Self::NIL_KW
        )
    }

    /// Keywords that open a type declaration.
    pub fn is_type_decl_keyword(self) -> bool {
        matches!(
            self,
            Self::CLASS_KW
                | Self::STRUCT_KW
                | Self::ENUM_KW
                | Self::PROTOCOL_KW
                | Self::EXTENSION_KW
        )
    }

    /// Keywords that open any declaration.
    pub fn is_decl_keyword(self) -> bool {
        self.is_type_decl_keyword()
            || matches!(
                self,
                Self::IMPORT_KW
                    | Self::TYPEALIAS_KW
                    | Self::ASSOCIATEDTYPE_KW
                    | Self::FUNC_KW
                    | Self::INIT_KW
                    | Self::DEINIT_KW
                    | Self::SUBSCRIPT_KW
                    | Self::VAR_KW
                    | Self::LET_KW
                    | Self::CASE_KW
            )
    }

    /// Access-level keywords.
    pub fn is_access_keyword(self) -> bool {
        matches!(
            self,
            Self::PUBLIC_KW | Self::PRIVATE_KW | Self::FILEPRIVATE_KW | Self::INTERNAL_KW
        )
    }

    /// Node kinds that represent a type reference.
    pub fn is_type_node(self) -> bool {
        matches!(
            self,
            Self::NAMED_TYPE
                | Self::ARRAY_TYPE
                | Self::DICTIONARY_TYPE
                | Self::TUPLE_TYPE
                | Self::FUNCTION_TYPE
                | Self::OPTIONAL_TYPE
                | Self::IUO_TYPE
                | Self::COMPOSITION_TYPE
                | Self::METATYPE_TYPE
                | Self::SOME_TYPE
                | Self::ANY_TYPE
                | Self::ATTRIBUTED_TYPE
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SwiftLanguage {}

impl rowan::Language for SwiftLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<SwiftLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<SwiftLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<SwiftLanguage>;
