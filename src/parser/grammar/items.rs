use super::*;
use rowan::Checkpoint;

// =============================================================================
// Lookahead
// =============================================================================

fn at_modifier_follow(p: &Parser<'_>, n: usize) -> bool {
    let kind = p.nth(n);
    kind.is_decl_keyword()
        || kind.is_access_keyword()
        || kind == SyntaxKind::STATIC_KW
        || kind == SyntaxKind::L_PAREN
        || (kind == SyntaxKind::IDENT
            && (Parser::is_contextual_modifier(p.nth_text(n)) || p.nth_text(n) == "actor"))
}

/// `final`, `override`, ... used as a modifier (not as an identifier).
fn is_contextual_modifier_at(p: &Parser<'_>, n: usize) -> bool {
    p.nth(n) == SyntaxKind::IDENT
        && Parser::is_contextual_modifier(p.nth_text(n))
        && at_modifier_follow(p, n + 1)
}

/// `class` as in `class func` / `class var` rather than a class declaration.
fn is_class_modifier_at(p: &Parser<'_>, n: usize) -> bool {
    if p.nth(n) != SyntaxKind::CLASS_KW {
        return false;
    }
    let next = p.nth(n + 1);
    matches!(
        next,
        SyntaxKind::FUNC_KW | SyntaxKind::VAR_KW | SyntaxKind::LET_KW | SyntaxKind::SUBSCRIPT_KW
    ) || next.is_access_keyword()
        || is_contextual_modifier_at(p, n + 1)
}

fn skip_modifier_detail(p: &Parser<'_>, n: usize) -> usize {
    if p.nth(n) == SyntaxKind::L_PAREN
        && p.nth(n + 1) == SyntaxKind::IDENT
        && p.nth(n + 2) == SyntaxKind::R_PAREN
    {
        n + 3
    } else {
        n
    }
}

fn skip_balanced_lookahead(p: &Parser<'_>, mut n: usize) -> Option<usize> {
    let mut depth = 0usize;
    loop {
        match p.nth(n) {
            SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET | SyntaxKind::L_BRACE => depth += 1,
            SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET | SyntaxKind::R_BRACE => {
                depth = depth.checked_sub(1)?;
            }
            SyntaxKind::ERROR if p.nth_text(n).is_empty() => return None,
            _ => {}
        }
        n += 1;
        if depth == 0 {
            return Some(n);
        }
    }
}

/// Offset of the declaration keyword after any attributes and modifiers.
fn decl_keyword_offset(p: &Parser<'_>) -> Option<usize> {
    let mut n = 0;
    loop {
        let kind = p.nth(n);
        match kind {
            SyntaxKind::AT => {
                n += 1;
                if p.nth(n) != SyntaxKind::IDENT {
                    return None;
                }
                n += 1;
                while p.nth(n) == SyntaxKind::DOT && p.nth(n + 1) == SyntaxKind::IDENT {
                    n += 2;
                }
                if p.nth(n) == SyntaxKind::L_PAREN && p.nth_adjacent(n) {
                    n = skip_balanced_lookahead(p, n)?;
                }
            }
            _ if kind.is_access_keyword() || kind == SyntaxKind::STATIC_KW => {
                n = skip_modifier_detail(p, n + 1);
            }
            SyntaxKind::CLASS_KW if is_class_modifier_at(p, n) => n += 1,
            SyntaxKind::IDENT if is_contextual_modifier_at(p, n) => {
                n = skip_modifier_detail(p, n + 1);
            }
            SyntaxKind::IDENT if p.nth_text(n) == "actor" && p.nth(n + 1) == SyntaxKind::IDENT => {
                return Some(n);
            }
            _ if kind.is_decl_keyword() => return Some(n),
            _ => return None,
        }
    }
}

/// Check if the cursor is at the start of a declaration.
pub(crate) fn at_decl_start(p: &Parser<'_>) -> bool {
    decl_keyword_offset(p).is_some()
}

// =============================================================================
// Items
// =============================================================================

pub(crate) fn parse_top_level_item(p: &mut Parser<'_>) {
    if at_decl_start(p) {
        parse_declaration(p);
    } else if p.at(SyntaxKind::SEMICOLON) {
        p.bump();
    } else if p.at(SyntaxKind::R_BRACE) {
        p.error("unexpected '}'");
        p.start_node(SyntaxKind::ERROR);
        p.bump();
        p.finish_node();
    } else {
        parse_statement(p);
    }
}

fn parse_member_item(p: &mut Parser<'_>) {
    if at_decl_start(p) {
        parse_declaration(p);
    } else if p.at(SyntaxKind::SEMICOLON) {
        p.bump();
    } else if p.at(SyntaxKind::ERROR) {
        // the lexer error is reported as the token is bumped
        p.start_node(SyntaxKind::ERROR);
        p.bump();
        p.finish_node();
    } else {
        p.error_recover("expected member declaration");
    }
}

/// Top-level executable code, kept as an opaque STATEMENT node.
fn parse_statement(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::STATEMENT);
    let mut depth = 0usize;
    let mut consumed = false;
    while !p.at_eof() {
        let kind = p.current_kind();
        if depth == 0 && consumed {
            if kind == SyntaxKind::SEMICOLON {
                p.bump();
                break;
            }
            if p.newline_before_current() && !is_continuation(kind) {
                break;
            }
        }
        if depth == 0 && kind == SyntaxKind::R_BRACE {
            break;
        }
        match kind {
            SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET | SyntaxKind::L_BRACE => depth += 1,
            SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET | SyntaxKind::R_BRACE => {
                depth = depth.saturating_sub(1)
            }
            _ => {}
        }
        p.bump();
        consumed = true;
    }
    p.finish_node();
}

fn parse_declaration(p: &mut Parser<'_>) {
    let checkpoint = p.checkpoint();
    parse_attributes_and_modifiers(p);

    match p.current_kind() {
        SyntaxKind::IMPORT_KW => parse_import(p, checkpoint),
        SyntaxKind::CLASS_KW => parse_type_declaration(p, checkpoint, SyntaxKind::CLASS_DECL),
        SyntaxKind::STRUCT_KW => parse_type_declaration(p, checkpoint, SyntaxKind::STRUCT_DECL),
        SyntaxKind::ENUM_KW => parse_type_declaration(p, checkpoint, SyntaxKind::ENUM_DECL),
        SyntaxKind::PROTOCOL_KW => {
            parse_type_declaration(p, checkpoint, SyntaxKind::PROTOCOL_DECL)
        }
        SyntaxKind::IDENT if p.at_ident("actor") => {
            parse_type_declaration(p, checkpoint, SyntaxKind::ACTOR_DECL)
        }
        SyntaxKind::EXTENSION_KW => parse_extension(p, checkpoint),
        SyntaxKind::TYPEALIAS_KW => parse_typealias(p, checkpoint),
        SyntaxKind::ASSOCIATEDTYPE_KW => parse_associated_type(p, checkpoint),
        SyntaxKind::VAR_KW | SyntaxKind::LET_KW => parse_variable(p, checkpoint),
        SyntaxKind::FUNC_KW => parse_function(p, checkpoint),
        SyntaxKind::INIT_KW => parse_initializer(p, checkpoint),
        SyntaxKind::DEINIT_KW => parse_deinitializer(p, checkpoint),
        SyntaxKind::SUBSCRIPT_KW => parse_subscript(p, checkpoint),
        SyntaxKind::CASE_KW => parse_enum_case(p, checkpoint),
        _ => {
            p.start_node_at(checkpoint, SyntaxKind::ERROR);
            p.error("expected declaration");
            p.finish_node();
        }
    }
}

// =============================================================================
// Attributes and modifiers
// =============================================================================

fn parse_attributes_and_modifiers(p: &mut Parser<'_>) {
    loop {
        if p.at(SyntaxKind::AT) {
            parse_attribute(p);
        } else if p.current_kind().is_access_keyword()
            || p.at(SyntaxKind::STATIC_KW)
            || is_class_modifier_at(p, 0)
            || is_contextual_modifier_at(p, 0)
        {
            parse_modifier(p);
        } else {
            break;
        }
    }
}

/// `@name`, `@Module.name`, `@name(args)`
pub(crate) fn parse_attribute(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::ATTRIBUTE);
    p.bump();
    if p.at(SyntaxKind::IDENT) {
        p.bump();
        while p.at(SyntaxKind::DOT) && p.nth(1) == SyntaxKind::IDENT {
            p.bump();
            p.bump();
        }
        if p.at_raw(SyntaxKind::L_PAREN) {
            p.start_node(SyntaxKind::ATTRIBUTE_ARGS);
            if !p.bump_balanced() {
                p.error("expected ')'");
            }
            p.finish_node();
        }
    } else {
        p.error("expected attribute name");
    }
    p.finish_node();
}

/// `public`, `private(set)`, `unowned(safe)`, `final`, ...
fn parse_modifier(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::MODIFIER);
    p.bump();
    if p.at(SyntaxKind::L_PAREN) && p.nth(1) == SyntaxKind::IDENT && p.nth(2) == SyntaxKind::R_PAREN
    {
        p.start_node(SyntaxKind::MODIFIER_DETAIL);
        p.bump();
        p.bump();
        p.bump();
        p.finish_node();
    }
    p.finish_node();
}

/// `async`, `throws`, `throws(E)`, `rethrows`
pub(crate) fn parse_effects(p: &mut Parser<'_>) {
    while p.at_ident("async")
        || p.at_ident("reasync")
        || p.at_ident("throws")
        || p.at_ident("rethrows")
    {
        let typed = p.at_ident("throws");
        p.bump();
        if typed && p.at_raw(SyntaxKind::L_PAREN) {
            p.bump_balanced();
        }
    }
}

// =============================================================================
// Shared pieces
// =============================================================================

fn parse_name(p: &mut Parser<'_>, what: &str) -> bool {
    if p.at(SyntaxKind::IDENT) {
        p.start_node(SyntaxKind::NAME);
        p.bump();
        p.finish_node();
        true
    } else {
        p.error(format!("expected {} name", what));
        false
    }
}

fn parse_generic_params(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::GENERIC_PARAM_LIST);
    p.bump();
    while !p.at(SyntaxKind::GT) && !p.at_eof() {
        p.start_node(SyntaxKind::GENERIC_PARAM);
        if p.at_ident("each") && p.nth(1) == SyntaxKind::IDENT {
            p.bump();
        }
        parse_name(p, "generic parameter");
        if p.eat(SyntaxKind::COLON) {
            parse_type(p);
        }
        p.finish_node();
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.expect(SyntaxKind::GT, "'>'");
    p.finish_node();
}

fn parse_inheritance(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::INHERITANCE_CLAUSE);
    p.bump();
    loop {
        parse_type(p);
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.finish_node();
}

/// `where T: P, U == V`
fn parse_where_clause(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::GENERIC_WHERE_CLAUSE);
    p.bump();
    loop {
        p.start_node(SyntaxKind::GENERIC_REQUIREMENT);
        parse_type(p);
        if p.at(SyntaxKind::COLON) || p.at(SyntaxKind::EQ_EQ) {
            p.bump();
            parse_type(p);
        } else {
            p.error("expected ':' or '==' in requirement");
        }
        p.finish_node();
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.finish_node();
}

fn parse_member_block(p: &mut Parser<'_>) {
    if !p.at(SyntaxKind::L_BRACE) {
        p.error("expected '{'");
        return;
    }
    p.start_node(SyntaxKind::MEMBER_BLOCK);
    p.bump();
    loop {
        if p.eat(SyntaxKind::R_BRACE) {
            break;
        }
        if p.at_eof() {
            p.error("expected '}'");
            break;
        }
        parse_member_item(p);
    }
    p.finish_node();
}

/// A brace-matched block that is not parsed further.
fn parse_opaque_block(p: &mut Parser<'_>, kind: SyntaxKind) {
    p.start_node(kind);
    if !p.bump_balanced() {
        p.error("expected '}'");
    }
    p.finish_node();
}

/// `(label name: Type = default, ...)`
///
/// With `allow_unnamed`, elements may be bare types as in enum associated values.
fn parse_param_list(p: &mut Parser<'_>, allow_unnamed: bool) {
    p.start_node(SyntaxKind::PARAM_LIST);
    p.expect(SyntaxKind::L_PAREN, "'('");
    while !p.at(SyntaxKind::R_PAREN) && !p.at_eof() {
        parse_param(p, allow_unnamed);
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.expect(SyntaxKind::R_PAREN, "')'");
    p.finish_node();
}

fn parse_param(p: &mut Parser<'_>, allow_unnamed: bool) {
    p.start_node(SyntaxKind::PARAM);
    let single = is_name_like(p.current_kind()) && p.nth(1) == SyntaxKind::COLON;
    let labelled = is_name_like(p.current_kind())
        && is_name_like(p.nth(1))
        && p.nth(2) == SyntaxKind::COLON;

    if single || labelled {
        p.bump_as(SyntaxKind::IDENT);
        if labelled {
            p.bump_as(SyntaxKind::IDENT);
        }
        p.start_node(SyntaxKind::TYPE_ANNOTATION);
        p.bump();
        parse_type(p);
        p.finish_node();
    } else if allow_unnamed {
        p.start_node(SyntaxKind::TYPE_ANNOTATION);
        parse_type(p);
        p.finish_node();
    } else {
        p.error("expected parameter name");
        while !p.at_eof() && !p.at(SyntaxKind::COMMA) && !p.at(SyntaxKind::R_PAREN) {
            if p.at_any(&[SyntaxKind::L_PAREN, SyntaxKind::L_BRACKET, SyntaxKind::L_BRACE]) {
                p.bump_balanced();
            } else {
                p.bump();
            }
        }
    }

    p.eat(SyntaxKind::ELLIPSIS);
    if p.at(SyntaxKind::EQ) {
        p.start_node(SyntaxKind::INITIALIZER);
        p.bump();
        parse_expr(p);
        p.finish_node();
    }
    p.finish_node();
}

fn parse_return_clause(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::RETURN_CLAUSE);
    p.bump();
    parse_type(p);
    p.finish_node();
}

// =============================================================================
// Declarations
// =============================================================================

/// `import [kind] A.B.C`
fn parse_import(p: &mut Parser<'_>, checkpoint: Checkpoint) {
    p.start_node_at(checkpoint, SyntaxKind::IMPORT_DECL);
    p.bump();
    if matches!(
        p.current_kind(),
        SyntaxKind::STRUCT_KW
            | SyntaxKind::CLASS_KW
            | SyntaxKind::ENUM_KW
            | SyntaxKind::PROTOCOL_KW
            | SyntaxKind::TYPEALIAS_KW
            | SyntaxKind::FUNC_KW
            | SyntaxKind::VAR_KW
            | SyntaxKind::LET_KW
    ) {
        p.bump();
    }
    p.start_node(SyntaxKind::IMPORT_PATH);
    p.expect(SyntaxKind::IDENT, "module name");
    while p.at(SyntaxKind::DOT) {
        p.bump();
        if p.at(SyntaxKind::IDENT) || p.at(SyntaxKind::OPERATOR) {
            p.bump();
        } else {
            p.error("expected name after '.'");
            break;
        }
    }
    p.finish_node();
    p.finish_node();
}

/// class / struct / enum / protocol / actor
fn parse_type_declaration(p: &mut Parser<'_>, checkpoint: Checkpoint, kind: SyntaxKind) {
    p.start_node_at(checkpoint, kind);
    p.bump();
    parse_name(p, "type");
    if p.at(SyntaxKind::LT) {
        parse_generic_params(p);
    }
    if p.at(SyntaxKind::COLON) {
        parse_inheritance(p);
    }
    if p.at(SyntaxKind::WHERE_KW) {
        parse_where_clause(p);
    }
    parse_member_block(p);
    p.finish_node();
}

fn parse_extension(p: &mut Parser<'_>, checkpoint: Checkpoint) {
    p.start_node_at(checkpoint, SyntaxKind::EXTENSION_DECL);
    p.bump();
    parse_type(p);
    if p.at(SyntaxKind::COLON) {
        parse_inheritance(p);
    }
    if p.at(SyntaxKind::WHERE_KW) {
        parse_where_clause(p);
    }
    parse_member_block(p);
    p.finish_node();
}

fn parse_typealias(p: &mut Parser<'_>, checkpoint: Checkpoint) {
    p.start_node_at(checkpoint, SyntaxKind::TYPEALIAS_DECL);
    p.bump();
    parse_name(p, "typealias");
    if p.at(SyntaxKind::LT) {
        parse_generic_params(p);
    }
    if p.expect(SyntaxKind::EQ, "'='") {
        parse_type(p);
    }
    if p.at(SyntaxKind::WHERE_KW) {
        parse_where_clause(p);
    }
    p.finish_node();
}

fn parse_associated_type(p: &mut Parser<'_>, checkpoint: Checkpoint) {
    p.start_node_at(checkpoint, SyntaxKind::ASSOCIATED_TYPE_DECL);
    p.bump();
    parse_name(p, "associated type");
    if p.at(SyntaxKind::COLON) {
        parse_inheritance(p);
    }
    if p.eat(SyntaxKind::EQ) {
        parse_type(p);
    }
    if p.at(SyntaxKind::WHERE_KW) {
        parse_where_clause(p);
    }
    p.finish_node();
}

/// `var a: T = x, b = y { get set }`
fn parse_variable(p: &mut Parser<'_>, checkpoint: Checkpoint) {
    p.start_node_at(checkpoint, SyntaxKind::VAR_DECL);
    p.bump();
    loop {
        parse_pattern_binding(p);
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.finish_node();
}

fn parse_pattern_binding(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::PATTERN_BINDING);
    if p.at(SyntaxKind::IDENT) {
        parse_name(p, "variable");
    } else if p.at(SyntaxKind::L_PAREN) {
        p.start_node(SyntaxKind::TUPLE_PATTERN);
        p.bump_balanced();
        p.finish_node();
    } else {
        p.error("expected variable name");
    }
    if p.at(SyntaxKind::COLON) {
        p.start_node(SyntaxKind::TYPE_ANNOTATION);
        p.bump();
        parse_type(p);
        p.finish_node();
    }
    if p.at(SyntaxKind::EQ) {
        p.start_node(SyntaxKind::INITIALIZER);
        p.bump();
        parse_expr(p);
        p.finish_node();
    }
    if p.at(SyntaxKind::L_BRACE) {
        parse_opaque_block(p, SyntaxKind::ACCESSOR_BLOCK);
    }
    p.finish_node();
}

fn is_operator_token(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::OPERATOR
            | SyntaxKind::LT
            | SyntaxKind::GT
            | SyntaxKind::EQ
            | SyntaxKind::EQ_EQ
            | SyntaxKind::AMP
            | SyntaxKind::QUESTION
            | SyntaxKind::BANG
            | SyntaxKind::DOT
            | SyntaxKind::ELLIPSIS
    )
}

fn parse_function(p: &mut Parser<'_>, checkpoint: Checkpoint) {
    p.start_node_at(checkpoint, SyntaxKind::FUNC_DECL);
    p.bump();
    let is_operator = is_operator_token(p.current_kind()) && !p.at_eof();
    if is_operator {
        // Operator implementation: `static func == (lhs: A, rhs: A) -> Bool`
        p.start_node(SyntaxKind::NAME);
        p.bump_as(SyntaxKind::OPERATOR);
        while p
            .peek_raw_kind()
            .is_some_and(is_operator_token)
        {
            p.bump_as(SyntaxKind::OPERATOR);
        }
        p.finish_node();
    } else {
        parse_name(p, "function");
        if p.at(SyntaxKind::LT) {
            parse_generic_params(p);
        }
    }
    parse_param_list(p, false);
    parse_effects(p);
    if p.at(SyntaxKind::ARROW) {
        parse_return_clause(p);
    }
    if p.at(SyntaxKind::WHERE_KW) {
        parse_where_clause(p);
    }
    if p.at(SyntaxKind::L_BRACE) {
        parse_opaque_block(p, SyntaxKind::CODE_BLOCK);
    }
    p.finish_node();
}

/// `init`, `init?`, `init!`
fn parse_initializer(p: &mut Parser<'_>, checkpoint: Checkpoint) {
    p.start_node_at(checkpoint, SyntaxKind::INIT_DECL);
    p.bump();
    if p.at_raw(SyntaxKind::QUESTION) || p.at_raw(SyntaxKind::BANG) {
        p.bump();
    }
    if p.at(SyntaxKind::LT) {
        parse_generic_params(p);
    }
    parse_param_list(p, false);
    parse_effects(p);
    if p.at(SyntaxKind::WHERE_KW) {
        parse_where_clause(p);
    }
    if p.at(SyntaxKind::L_BRACE) {
        parse_opaque_block(p, SyntaxKind::CODE_BLOCK);
    }
    p.finish_node();
}

fn parse_deinitializer(p: &mut Parser<'_>, checkpoint: Checkpoint) {
    p.start_node_at(checkpoint, SyntaxKind::DEINIT_DECL);
    p.bump();
    if p.at(SyntaxKind::L_BRACE) {
        parse_opaque_block(p, SyntaxKind::CODE_BLOCK);
    }
    p.finish_node();
}

fn parse_subscript(p: &mut Parser<'_>, checkpoint: Checkpoint) {
    p.start_node_at(checkpoint, SyntaxKind::SUBSCRIPT_DECL);
    p.bump();
    if p.at(SyntaxKind::LT) {
        parse_generic_params(p);
    }
    parse_param_list(p, false);
    if p.at(SyntaxKind::ARROW) {
        parse_return_clause(p);
    } else {
        p.error("expected '->'");
    }
    if p.at(SyntaxKind::WHERE_KW) {
        parse_where_clause(p);
    }
    if p.at(SyntaxKind::L_BRACE) {
        parse_opaque_block(p, SyntaxKind::ACCESSOR_BLOCK);
    }
    p.finish_node();
}

/// `case a, b(Int), c(x: Int) = 3`
fn parse_enum_case(p: &mut Parser<'_>, checkpoint: Checkpoint) {
    p.start_node_at(checkpoint, SyntaxKind::ENUM_CASE_DECL);
    p.bump();
    loop {
        p.start_node(SyntaxKind::ENUM_CASE_ELEMENT);
        if is_name_like(p.current_kind()) && !p.at_eof() {
            p.start_node(SyntaxKind::NAME);
            p.bump_as(SyntaxKind::IDENT);
            p.finish_node();
        } else {
            p.error("expected case name");
        }
        if p.at(SyntaxKind::L_PAREN) {
            parse_param_list(p, true);
        }
        if p.at(SyntaxKind::EQ) {
            p.start_node(SyntaxKind::RAW_VALUE);
            p.bump();
            parse_expr(p);
            p.finish_node();
        }
        p.finish_node();
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.finish_node();
}
