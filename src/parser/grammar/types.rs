use super::*;

/// Ownership specifiers that may prefix a type.
const TYPE_SPECIFIERS: &[&str] = &["__owned", "__shared", "borrowing", "consuming", "sending", "isolated"];

fn starts_type(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::IDENT | SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET | SyntaxKind::AT
    )
}

fn at_type_specifier(p: &Parser<'_>) -> bool {
    p.at(SyntaxKind::IDENT) && TYPE_SPECIFIERS.contains(&p.current_text()) && starts_type(p.nth(1))
}

/// Parse a type reference.
///
/// ```text
/// type := attributes* ('inout' | specifier)* type
///       | ('some' | 'any') type
///       | primary ['async'] ['throws'] ['->' type]   (function, primary is a tuple)
///       | primary postfix*
/// postfix := '?' | '!' | '.Type' | '.Protocol' | ('&' primary)+
/// ```
pub(crate) fn parse_type(p: &mut Parser<'_>) {
    if p.at(SyntaxKind::AT) || p.at(SyntaxKind::INOUT_KW) || at_type_specifier(p) {
        p.start_node(SyntaxKind::ATTRIBUTED_TYPE);
        loop {
            if p.at(SyntaxKind::AT) {
                parse_attribute(p);
            } else if p.at(SyntaxKind::INOUT_KW) || at_type_specifier(p) {
                p.bump();
            } else {
                break;
            }
        }
        parse_type(p);
        p.finish_node();
        return;
    }

    if (p.at_ident("some") || p.at_ident("any")) && starts_type(p.nth(1)) {
        let kind = if p.at_ident("some") {
            SyntaxKind::SOME_TYPE
        } else {
            SyntaxKind::ANY_TYPE
        };
        p.start_node(kind);
        p.bump();
        parse_type(p);
        p.finish_node();
        return;
    }

    let checkpoint = p.checkpoint();
    let is_tuple = p.at(SyntaxKind::L_PAREN);
    if !parse_primary_type(p) {
        return;
    }

    if is_tuple && at_function_arrow(p) {
        parse_effects(p);
        p.expect(SyntaxKind::ARROW, "'->'");
        parse_type(p);
        p.start_node_at(checkpoint, SyntaxKind::FUNCTION_TYPE);
        p.finish_node();
    }

    parse_type_postfix(p, checkpoint);
}

fn at_function_arrow(p: &Parser<'_>) -> bool {
    if p.at(SyntaxKind::ARROW) {
        return true;
    }
    (p.at_ident("async") || p.at_ident("throws"))
        && (p.nth(1) == SyntaxKind::ARROW
            || p.nth(1) == SyntaxKind::L_PAREN
            || p.nth_ident(1, "throws"))
}

fn parse_type_postfix(p: &mut Parser<'_>, checkpoint: rowan::Checkpoint) {
    loop {
        if p.at_raw(SyntaxKind::QUESTION) {
            p.start_node_at(checkpoint, SyntaxKind::OPTIONAL_TYPE);
            p.bump();
            p.finish_node();
        } else if p.at_raw(SyntaxKind::BANG) {
            p.start_node_at(checkpoint, SyntaxKind::IUO_TYPE);
            p.bump();
            p.finish_node();
        } else if p.at(SyntaxKind::DOT) && (p.nth_ident(1, "Type") || p.nth_ident(1, "Protocol")) {
            p.start_node_at(checkpoint, SyntaxKind::METATYPE_TYPE);
            p.bump();
            p.bump();
            p.finish_node();
        } else if p.at(SyntaxKind::AMP) {
            p.start_node_at(checkpoint, SyntaxKind::COMPOSITION_TYPE);
            while p.eat(SyntaxKind::AMP) {
                parse_primary_type(p);
            }
            p.finish_node();
        } else {
            break;
        }
    }
}

/// Parse a named, collection or tuple type. Returns false if no type was found.
fn parse_primary_type(p: &mut Parser<'_>) -> bool {
    match p.current_kind() {
        _ if p.at_eof() => {
            p.error("expected type");
            false
        }
        SyntaxKind::IDENT | SyntaxKind::CLASS_KW => {
            parse_named_type(p);
            true
        }
        SyntaxKind::OPERATOR if p.current_text() == "~" && p.nth(1) == SyntaxKind::IDENT => {
            // Suppressed conformance: `~Copyable`
            parse_named_type(p);
            true
        }
        SyntaxKind::L_BRACKET => {
            parse_collection_type(p);
            true
        }
        SyntaxKind::L_PAREN => {
            parse_tuple_type(p);
            true
        }
        _ => {
            p.error("expected type");
            false
        }
    }
}

fn parse_named_type(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::NAMED_TYPE);
    if p.at(SyntaxKind::OPERATOR) {
        p.bump();
    }
    p.bump();
    if p.at_raw(SyntaxKind::LT) {
        parse_generic_args(p);
    }
    while p.at(SyntaxKind::DOT)
        && p.nth(1) == SyntaxKind::IDENT
        && !p.nth_ident(1, "Type")
        && !p.nth_ident(1, "Protocol")
    {
        p.bump();
        p.bump();
        if p.at_raw(SyntaxKind::LT) {
            parse_generic_args(p);
        }
    }
    p.finish_node();
}

fn parse_generic_args(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::GENERIC_ARG_LIST);
    p.bump();
    loop {
        parse_type(p);
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.expect(SyntaxKind::GT, "'>'");
    p.finish_node();
}

/// `[T]` or `[K: V]`
fn parse_collection_type(p: &mut Parser<'_>) {
    let checkpoint = p.checkpoint();
    p.bump();
    parse_type(p);
    let kind = if p.eat(SyntaxKind::COLON) {
        parse_type(p);
        SyntaxKind::DICTIONARY_TYPE
    } else {
        SyntaxKind::ARRAY_TYPE
    };
    p.expect(SyntaxKind::R_BRACKET, "']'");
    p.start_node_at(checkpoint, kind);
    p.finish_node();
}

/// `(A, label: B, C...)`; also the parameter list of a function type.
fn parse_tuple_type(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::TUPLE_TYPE);
    p.bump();
    while !p.at(SyntaxKind::R_PAREN) && !p.at_eof() {
        p.start_node(SyntaxKind::TUPLE_TYPE_ELEMENT);
        if is_name_like(p.current_kind()) && p.nth(1) == SyntaxKind::COLON {
            p.bump_as(SyntaxKind::IDENT);
            p.bump();
        } else if is_name_like(p.current_kind())
            && is_name_like(p.nth(1))
            && p.nth(2) == SyntaxKind::COLON
        {
            p.bump_as(SyntaxKind::IDENT);
            p.bump_as(SyntaxKind::IDENT);
            p.bump();
        }
        parse_type(p);
        p.eat(SyntaxKind::ELLIPSIS);
        p.finish_node();
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.expect(SyntaxKind::R_PAREN, "')'");
    p.finish_node();
}
