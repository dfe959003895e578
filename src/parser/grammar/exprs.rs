use super::*;

/// Tokens that continue an expression onto the next line.
pub(crate) fn is_continuation(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::DOT
            | SyntaxKind::OPERATOR
            | SyntaxKind::QUESTION
            | SyntaxKind::EQ
            | SyntaxKind::EQ_EQ
            | SyntaxKind::AMP
            | SyntaxKind::LT
            | SyntaxKind::GT
            | SyntaxKind::ARROW
            | SyntaxKind::COLON
            | SyntaxKind::ELLIPSIS
    )
}

/// Parse a raw expression as an opaque EXPR node.
///
/// Stops at depth 0 on `,` `;` or a closing delimiter, at a line break that
/// is not followed by a continuation token, and before a `{ willSet`/`{ didSet`
/// observer block.
pub(crate) fn parse_expr(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::EXPR);
    let mut depth = 0usize;
    let mut consumed = false;

    while !p.at_eof() {
        let kind = p.current_kind();
        if depth == 0 {
            if matches!(
                kind,
                SyntaxKind::COMMA
                    | SyntaxKind::SEMICOLON
                    | SyntaxKind::R_PAREN
                    | SyntaxKind::R_BRACKET
                    | SyntaxKind::R_BRACE
            ) {
                break;
            }
            if consumed && p.newline_before_current() && !is_continuation(kind) {
                break;
            }
            if kind == SyntaxKind::L_BRACE && (p.nth_ident(1, "willSet") || p.nth_ident(1, "didSet"))
            {
                break;
            }
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

    if !consumed {
        p.error("expected expression");
    }
    p.finish_node();
}
