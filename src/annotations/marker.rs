//! Marker comment parsing.
//!
//! Recognised forms (comment delimiters already part of the text):
//! - `// sourcery: k1, k2 = v` and `/* sourcery: ... */` - inline
//! - `// sourcery:begin: k` / `// sourcery:begin:scope: k` - opens a block
//! - `// sourcery:end` / `// sourcery:end:scope` - closes a block
//! - `// sourcery:file: k` - file-level annotations

use super::value::{AnnotationValue, Annotations};
use crate::base::constants::ANNOTATION_MARKER;

/// What a marker comment does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerKind {
    Inline,
    Begin { scope: Option<String> },
    End { scope: Option<String> },
    File,
}

/// A parsed marker comment
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub annotations: Annotations,
}

/// Remove comment delimiters (`//`, `///`, `/* */`, `/** */`) and surrounding space.
pub fn comment_body(text: &str) -> &str {
    let body = if let Some(rest) = text.strip_prefix("//") {
        rest.trim_start_matches('/')
    } else if let Some(rest) = text.strip_prefix("/*") {
        let rest = rest.strip_suffix("*/").unwrap_or(rest);
        rest.trim_start_matches('*')
    } else {
        text
    };
    body.trim()
}

/// Try to match a directive prefix followed by `:` or the end of the text.
fn strip_directive_prefix<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    text.strip_prefix(prefix)
        .filter(|rest| rest.is_empty() || rest.starts_with(':'))
}

fn is_scope_name(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

impl Marker {
    /// Parse a raw comment token.
    ///
    /// Returns `None` for ordinary comments.
    pub fn parse(comment: &str) -> Option<Self> {
        let body = comment_body(comment);
        let rest = body.strip_prefix(ANNOTATION_MARKER)?;

        if let Some(rest) = strip_directive_prefix(rest, ":begin") {
            let rest = rest.strip_prefix(':').unwrap_or(rest);
            let (scope, entries) = split_scope(rest);
            return Some(Self {
                kind: MarkerKind::Begin { scope },
                annotations: parse_entries(entries),
            });
        }
        if let Some(rest) = strip_directive_prefix(rest, ":end") {
            let scope = rest
                .strip_prefix(':')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string);
            return Some(Self {
                kind: MarkerKind::End { scope },
                annotations: Annotations::new(),
            });
        }
        if let Some(rest) = strip_directive_prefix(rest, ":file") {
            let rest = rest.strip_prefix(':').unwrap_or(rest);
            return Some(Self {
                kind: MarkerKind::File,
                annotations: parse_entries(rest),
            });
        }

        let rest = rest.strip_prefix(':')?;
        Some(Self {
            kind: MarkerKind::Inline,
            annotations: parse_entries(rest),
        })
    }
}

/// Split `scope: entries` from `: entries` after `begin`.
fn split_scope(rest: &str) -> (Option<String>, &str) {
    if rest.starts_with(char::is_whitespace) || rest.is_empty() {
        return (None, rest);
    }
    match rest.split_once(':') {
        Some((scope, entries)) if is_scope_name(scope) => (Some(scope.to_string()), entries),
        _ => (None, rest),
    }
}

/// Entries of a (possibly multi-line) marker: each line is its own entry list.
fn parse_entries(text: &str) -> Annotations {
    let mut annotations = Annotations::new();
    for line in text.lines() {
        let line = line.trim().trim_start_matches('*').trim();
        for (key, value) in parse_line(line).iter() {
            annotations.insert(key.clone(), value.clone());
        }
    }
    annotations
}

/// Parse a comma separated `key`, `key = value` list.
///
/// Commas and `=` inside brackets, braces, parentheses or quotes do not
/// split. A bare key is `true`; duplicate keys keep the last value.
pub fn parse_line(line: &str) -> Annotations {
    let mut annotations = Annotations::new();
    for item in split_top_level(line, ',') {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        let (key, value) = match split_first_top_level(item, '=') {
            Some((key, value)) => (key.trim(), parse_value(value.trim())),
            None => (item, AnnotationValue::Bool(true)),
        };
        if key.is_empty() {
            continue;
        }
        annotations.insert(key, value);
    }
    annotations
}

/// Parse one annotation value: JSON when possible, else the raw text.
pub fn parse_value(text: &str) -> AnnotationValue {
    if text.is_empty() {
        return AnnotationValue::String(String::new());
    }
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(text) {
        return AnnotationValue::from_json(json);
    }
    if text.len() >= 2 && text.starts_with('\'') && text.ends_with('\'') {
        return AnnotationValue::String(text[1..text.len() - 1].to_string());
    }
    AnnotationValue::String(text.to_string())
}

/// Byte offsets of `separator` at nesting depth 0, outside quotes.
fn top_level_positions(text: &str, separator: char) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (idx, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '[' | '{' | '(' => depth += 1,
            ']' | '}' | ')' => depth = (depth - 1).max(0),
            _ if c == separator && depth == 0 => positions.push(idx),
            _ => {}
        }
    }
    positions
}

fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for idx in top_level_positions(text, separator) {
        parts.push(&text[start..idx]);
        start = idx + separator.len_utf8();
    }
    parts.push(&text[start..]);
    parts
}

fn split_first_top_level(text: &str, separator: char) -> Option<(&str, &str)> {
    let idx = *top_level_positions(text, separator).first()?;
    Some((&text[..idx], &text[idx + separator.len_utf8()..]))
}
