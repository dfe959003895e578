//! Syntax-level parsing interface.
//!
//! Converts rowan syntax errors into positioned [`ParseError`]s and offers
//! file-loading helpers for Swift sources.

use crate::base::TextRange;
use crate::base::constants::SWIFT_EXT;
use crate::syntax::file::SyntaxFile;
use std::path::Path;

/// Parse error type for syntax-level errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub range: TextRange,
    /// 0-indexed line of the range start
    pub line: usize,
    /// 0-indexed byte column of the range start
    pub column: usize,
}

impl ParseError {
    pub fn syntax_error(message: &str, range: TextRange, line: usize, column: usize) -> Self {
        Self {
            message: message.to_string(),
            range,
            line,
            column,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.line + 1, self.column + 1, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Parse result containing content and any errors
#[derive(Debug)]
pub struct ParseResult<T> {
    pub content: Option<T>,
    pub errors: Vec<ParseError>,
}

impl<T> ParseResult<T> {
    pub fn with_errors(errors: Vec<ParseError>) -> Self {
        Self {
            content: None,
            errors,
        }
    }

    pub fn ok(content: T) -> Self {
        Self {
            content: Some(content),
            errors: Vec::new(),
        }
    }

    pub fn with_content_and_errors(content: T, errors: Vec<ParseError>) -> Self {
        Self {
            content: Some(content),
            errors,
        }
    }

    /// Check if parsing succeeded without errors
    pub fn is_ok(&self) -> bool {
        self.content.is_some() && self.errors.is_empty()
    }

    /// Check if there are any parse errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get the syntax file (alias for content)
    pub fn syntax_file(&self) -> Option<&T> {
        self.content.as_ref()
    }
}

/// Check that a path names a Swift source file
pub fn validate_extension(path: &Path) -> Result<&str, String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| "No file extension".to_string())?;
    if ext == SWIFT_EXT {
        Ok(ext)
    } else {
        Err(format!("Unsupported file extension: {}", ext))
    }
}

/// Loads and parses a Swift file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The file has an invalid extension
pub fn load_and_parse(path: &Path) -> Result<SyntaxFile, String> {
    validate_extension(path)?;
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;
    Ok(SyntaxFile::new(&content))
}

/// Parses content and returns a ParseResult with detailed error information.
///
/// Errors don't fail the parse: the recovered tree is always returned.
pub fn parse_with_result(content: &str) -> ParseResult<SyntaxFile> {
    let syntax_file = SyntaxFile::new(content);

    let errors: Vec<ParseError> = syntax_file
        .errors()
        .iter()
        .map(|e| {
            let line_col = syntax_file.line_index().line_col(e.range.start());
            ParseError::syntax_error(
                &e.message,
                e.range,
                line_col.line as usize,
                line_col.col as usize,
            )
        })
        .collect();

    if errors.is_empty() {
        ParseResult::ok(syntax_file)
    } else {
        ParseResult::with_content_and_errors(syntax_file, errors)
    }
}
