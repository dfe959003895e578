//! Diagnostics — problems found while building the model.
//!
//! Diagnostics are plain values returned alongside results, never printed.
//! Formatting them for humans is the caller's job.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::base::TextRange;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Path of the file containing this diagnostic.
    pub file: Arc<str>,
    /// Byte range in the file.
    pub range: TextRange,
    /// Severity level.
    pub severity: Severity,
    /// Error/warning code (e.g., "E0001").
    pub code: Option<Arc<str>>,
    /// The diagnostic message.
    pub message: Arc<str>,
    /// Optional related information.
    pub related: Vec<RelatedInfo>,
}

/// Related information for a diagnostic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedInfo {
    /// The file containing this info.
    pub file: Arc<str>,
    pub range: TextRange,
    /// The message.
    pub message: Arc<str>,
}

impl Diagnostic {
    fn new(
        severity: Severity,
        file: impl Into<Arc<str>>,
        range: TextRange,
        message: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            file: file.into(),
            range,
            severity,
            code: None,
            message: message.into(),
            related: Vec::new(),
        }
    }

    /// Create a new error diagnostic.
    pub fn error(file: impl Into<Arc<str>>, range: TextRange, message: impl Into<Arc<str>>) -> Self {
        Self::new(Severity::Error, file, range, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(
        file: impl Into<Arc<str>>,
        range: TextRange,
        message: impl Into<Arc<str>>,
    ) -> Self {
        Self::new(Severity::Warning, file, range, message)
    }

    /// Create a new informational note.
    pub fn info(file: impl Into<Arc<str>>, range: TextRange, message: impl Into<Arc<str>>) -> Self {
        Self::new(Severity::Info, file, range, message)
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Add related information.
    pub fn with_related(mut self, info: RelatedInfo) -> Self {
        self.related.push(info);
        self
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Standard diagnostic codes.
///
/// ## Code Ranges
///
/// - **E0001-E0099**: Errors (parse failures, duplicate declarations)
/// - **W0001-W0099**: Warnings (merge and annotation conflicts)
/// - **I0001-I0099**: Notes (cache maintenance)
pub mod codes {
    /// Syntax error in a source file.
    pub const PARSE_ERROR: &str = "E0001";
    /// A second base declaration for the same qualified name.
    pub const DUPLICATE_DECLARATION: &str = "E0002";

    /// Two members with the same signature on one type.
    pub const MEMBER_CONFLICT: &str = "W0001";
    /// An annotation value overridden by a different value.
    pub const ANNOTATION_CONFLICT: &str = "W0002";
    /// `sourcery:end` without a matching `sourcery:begin`.
    pub const UNMATCHED_BLOCK_MARKER: &str = "W0003";

    /// A cache entry could not be used and the file was re-parsed.
    pub const CACHE_CORRUPTED: &str = "I0001";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics while extracting and composing.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    /// Add a syntax error.
    pub fn parse_error(&mut self, file: &Arc<str>, range: TextRange, message: &str) {
        self.add(
            Diagnostic::error(file.clone(), range, message)
                .with_code(codes::PARSE_ERROR),
        );
    }

    /// Add a duplicate base declaration error.
    pub fn duplicate_declaration(
        &mut self,
        name: &str,
        file: &Arc<str>,
        range: TextRange,
        existing_file: &Arc<str>,
        existing_range: TextRange,
    ) {
        self.add(
            Diagnostic::error(
                file.clone(),
                range,
                format!("duplicate declaration: '{}' is already declared", name),
            )
            .with_code(codes::DUPLICATE_DECLARATION)
            .with_related(RelatedInfo {
                file: existing_file.clone(),
                range: existing_range,
                message: Arc::from(format!("previous declaration of '{}'", name)),
            }),
        );
    }

    /// Add a member conflict warning. `loser` is the member that was replaced.
    pub fn member_conflict(
        &mut self,
        type_name: &str,
        signature: &str,
        winner: (&Arc<str>, TextRange),
        loser: (&Arc<str>, TextRange),
    ) {
        self.add(
            Diagnostic::warning(
                winner.0.clone(),
                winner.1,
                format!("member conflict: '{}' is declared more than once on '{}'", signature, type_name),
            )
            .with_code(codes::MEMBER_CONFLICT)
            .with_related(RelatedInfo {
                file: loser.0.clone(),
                range: loser.1,
                message: Arc::from(format!("replaced declaration of '{}'", signature)),
            }),
        );
    }

    /// Add an annotation conflict warning.
    pub fn annotation_conflict(
        &mut self,
        type_name: &str,
        key: &str,
        file: &Arc<str>,
        range: TextRange,
    ) {
        self.add(
            Diagnostic::warning(
                file.clone(),
                range,
                format!(
                    "annotation conflict: '{}' on '{}' has a different value elsewhere",
                    key, type_name
                ),
            )
            .with_code(codes::ANNOTATION_CONFLICT),
        );
    }

    /// Add an unmatched block marker warning.
    pub fn unmatched_block_marker(&mut self, file: &Arc<str>, range: TextRange, message: &str) {
        self.add(
            Diagnostic::warning(file.clone(), range, message)
                .with_code(codes::UNMATCHED_BLOCK_MARKER),
        );
    }

    /// Add a note that a cache entry was discarded.
    pub fn cache_corrupted(&mut self, file: &Arc<str>, reason: &str) {
        self.add(
            Diagnostic::info(
                file.clone(),
                TextRange::default(),
                format!("cache entry discarded: {}", reason),
            )
            .with_code(codes::CACHE_CORRUPTED),
        );
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get diagnostics for a specific file.
    pub fn diagnostics_for_file(&self, file: &str) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| &*d.file == file)
            .collect()
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Get the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Take all diagnostics, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::TextSize;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(TextSize::new(start), TextSize::new(end))
    }

    #[test]
    fn test_diagnostic_error() {
        let diag = Diagnostic::error("A.swift", range(10, 15), "test error");
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.range, range(10, 15));
    }

    #[test]
    fn test_diagnostic_with_code() {
        let diag = Diagnostic::error("A.swift", range(0, 0), "test").with_code(codes::PARSE_ERROR);
        assert_eq!(diag.code.as_deref(), Some("E0001"));
    }

    #[test]
    fn test_collector_counts() {
        let file: Arc<str> = Arc::from("A.swift");
        let mut collector = DiagnosticCollector::new();
        collector.parse_error(&file, range(0, 1), "expected '}'");
        collector.add(Diagnostic::error(file.clone(), range(0, 0), "error 2"));
        collector.unmatched_block_marker(&file, range(3, 4), "unmatched 'sourcery:end'");

        assert_eq!(collector.error_count(), 2);
        assert_eq!(collector.warning_count(), 1);
        assert!(collector.has_errors());
    }

    #[test]
    fn test_collector_by_file() {
        let a: Arc<str> = Arc::from("A.swift");
        let b: Arc<str> = Arc::from("B.swift");
        let mut collector = DiagnosticCollector::new();
        collector.member_conflict("Point", "x", (&b, range(5, 6)), (&a, range(1, 2)));
        collector.cache_corrupted(&a, "schema version mismatch");

        assert_eq!(collector.diagnostics_for_file("A.swift").len(), 1);
        let conflicts = collector.diagnostics_for_file("B.swift");
        assert_eq!(conflicts.len(), 1);
        assert_eq!(&*conflicts[0].related[0].file, "A.swift");
    }

    #[test]
    fn test_diagnostic_serializes() {
        let diag = Diagnostic::warning("A.swift", range(1, 2), "w").with_code(codes::ANNOTATION_CONFLICT);
        let json = serde_json::to_string(&diag).unwrap();
        let back: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(back, diag);
    }
}
