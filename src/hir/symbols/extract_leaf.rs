//! Leaf node extractors: imports.

use crate::parser::ast::{DeclNode, ImportDecl};

use super::types::Import;

/// `import Foo`, `import struct Foo.Bar`, `@testable import Foo`.
pub(super) fn extract_import(import: &ImportDecl) -> Import {
    Import {
        kind: import.import_kind(),
        path: import.path(),
        is_testable: import.attributes().iter().any(|a| a.name() == "testable"),
    }
}
