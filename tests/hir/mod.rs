//! HIR layer tests
//!
//! - Declaration extraction through the public API
//! - Annotation association and precedence
//! - Composition scenarios across files
//! - Type name resolution and inheritance

pub mod tests_annotations;
pub mod tests_composition;
pub mod tests_extraction;
pub mod tests_resolution;
