//! Annotation parsing for `sourcery` marker comments.
//!
//! Annotations are free-form key/value metadata written in comments next to
//! declarations. This module is pure text processing: it knows nothing about
//! the CST. Associating comments with declarations happens during HIR
//! extraction.
//!
//! ```text
//! // sourcery: skipEquality, name = "x"     inline, precedes a declaration
//! var a: Int // sourcery: transient         inline, trailing on the same line
//! // sourcery:begin: group = 1              block start
//! // sourcery:end                           block end
//! // sourcery:file: module = "Core"         whole file
//! ```

mod blocks;
mod marker;
mod value;

pub use blocks::{BlockIssue, BlockRegion, FileRegions};
pub use marker::{Marker, MarkerKind, comment_body, parse_line, parse_value};
pub use value::{AnnotationValue, Annotations};
