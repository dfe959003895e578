// Syntax layer: parsed files and positioned parse errors
pub mod file;
pub mod parser;

pub use file::{Comment, SyntaxFile};
pub use parser::{ParseError, ParseResult, load_and_parse, parse_with_result};
