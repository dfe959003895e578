//! Parser and syntax layer tests.

pub mod tests_declarations;
pub mod tests_recovery;
