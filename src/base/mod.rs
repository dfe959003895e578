//! Foundation types for the reflekt toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - Domain constants (file extension, annotation marker, versions)
//!
//! This module has NO dependencies on other reflekt modules.

pub mod constants;
mod span;

pub use span::{LineCol, LineIndex, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
