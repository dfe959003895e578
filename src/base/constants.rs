//! Domain constants shared across layers.

/// Extension of source files picked up by the file loader.
pub const SWIFT_EXT: &str = "swift";

/// Reserved token that opens an annotation comment (`// sourcery: key`).
pub const ANNOTATION_MARKER: &str = "sourcery";

/// Header that marks a file as produced by a previous generation run.
/// Such files are skipped unless their extension is force-parsed.
pub const GENERATED_HEADER: &str = "// Generated using";

/// Version of the extraction logic. Part of every cache key: bump it
/// whenever the partial-declaration output for the same input can change.
pub const PARSER_VERSION: &str = "reflekt-parser-3";

/// Version of the on-disk cache entry layout.
pub const CACHE_SCHEMA_VERSION: u32 = 1;

/// Cache entries retained per source path (older fingerprints are pruned).
pub const MAX_CACHE_ENTRIES_PER_PATH: usize = 4;

/// Name separator of qualified type names (`Outer.Inner`).
pub const NAME_SEPARATOR: char = '.';
