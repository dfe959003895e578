//! Project layer: source discovery, the per-file result cache and the run
//! pipeline.

pub mod cache;
mod error;
pub mod file_loader;
mod pipeline;

pub use cache::{CacheLookup, CacheStats, CacheStore, fingerprint};
pub use error::{CacheError, PipelineError};
pub use file_loader::{collect_swift_files, load_sources};
pub use pipeline::{
    CacheMode, Pipeline, PipelineConfig, SourceInput, is_generated, parse_file,
};
