//! The run driver: cache lookup, per-file parsing, composition.
//!
//! ```text
//! sources ──► [skip generated] ──► cache lookup ──hit──────────────┐
//!                                      │ miss                      │
//!                                      ▼                           ▼
//!                              parse + extract ──► store ──► FileParserResult
//!                                                                  │
//!                                 (rayon, or serial) ── barrier ───┘
//!                                                                  │
//!                                                                  ▼
//!                                                    compose ──► Model
//! ```

use std::path::PathBuf;
use std::time::Instant;

use rayon::prelude::*;

use super::cache::{CacheLookup, CacheStats, CacheStore, fingerprint};
use super::error::PipelineError;
use super::file_loader::load_sources;
use crate::base::constants::GENERATED_HEADER;
use crate::hir::{DiagnosticCollector, ExtractOptions, FileParserResult, Model, compose, extract_file};
use crate::syntax::SyntaxFile;

/// One source file handed to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInput {
    pub path: String,
    pub text: String,
}

impl SourceInput {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

/// Where per-file results are cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CacheMode {
    #[default]
    Disabled,
    Enabled(PathBuf),
}

/// Settings of one pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Parse files one after another instead of on the rayon pool
    pub serial_parse: bool,
    pub cache: CacheMode,
    /// Collect `///` and `/** */` documentation
    pub parse_documentation: bool,
    /// Path suffixes that are parsed even when they carry the generated header
    pub force_parse: Vec<String>,
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_serial_parse(mut self, serial: bool) -> Self {
        self.serial_parse = serial;
        self
    }

    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache = CacheMode::Enabled(dir.into());
        self
    }

    pub fn without_cache(mut self) -> Self {
        self.cache = CacheMode::Disabled;
        self
    }

    pub fn with_parse_documentation(mut self, enabled: bool) -> Self {
        self.parse_documentation = enabled;
        self
    }

    pub fn with_force_parse<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.force_parse = suffixes.into_iter().map(Into::into).collect();
        self
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            parse_documentation: self.parse_documentation,
        }
    }
}

/// Whether `text` starts with the header of a generated file.
pub fn is_generated(text: &str) -> bool {
    text.lines()
        .next()
        .is_some_and(|line| line.starts_with(GENERATED_HEADER))
}

/// Parse and extract one file without consulting the cache.
pub fn parse_file(path: &str, text: &str, options: ExtractOptions) -> FileParserResult {
    let syntax = SyntaxFile::new(text);
    if tracing::enabled!(tracing::Level::TRACE) {
        tracing::trace!(path, "syntax tree:\n{:#?}", syntax.parse().syntax());
    }
    extract_file(path, &syntax, options)
}

/// Builds models from sources.
#[derive(Debug)]
pub struct Pipeline {
    config: PipelineConfig,
    cache: CacheStore,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let cache = match &config.cache {
            CacheMode::Disabled => CacheStore::disabled(),
            CacheMode::Enabled(dir) => CacheStore::new(dir),
        };
        Self { config, cache }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Load every Swift file under `paths` and build the model.
    ///
    /// # Errors
    ///
    /// Returns an error if a path is missing or unreadable, or if no
    /// Swift files were found.
    pub fn run_paths(&self, paths: &[PathBuf], excludes: &[PathBuf]) -> Result<Model, PipelineError> {
        let sources = load_sources(paths, excludes)?;
        self.run(&sources)
    }

    /// Build the model of `sources`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::NoSources`] if `sources` is empty.
    pub fn run(&self, sources: &[SourceInput]) -> Result<Model, PipelineError> {
        if sources.is_empty() {
            return Err(PipelineError::NoSources);
        }

        let start = Instant::now();
        let before = self.cache.stats();
        let parse = |source: &SourceInput| self.parse_source(source);
        let mut results: Vec<FileParserResult> = if self.config.serial_parse {
            sources.iter().filter_map(parse).collect()
        } else {
            sources.par_iter().filter_map(parse).collect()
        };
        results.sort_by(|a, b| a.path.cmp(&b.path));

        let stats = self.cache.stats().since(&before);
        tracing::debug!(
            files = sources.len(),
            parsed = results.len(),
            cache_hits = stats.hits,
            cache_misses = stats.misses,
            serial = self.config.serial_parse,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "parse stage finished"
        );

        let start = Instant::now();
        let model = compose(&results);
        tracing::debug!(
            types = model.types().len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "compose stage finished"
        );
        Ok(model)
    }

    /// Parse one file through the cache. Returns None for skipped
    /// generated files.
    pub fn parse_source(&self, source: &SourceInput) -> Option<FileParserResult> {
        if is_generated(&source.text)
            && !self
                .config
                .force_parse
                .iter()
                .any(|suffix| source.path.ends_with(suffix.as_str()))
        {
            tracing::trace!(path = %source.path, "skipping generated file");
            return None;
        }

        let options = self.config.extract_options();
        let key = fingerprint(&source.text, options);
        let corrupted = match self.cache.lookup(&source.path, &key) {
            CacheLookup::Hit(result) => return Some(*result),
            CacheLookup::Miss => None,
            CacheLookup::Corrupted(reason) => Some(reason),
        };

        let mut result = parse_file(&source.path, &source.text, options);
        self.cache.store(&source.path, &key, &result);

        if let Some(reason) = corrupted {
            let mut notes = DiagnosticCollector::new();
            notes.cache_corrupted(&result.path, &reason);
            result.diagnostics.extend(notes.take());
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builders() {
        let config = PipelineConfig::new()
            .with_serial_parse(true)
            .with_cache_dir("/tmp/cache")
            .with_parse_documentation(true)
            .with_force_parse([".generated.swift"]);
        assert!(config.serial_parse);
        assert_eq!(config.cache, CacheMode::Enabled(PathBuf::from("/tmp/cache")));
        assert!(config.extract_options().parse_documentation);
        assert_eq!(config.force_parse, vec![".generated.swift".to_string()]);
        assert_eq!(config.without_cache().cache, CacheMode::Disabled);
    }

    #[test]
    fn test_is_generated() {
        assert!(is_generated("// Generated using Sourcery 2.0\nstruct A {}"));
        assert!(!is_generated("struct A {}\n// Generated using Sourcery"));
        assert!(!is_generated(""));
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let pipeline = Pipeline::new(PipelineConfig::new());
        assert!(matches!(pipeline.run(&[]), Err(PipelineError::NoSources)));
    }

    #[test]
    fn test_generated_files_skipped_unless_forced() {
        let sources = [
            SourceInput::new("A.swift", "struct A {}"),
            SourceInput::new("Out.generated.swift", "// Generated using Sourcery\nstruct G {}"),
            SourceInput::new("Other.swift", "// Generated using Sourcery\nstruct O {}"),
        ];
        let pipeline = Pipeline::new(PipelineConfig::new().with_force_parse([".generated.swift"]));
        let model = pipeline.run(&sources).unwrap();
        assert!(model.get("A").is_some());
        assert!(model.get("G").is_some());
        assert!(model.get("O").is_none());
    }
}
