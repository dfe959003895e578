//! On-disk cache of per-file extraction results.
//!
//! Entries are keyed by source path and a content fingerprint:
//!
//! ```text
//! <base>/<blake3(path)>/<fingerprint>.json
//! ```
//!
//! The fingerprint covers the parser version, the extraction options and
//! the file bytes, so any change to one of them is a miss. Several
//! fingerprints are retained per path, which makes reverting a file a hit.
//!
//! The cache is advisory: every failure is logged and the file is parsed
//! again.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use blake3::Hasher;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::error::CacheError;
use crate::base::constants::{CACHE_SCHEMA_VERSION, MAX_CACHE_ENTRIES_PER_PATH, PARSER_VERSION};
use crate::hir::{ExtractOptions, FileParserResult};

const ENTRY_EXT: &str = "json";

/// Compute the cache fingerprint of one file's content.
pub fn fingerprint(text: &str, options: ExtractOptions) -> String {
    let mut hasher = Hasher::new();
    hasher.update(PARSER_VERSION.as_bytes());
    hasher.update(&[u8::from(options.parse_documentation)]);
    hasher.update(text.as_bytes());
    hasher.finalize().to_hex().to_string()
}

/// Result of a cache lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    Hit(Box<FileParserResult>),
    Miss,
    /// An entry exists but cannot be used; treated as a miss.
    Corrupted(String),
}

/// Counters for one store's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub corrupted: usize,
    pub writes: usize,
    pub write_failures: usize,
}

impl CacheStats {
    /// Counts accumulated after an `earlier` snapshot of the same store.
    pub fn since(&self, earlier: &CacheStats) -> CacheStats {
        CacheStats {
            hits: self.hits.saturating_sub(earlier.hits),
            misses: self.misses.saturating_sub(earlier.misses),
            corrupted: self.corrupted.saturating_sub(earlier.corrupted),
            writes: self.writes.saturating_sub(earlier.writes),
            write_failures: self.write_failures.saturating_sub(earlier.write_failures),
        }
    }
}

#[derive(Serialize)]
struct EntryRef<'a> {
    schema_version: u32,
    parser_version: &'a str,
    path: &'a str,
    fingerprint: &'a str,
    result: &'a FileParserResult,
}

#[derive(Deserialize)]
struct Entry {
    schema_version: u32,
    parser_version: String,
    path: String,
    fingerprint: String,
    result: FileParserResult,
}

/// Version fields only, for pruning.
#[derive(Deserialize)]
struct EntryHeader {
    schema_version: u32,
    parser_version: String,
}

impl EntryHeader {
    fn is_current(&self) -> bool {
        self.schema_version == CACHE_SCHEMA_VERSION && self.parser_version == PARSER_VERSION
    }
}

/// Per-file result cache rooted at a base directory.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// None when disabled
    base: Option<PathBuf>,
    stats: Mutex<CacheStats>,
}

impl CacheStore {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: Some(base.into()),
            stats: Mutex::new(CacheStats::default()),
        }
    }

    /// A store that never touches the disk.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.base.is_some()
    }

    pub fn base_path(&self) -> Option<&Path> {
        self.base.as_deref()
    }

    pub fn stats(&self) -> CacheStats {
        *self.stats.lock()
    }

    fn record(&self, update: impl FnOnce(&mut CacheStats)) {
        update(&mut *self.stats.lock());
    }

    fn path_dir(base: &Path, path: &str) -> PathBuf {
        base.join(blake3::hash(path.as_bytes()).to_hex().as_str())
    }

    fn entry_file(base: &Path, path: &str, fingerprint: &str) -> PathBuf {
        Self::path_dir(base, path).join(format!("{}.{}", fingerprint, ENTRY_EXT))
    }

    /// Look up the result stored for `path` at `fingerprint`.
    pub fn lookup(&self, path: &str, fingerprint: &str) -> CacheLookup {
        let Some(base) = &self.base else {
            return CacheLookup::Miss;
        };
        let file = Self::entry_file(base, path, fingerprint);
        let data = match fs::read(&file) {
            Ok(data) => data,
            Err(error) => {
                if error.kind() != ErrorKind::NotFound {
                    tracing::warn!(path, %error, "failed to read cache entry");
                }
                self.record(|s| s.misses += 1);
                return CacheLookup::Miss;
            }
        };

        match decode(&data, path, fingerprint) {
            Ok(result) => {
                tracing::trace!(path, "cache hit");
                self.record(|s| s.hits += 1);
                CacheLookup::Hit(Box::new(result))
            }
            Err(reason) => {
                tracing::debug!(path, %reason, "discarding cache entry");
                if let Err(error) = fs::remove_file(&file) {
                    tracing::warn!(path, %error, "failed to remove cache entry");
                }
                self.record(|s| s.corrupted += 1);
                CacheLookup::Corrupted(reason)
            }
        }
    }

    /// Store `result` for `path` at `fingerprint`. Failures are logged.
    pub fn store(&self, path: &str, fingerprint: &str, result: &FileParserResult) {
        let Some(base) = &self.base else {
            return;
        };
        match write_entry(base, path, fingerprint, result) {
            Ok(()) => self.record(|s| s.writes += 1),
            Err(error) => {
                tracing::warn!(path, %error, "failed to write cache entry");
                self.record(|s| s.write_failures += 1);
            }
        }
    }

    /// Remove every entry under the base directory.
    pub fn clear(&self) -> Result<(), CacheError> {
        if let Some(base) = &self.base
            && base.exists()
        {
            fs::remove_dir_all(base)?;
        }
        Ok(())
    }
}

fn decode(data: &[u8], path: &str, fingerprint: &str) -> Result<FileParserResult, String> {
    let entry: Entry =
        serde_json::from_slice(data).map_err(|e| format!("undecodable entry: {}", e))?;
    if entry.schema_version != CACHE_SCHEMA_VERSION {
        return Err(format!(
            "schema version {} (expected {})",
            entry.schema_version, CACHE_SCHEMA_VERSION
        ));
    }
    if entry.parser_version != PARSER_VERSION {
        return Err(format!(
            "parser version {} (expected {})",
            entry.parser_version, PARSER_VERSION
        ));
    }
    if entry.path != path || entry.fingerprint != fingerprint {
        return Err("entry does not match its key".to_string());
    }
    Ok(entry.result)
}

fn write_entry(
    base: &Path,
    path: &str,
    fingerprint: &str,
    result: &FileParserResult,
) -> Result<(), CacheError> {
    let dir = CacheStore::path_dir(base, path);
    fs::create_dir_all(&dir)?;

    let entry = EntryRef {
        schema_version: CACHE_SCHEMA_VERSION,
        parser_version: PARSER_VERSION,
        path,
        fingerprint,
        result,
    };
    let data = serde_json::to_vec(&entry)?;

    let target = CacheStore::entry_file(base, path, fingerprint);
    let temp = dir.join(format!("{}.tmp-{}", fingerprint, std::process::id()));
    fs::write(&temp, data)?;
    if let Err(error) = fs::rename(&temp, &target) {
        let _ = fs::remove_file(&temp);
        return Err(error.into());
    }

    prune(&dir, &target)
}

/// Drop stale and surplus entries next to `keep`.
fn prune(dir: &Path, keep: &Path) -> Result<(), CacheError> {
    let mut current: Vec<(SystemTime, PathBuf)> = Vec::new();

    for entry in fs::read_dir(dir)? {
        let file = entry?.path();
        if file == keep || file.extension().and_then(|e| e.to_str()) != Some(ENTRY_EXT) {
            continue;
        }
        let header = fs::read(&file)
            .ok()
            .and_then(|data| serde_json::from_slice::<EntryHeader>(&data).ok());
        match header {
            Some(header) if header.is_current() => {
                let modified = fs::metadata(&file)
                    .and_then(|m| m.modified())
                    .unwrap_or(SystemTime::UNIX_EPOCH);
                current.push((modified, file));
            }
            _ => fs::remove_file(&file)?,
        }
    }

    // Newest first; `keep` takes one of the slots
    current.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    for (_, file) in current.into_iter().skip(MAX_CACHE_ENTRIES_PER_PATH.saturating_sub(1)) {
        fs::remove_file(&file)?;
    }
    Ok(())
}
