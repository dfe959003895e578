//! The per-file result cache seen through the pipeline.

use std::fs;
use std::path::Path;

use reflekt::hir::codes;
use reflekt::project::{Pipeline, PipelineConfig, SourceInput};

use crate::helpers::model_helpers::{diagnostic_codes, snapshot, sources};
use crate::helpers::source_fixtures::{NETWORK, POINT, POINT_EXTENSION, SHAPES};

fn cached(dir: &Path) -> Pipeline {
    Pipeline::new(PipelineConfig::new().with_cache_dir(dir))
}

fn uncached() -> Pipeline {
    Pipeline::new(PipelineConfig::new())
}

fn cache_entries(dir: &Path) -> Vec<std::path::PathBuf> {
    let mut entries = Vec::new();
    for sub in fs::read_dir(dir).unwrap() {
        let sub = sub.unwrap().path();
        if sub.is_dir() {
            entries.extend(fs::read_dir(&sub).unwrap().map(|e| e.unwrap().path()));
        }
    }
    entries.sort();
    entries
}

#[test]
fn test_cached_model_equals_fresh_model() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = sources(&[
        ("Shapes.swift", SHAPES),
        ("Network.swift", NETWORK),
        ("Point.swift", POINT),
    ]);
    let fresh = uncached().run(&inputs).unwrap();

    let cold = cached(dir.path());
    let first = cold.run(&inputs).unwrap();
    assert_eq!(cold.cache_stats().writes, 3);
    assert_eq!(cold.cache_stats().hits, 0);

    let warm = cached(dir.path());
    let second = warm.run(&inputs).unwrap();
    assert_eq!(warm.cache_stats().hits, 3);
    assert_eq!(warm.cache_stats().writes, 0);

    assert_eq!(snapshot(&first), snapshot(&fresh));
    assert_eq!(snapshot(&second), snapshot(&fresh));
}

#[test]
fn test_changed_file_misses_and_reverting_hits() {
    let dir = tempfile::tempdir().unwrap();
    let original = sources(&[("Point.swift", POINT), ("Point+Y.swift", POINT_EXTENSION)]);
    cached(dir.path()).run(&original).unwrap();

    let mut edited = original.clone();
    edited[0] = SourceInput::new("Point.swift", format!("{} ", POINT));
    let pipeline = cached(dir.path());
    pipeline.run(&edited).unwrap();
    let stats = pipeline.cache_stats();
    assert_eq!((stats.hits, stats.misses), (1, 1));

    let pipeline = cached(dir.path());
    pipeline.run(&original).unwrap();
    let stats = pipeline.cache_stats();
    assert_eq!((stats.hits, stats.misses), (2, 0));
}

#[test]
fn test_documentation_setting_is_part_of_the_key() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = sources(&[("Doc.swift", "/// Documented.\nstruct Doc {}")]);
    cached(dir.path()).run(&inputs).unwrap();

    let pipeline = Pipeline::new(
        PipelineConfig::new()
            .with_cache_dir(dir.path())
            .with_parse_documentation(true),
    );
    let model = pipeline.run(&inputs).unwrap();
    assert_eq!(pipeline.cache_stats().hits, 0);
    assert_eq!(
        model.get("Doc").unwrap().documentation,
        vec!["Documented.".to_string()]
    );
}

#[test]
fn test_corrupted_entry_is_reparsed_with_a_note() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = sources(&[("Point.swift", POINT)]);
    let expected = uncached().run(&inputs).unwrap();
    cached(dir.path()).run(&inputs).unwrap();

    let entries = cache_entries(dir.path());
    assert_eq!(entries.len(), 1);
    fs::write(&entries[0], b"{ truncated").unwrap();

    let pipeline = cached(dir.path());
    let model = pipeline.run(&inputs).unwrap();
    assert_eq!(pipeline.cache_stats().corrupted, 1);
    assert_eq!(diagnostic_codes(&model), vec![codes::CACHE_CORRUPTED]);
    assert!(!model.has_errors());
    assert_eq!(model.get("Point"), expected.get("Point"));

    // The rewritten entry is clean again
    let pipeline = cached(dir.path());
    let model = pipeline.run(&inputs).unwrap();
    assert_eq!(pipeline.cache_stats().hits, 1);
    assert!(model.diagnostics().is_empty());
}

#[test]
fn test_unwritable_cache_does_not_fail_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, b"file").unwrap();

    let pipeline = cached(&blocker);
    let model = pipeline.run(&sources(&[("Point.swift", POINT)])).unwrap();
    assert!(model.get("Point").is_some());
    assert_eq!(pipeline.cache_stats().write_failures, 1);
}

#[test]
fn test_clear_removes_entries() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("cache");
    let pipeline = cached(&base);
    pipeline.run(&sources(&[("Point.swift", POINT)])).unwrap();
    assert!(base.exists());

    pipeline.cache().clear().unwrap();
    assert!(!base.exists());
}
