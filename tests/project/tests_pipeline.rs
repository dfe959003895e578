//! End-to-end runs: file discovery, scheduling and failure modes.

use std::fs;
use std::path::{Path, PathBuf};

use reflekt::project::{Pipeline, PipelineConfig, PipelineError};

use crate::helpers::model_helpers::{snapshot, sources, type_named};
use crate::helpers::source_fixtures::{
    GHOST_EXTENSION, NETWORK, POINT, POINT_EXTENSION, SHAPES,
};

fn write(dir: &Path, relative: &str, text: &str) -> PathBuf {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn test_parallel_and_serial_agree() {
    let inputs = sources(&[
        ("Shapes.swift", SHAPES),
        ("Network.swift", NETWORK),
        ("Point.swift", POINT),
        ("Point+Y.swift", POINT_EXTENSION),
        ("Ghost.swift", GHOST_EXTENSION),
    ]);
    let parallel = Pipeline::new(PipelineConfig::new()).run(&inputs).unwrap();
    let serial = Pipeline::new(PipelineConfig::new().with_serial_parse(true))
        .run(&inputs)
        .unwrap();
    assert_eq!(snapshot(&parallel), snapshot(&serial));
}

#[test]
fn test_run_paths_walks_directories() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "Sources/Point.swift", POINT);
    write(dir.path(), "Sources/Extensions/Point+Y.swift", POINT_EXTENSION);
    write(dir.path(), "Sources/README.md", "struct NotSwift {}");
    write(dir.path(), "Vendor/Ghost.swift", GHOST_EXTENSION);

    let pipeline = Pipeline::new(PipelineConfig::new());
    let model = pipeline
        .run_paths(
            &[dir.path().to_path_buf()],
            &[dir.path().join("Vendor")],
        )
        .unwrap();

    let point = type_named(&model, "Point");
    let names: Vec<_> = point.variables().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["x", "y"]);
    assert!(model.get("Ghost").is_none());
    assert!(model.get("NotSwift").is_none());
    assert_eq!(model.files().len(), 2);
}

#[test]
fn test_missing_path_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    let error = Pipeline::new(PipelineConfig::new())
        .run_paths(&[missing.clone()], &[])
        .unwrap_err();
    assert!(matches!(error, PipelineError::PathNotFound(ref path) if *path == missing));
    assert!(error.to_string().contains("nope"));
}

#[test]
fn test_directory_without_sources_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "notes.txt", "nothing here");
    let result = Pipeline::new(PipelineConfig::new()).run_paths(&[dir.path().to_path_buf()], &[]);
    assert!(matches!(result, Err(PipelineError::NoSources)));
}

#[test]
fn test_generated_output_is_not_read_back() {
    let inputs = sources(&[
        ("Point.swift", POINT),
        (
            "Generated/Point+Equatable.generated.swift",
            "// Generated using Sourcery 2.1\nextension Point: Equatable {}",
        ),
    ]);
    let model = Pipeline::new(PipelineConfig::new()).run(&inputs).unwrap();
    let point = type_named(&model, "Point");
    assert!(point.inherited_types.is_empty());
    assert!(point.extensions.is_empty());
    assert_eq!(model.files().len(), 1);
}

#[test]
fn test_parse_errors_do_not_stop_the_run() {
    let inputs = sources(&[
        ("Broken.swift", "struct Broken {\n  var x: \n"),
        ("Point.swift", POINT),
    ]);
    let model = Pipeline::new(PipelineConfig::new()).run(&inputs).unwrap();
    assert!(model.has_parse_errors());
    assert!(model.get("Point").is_some());
    assert!(model.get("Broken").is_some());
    assert_eq!(&*model.diagnostics()[0].file, "Broken.swift");
}
