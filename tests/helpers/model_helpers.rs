//! Helpers for building models and asserting on them.

use reflekt::hir::{ExtractOptions, FileParserResult, Member, Model, Type, extract_file};
use reflekt::project::{Pipeline, PipelineConfig, SourceInput};
use reflekt::syntax::SyntaxFile;

/// Source inputs from `(path, text)` pairs.
pub fn sources(files: &[(&str, &str)]) -> Vec<SourceInput> {
    files
        .iter()
        .map(|(path, text)| SourceInput::new(*path, *text))
        .collect()
}

/// Build a model without cache, parsing serially.
pub fn model_from(files: &[(&str, &str)]) -> Model {
    Pipeline::new(PipelineConfig::new().with_serial_parse(true))
        .run(&sources(files))
        .expect("pipeline run")
}

/// Extract one file with default options.
pub fn extract(source: &str) -> FileParserResult {
    extract_file("Test.swift", &SyntaxFile::new(source), ExtractOptions::default())
}

/// Look up a type, failing the test when it is missing.
pub fn type_named<'a>(model: &'a Model, name: &str) -> &'a Type {
    model
        .get(name)
        .unwrap_or_else(|| panic!("type '{}' not in model", name))
}

/// Names of a type's members in order: variable and case names, method selectors.
pub fn member_names(ty: &Type) -> Vec<String> {
    ty.members
        .iter()
        .map(|m| match m {
            Member::Variable(v) => v.name.clone(),
            Member::Method(m) => m.name.clone(),
            Member::Subscript(_) => "subscript".to_string(),
            Member::EnumCase(c) => c.name.clone(),
            Member::AssociatedType(a) => a.name.clone(),
        })
        .collect()
}

/// Codes of every diagnostic in the model, in order.
pub fn diagnostic_codes(model: &Model) -> Vec<String> {
    model
        .diagnostics()
        .iter()
        .filter_map(|d| d.code.as_deref().map(str::to_string))
        .collect()
}

/// The model as JSON, for whole-model comparisons.
pub fn snapshot(model: &Model) -> String {
    serde_json::to_string_pretty(model).expect("model serializes")
}
