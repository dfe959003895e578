//! Project layer tests: pipeline runs, cache behaviour, file loading.

pub mod tests_cache;
pub mod tests_pipeline;
