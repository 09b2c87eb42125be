// src/lib.rs - Library interface for the steering vibration analysis pipeline

pub mod batch;
pub mod config;
pub mod constants;
pub mod data_analysis;
pub mod data_input;
pub mod font_config;
pub mod plot_framework;
pub mod plot_functions;
pub mod summary;

// Expose crate version, preferring a git-derived version when provided at compile time.
pub fn crate_version() -> &'static str {
    option_env!("VERGEN_GIT_SEMVER").unwrap_or(env!("CARGO_PKG_VERSION"))
}
