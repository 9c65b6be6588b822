// src/config/mod.rs

//! Configuration loading and validation for checkflow.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate invariants the simulation relies on (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, resolve_config};
pub use model::{
    ConfigFile, GeneratorSection, LayoutSection, LifecycleSection, RawConfigFile,
    TimingSection,
};
