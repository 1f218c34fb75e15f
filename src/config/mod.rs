// src/config/mod.rs

//! Configuration loading and validation for rungraph.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a runnable set from disk (`loader.rs`).
//! - Validate attribute bounds and graph correctness (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{
    ConfigFile, ConfigSection, LayoutSection, RawConfigFile, RunnableConfig, RunnableTable,
};
