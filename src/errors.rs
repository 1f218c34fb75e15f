// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RungraphError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Runnable not found: {0}")]
    RunnableNotFound(String),

    #[error("Runnable name already in use: {0}")]
    DuplicateName(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Cycle detected in runnable graph: {0}")]
    DagCycle(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error talking to scheduling service: {0}")]
    Http(String),

    #[error("Scheduling service error: {0}")]
    Service(String),

    #[error("Result not found: {0}")]
    ResultNotFound(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<reqwest::Error> for RungraphError {
    fn from(err: reqwest::Error) -> Self {
        RungraphError::Http(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RungraphError>;
