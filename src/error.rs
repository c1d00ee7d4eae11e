//! Error types
//!
//! Only `SimError::UnknownVariant` can escape the simulation. Config and
//! persistence errors belong to the application layer.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("unknown {kind} variant '{name}'")]
    UnknownVariant { kind: &'static str, name: String },
}

impl SimError {
    pub(crate) fn unknown(kind: &'static str, name: &str) -> Self {
        Self::UnknownVariant {
            kind,
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config field '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error(transparent)]
    Sim(#[from] SimError),
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode or decode {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
