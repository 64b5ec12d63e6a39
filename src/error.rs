// ABOUTME: Application-wide error types for konvoy.
// ABOUTME: Every variant is fatal; the run stops at the first one.

use crate::serializer::CodecError;
use crate::transformer::ResourceKind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("service model not found in {0}")]
    ModelNotFound(PathBuf),

    #[error("unknown restart policy {policy:?} for service {service}")]
    UnknownRestartPolicy { service: String, policy: String },

    #[error("failed to serialize {kind} for service {service}: {source}")]
    Serialize {
        service: String,
        kind: ResourceKind,
        source: CodecError,
    },

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error("failed to create chart data in {path}: {source}")]
    Chart {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
