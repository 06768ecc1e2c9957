use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid storage key `{0}`")]
    InvalidKey(String),
    #[error("failed to read `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write `{path}`: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key}: expected WIDTHxHEIGHT with non-zero dimensions, got `{value}`")]
    CanvasSize { key: &'static str, value: String },
    #[error("{key}: expected milliseconds, got `{value}`")]
    Duration { key: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize notes: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write export to `{path}`: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode drawing: {0}")]
    Image(#[from] image::ImageError),
}

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("{0} is not available")]
    Unavailable(&'static str),
    #[error("{channel} failed: {reason}")]
    Failed {
        channel: &'static str,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("not a hex color: `{0}`")]
    Invalid(String),
}
