//! Application error types.
//!
//! Defines `AppError` for every fatal condition the pipeline can hit. A
//! missing loose object is deliberately absent from this list: the store
//! reports it as `Ok(None)` and the graph builder turns it into a
//! `missing` node.
//!
//! Error groups:
//! - `ObjectRead`, `Decompress`, `Io` → store I/O failures
//! - `Malformed`, `UnknownObjectType` → object content failures
//! - `RepoNotFound`, `RefNotFound`, `InvalidHash` → repository layout
//! - `Config`, `ConfigParse` → configuration
//! - `Render` → external layout program

use thiserror::Error;

use crate::git::object::DecodeError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read object {hash}: {source}")]
    ObjectRead {
        hash: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decompress object {hash}: {source}")]
    Decompress {
        hash: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed object {hash}: {source}")]
    Malformed {
        hash: String,
        #[source]
        source: DecodeError,
    },

    #[error("Unknown object type '{kind}' for object {hash}")]
    UnknownObjectType { hash: String, kind: String },

    #[error("Invalid object hash: {0}")]
    InvalidHash(String),

    #[error("Repository not found: {0}")]
    RepoNotFound(String),

    #[error("Branch not found: {0}")]
    RefNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Rendering failed: {0}")]
    Render(String),
}

impl AppError {
    /// Wraps a decoder failure with the hash of the object being decoded.
    pub fn from_decode(hash: &str, err: DecodeError) -> Self {
        match err {
            DecodeError::UnknownType(kind) => AppError::UnknownObjectType {
                hash: hash.to_string(),
                kind,
            },
            other => AppError::Malformed {
                hash: hash.to_string(),
                source: other,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
