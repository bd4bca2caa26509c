use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("Invalid version format: {input}. Expected MAJOR.MINOR.PATCH")]
    Format { input: String },

    #[error("VERSION file '{path}' is missing {key}")]
    MissingField { path: PathBuf, key: &'static str },

    #[error("Invalid PROTOCOL_VERSION '{value}' in '{path}': expected a non-negative integer")]
    InvalidProtocol { path: PathBuf, value: String },

    #[error("VERSION file not found at {0}")]
    NotFound(PathBuf),

    #[error("Invalid bump type: {0}. Use major, minor, or patch")]
    InvalidKind(String),

    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl VersionError {
    /// True for malformed version strings and incomplete VERSION files.
    #[must_use]
    pub const fn is_format(&self) -> bool {
        matches!(
            self,
            Self::Format { .. } | Self::MissingField { .. } | Self::InvalidProtocol { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, VersionError>;
