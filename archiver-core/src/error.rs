//! Error types for archiver-core.

use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single call against the hosting service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The host answered 404 (or returned no object) for the resource.
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Any other non-success HTTP status.
    #[error("host returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// DNS, TLS, connection or timeout failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body did not match the expected shape.
    #[error("failed to decode host response: {0}")]
    Decode(String),
}

impl HostError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        HostError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, HostError::NotFound { .. })
    }
}

/// All errors that can arise while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed YAML, with the offending file path.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A value parsed but is out of range.
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}
