//! Credential configuration for goji.
//!
//! This module holds the connection record used to talk to JIRA and the
//! on-disk store that persists it between invocations.

mod credentials;
mod store;

use std::path::PathBuf;

use thiserror::Error;

pub use credentials::{ApiToken, CredentialField, Credentials};
pub use store::CredentialStore;

/// Errors that can occur while resolving, reading or writing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The user's home directory could not be determined.
    #[error("could not determine home directory")]
    NoHomeDir,

    /// The configuration directory could not be created.
    #[error("failed to create configuration directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file exists but could not be read.
    #[error("failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be written.
    #[error("failed to write configuration file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file does not contain a valid credentials record.
    #[error("failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The credentials could not be serialized.
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A credentials field holds an unusable value.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
