//! Error types for window detection, title parsing and publishing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while listing the open windows.
#[derive(Debug, Error)]
pub enum EnumerationError {
    /// No window listing exists for this platform.
    #[error("window enumeration is not supported on {platform}")]
    Unsupported { platform: &'static str },

    /// Could not reach the display server (X11).
    #[error("failed to connect to the display server: {0}")]
    Display(String),

    /// A platform window query failed mid-way.
    #[error("window query failed: {0}")]
    Query(String),

    /// The helper process could not be started.
    #[error("failed to run window helper '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The helper process ran but reported failure.
    #[error("window helper '{program}' exited with {status}: {stderr}")]
    Helper {
        program: String,
        status: String,
        stderr: String,
    },
}

/// A matched window title did not fit any known title grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TitleParseError {
    /// Neither a bracket segment nor an em-dash is present.
    #[error("no recognized delimiter in window title '{title}'")]
    NoDelimiter { title: String },

    /// The delimiters were found but the project name is blank.
    #[error("empty project name in window title '{title}'")]
    EmptyProject { title: String },
}

/// Errors from the remote presence service.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Session setup failed.
    #[error("failed to connect to the presence service: {0}")]
    Connect(String),

    /// A status update was rejected or the pipe broke.
    #[error("failed to send presence update: {0}")]
    Update(String),

    /// Clearing the status failed.
    #[error("failed to clear presence: {0}")]
    Clear(String),
}

/// Errors while loading [`crate::PresenceConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for the expected shape.
    #[error("invalid config file '{path}': {source}")]
    InvalidFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An environment override could not be used.
    #[error("invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}
