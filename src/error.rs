// src/error.rs
//! Unified error handling for ECG Core
//!
//! Configuration and usage errors are caller-input errors: the engine never
//! retries them and never substitutes defaults to paper over them. The UI
//! layer should stop playback and report [`EcgError::kind`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for the ECG engine
#[derive(Debug, Error)]
pub enum EcgError {
    /// Rhythm specification cannot drive its declared generator
    #[error("[CONFIG] Rhythm configuration error: {reason}")]
    Config {
        /// What is wrong with the rhythm
        reason: String,
    },

    /// Generation requested before a rhythm was loaded
    #[error("[USAGE] {operation} requires a loaded rhythm; call load first")]
    Usage {
        /// Operation that was called too early
        operation: &'static str,
    },

    /// Rhythm file could not be read or written
    #[error("[IO] {}: {source}", .path.display())]
    Io {
        /// File or rhythm id involved
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Rhythm file contents could not be decoded or encoded
    #[error("[PARSE] {format} rhythm: {reason}")]
    Parse {
        /// `json`, `toml` or `unknown`
        format: &'static str,
        /// Decoder message
        reason: String,
    },
}

/// Error category for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// [`EcgError::Config`]
    Config,
    /// [`EcgError::Usage`]
    Usage,
    /// [`EcgError::Io`]
    Io,
    /// [`EcgError::Parse`]
    Parse,
}

impl EcgError {
    /// Configuration error with a reason
    pub fn config(reason: impl Into<String>) -> Self {
        EcgError::Config { reason: reason.into() }
    }

    /// Usage error naming the rejected operation
    pub fn usage(operation: &'static str) -> Self {
        EcgError::Usage { operation }
    }

    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            EcgError::Config { .. } => ErrorKind::Config,
            EcgError::Usage { .. } => ErrorKind::Usage,
            EcgError::Io { .. } => ErrorKind::Io,
            EcgError::Parse { .. } => ErrorKind::Parse,
        }
    }

    /// Whether the rhythm itself was rejected
    pub fn is_config(&self) -> bool {
        self.kind() == ErrorKind::Config
    }

    /// Whether an operation was called out of order
    pub fn is_usage(&self) -> bool {
        self.kind() == ErrorKind::Usage
    }
}

/// Result type alias for ECG operations
pub type EcgResult<T> = Result<T, EcgError>;
