//! Error types for fixture mangling.
//!
//! This module defines [`MangleError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Per-file failures (`DecryptFailed`, `EncryptFailed`, `ParseFailed`,
//!   `SerializeFailed`, `CommandFailed`) are reported by the caller and the
//!   batch continues
//! - Configuration failures abort the command before any file is touched
//! - Use `anyhow::Error` (via `MangleError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for mangling operations.
#[derive(Debug, Error)]
pub enum MangleError {
    /// The external tool failed to decrypt a file.
    #[error("Failed to decrypt {path} (exit code {code:?}): {stderr}")]
    DecryptFailed {
        path: PathBuf,
        code: Option<i32>,
        stderr: String,
    },

    /// The external tool failed to re-encrypt a file.
    #[error("Failed to encrypt {path} (exit code {code:?}): {stderr}")]
    EncryptFailed {
        path: PathBuf,
        code: Option<i32>,
        stderr: String,
    },

    /// Decrypted content is not a supported YAML document.
    #[error("Failed to parse decrypted content of {path}: {message}")]
    ParseFailed { path: PathBuf, message: String },

    /// Mangled document could not be written back as YAML.
    #[error("Failed to serialize {path}: {message}")]
    SerializeFailed { path: PathBuf, message: String },

    /// An external command could not be started.
    #[error("Failed to start {command}: {source}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A configured glob pattern is invalid.
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for mangling operations.
pub type Result<T> = std::result::Result<T, MangleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decrypt_failed_displays_path_and_stderr() {
        let err = MangleError::DecryptFailed {
            path: PathBuf::from("secrets/app.enc.yaml"),
            code: Some(128),
            stderr: "no matching creation rules".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("secrets/app.enc.yaml"));
        assert!(msg.contains("128"));
        assert!(msg.contains("no matching creation rules"));
    }

    #[test]
    fn encrypt_failed_displays_path() {
        let err = MangleError::EncryptFailed {
            path: PathBuf::from("/tmp/.mangle-x.enc.yaml"),
            code: None,
            stderr: String::new(),
        };
        assert!(err.to_string().contains("/tmp/.mangle-x.enc.yaml"));
    }

    #[test]
    fn parse_failed_displays_path_and_message() {
        let err = MangleError::ParseFailed {
            path: PathBuf::from("a.enc.yaml"),
            message: "mapping key is not a string".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("a.enc.yaml"));
        assert!(msg.contains("mapping key is not a string"));
    }

    #[test]
    fn config_not_found_displays_path() {
        let err = MangleError::ConfigNotFound {
            path: PathBuf::from("/foo/.fixture-mangler.yml"),
        };
        assert!(err.to_string().contains("/foo/.fixture-mangler.yml"));
    }

    #[test]
    fn command_failed_displays_command_and_cause() {
        use std::error::Error as _;

        let err = MangleError::CommandFailed {
            command: "sops --decrypt a.enc.yaml".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        };
        let msg = err.to_string();
        assert!(msg.contains("sops --decrypt a.enc.yaml"));
        assert!(msg.contains("No such file or directory"));
        assert!(err.source().is_some());
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: MangleError = io_err.into();
        assert!(matches!(err, MangleError::Io(_)));
    }
}
