//! Encryption tool integration.
//!
//! The file processor never talks to `sops` directly; it goes through the
//! [`Decryptor`] and [`Encryptor`] traits:
//!
//! - [`SopsCli`] - Spawns the `sops` binary
//! - [`MockCipher`] - In-memory stand-in for tests

pub mod cli;
pub mod mock;

pub use cli::{SopsCli, AGE_KEY_FILE_ENV, DEFAULT_AGE_KEY_FILE, DEFAULT_SOPS_BINARY};
pub use mock::{MockCipher, MOCK_HEADER};

use std::path::Path;

use crate::error::Result;

/// Turns an encrypted file into plaintext YAML.
pub trait Decryptor {
    /// Decrypt the file at `path` and return its YAML text.
    fn decrypt(&self, path: &Path) -> Result<String>;
}

/// Encrypts a plaintext YAML file in place.
pub trait Encryptor {
    /// Replace the plaintext content of `path` with its encrypted form.
    fn encrypt_in_place(&self, path: &Path) -> Result<()>;
}
