//! In-memory encryption stand-in for testing.
//!
//! `MockCipher` "encrypts" a file by prepending [`MOCK_HEADER`] and
//! "decrypts" by stripping it again, so processor tests can inspect exactly
//! what would have been written without a real `sops` binary.
//!
//! # Example
//!
//! ```
//! use fixture_mangler::sops::{Decryptor, MockCipher};
//! use std::path::Path;
//!
//! let cipher = MockCipher::new();
//! cipher.fail_decrypt("broken.enc.yaml");
//!
//! assert!(cipher.decrypt(Path::new("broken.enc.yaml")).is_err());
//! assert_eq!(cipher.decrypt_calls(), vec!["broken.enc.yaml".to_string()]);
//! ```

use std::cell::RefCell;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{MangleError, Result};

use super::{Decryptor, Encryptor};

/// First line written by [`MockCipher::encrypt_in_place`].
pub const MOCK_HEADER: &str = "# mock-encrypted\n";

/// Mock cipher that records calls and can be told to fail.
#[derive(Debug, Default)]
pub struct MockCipher {
    failing_decrypt: RefCell<HashSet<String>>,
    fail_encrypt: RefCell<bool>,
    decrypt_calls: RefCell<Vec<String>>,
    encrypt_calls: RefCell<Vec<String>>,
}

impl MockCipher {
    /// Create a mock that succeeds for every file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make decryption fail for any path ending in `suffix`.
    pub fn fail_decrypt(&self, suffix: &str) {
        self.failing_decrypt.borrow_mut().insert(suffix.to_string());
    }

    /// Make every encryption fail.
    pub fn fail_encrypt(&self) {
        *self.fail_encrypt.borrow_mut() = true;
    }

    /// Paths passed to `decrypt`, in call order.
    pub fn decrypt_calls(&self) -> Vec<String> {
        self.decrypt_calls.borrow().clone()
    }

    /// Paths passed to `encrypt_in_place`, in call order.
    pub fn encrypt_calls(&self) -> Vec<String> {
        self.encrypt_calls.borrow().clone()
    }

    /// Produce the content `encrypt_in_place` would write for `plaintext`.
    pub fn seal(plaintext: &str) -> String {
        format!("{}{}", MOCK_HEADER, plaintext)
    }
}

impl Decryptor for MockCipher {
    fn decrypt(&self, path: &Path) -> Result<String> {
        let display = path.to_string_lossy().into_owned();
        self.decrypt_calls.borrow_mut().push(display.clone());

        if self
            .failing_decrypt
            .borrow()
            .iter()
            .any(|suffix| display.ends_with(suffix.as_str()))
        {
            return Err(MangleError::DecryptFailed {
                path: path.to_path_buf(),
                code: Some(1),
                stderr: "mock decrypt failure".to_string(),
            });
        }

        let content = fs::read_to_string(path)?;
        Ok(content
            .strip_prefix(MOCK_HEADER)
            .unwrap_or(&content)
            .to_string())
    }
}

impl Encryptor for MockCipher {
    fn encrypt_in_place(&self, path: &Path) -> Result<()> {
        self.encrypt_calls
            .borrow_mut()
            .push(path.to_string_lossy().into_owned());

        if *self.fail_encrypt.borrow() {
            return Err(MangleError::EncryptFailed {
                path: path.to_path_buf(),
                code: Some(1),
                stderr: "mock encrypt failure".to_string(),
            });
        }

        let plaintext = fs::read_to_string(path)?;
        fs::write(path, Self::seal(&plaintext))?;
        Ok(())
    }
}
