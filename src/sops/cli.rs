//! `sops` command-line backend.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{MangleError, Result};
use crate::shell::{execute, CommandOptions};

use super::{Decryptor, Encryptor};

/// Environment variable `sops` reads the age key file path from.
pub const AGE_KEY_FILE_ENV: &str = "SOPS_AGE_KEY_FILE";

/// Key file used for test fixtures when none is configured.
pub const DEFAULT_AGE_KEY_FILE: &str = "test-age-key.txt";

/// Program name used when none is configured.
pub const DEFAULT_SOPS_BINARY: &str = "sops";

/// Decrypts and encrypts by running the `sops` binary.
#[derive(Debug, Clone)]
pub struct SopsCli {
    binary: String,
    age_key_file: PathBuf,
    cwd: Option<PathBuf>,
}

impl SopsCli {
    /// Create a backend invoking `binary` with the given age key file.
    pub fn new(binary: impl Into<String>, age_key_file: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            age_key_file: age_key_file.into(),
            cwd: None,
        }
    }

    /// Run `sops` from this directory, so `.sops.yaml` and relative key paths
    /// resolve against it.
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Get the program name.
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Get the age key file path.
    pub fn age_key_file(&self) -> &Path {
        &self.age_key_file
    }

    fn options(&self) -> CommandOptions {
        let mut options = CommandOptions::captured().with_env(
            AGE_KEY_FILE_ENV,
            self.age_key_file.to_string_lossy().into_owned(),
        );
        options.cwd = self.cwd.clone();
        options
    }
}

impl Default for SopsCli {
    fn default() -> Self {
        Self::new(DEFAULT_SOPS_BINARY, DEFAULT_AGE_KEY_FILE)
    }
}

impl Decryptor for SopsCli {
    fn decrypt(&self, path: &Path) -> Result<String> {
        let args = vec![OsString::from("--decrypt"), path.as_os_str().to_owned()];
        let result = execute(&self.binary, &args, &self.options())?;

        if !result.success {
            return Err(MangleError::DecryptFailed {
                path: path.to_path_buf(),
                code: result.exit_code,
                stderr: result.stderr.trim().to_string(),
            });
        }

        // Lossy decoding would re-encrypt replacement characters over the
        // original.
        let text = result.stdout_utf8().map_err(|e| MangleError::ParseFailed {
            path: path.to_path_buf(),
            message: format!("decrypted output is not valid UTF-8: {}", e),
        })?;
        Ok(text.to_string())
    }
}

impl Encryptor for SopsCli {
    fn encrypt_in_place(&self, path: &Path) -> Result<()> {
        let args = vec![
            OsString::from("--encrypt"),
            OsString::from("--in-place"),
            path.as_os_str().to_owned(),
        ];
        let result = execute(&self.binary, &args, &self.options())?;

        if result.success {
            Ok(())
        } else {
            Err(MangleError::EncryptFailed {
                path: path.to_path_buf(),
                code: result.exit_code,
                stderr: result.stderr.trim().to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_sops_and_test_key() {
        let sops = SopsCli::default();
        assert_eq!(sops.binary(), "sops");
        assert_eq!(sops.age_key_file(), Path::new("test-age-key.txt"));
    }

    #[test]
    fn options_export_age_key_file() {
        let sops = SopsCli::new("sops", "/keys/age.txt").with_cwd("/repo");
        let options = sops.options();
        assert_eq!(
            options.env.get(AGE_KEY_FILE_ENV).map(String::as_str),
            Some("/keys/age.txt")
        );
        assert_eq!(options.cwd, Some(PathBuf::from("/repo")));
        assert!(options.capture_stdout);
    }

    #[test]
    fn missing_binary_fails_to_start() {
        let sops = SopsCli::new("no-such-sops-binary-xyz", "key.txt");
        let err = sops.decrypt(Path::new("a.enc.yaml")).unwrap_err();
        let msg = err.to_string();

        match err {
            MangleError::CommandFailed { command, source } => {
                assert_eq!(command, "no-such-sops-binary-xyz --decrypt a.enc.yaml");
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
                assert!(msg.contains(&source.to_string()));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[cfg(unix)]
    mod fake_binary {
        use super::*;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        fn write_script(dir: &TempDir, body: &str) -> String {
            let path = dir.path().join("fake-sops");
            fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path.to_string_lossy().into_owned()
        }

        #[test]
        fn decrypt_returns_stdout() {
            let dir = TempDir::new().unwrap();
            let script = write_script(&dir, "echo \"key: $SOPS_AGE_KEY_FILE\"");
            let sops = SopsCli::new(script, "age.txt");

            let text = sops.decrypt(Path::new("a.enc.yaml")).unwrap();
            assert_eq!(text.trim(), "key: age.txt");
        }

        #[test]
        fn decrypt_failure_carries_stderr() {
            let dir = TempDir::new().unwrap();
            let script = write_script(&dir, "echo 'no key' >&2; exit 128");
            let sops = SopsCli::new(script, "age.txt");

            match sops.decrypt(Path::new("a.enc.yaml")) {
                Err(MangleError::DecryptFailed { code, stderr, .. }) => {
                    assert_eq!(code, Some(128));
                    assert_eq!(stderr, "no key");
                }
                other => panic!("unexpected result: {:?}", other),
            }
        }

        #[test]
        fn decrypt_rejects_non_utf8_output() {
            let dir = TempDir::new().unwrap();
            let script = write_script(&dir, "printf 'name: caf\\377\\npassword: x\\n'");
            let sops = SopsCli::new(script, "age.txt");

            match sops.decrypt(Path::new("a.enc.yaml")) {
                Err(MangleError::ParseFailed { path, message }) => {
                    assert_eq!(path, PathBuf::from("a.enc.yaml"));
                    assert!(message.contains("UTF-8"));
                }
                other => panic!("unexpected result: {:?}", other),
            }
        }

        #[test]
        fn encrypt_failure_is_reported() {
            let dir = TempDir::new().unwrap();
            let script = write_script(&dir, "exit 1");
            let sops = SopsCli::new(script, "age.txt");

            let err = sops.encrypt_in_place(Path::new("a.yaml")).unwrap_err();
            assert!(matches!(err, MangleError::EncryptFailed { .. }));
        }
    }
}
