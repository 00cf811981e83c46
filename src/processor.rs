//! Per-file mangling workflow.
//!
//! For each file: decrypt, parse, mangle, serialize, encrypt into a temporary
//! file beside the original, then rename it over the original. A failure at
//! any step leaves the original untouched and removes the temporary file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::document::Document;
use crate::error::{MangleError, Result};
use crate::mangle::{MangleOutcome, Mangler};
use crate::sops::{Decryptor, Encryptor};
use crate::ui::{OutputMode, UserInterface};

/// Top-level key holding the payload of a Kubernetes `Secret`.
pub const DEFAULT_PAYLOAD_KEY: &str = "data";

/// Prefix of temporary files written next to the original.
pub const TEMP_PREFIX: &str = ".mangle-";

/// Suffix of temporary files, chosen so `.sops.yaml` creation rules that
/// match on `.enc.yaml` still apply.
pub const TEMP_SUFFIX: &str = ".enc.yaml";

/// Outcome of processing one file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    /// File that was processed.
    pub path: PathBuf,
    /// Qualified keys whose values were replaced.
    pub replaced_keys: Vec<String>,
}

impl FileReport {
    /// Number of values replaced.
    pub fn replaced(&self) -> usize {
        self.replaced_keys.len()
    }
}

/// Mangled plaintext that has not been written anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    /// Serialized mangled YAML.
    pub text: String,
    /// Qualified keys whose values were replaced.
    pub replaced_keys: Vec<String>,
}

/// Outcome of processing a list of files.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files processed successfully.
    pub succeeded: Vec<FileReport>,
    /// Files that failed, with the reason.
    pub failed: Vec<(PathBuf, MangleError)>,
}

impl BatchReport {
    /// Whether every file succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    /// Total values replaced across successful files.
    pub fn total_replaced(&self) -> usize {
        self.succeeded.iter().map(FileReport::replaced).sum()
    }
}

/// Runs the decrypt, mangle, re-encrypt cycle for files.
pub struct FileProcessor<'a> {
    decryptor: &'a dyn Decryptor,
    encryptor: &'a dyn Encryptor,
    mangler: Mangler,
    payload_keys: Vec<String>,
    dry_run: bool,
}

impl<'a> FileProcessor<'a> {
    /// Create a processor with the default payload key.
    pub fn new(decryptor: &'a dyn Decryptor, encryptor: &'a dyn Encryptor, mangler: Mangler) -> Self {
        Self {
            decryptor,
            encryptor,
            mangler,
            payload_keys: vec![DEFAULT_PAYLOAD_KEY.to_string()],
            dry_run: false,
        }
    }

    /// Replace the set of top-level payload keys.
    pub fn with_payload_keys(mut self, keys: Vec<String>) -> Self {
        self.payload_keys = keys;
        self
    }

    /// Print mangled plaintext instead of writing files.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Mangle a parsed document.
    ///
    /// When the top-level mapping has a payload key, only the payload is
    /// mangled, starting with no parent key. Otherwise the whole document is.
    pub fn mangle_document(&self, doc: Document) -> MangleOutcome {
        let entries = match doc {
            Document::Mapping(entries)
                if entries.iter().any(|(k, _)| self.payload_keys.contains(k)) =>
            {
                entries
            }
            other => return self.mangler.mangle(other),
        };

        let mut replaced_keys = Vec::new();
        let mut mangled = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            if self.payload_keys.contains(&key) {
                let outcome = self.mangler.mangle(value);
                replaced_keys.extend(outcome.replaced_keys);
                mangled.push((key, outcome.document));
            } else {
                mangled.push((key, value));
            }
        }

        MangleOutcome {
            document: Document::Mapping(mangled),
            replaced_keys,
        }
    }

    /// Decrypt and mangle a file without writing anything.
    pub fn preview(&self, path: &Path) -> Result<Preview> {
        let plaintext = self.decryptor.decrypt(path)?;

        let doc = Document::from_yaml_str(&plaintext).map_err(|message| {
            MangleError::ParseFailed {
                path: path.to_path_buf(),
                message,
            }
        })?;
        if doc == Document::null() {
            return Err(MangleError::ParseFailed {
                path: path.to_path_buf(),
                message: "document is empty".to_string(),
            });
        }

        let outcome = self.mangle_document(doc);
        let text = outcome
            .document
            .to_yaml_string()
            .map_err(|message| MangleError::SerializeFailed {
                path: path.to_path_buf(),
                message,
            })?;

        Ok(Preview {
            text,
            replaced_keys: outcome.replaced_keys,
        })
    }

    /// Mangle a file and replace it with the re-encrypted result.
    pub fn process(&self, path: &Path) -> Result<FileReport> {
        let preview = self.preview(path)?;
        self.write_encrypted(path, &preview.text)?;

        Ok(FileReport {
            path: path.to_path_buf(),
            replaced_keys: preview.replaced_keys,
        })
    }

    fn write_encrypted(&self, path: &Path, plaintext: &str) -> Result<()> {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut temp = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(TEMP_SUFFIX)
            .tempfile_in(dir)?;
        temp.write_all(plaintext.as_bytes())?;
        temp.flush()?;

        // Close our handle before the encryptor rewrites the file.
        let temp_path = temp.into_temp_path();
        tracing::debug!("Encrypting {} via {}", path.display(), temp_path.display());
        self.encryptor.encrypt_in_place(&temp_path)?;

        if let Ok(meta) = fs::metadata(path) {
            fs::set_permissions(&temp_path, meta.permissions()).ok();
        }

        temp_path
            .persist(path)
            .map_err(|e| MangleError::Io(e.error))?;
        Ok(())
    }

    /// Process files in order, reporting progress through `ui`.
    ///
    /// A failing file is reported and skipped; the rest are still processed.
    /// In verbose mode each replaced qualified key is listed.
    pub fn process_batch(&self, files: &[PathBuf], ui: &mut dyn UserInterface) -> BatchReport {
        let mut report = BatchReport::default();
        let verbose = ui.output_mode() == OutputMode::Verbose;

        for path in files {
            ui.message(&format!("Processing: {}", path.display()));

            let result = if self.dry_run {
                self.preview(path).map(|preview| {
                    ui.output(&preview.text);
                    FileReport {
                        path: path.clone(),
                        replaced_keys: preview.replaced_keys,
                    }
                })
            } else {
                self.process(path)
            };

            match result {
                Ok(file_report) => {
                    if verbose {
                        for key in &file_report.replaced_keys {
                            ui.message(&format!("  replaced {}", key));
                        }
                    }
                    if self.dry_run {
                        ui.success(&format!(
                            "Would replace {} value(s) (dry run)",
                            file_report.replaced()
                        ));
                    } else {
                        ui.success(&format!(
                            "Secrets mangled and re-encrypted ({} replaced)",
                            file_report.replaced()
                        ));
                    }
                    report.succeeded.push(file_report);
                }
                Err(e) => {
                    tracing::warn!("Failed to process {}: {}", path.display(), e);
                    ui.error(&format!("Error processing file: {}", e));
                    report.failed.push((path.clone(), e));
                }
            }
        }

        report
    }
}
