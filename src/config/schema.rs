//! Configuration schema definitions.
//!
//! This module contains the struct that maps to the
//! `.fixture-mangler.yml` file format.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::discovery::{default_exclude, DEFAULT_INCLUDE};
use crate::processor::DEFAULT_PAYLOAD_KEY;
use crate::sops::{DEFAULT_AGE_KEY_FILE, DEFAULT_SOPS_BINARY};

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManglerConfig {
    /// Program invoked to decrypt and encrypt
    pub sops_binary: String,

    /// Age key file exported as `SOPS_AGE_KEY_FILE`
    pub age_key_file: PathBuf,

    /// File-name glob for candidate files
    pub include: String,

    /// Path globs (relative to the project root) skipped during discovery
    pub exclude: Vec<String>,

    /// Top-level keys whose sub-document is the secret payload
    pub payload_keys: Vec<String>,

    /// Additional sensitive key substrings
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_patterns: Vec<String>,
}

impl Default for ManglerConfig {
    fn default() -> Self {
        Self {
            sops_binary: DEFAULT_SOPS_BINARY.to_string(),
            age_key_file: PathBuf::from(DEFAULT_AGE_KEY_FILE),
            include: DEFAULT_INCLUDE.to_string(),
            exclude: default_exclude(),
            payload_keys: vec![DEFAULT_PAYLOAD_KEY.to_string()],
            extra_patterns: Vec::new(),
        }
    }
}
