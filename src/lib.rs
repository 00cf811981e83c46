//! fixture-mangler - Replace secrets in SOPS-encrypted YAML fixtures with fake values.
//!
//! Test fixtures are often copied from real environments and still carry
//! real credentials. fixture-mangler decrypts each file with `sops`, swaps
//! every value whose key looks sensitive for a deterministic fake, and
//! re-encrypts the result in place.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - `.fixture-mangler.yml` loading and overrides
//! - [`discovery`] - Finding encrypted files under a project root
//! - [`document`] - YAML document model
//! - [`error`] - Error types and result aliases
//! - [`mangle`] - Tree walk that replaces sensitive values
//! - [`processor`] - Per-file decrypt, mangle, re-encrypt pipeline
//! - [`secrets`] - Sensitive key patterns and fake value generation
//! - [`shell`] - External process execution
//! - [`sops`] - `sops` encryption backends
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use fixture_mangler::document::Document;
//! use fixture_mangler::mangle::Mangler;
//!
//! let doc = Document::from_yaml_str("database:\n  password: hunter2\n  host: db\n").unwrap();
//! let outcome = Mangler::default().mangle(doc);
//!
//! assert_eq!(outcome.replaced(), 1);
//! let password = outcome.document.get("database").unwrap().get("password").unwrap();
//! assert!(password.as_str().unwrap().starts_with("test_secret_"));
//! ```

pub mod cli;
pub mod config;
pub mod discovery;
pub mod document;
pub mod error;
pub mod mangle;
pub mod processor;
pub mod secrets;
pub mod shell;
pub mod sops;
pub mod ui;

pub use error::{MangleError, Result};
