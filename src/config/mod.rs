//! Configuration loading.
//!
//! - Schema definitions in [`schema`]
//! - File discovery, loading, and command-line overrides in [`loader`]
//!
//! # Example
//!
//! ```
//! use fixture_mangler::config::{load_config, CONFIG_FILE_NAME};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(CONFIG_FILE_NAME), "extra_patterns: [salt]").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.extra_patterns, vec!["salt".to_string()]);
//! assert_eq!(config.include, "*.enc.yaml");
//! ```

pub mod loader;
pub mod schema;

pub use loader::{
    find_config_file, load_config, load_config_file, parse_config, ConfigOverrides,
    CONFIG_FILE_NAME,
};
pub use schema::ManglerConfig;
