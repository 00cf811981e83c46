//! Configuration file discovery and loading.
//!
//! Precedence, highest first:
//! 1. Command-line flags (clap also reads their environment variables)
//! 2. Config file (`.fixture-mangler.yml` or `--config <path>`)
//! 3. Built-in defaults

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::ManglerConfig;
use crate::error::{MangleError, Result};

/// Name of the project config file.
pub const CONFIG_FILE_NAME: &str = ".fixture-mangler.yml";

/// Find the project config file, if it exists.
pub fn find_config_file(project_root: &Path) -> Option<PathBuf> {
    let path = project_root.join(CONFIG_FILE_NAME);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Parse YAML content into a config.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<ManglerConfig> {
    if content.trim().is_empty() {
        return Ok(ManglerConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| MangleError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ManglerConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            MangleError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            MangleError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Load config with optional path override.
///
/// An explicit path must exist. Without one, the project config file is used
/// when present and defaults apply otherwise.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<ManglerConfig> {
    if let Some(path) = config_override {
        return load_config_file(path);
    }

    match find_config_file(project_root) {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            load_config_file(&path)
        }
        None => Ok(ManglerConfig::default()),
    }
}

/// Values from the command line that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub sops_binary: Option<String>,
    pub age_key_file: Option<PathBuf>,
}

impl ConfigOverrides {
    /// Apply the overrides that are set.
    pub fn apply(&self, mut config: ManglerConfig) -> ManglerConfig {
        if let Some(binary) = &self.sops_binary {
            config.sops_binary = binary.clone();
        }
        if let Some(key_file) = &self.age_key_file {
            config.age_key_file = key_file.clone();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_project_config_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(temp.path(), None).unwrap();
        assert_eq!(config, ManglerConfig::default());
    }

    #[test]
    fn loads_project_config() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "sops_binary: /opt/sops\n").unwrap();

        let config = load_config(temp.path(), None).unwrap();
        assert_eq!(config.sops_binary, "/opt/sops");
    }

    #[test]
    fn empty_config_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "\n").unwrap();

        assert_eq!(
            load_config(temp.path(), None).unwrap(),
            ManglerConfig::default()
        );
    }

    #[test]
    fn explicit_missing_config_is_not_found() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yml");

        let err = load_config(temp.path(), Some(&missing)).unwrap_err();
        assert!(matches!(err, MangleError::ConfigNotFound { .. }));
    }

    #[test]
    fn explicit_config_wins_over_project_config() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "include: '*.a.yaml'\n").unwrap();
        let other = temp.path().join("other.yml");
        fs::write(&other, "include: '*.b.yaml'\n").unwrap();

        let config = load_config(temp.path(), Some(&other)).unwrap();
        assert_eq!(config.include, "*.b.yaml");
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "exclude: [unclosed\n").unwrap();

        let err = load_config(temp.path(), None).unwrap_err();
        assert!(matches!(err, MangleError::ConfigParseError { .. }));
    }

    #[test]
    fn overrides_replace_only_set_fields() {
        let overrides = ConfigOverrides {
            sops_binary: None,
            age_key_file: Some(PathBuf::from("/keys/age.txt")),
        };
        let config = overrides.apply(ManglerConfig::default());
        assert_eq!(config.sops_binary, "sops");
        assert_eq!(config.age_key_file, PathBuf::from("/keys/age.txt"));
    }
}
