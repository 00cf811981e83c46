//! Config command implementation.
//!
//! The `fixture-mangler config` command shows the resolved configuration.

use std::path::{Path, PathBuf};

use crate::cli::args::ConfigArgs;
use crate::config::{find_config_file, CONFIG_FILE_NAME};
use crate::error::{MangleError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::run::{resolve_config, EXIT_CONFIG_ERROR};

/// The config command implementation.
pub struct ConfigCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: ConfigArgs,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: ConfigArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    fn source(&self) -> Option<PathBuf> {
        self.config_path
            .clone()
            .or_else(|| find_config_file(&self.project_root))
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(config) = resolve_config(
            &self.project_root,
            self.config_path.as_deref(),
            &self.args.sops,
            ui,
        )?
        else {
            return Ok(CommandResult::failure(EXIT_CONFIG_ERROR));
        };

        match self.source() {
            Some(path) => ui.output(&format!("# {}", path.display())),
            None => ui.output(&format!("# defaults (no {} found)", CONFIG_FILE_NAME)),
        }

        let yaml = serde_yaml::to_string(&config).map_err(|e| MangleError::Other(e.into()))?;
        ui.output(yaml.trim_end());

        Ok(CommandResult::success())
    }
}
