//! List command implementation.
//!
//! The `fixture-mangler list` command prints the files `run` would process.

use std::path::{Path, PathBuf};

use crate::cli::args::{ListArgs, SopsArgs};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::run::{build_finder, resolve_config, EXIT_CONFIG_ERROR};

/// The list command implementation.
pub struct ListCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: ListArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(config) = resolve_config(
            &self.project_root,
            self.config_path.as_deref(),
            &SopsArgs::default(),
            ui,
        )?
        else {
            return Ok(CommandResult::failure(EXIT_CONFIG_ERROR));
        };

        let Some(finder) = build_finder(&config, ui) else {
            return Ok(CommandResult::failure(EXIT_CONFIG_ERROR));
        };

        let files = finder.find(&self.project_root)?;
        if files.is_empty() {
            ui.warning(&format!("No files matching '{}'", config.include));
            return Ok(CommandResult::success());
        }

        for file in &files {
            let shown = if self.args.absolute {
                file.as_path()
            } else {
                file.strip_prefix(&self.project_root).unwrap_or(file)
            };
            ui.output(&shown.display().to_string());
        }

        Ok(CommandResult::success())
    }
}
