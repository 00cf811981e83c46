//! Run command implementation.
//!
//! The `fixture-mangler run` command finds encrypted fixtures and replaces
//! their secrets with fake values.

use std::path::{Path, PathBuf};

use crate::cli::args::{RunArgs, SopsArgs};
use crate::config::{load_config, ManglerConfig};
use crate::discovery::FileFinder;
use crate::error::{MangleError, Result};
use crate::mangle::Mangler;
use crate::processor::FileProcessor;
use crate::secrets::SensitivePatternSet;
use crate::sops::SopsCli;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Exit code for configuration problems.
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Load the config file and apply command-line overrides.
///
/// Configuration errors are reported through `ui` and returned as `Ok(None)`
/// so callers can exit with [`EXIT_CONFIG_ERROR`].
pub(crate) fn resolve_config(
    project_root: &Path,
    config_path: Option<&Path>,
    sops: &SopsArgs,
    ui: &mut dyn UserInterface,
) -> Result<Option<ManglerConfig>> {
    match load_config(project_root, config_path) {
        Ok(config) => Ok(Some(sops.overrides().apply(config))),
        Err(e @ (MangleError::ConfigNotFound { .. } | MangleError::ConfigParseError { .. })) => {
            ui.error(&e.to_string());
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Build the file finder for a config, reporting bad globs through `ui`.
pub(crate) fn build_finder(
    config: &ManglerConfig,
    ui: &mut dyn UserInterface,
) -> Option<FileFinder> {
    match FileFinder::new(&config.include, &config.exclude) {
        Ok(finder) => Some(finder),
        Err(e) => {
            ui.error(&e.to_string());
            None
        }
    }
}

/// The run command implementation.
pub struct RunCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: RunArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    fn target_files(
        &self,
        config: &ManglerConfig,
        ui: &mut dyn UserInterface,
    ) -> Result<Option<Vec<PathBuf>>> {
        if !self.args.files.is_empty() {
            let files = self
                .args
                .files
                .iter()
                .map(std::path::absolute)
                .collect::<std::io::Result<Vec<_>>>()?;
            return Ok(Some(files));
        }

        let Some(finder) = build_finder(config, ui) else {
            return Ok(None);
        };
        finder.find(&self.project_root).map(Some)
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(config) =
            resolve_config(&self.project_root, self.config_path.as_deref(), &self.args.sops, ui)?
        else {
            return Ok(CommandResult::failure(EXIT_CONFIG_ERROR));
        };

        let Some(files) = self.target_files(&config, ui)? else {
            return Ok(CommandResult::failure(EXIT_CONFIG_ERROR));
        };

        ui.show_header("Mangling secrets in SOPS files for testing...");

        if files.is_empty() {
            ui.warning(&format!(
                "No files matching '{}' under {}",
                config.include,
                self.project_root.display()
            ));
            return Ok(CommandResult::success());
        }

        tracing::debug!(
            "Using {} with {} = {}",
            config.sops_binary,
            crate::sops::AGE_KEY_FILE_ENV,
            config.age_key_file.display()
        );

        let sops = SopsCli::new(&config.sops_binary, &config.age_key_file)
            .with_cwd(&self.project_root);
        let mangler = Mangler::new(SensitivePatternSet::with_builtins_and_custom(
            &config.extra_patterns,
        ));
        tracing::debug!(
            "Matching keys against {} sensitive pattern(s)",
            mangler.patterns().pattern_count()
        );
        let processor = FileProcessor::new(&sops, &sops, mangler)
            .with_payload_keys(config.payload_keys.clone())
            .with_dry_run(self.args.dry_run);

        let report = processor.process_batch(&files, ui);

        let verb = if self.args.dry_run {
            "Dry run complete!"
        } else {
            "Secret mangling complete!"
        };
        ui.show_header(verb);
        ui.message(&format!(
            "{} file(s) processed, {} value(s) replaced, {} failed",
            report.succeeded.len(),
            report.total_replaced(),
            report.failed.len()
        ));

        if report.all_succeeded() {
            if !self.args.dry_run {
                ui.success("All SOPS files now contain fake/test values instead of real secrets.");
            }
            Ok(CommandResult::success())
        } else {
            for (path, _) in &report.failed {
                ui.warning(&format!("Left unchanged: {}", path.display()));
            }
            Ok(CommandResult::failure(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_FILE_NAME;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn sops_args(binary: &str) -> SopsArgs {
        SopsArgs {
            age_key_file: Some(PathBuf::from("key.txt")),
            sops_binary: Some(binary.to_string()),
        }
    }

    #[test]
    fn empty_project_succeeds_with_warning() {
        let temp = TempDir::new().unwrap();
        let cmd = RunCommand::new(
            temp.path(),
            None,
            RunArgs {
                sops: sops_args("sops"),
                ..Default::default()
            },
        );
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert_eq!(ui.warnings().len(), 1);
        assert!(ui.warnings()[0].contains("*.enc.yaml"));
    }

    #[test]
    fn invalid_config_exits_with_config_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "unknown_field: 1\n").unwrap();
        let cmd = RunCommand::new(temp.path(), None, RunArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, EXIT_CONFIG_ERROR);
        assert_eq!(ui.errors().len(), 1);
    }

    #[test]
    fn invalid_include_glob_exits_with_config_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "include: '['\n").unwrap();
        let cmd = RunCommand::new(temp.path(), None, RunArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, EXIT_CONFIG_ERROR);
        assert!(ui.has_text("Invalid pattern"));
    }

    #[test]
    fn missing_sops_fails_per_file_and_keeps_files() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.enc.yaml");
        fs::write(&path, "password: x\n").unwrap();
        let cmd = RunCommand::new(
            temp.path(),
            None,
            RunArgs {
                sops: sops_args("no-such-sops-binary-xyz"),
                ..Default::default()
            },
        );
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_text("Processing:"));
        assert!(ui.has_text("Error processing file"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "password: x\n");
    }

    #[cfg(unix)]
    #[test]
    fn dry_run_with_fake_sops_prints_mangled_yaml() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let script = temp.path().join("fake-sops");
        // Decrypt is `cat`; encrypt would fail loudly.
        fs::write(
            &script,
            "#!/bin/sh\nif [ \"$1\" = \"--decrypt\" ]; then cat \"$2\"; else exit 9; fi\n",
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let fixtures = temp.path().join("fixtures");
        fs::create_dir_all(&fixtures).unwrap();
        fs::write(fixtures.join("app.enc.yaml"), "api_key: sk_live_real\n").unwrap();

        let cmd = RunCommand::new(
            temp.path(),
            None,
            RunArgs {
                sops: sops_args(&script.to_string_lossy()),
                dry_run: true,
                files: Vec::new(),
            },
        );
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.outputs().iter().any(|o| o.contains("test_api_key_")));
        assert_eq!(
            fs::read_to_string(fixtures.join("app.enc.yaml")).unwrap(),
            "api_key: sk_live_real\n"
        );
    }
}
