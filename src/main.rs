//! fixture-mangler CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use fixture_mangler::cli::{Cli, CommandDispatcher};
use fixture_mangler::ui::{create_ui, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("fixture_mangler=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fixture_mangler=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("fixture-mangler starting with args: {:?}", cli);

    let output_mode = OutputMode::from_flags(cli.quiet, cli.verbose);

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    // sops runs from the project root, so file paths handed to it must not
    // be relative to the caller's directory.
    let project_root = match &cli.project {
        Some(path) => std::path::absolute(path).unwrap_or_else(|_| path.clone()),
        None => std::env::current_dir().unwrap_or_default(),
    };

    let is_interactive = std::env::var_os("CI").is_none();
    let mut ui = create_ui(is_interactive, output_mode);

    let dispatcher = CommandDispatcher::new(project_root).with_config_path(cli.config.clone());

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
