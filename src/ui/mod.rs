//! User-facing output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for styled terminal output
//! - [`PlainUI`] for pipes and CI logs
//! - [`MockUI`] for tests
//!
//! # Example
//!
//! ```
//! use fixture_mangler::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("Mangling secrets");
//! ui.success("Done");
//! ```

pub mod mock;
pub mod output;
pub mod plain;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use plain::PlainUI;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, ManglerTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a progress message. Hidden in quiet mode.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a header/banner. Hidden in quiet mode.
    fn show_header(&mut self, title: &str);

    /// Write raw output (file listings, YAML, completions), bypassing the
    /// output mode.
    fn output(&mut self, text: &str);

}
