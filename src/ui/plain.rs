//! Uncolored UI for pipes and CI logs.

use super::{ManglerTheme, OutputMode, UserInterface};

/// UI implementation that writes plain lines to stdout and stderr.
pub struct PlainUI {
    mode: OutputMode,
    theme: ManglerTheme,
}

impl PlainUI {
    /// Create a new plain UI.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            theme: ManglerTheme::plain(),
        }
    }
}

impl UserInterface for PlainUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_progress() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        println!("  {}", self.theme.format_success(msg));
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("  {}", self.theme.format_warning(msg));
    }

    fn error(&mut self, msg: &str) {
        eprintln!("  {}", self.theme.format_error(msg));
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_progress() {
            println!("{}", self.theme.format_header(title));
        }
    }

    fn output(&mut self, text: &str) {
        if text.ends_with('\n') {
            print!("{}", text);
        } else {
            println!("{}", text);
        }
    }
}
