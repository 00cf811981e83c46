//! Styled terminal UI.

use console::Term;
use std::io::Write;

use super::{should_use_colors, ManglerTheme, OutputMode, PlainUI, UserInterface};

/// Terminal UI implementation with colors and icons.
pub struct TerminalUI {
    term: Term,
    err_term: Term,
    theme: ManglerTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            ManglerTheme::new()
        } else {
            ManglerTheme::plain()
        };

        Self {
            term: Term::stdout(),
            err_term: Term::stderr(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_progress() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.term, "  {}", self.theme.format_success(msg)).ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.err_term, "  {}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err_term, "  {}", self.theme.format_error(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_progress() {
            writeln!(self.term, "{}", self.theme.format_header(title)).ok();
        }
    }

    fn output(&mut self, text: &str) {
        write!(self.term, "{}", text).ok();
        if !text.ends_with('\n') {
            writeln!(self.term).ok();
        }
    }
}

/// Create the appropriate UI for the current environment.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(PlainUI::new(mode))
    }
}
