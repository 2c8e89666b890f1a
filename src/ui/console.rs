//! Console UI writing to stdout and stderr.

use super::theme::AgentTheme;
use super::{OutputMode, UserInterface};

/// UI implementation that prints directly to the terminal.
///
/// Status output goes to stdout; warnings and errors go to stderr so that
/// `--json` output on stdout stays machine-readable.
pub struct ConsoleUI {
    mode: OutputMode,
    theme: AgentTheme,
}

impl ConsoleUI {
    /// Create a console UI with the colored theme.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            theme: AgentTheme::new(),
        }
    }

    /// Create a console UI without colors.
    pub fn plain(mode: OutputMode) -> Self {
        Self {
            mode,
            theme: AgentTheme::plain(),
        }
    }
}

impl UserInterface for ConsoleUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("{}", self.theme.format_warning(msg));
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_details() {
            println!("\n{}\n", self.theme.format_header(title));
        }
    }

    fn show_field(&mut self, key: &str, value: &str) {
        if self.mode.shows_details() {
            println!("{}", self.theme.format_field(key, value));
        }
    }

    fn raw(&mut self, text: &str) {
        println!("{}", text);
    }
}

/// Create the UI for the current terminal.
pub fn create_ui(mode: OutputMode, colors: bool) -> Box<dyn UserInterface> {
    if colors {
        Box::new(ConsoleUI::new(mode))
    } else {
        Box::new(ConsoleUI::plain(mode))
    }
}
