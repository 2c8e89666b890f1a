//! User-facing output.
//!
//! This module provides:
//! - [`UserInterface`] trait for output abstraction
//! - [`ConsoleUI`] writing to stdout/stderr
//! - [`MockUI`] capturing output for tests
//! - [`OutputMode`] verbosity levels and [`AgentTheme`] styling
//!
//! # Example
//!
//! ```
//! use devops_agent::ui::{create_ui, OutputMode, UserInterface};
//!
//! let mut ui = create_ui(OutputMode::Silent, false);
//! ui.show_header("Synthesizing");
//! ui.success("Done");
//! ```

pub mod console;
pub mod mock;
pub mod output;
pub mod theme;

pub use console::{create_ui, ConsoleUI};
pub use mock::MockUI;
pub use output::OutputMode;
pub use theme::{should_use_colors, AgentTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show a labelled value (e.g., "Region: us-east-1").
    fn show_field(&mut self, key: &str, value: &str);

    /// Emit machine-readable output (JSON/YAML). Shown in every mode.
    fn raw(&mut self, text: &str);
}
