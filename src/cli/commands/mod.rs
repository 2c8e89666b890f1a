//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`devops-agent synth`, `devops-agent dedup`)
//! - Shared initialization logic
//! - Consistent global flag handling

pub mod completions;
pub mod config;
pub mod dedup;
pub mod dispatcher;
pub mod handle;
pub mod paths;
pub mod synth;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use paths::StatePaths;
