//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, SynthArgs};
use crate::config::DeploymentEnv;
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
    vars: DeploymentEnv,
}

impl CommandDispatcher {
    /// Create a dispatcher reading deployment variables from the process.
    pub fn new(project_root: PathBuf) -> Self {
        Self::with_vars(project_root, DeploymentEnv::from_process())
    }

    /// Create a dispatcher with an explicit deployment variable snapshot.
    pub fn with_vars(project_root: PathBuf, vars: DeploymentEnv) -> Self {
        Self { project_root, vars }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Synth(args)) => {
                let cmd =
                    super::synth::SynthCommand::new(&self.project_root, args.clone(), &self.vars);
                cmd.execute(ui)
            }
            Some(Commands::Config(args)) => {
                let cmd =
                    super::config::ConfigCommand::new(&self.project_root, args.clone(), &self.vars);
                cmd.execute(ui)
            }
            Some(Commands::Dedup(args)) => {
                let cmd = super::dedup::DedupCommand::new(&self.project_root, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Handle(args)) => {
                let cmd = super::handle::HandleCommand::new(&self.project_root, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                // Default to synth with default args
                let cmd = super::synth::SynthCommand::new(
                    &self.project_root,
                    SynthArgs::default(),
                    &self.vars,
                );
                cmd.execute(ui)
            }
        }
    }
}
