//! Handle command implementation.
//!
//! The `devops-agent handle` command processes one forwarded incident
//! event: it gathers context, archives it, asks the configured agent (or
//! the rule-based fallback) for a decision and records the outcome.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::cli::args::HandleArgs;
use crate::error::{DevopsAgentError, Result};
use crate::incident::{
    CommandAgent, DirectoryArchive, FileLogSource, IncidentHandler, JsonlIncidentStore,
    LogNotifier, Resolution,
};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::paths::StatePaths;

/// The handle command implementation.
pub struct HandleCommand {
    project_root: PathBuf,
    args: HandleArgs,
}

impl HandleCommand {
    /// Create a new handle command.
    pub fn new(project_root: &Path, args: HandleArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    fn handler(&self) -> IncidentHandler<JsonlIncidentStore, LogNotifier> {
        let paths = StatePaths::new(&self.project_root);
        let store = JsonlIncidentStore::new(paths.incidents(self.args.store.as_deref()));
        let archive = DirectoryArchive::new(paths.archive(self.args.archive.as_deref()));

        let mut handler =
            IncidentHandler::new(store, LogNotifier).with_archive(Box::new(archive));

        if let Some(logs) = &self.args.logs {
            handler = handler.with_log_source(Box::new(FileLogSource::new(logs)));
        }

        if let Some(command) = &self.args.agent_command {
            tracing::debug!("Using agent command: {}", command);
            handler = handler.with_agent(Box::new(CommandAgent::new(command.as_str())));
        }

        handler
    }
}

impl Command for HandleCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if !self.args.event.exists() {
            ui.error(&format!(
                "Event file not found: {}",
                self.args.event.display()
            ));
            return Ok(CommandResult::failure(2));
        }

        let payload = fs::read_to_string(&self.args.event)?;
        let resolution = self.handler().handle_json(&payload, Utc::now())?;

        match &resolution {
            Resolution::Agent(agent) => {
                ui.success("Incident analysed by agent");
                ui.show_field("Recommendation", &agent.recommendation);
                ui.show_field("Confidence", &agent.confidence.to_string());
            }
            Resolution::Fallback(fallback) => {
                ui.warning("Incident requires human attention");
                ui.show_field("Action", &fallback.action);
                ui.show_field("Recommendation", &fallback.recommendation);
            }
        }

        let json =
            serde_json::to_string(&resolution).map_err(|e| DevopsAgentError::Other(e.into()))?;
        ui.raw(&json);

        Ok(CommandResult::success())
    }
}
