//! Dedup command implementation.
//!
//! The `devops-agent dedup` command runs one alarm event through the
//! deduplicator, recording new incidents in the local store and appending
//! them to the outbox.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::cli::args::DedupArgs;
use crate::error::{DevopsAgentError, Result};
use crate::incident::{
    window_minutes, AlarmEvent, DedupAction, Deduplicator, JsonlIncidentStore, OutboxEventBus,
};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::paths::StatePaths;

/// The dedup command implementation.
pub struct DedupCommand {
    project_root: PathBuf,
    args: DedupArgs,
}

impl DedupCommand {
    /// Create a new dedup command.
    pub fn new(project_root: &Path, args: DedupArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }
}

impl Command for DedupCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if !self.args.event.exists() {
            ui.error(&format!(
                "Event file not found: {}",
                self.args.event.display()
            ));
            return Ok(CommandResult::failure(2));
        }

        let window = window_minutes(self.args.window_minutes)?;

        let payload = fs::read_to_string(&self.args.event)?;
        let event = AlarmEvent::from_json(&payload)?;

        let paths = StatePaths::new(&self.project_root);
        let store = JsonlIncidentStore::new(paths.incidents(self.args.store.as_deref()));
        let bus = OutboxEventBus::new(paths.events(self.args.outbox.as_deref()));

        let mut dedup = Deduplicator::new(store, bus).with_window(window);
        let outcome = dedup.process(&event, Utc::now())?;

        match outcome.action {
            DedupAction::Forwarded => ui.success(&format!(
                "{}: {} ({})",
                outcome.message,
                outcome.incident_id,
                event.alarm_name()
            )),
            DedupAction::Ignored => ui.message(&format!(
                "{}: {}",
                outcome.message, outcome.incident_id
            )),
        }

        let json =
            serde_json::to_string(&outcome).map_err(|e| DevopsAgentError::Other(e.into()))?;
        ui.raw(&json);

        Ok(CommandResult::success())
    }
}
