//! Event bus for forwarding new incidents to the handler.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;

use super::NewIncidentEvent;
use crate::error::Result;

/// Destination for new-incident events.
pub trait EventBus {
    fn publish(&mut self, event: &NewIncidentEvent) -> Result<()>;
}

/// Collects published events in memory.
#[derive(Debug, Default)]
pub struct MemoryEventBus {
    events: Vec<NewIncidentEvent>,
}

impl MemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[NewIncidentEvent] {
        &self.events
    }
}

impl EventBus for MemoryEventBus {
    fn publish(&mut self, event: &NewIncidentEvent) -> Result<()> {
        self.events.push(event.clone());
        Ok(())
    }
}

/// Appends published events to a JSONL outbox file.
pub struct OutboxEventBus {
    path: PathBuf,
}

impl OutboxEventBus {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read back every event in the outbox.
    pub fn read_all(&self) -> Result<Vec<NewIncidentEvent>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file =
            File::open(&self.path).with_context(|| format!("Failed to open {:?}", self.path))?;
        let mut events = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            events.push(NewIncidentEvent::from_json(&line)?);
        }
        Ok(events)
    }
}

impl EventBus for OutboxEventBus {
    fn publish(&mut self, event: &NewIncidentEvent) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {:?}", self.path))?;

        let json = serde_json::to_string(event).context("Failed to serialize event")?;
        writeln!(file, "{}", json)?;

        tracing::debug!(
            "Event forwarded to {}: {}",
            self.path.display(),
            event.incident_id()
        );
        Ok(())
    }
}
