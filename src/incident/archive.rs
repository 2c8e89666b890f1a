//! Audit archive for incident context.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use super::{IncidentContext, IncidentId};
use crate::error::Result;

/// Where gathered incident context is kept for audit.
pub trait ContextArchive {
    /// Store the context and return where it was put.
    fn store(&mut self, id: &IncidentId, context: &IncidentContext) -> Result<String>;
}

/// Key under which an incident's context is archived.
pub fn context_key(id: &IncidentId) -> String {
    format!("incidents/{}/context.json", id)
}

/// Archive rooted at a local directory.
#[derive(Debug, Clone)]
pub struct DirectoryArchive {
    root: PathBuf,
}

impl DirectoryArchive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ContextArchive for DirectoryArchive {
    fn store(&mut self, id: &IncidentId, context: &IncidentContext) -> Result<String> {
        let path = self.root.join(context_key(id));
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(context).context("Failed to serialize context")?;
        fs::write(&path, json).with_context(|| format!("Failed to write {:?}", path))?;

        Ok(path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::incident::{AlarmEvent, NoLogs};
    use chrono::Utc;
    use tempfile::TempDir;

    #[test]
    fn key_layout() {
        assert_eq!(
            context_key(&IncidentId::from("abc123")),
            "incidents/abc123/context.json"
        );
    }

    #[test]
    fn stores_pretty_json_under_incident_dir() {
        let temp = TempDir::new().unwrap();
        let mut archive = DirectoryArchive::new(temp.path());
        let event = AlarmEvent::new("HighCPU", "ALARM", "us-east-1", "123");
        let ctx = IncidentContext::gather(&event, &NoLogs, Utc::now());
        let id = IncidentId::from("abc123");

        let location = archive.store(&id, &ctx).unwrap();

        let path = temp.path().join("incidents/abc123/context.json");
        assert_eq!(location, path.display().to_string());
        let stored: IncidentContext =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(stored, ctx);
    }
}
