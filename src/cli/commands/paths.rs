//! Local state locations for incident commands.

use std::path::{Path, PathBuf};

/// Directory under the project root holding local incident state.
pub const STATE_DIR: &str = ".devops-agent";

/// Default file names inside [`STATE_DIR`].
pub const INCIDENTS_FILE: &str = "incidents.jsonl";
pub const EVENTS_FILE: &str = "events.jsonl";
pub const ARCHIVE_DIR: &str = "archive";

/// Resolves state paths for a project, honoring explicit overrides.
#[derive(Debug, Clone)]
pub struct StatePaths {
    root: PathBuf,
}

impl StatePaths {
    pub fn new(project_root: &Path) -> Self {
        Self {
            root: project_root.join(STATE_DIR),
        }
    }

    /// The state directory itself.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn incidents(&self, explicit: Option<&Path>) -> PathBuf {
        self.pick(explicit, INCIDENTS_FILE)
    }

    pub fn events(&self, explicit: Option<&Path>) -> PathBuf {
        self.pick(explicit, EVENTS_FILE)
    }

    pub fn archive(&self, explicit: Option<&Path>) -> PathBuf {
        self.pick(explicit, ARCHIVE_DIR)
    }

    fn pick(&self, explicit: Option<&Path>, default: &str) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.join(default))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_live_under_state_dir() {
        let paths = StatePaths::new(Path::new("/proj"));
        assert_eq!(
            paths.incidents(None),
            PathBuf::from("/proj/.devops-agent/incidents.jsonl")
        );
        assert_eq!(
            paths.events(None),
            PathBuf::from("/proj/.devops-agent/events.jsonl")
        );
        assert_eq!(
            paths.archive(None),
            PathBuf::from("/proj/.devops-agent/archive")
        );
    }

    #[test]
    fn explicit_path_wins() {
        let paths = StatePaths::new(Path::new("/proj"));
        let custom = PathBuf::from("/tmp/store.jsonl");
        assert_eq!(paths.incidents(Some(&custom)), custom);
    }
}
