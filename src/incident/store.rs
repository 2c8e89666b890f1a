//! Incident history storage.
//!
//! Records are keyed by incident id and occurrence timestamp. Two
//! implementations are provided: an in-memory store and a JSONL file.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde_json::Value;

use super::{IncidentId, IncidentRecord, IncidentStatus};
use crate::error::{DevopsAgentError, Result};

/// Storage for incident records.
pub trait IncidentStore {
    /// Record an occurrence.
    fn put(&mut self, record: IncidentRecord) -> Result<()>;

    /// Most recent record for `id` with `timestamp >= since_ms`.
    fn find_since(&self, id: &IncidentId, since_ms: i64) -> Result<Option<IncidentRecord>>;

    /// Update the status of the most recent record for `id`.
    ///
    /// Returns `false` if no record exists for the id.
    fn update_status(
        &mut self,
        id: &IncidentId,
        status: IncidentStatus,
        result: Option<Value>,
        now: DateTime<Utc>,
    ) -> Result<bool>;

    /// Most recent record for `id`, regardless of age.
    fn latest(&self, id: &IncidentId) -> Result<Option<IncidentRecord>> {
        self.find_since(id, i64::MIN)
    }
}

fn most_recent<'a>(
    records: impl Iterator<Item = &'a IncidentRecord>,
    id: &IncidentId,
    since_ms: i64,
) -> Option<&'a IncidentRecord> {
    records
        .filter(|r| &r.incident_id == id && r.timestamp >= since_ms)
        .max_by_key(|r| r.timestamp)
}

fn update_most_recent<'a>(
    records: impl Iterator<Item = &'a mut IncidentRecord>,
    id: &IncidentId,
    status: IncidentStatus,
    result: Option<Value>,
    now: DateTime<Utc>,
) -> bool {
    match records
        .filter(|r| &r.incident_id == id)
        .max_by_key(|r| r.timestamp)
    {
        Some(record) => {
            record.set_status(status, result, now);
            true
        }
        None => false,
    }
}

/// In-memory store, used in tests and for dry runs.
#[derive(Debug, Default)]
pub struct MemoryIncidentStore {
    records: Vec<IncidentRecord>,
}

impl MemoryIncidentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records, in insertion order.
    pub fn records(&self) -> &[IncidentRecord] {
        &self.records
    }
}

impl IncidentStore for MemoryIncidentStore {
    fn put(&mut self, record: IncidentRecord) -> Result<()> {
        self.records.push(record);
        Ok(())
    }

    fn find_since(&self, id: &IncidentId, since_ms: i64) -> Result<Option<IncidentRecord>> {
        Ok(most_recent(self.records.iter(), id, since_ms).cloned())
    }

    fn update_status(
        &mut self,
        id: &IncidentId,
        status: IncidentStatus,
        result: Option<Value>,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        self.records.retain(|r| !r.is_expired(now));
        Ok(update_most_recent(self.records.iter_mut(), id, status, result, now))
    }
}

/// One line of the JSONL file. Lines that do not parse are kept as raw
/// bytes so a rewrite does not lose them.
enum StoredLine {
    Record(IncidentRecord),
    Unreadable(Vec<u8>),
}

/// Store backed by a JSONL file, one record per line.
pub struct JsonlIncidentStore {
    path: PathBuf,
}

impl JsonlIncidentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure the parent directory exists.
    fn ensure_dir(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }
        Ok(())
    }

    fn append(&self, record: &IncidentRecord) -> anyhow::Result<()> {
        self.ensure_dir()?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {:?}", self.path))?;

        let json = serde_json::to_string(record)?;
        writeln!(file, "{}", json)?;

        Ok(())
    }

    /// Read every record. Unparseable lines are skipped.
    pub fn read_all(&self) -> anyhow::Result<Vec<IncidentRecord>> {
        Ok(self
            .read_lines()?
            .into_iter()
            .filter_map(|line| match line {
                StoredLine::Record(record) => Some(record),
                StoredLine::Unreadable(_) => None,
            })
            .collect())
    }

    fn read_lines(&self) -> anyhow::Result<Vec<StoredLine>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file =
            File::open(&self.path).with_context(|| format!("Failed to open {:?}", self.path))?;
        let reader = BufReader::new(file);
        let mut lines = Vec::new();

        for line in reader.split(b'\n') {
            let line = line.with_context(|| format!("Failed to read {:?}", self.path))?;
            if line.trim_ascii().is_empty() {
                continue;
            }
            match serde_json::from_slice::<IncidentRecord>(&line) {
                Ok(record) => lines.push(StoredLine::Record(record)),
                Err(e) => {
                    tracing::warn!("Skipping unreadable incident record: {}", e);
                    lines.push(StoredLine::Unreadable(line));
                }
            }
        }

        Ok(lines)
    }

    /// Rewrite the file (for updates). Unreadable lines are written back
    /// unchanged.
    fn rewrite_lines(&self, lines: &[StoredLine]) -> anyhow::Result<()> {
        self.ensure_dir()?;

        let mut file = File::create(&self.path)
            .with_context(|| format!("Failed to create {:?}", self.path))?;
        for line in lines {
            match line {
                StoredLine::Record(record) => {
                    let json = serde_json::to_string(record)?;
                    writeln!(file, "{}", json)?;
                }
                StoredLine::Unreadable(raw) => {
                    file.write_all(raw)?;
                    file.write_all(b"\n")?;
                }
            }
        }

        Ok(())
    }
}

fn store_error(e: anyhow::Error) -> DevopsAgentError {
    DevopsAgentError::StoreError {
        message: format!("{:#}", e),
    }
}

impl IncidentStore for JsonlIncidentStore {
    fn put(&mut self, record: IncidentRecord) -> Result<()> {
        self.append(&record).map_err(store_error)
    }

    fn find_since(&self, id: &IncidentId, since_ms: i64) -> Result<Option<IncidentRecord>> {
        let records = self.read_all().map_err(store_error)?;
        Ok(most_recent(records.iter(), id, since_ms).cloned())
    }

    fn update_status(
        &mut self,
        id: &IncidentId,
        status: IncidentStatus,
        result: Option<Value>,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let mut lines = self.read_lines().map_err(store_error)?;
        let before = lines.len();
        lines.retain(|line| !matches!(line, StoredLine::Record(r) if r.is_expired(now)));
        let pruned = before - lines.len();
        if pruned > 0 {
            tracing::debug!("Pruning {} expired incident records", pruned);
        }

        let records = lines.iter_mut().filter_map(|line| match line {
            StoredLine::Record(record) => Some(record),
            StoredLine::Unreadable(_) => None,
        });
        let found = update_most_recent(records, id, status, result, now);
        if found || pruned > 0 {
            self.rewrite_lines(&lines).map_err(store_error)?;
        }
        Ok(found)
    }
}
