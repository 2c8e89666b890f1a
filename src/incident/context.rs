//! Incident context gathering.
//!
//! Before deciding what to do about an incident the handler collects a
//! snapshot of the alarm and recent error logs around it.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::LazyLock;

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::AlarmEvent;
use crate::error::Result;

/// How far back to look for related log lines.
pub const DEFAULT_LOG_LOOKBACK_MINUTES: i64 = 15;

/// Maximum number of log lines attached to an incident.
pub const MAX_LOG_LINES: usize = 10;

/// Lines considered error output.
static ERROR_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ERROR|Exception|Failed").expect("ERROR_LINE must compile"));

/// Snapshot of what was known about an incident when it was handled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentContext {
    pub alarm: AlarmSummary,
    pub region: String,
    pub account: String,
    pub logs: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlarmSummary {
    pub name: String,
    pub state: String,
    pub reason: String,
    pub timestamp: String,
}

impl IncidentContext {
    /// Collect context for an alarm.
    ///
    /// A failing log source is logged and yields no log lines.
    pub fn gather(event: &AlarmEvent, logs: &dyn LogSource, now: DateTime<Utc>) -> Self {
        let lookback = Duration::minutes(DEFAULT_LOG_LOOKBACK_MINUTES);
        let lines = logs
            .recent_errors(event.alarm_name(), lookback, now)
            .unwrap_or_else(|e| {
                tracing::warn!("Error fetching logs: {}", e);
                Vec::new()
            });

        let state = &event.detail.state;
        Self {
            alarm: AlarmSummary {
                name: event.alarm_name().to_string(),
                state: state.value.clone(),
                reason: state.reason.clone().unwrap_or_default(),
                timestamp: state.timestamp.clone().unwrap_or_default(),
            },
            region: event.region.clone(),
            account: event.account.clone(),
            logs: lines,
            timestamp: now,
        }
    }
}

/// Source of recent error logs related to an alarm.
pub trait LogSource {
    /// Error lines newer than `now - lookback`, newest first.
    fn recent_errors(
        &self,
        alarm_name: &str,
        lookback: Duration,
        now: DateTime<Utc>,
    ) -> Result<Vec<String>>;
}

/// Log source that never has anything to report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLogs;

impl LogSource for NoLogs {
    fn recent_errors(&self, _: &str, _: Duration, _: DateTime<Utc>) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}

/// Reads error lines from a local log file.
///
/// Lines are kept when they match `ERROR|Exception|Failed`. Lines that start
/// with an RFC 3339 timestamp older than the lookback are dropped; lines
/// without a leading timestamp are always kept. The file is assumed to be
/// in append order, so the newest lines are at the end.
#[derive(Debug, Clone)]
pub struct FileLogSource {
    path: PathBuf,
    limit: usize,
}

impl FileLogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            limit: MAX_LOG_LINES,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

fn leading_timestamp(line: &str) -> Option<DateTime<Utc>> {
    let token = line.split_whitespace().next()?;
    DateTime::parse_from_rfc3339(token)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

impl LogSource for FileLogSource {
    fn recent_errors(
        &self,
        _alarm_name: &str,
        lookback: Duration,
        now: DateTime<Utc>,
    ) -> Result<Vec<String>> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to read log file {:?}", self.path))?;
        let cutoff = now.checked_sub_signed(lookback);
        let mut recent = VecDeque::with_capacity(self.limit);

        // Lines are decoded one at a time so a stray non-UTF-8 byte only
        // affects its own line.
        for raw in BufReader::new(file).split(b'\n') {
            let raw = raw.with_context(|| format!("Failed to read log file {:?}", self.path))?;
            let raw = raw.strip_suffix(b"\r").unwrap_or(&raw);
            let line = String::from_utf8_lossy(raw);

            if !ERROR_LINE.is_match(&line) {
                continue;
            }
            let in_window = match (leading_timestamp(&line), cutoff) {
                (Some(ts), Some(cutoff)) => ts >= cutoff,
                _ => true,
            };
            if !in_window || self.limit == 0 {
                continue;
            }

            if recent.len() == self.limit {
                recent.pop_front();
            }
            recent.push_back(line.into_owned());
        }

        Ok(recent.into_iter().rev().collect())
    }
}
