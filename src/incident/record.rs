//! Incident history records.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::{AlarmEvent, IncidentId};

/// How long incident records are kept before they expire.
pub const RECORD_RETENTION_DAYS: i64 = 90;

/// Lifecycle status of an incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentStatus {
    /// Recorded by the deduplicator, not yet picked up.
    #[default]
    New,
    /// The handler is working on it.
    Processing,
    /// A resolution was produced.
    Completed,
    /// Handling failed; humans have been alerted.
    Failed,
}

impl fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::Processing => write!(f, "processing"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// One occurrence of an incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRecord {
    pub incident_id: IncidentId,
    /// Occurrence time in epoch milliseconds.
    pub timestamp: i64,
    pub status: IncidentStatus,
    pub alarm_name: String,
    pub alarm_state: String,
    pub region: String,
    pub account: String,
    pub original_event: AlarmEvent,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Expiry in epoch seconds.
    pub ttl: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

impl IncidentRecord {
    /// Create a `new` record for an alarm occurrence.
    pub fn new(incident_id: IncidentId, event: &AlarmEvent, now: DateTime<Utc>) -> Self {
        Self {
            incident_id,
            timestamp: now.timestamp_millis(),
            status: IncidentStatus::New,
            alarm_name: event.alarm_name().to_string(),
            alarm_state: event.state().to_string(),
            region: event.region.clone(),
            account: event.account.clone(),
            original_event: event.clone(),
            created_at: now,
            updated_at: None,
            ttl: (now + Duration::days(RECORD_RETENTION_DAYS)).timestamp(),
            result: None,
        }
    }

    /// Apply a status transition.
    pub fn set_status(&mut self, status: IncidentStatus, result: Option<Value>, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = Some(now);
        if result.is_some() {
            self.result = result;
        }
    }

    /// Whether the record has passed its expiry.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.ttl
    }
}
